use std::process::ExitCode;

fn main() -> ExitCode {
    match curve_fit::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            if err.wants_usage_hint() {
                eprintln!("Usage: curvefit fit <DATA_FILE>");
            }
            ExitCode::from(err.exit_code())
        }
    }
}
