/// Application-level error: a process exit code plus a human-readable message.
///
/// Only the outer layers (ingest, exports, CLI validation) produce these. The
/// fitting core reports numeric trouble through non-finite values and the
/// minimizer's convergence flag instead.
#[derive(Clone, PartialEq, Eq)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

/// Bad input file, bad flag value, or a file that could not be read/written.
pub const EXIT_INPUT: u8 = 2;
/// The data file parsed but held no samples.
pub const EXIT_NO_DATA: u8 = 3;
pub const EXIT_INTERNAL: u8 = 4;

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self::new(EXIT_NO_DATA, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(EXIT_INTERNAL, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the binary should follow the message with a usage line.
    pub fn wants_usage_hint(&self) -> bool {
        self.exit_code == EXIT_INPUT
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
