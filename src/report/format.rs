//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized

use std::path::Path;

use crate::domain::{FitOutcome, SampleSet};

/// One-paragraph description of the loaded dataset.
pub fn format_dataset(path: &Path, samples: &SampleSet) -> String {
    let mut out = String::new();
    out.push_str("=== curvefit ===\n");
    out.push_str(&format!("Data: {}\n", path.display()));
    out.push_str(&format!("Samples: n={}", samples.len()));
    if let (Some((x0, x1)), Some((y0, y1))) = (samples.x_range(), samples.y_range()) {
        out.push_str(&format!(" | x=[{x0:.4}, {x1:.4}] | y=[{y0:.4}, {y1:.4}]"));
    }
    out.push('\n');
    out
}

/// Report block for a single fitted model.
pub fn format_outcome(outcome: &FitOutcome) -> String {
    let mut out = String::new();
    out.push_str(&format!("---{} Fitting---\n", outcome.display_name));
    if outcome.swapped {
        out.push_str("(fitted with x and y swapped)\n");
    }

    let status = if outcome.converged { "converged" } else { "NOT converged" };
    out.push_str(&format!(
        "status: {status} after {} evaluations ({:?})\n",
        outcome.evaluations, outcome.termination
    ));
    out.push_str(&format!("initial: {}\n", fmt_vec(&outcome.initial)));
    out.push_str(&format!("params:  {}\n", fmt_vec(&outcome.params)));
    out.push_str(&format!("residual(params)={}\n", fmt_num(outcome.residual)));
    out.push_str(&format!("rmse={}\n", fmt_num(outcome.rmse)));
    out
}

/// Compact comparison table across all fitted models.
pub fn format_comparison(outcomes: &[FitOutcome]) -> String {
    let mut out = String::new();
    let header = format!(
        "{:<18} {:>10} {:>14} {:>14}",
        "model", "converged", "residual", "rmse"
    );
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(format!("{:-<18} {:-<10} {:-<14} {:-<14}", "", "", "", "").trim_end());
    out.push('\n');
    for o in outcomes {
        out.push_str(
            format!(
                "{:<18} {:>10} {:>14} {:>14}",
                o.display_name,
                if o.converged { "yes" } else { "no" },
                fmt_num(o.residual),
                fmt_num(o.rmse),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}

fn fmt_num(v: f64) -> String {
    if v.is_finite() { format!("{v:.6e}") } else { format!("{v}") }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ModelKind, Termination};

    fn outcome(converged: bool, residual: f64) -> FitOutcome {
        FitOutcome {
            model: ModelKind::Line,
            display_name: "Line".to_string(),
            initial: vec![1.0, 1.0],
            params: vec![2.0, 1.0],
            residual,
            rmse: residual.sqrt(),
            n: 3,
            converged,
            evaluations: 4,
            termination: if converged {
                Termination::Converged
            } else {
                Termination::LostPatience
            },
            swapped: false,
        }
    }

    #[test]
    fn outcome_block_layout() {
        let txt = format_outcome(&outcome(true, 0.25));
        let expected = concat!(
            "---Line Fitting---\n",
            "status: converged after 4 evaluations (Converged)\n",
            "initial: [1.000000, 1.000000]\n",
            "params:  [2.000000, 1.000000]\n",
            "residual(params)=2.500000e-1\n",
            "rmse=5.000000e-1\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn non_finite_residual_is_printed_verbatim() {
        let txt = format_outcome(&outcome(false, f64::NAN));
        assert!(txt.contains("NOT converged"));
        assert!(txt.contains("residual(params)=NaN"));
    }

    #[test]
    fn comparison_table_lists_each_model() {
        let txt = format_comparison(&[outcome(true, 0.0), outcome(false, 2.0)]);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("yes"));
        assert!(lines[3].contains("no"));
    }
}
