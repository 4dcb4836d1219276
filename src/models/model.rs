//! Model evaluation for every supported family.
//!
//! Each formula is written exactly once, generically over [`Scalar`]. The
//! minimizer instantiates it with dual numbers to get derivatives; the
//! report instantiates it with `f64`. There is no second, hand-differentiated
//! copy of any formula.
//!
//! No domain checks are performed: a zero scale parameter or an `acos`
//! argument outside `[-1, 1]` yields NaN/inf, which callers observe through
//! the residual.

use crate::domain::{ModelKind, SampleSet};
use crate::math::Scalar;

/// Predict `y(x)` for the given model kind.
///
/// # Panics
/// Panics if `params` is shorter than `model.param_count()`.
pub fn predict<S: Scalar>(model: ModelKind, params: &[S], x: f64) -> S {
    let x = S::from(x);
    match model {
        ModelKind::Line => params[0] * x + params[1],
        ModelKind::Polynomial { degree } => {
            // Horner: ((pn*x + pn-1)*x + ...)*x + p0
            params[..=degree]
                .iter()
                .rev()
                .fold(S::zero(), |acc, &p| acc * x + p)
        }
        ModelKind::Catenary => params[0] * (-(x - params[1]) / params[0]).cosh() + params[2],
        ModelKind::Exponential => params[0] * (-(x - params[2]) / params[1]).exp() + params[3],
        ModelKind::InverseCycloid => {
            let theta = (S::from(1.0) - (x - params[2]) / params[0]).acos();
            params[0] * (theta - theta.sin()) + params[1]
        }
    }
}

/// Default starting point for the minimizer.
///
/// Line and polynomial fits are convex in their parameters, so any start
/// works. The exponential start is a fixed default for data on a `0..50`
/// scale. The catenary start is read off the samples (see [`catenary_guess`]).
/// The inverse-cycloid start is derived from the
/// (already swapped) samples so that `1 - (x-p2)/p0` stays strictly inside
/// `(-1, 1)` for every sample.
pub fn initial_guess(model: ModelKind, samples: &SampleSet) -> Vec<f64> {
    match model {
        ModelKind::Line => vec![1.0; 2],
        ModelKind::Polynomial { degree } => vec![1.0; degree + 1],
        ModelKind::Catenary => catenary_guess(samples),
        ModelKind::Exponential => vec![10.0, 2.0, 0.0, 0.0],
        ModelKind::InverseCycloid => {
            let (x_min, x_max) = samples.x_range().unwrap_or((0.0, 1.0));
            let (y_min, _) = samples.y_range().unwrap_or((0.0, 1.0));
            let span = (x_max - x_min).max(1e-6);
            vec![0.51 * span, y_min, x_min - 0.01 * span]
        }
    }
}

/// Catenary start with `p0` on the same side of zero as the answer.
///
/// `p0*cosh(..)` opens upward for `p0 > 0` and downward for `p0 < 0`, and the
/// fit cannot cross `p0 = 0`. Samples lying above the chord between the
/// outermost points mean a downward shape. The vertex starts at the highest
/// (or lowest) sample and `|p0|` at a quarter of the x span.
fn catenary_guess(samples: &SampleSet) -> Vec<f64> {
    let fallback = vec![-8.0, 19.0, 40.0];

    let Some((x_min, x_max)) = samples.x_range().filter(|(a, b)| b > a) else {
        return fallback;
    };
    let finite: Vec<(f64, f64)> = samples
        .iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    let y_at = |target: f64| finite.iter().find(|(x, _)| *x == target).map(|&(_, y)| y);
    let (Some(y_left), Some(y_right)) = (y_at(x_min), y_at(x_max)) else {
        return fallback;
    };

    let chord = |x: f64| y_left + (y_right - y_left) * (x - x_min) / (x_max - x_min);
    let bulge: f64 = finite.iter().map(|&(x, y)| y - chord(x)).sum();
    let opens_down = bulge > 0.0;

    let vertex = if opens_down {
        finite.iter().copied().max_by(|a, b| a.1.total_cmp(&b.1))
    } else {
        finite.iter().copied().min_by(|a, b| a.1.total_cmp(&b.1))
    };
    let Some((vx, vy)) = vertex else {
        return fallback;
    };

    let scale = 0.25 * (x_max - x_min);
    let p0 = if opens_down { -scale } else { scale };
    vec![p0, vx, vy - p0]
}
