//! The numeric contract shared by every model formula.
//!
//! A formula written against [`Scalar`] can be evaluated with plain `f64`
//! (reporting, validation) or with a forward-mode dual number from `num-dual`
//! (Jacobian columns for the minimizer). Both instantiations run the
//! same code, so the value part of a dual evaluation always agrees with the
//! plain evaluation.
//!
//! Only the operations the model family needs are part of the contract.

use std::ops::{Add, Div, Mul, Neg, Sub};

use num_dual::{Dual64, DualNum};

/// Arithmetic and transcendental operations required by model formulas.
///
/// Constants enter a formula through `From<f64>`, e.g. `S::from(x)`.
pub trait Scalar:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + From<f64>
{
    /// Additive identity.
    fn zero() -> Self {
        Self::from(0.0)
    }

    fn exp(self) -> Self;
    fn cosh(self) -> Self;
    fn acos(self) -> Self;
    fn sin(self) -> Self;

    /// The plain value, with any derivative information dropped.
    fn value(self) -> f64;
}

impl Scalar for f64 {
    fn exp(self) -> Self {
        f64::exp(self)
    }

    fn cosh(self) -> Self {
        f64::cosh(self)
    }

    fn acos(self) -> Self {
        f64::acos(self)
    }

    fn sin(self) -> Self {
        f64::sin(self)
    }

    fn value(self) -> f64 {
        self
    }
}

macro_rules! impl_scalar_for_dual {
    ($($ty:ty),*) => {
        $(
            impl Scalar for $ty {
                fn exp(self) -> Self {
                    <$ty as DualNum<f64>>::exp(&self)
                }

                fn cosh(self) -> Self {
                    <$ty as DualNum<f64>>::cosh(&self)
                }

                fn acos(self) -> Self {
                    <$ty as DualNum<f64>>::acos(&self)
                }

                fn sin(self) -> Self {
                    <$ty as DualNum<f64>>::sin(&self)
                }

                fn value(self) -> f64 {
                    self.re
                }
            }
        )*
    };
}

impl_scalar_for_dual!(Dual64);
