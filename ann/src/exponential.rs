// Coefficients of the fast exp(-x) approximation (Leon Bottou).
// Together they are the 4th order Taylor expansion of exp(x/8).
const A0: f64 = 1.0;
const A1: f64 = 0.125;
const A2: f64 = 0.0078125;
const A3: f64 = 0.00032552083;
const A4: f64 = 1.0172526e-5;

/// Past this point the approximation is treated as exactly zero.
pub const FAST_EXP_CUTOFF: f64 = 13.0;

/// Approximates `exp(-x)` for non-negative `x`.
pub trait NegExp: Send + Sync {
    fn exp_neg(&self, x: f64) -> f64;
}

/// Polynomial approximation of `exp(-x)`, about 3e-5 off at worst on `[0, 13)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FastNegExp;

/// `exp(-x)` computed with `f64::exp`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExactNegExp;

impl NegExp for FastNegExp {
    fn exp_neg(&self, x: f64) -> f64 {
        fast_exp_neg(x)
    }
}

impl NegExp for ExactNegExp {
    fn exp_neg(&self, x: f64) -> f64 {
        (-x).exp()
    }
}

/// Fast approximation of `exp(-x)` for `x >= 0`.
///
/// Evaluates `p(x) ~ exp(x/8)`, squares it three times and takes the reciprocal.
/// Returns `0.0` for `x >= 13`.
pub fn fast_exp_neg(x: f64) -> f64 {
    if x < FAST_EXP_CUTOFF {
        let mut y = A0 + x * (A1 + x * (A2 + x * (A3 + x * A4)));
        y *= y;
        y *= y;
        y *= y;
        1.0 / y
    } else {
        0.0
    }
}
