use nalgebra as na;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error, PartialEq)]
pub enum RootError {
    #[error("Root is not bracketed: f({lower})={f_lower}, f({upper})={f_upper}")]
    NotBracketed {
        lower: f64,
        upper: f64,
        f_lower: f64,
        f_upper: f64,
    },

    #[error("Objective is not finite at t={0}")]
    NonFinite(f64),

    #[error("Bisection did not converge after {0} iterations")]
    NotConverged(usize),
}

/// Stopping rules for [bisect].
///
/// The search stops once the half-width of the bracket drops below
/// `xtol + rtol * |t|`, or once halving no longer moves the midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionOptions {
    /// Absolute tolerance on the root location
    pub xtol: f64,
    /// Relative tolerance on the root location
    pub rtol: f64,
    /// Upper bound on the number of halvings
    pub max_iter: usize,
}

impl Default for BisectionOptions {
    fn default() -> Self {
        Self {
            xtol: 2e-12,
            rtol: 4.0 * f64::EPSILON,
            max_iter: 100,
        }
    }
}

impl BisectionOptions {
    /// No tolerance: halves until the bracket cannot shrink any further in `f64`.
    pub fn machine_precision() -> Self {
        Self {
            xtol: 0.0,
            rtol: 0.0,
            max_iter: 1100,
        }
    }

    pub fn with_xtol(mut self, xtol: f64) -> Self {
        self.xtol = xtol;
        self
    }

    pub fn with_rtol(mut self, rtol: f64) -> Self {
        self.rtol = rtol;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }
}

/// Finds a root of `f` inside `[lower, upper]` by bisection.
///
/// `f(lower)` and `f(upper)` must have opposite signs (or one of them must be exactly zero).
/// An empty or badly oriented bracket is reported as [RootError::NotBracketed] rather than
/// silently returning an endpoint.
pub fn bisect<F, G>(f: G, lower: F, upper: F, options: &BisectionOptions) -> Result<F, RootError>
where
    F: na::RealField + Copy,
    G: Fn(F) -> F,
{
    let zero = F::zero();
    let f_lower = f(lower);
    let f_upper = f(upper);

    if !f_lower.is_finite() {
        return Err(RootError::NonFinite(lower.to_subset_unchecked()));
    }
    if !f_upper.is_finite() {
        return Err(RootError::NonFinite(upper.to_subset_unchecked()));
    }
    if f_lower == zero {
        return Ok(lower);
    }
    if f_upper == zero {
        return Ok(upper);
    }
    if upper < lower || (f_lower > zero) == (f_upper > zero) {
        return Err(RootError::NotBracketed {
            lower: lower.to_subset_unchecked(),
            upper: upper.to_subset_unchecked(),
            f_lower: f_lower.to_subset_unchecked(),
            f_upper: f_upper.to_subset_unchecked(),
        });
    }

    let half = na::convert::<f64, F>(0.5);
    let xtol = na::convert::<f64, F>(options.xtol);
    let rtol = na::convert::<f64, F>(options.rtol);

    let mut start = lower;
    let mut width = upper - lower;
    for iteration in 0..options.max_iter {
        width *= half;
        let mid = start + width;
        if mid == start {
            trace!(iterations = iteration + 1, root = %mid, "bisection exhausted precision");
            return Ok(mid);
        }
        let f_mid = f(mid);
        if !f_mid.is_finite() {
            return Err(RootError::NonFinite(mid.to_subset_unchecked()));
        }

        // Keep the half whose left end shares the sign of f(lower).
        if f_mid == zero || (f_mid > zero) == (f_lower > zero) {
            start = mid;
        }
        if f_mid == zero || width.abs() < xtol + rtol * mid.abs() {
            trace!(iterations = iteration + 1, root = %mid, "bisection converged");
            return Ok(mid);
        }
    }

    Err(RootError::NotConverged(options.max_iter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_square_root_of_two() {
        let root = bisect(|x: f64| x * x - 2.0, 0.0, 2.0, &BisectionOptions::default()).unwrap();
        assert_relative_eq!(root, 2f64.sqrt(), epsilon = 1e-11);
    }

    #[test]
    fn test_decreasing_function() {
        let root = bisect(|x: f64| 1.0 - x, -3.0, 10.0, &BisectionOptions::default()).unwrap();
        assert_relative_eq!(root, 1.0, epsilon = 1e-11);
    }

    #[test]
    fn test_root_at_endpoint() {
        let options = BisectionOptions::default();
        assert_eq!(bisect(|x: f64| x, 0.0, 1.0, &options), Ok(0.0));
        assert_eq!(bisect(|x: f64| x - 1.0, 0.0, 1.0, &options), Ok(1.0));
    }

    #[test]
    fn test_not_bracketed() {
        let result = bisect(|x: f64| x * x + 1.0, -1.0, 1.0, &BisectionOptions::default());
        assert!(matches!(result, Err(RootError::NotBracketed { .. })));
    }

    #[test]
    fn test_reversed_bracket() {
        let result = bisect(|x: f64| x, 1.0, -1.0, &BisectionOptions::default());
        assert!(matches!(result, Err(RootError::NotBracketed { .. })));
    }

    #[test]
    fn test_non_finite_objective() {
        let result = bisect(|x: f64| 1.0 / x, 0.0, 1.0, &BisectionOptions::default());
        assert_eq!(result, Err(RootError::NonFinite(0.0)));
    }

    #[test]
    fn test_iteration_limit() {
        let options = BisectionOptions::default()
            .with_xtol(0.0)
            .with_rtol(0.0)
            .with_max_iter(3);
        let result = bisect(|x: f64| x - 0.3, 0.0, 1.0, &options);
        assert_eq!(result, Err(RootError::NotConverged(3)));
    }

    #[test]
    fn test_machine_precision() {
        let options = BisectionOptions::machine_precision();
        let root = bisect(|x: f64| x * x - 2.0, 0.0, 2.0, &options).unwrap();
        assert_relative_eq!(root, 2f64.sqrt(), max_relative = 4.0 * f64::EPSILON);

        // An absolute tolerance would stop far above a root this small.
        let root = bisect(|x: f64| x - 1e-20, 0.0, 1.0, &options).unwrap();
        assert_relative_eq!(root, 1e-20, max_relative = 1e-12);
    }

    #[test]
    fn test_f32() {
        let options = BisectionOptions::default().with_xtol(1e-6);
        let root = bisect(|x: f32| x * x * x - 8.0, 0.0, 5.0, &options).unwrap();
        assert_relative_eq!(root, 2.0, epsilon = 1e-5);
    }
}
