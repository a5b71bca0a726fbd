//! Bracketed root finding for one-dimensional residuals.
//!
//! Used where a design variable has no closed form, such as the neutral
//! axis of a transition-zone section where φ itself depends on `c`.

use tracing::trace;

use crate::errors::{CalcError, CalcResult};

/// Convergence controls for [`solve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionConfig {
    /// Stop when the bracket is narrower than this
    pub x_abs_tol: f64,
    /// Stop when |residual| is at most this
    pub residual_tol: f64,
    pub max_iters: usize,
}

impl Default for BisectionConfig {
    fn default() -> Self {
        BisectionConfig {
            x_abs_tol: 1e-9,
            residual_tol: 1e-6,
            max_iters: 200,
        }
    }
}

/// Find `x` in `bracket` where `residual(x)` crosses zero.
///
/// # Errors
///
/// `CalculationFailed` when the bracket is not finite, the residual does not
/// change sign across it, a residual is not finite, or the iteration limit is
/// reached first.
pub fn solve<F>(residual: F, bracket: [f64; 2], config: &BisectionConfig, what: &str) -> CalcResult<f64>
where
    F: Fn(f64) -> f64,
{
    let [lo, hi] = bracket;
    if !lo.is_finite() || !hi.is_finite() || lo == hi {
        return Err(CalcError::calculation_failed(
            what,
            format!("invalid bracket [{}, {}]", lo, hi),
        ));
    }
    let (mut left, mut right) = if lo < hi { (lo, hi) } else { (hi, lo) };

    let mut left_residual = checked(&residual, left, what)?;
    if left_residual.abs() <= config.residual_tol {
        return Ok(left);
    }
    let right_residual = checked(&residual, right, what)?;
    if right_residual.abs() <= config.residual_tol {
        return Ok(right);
    }

    if left_residual.signum() == right_residual.signum() {
        return Err(CalcError::calculation_failed(
            what,
            format!(
                "no sign change on [{:.3}, {:.3}] (residuals {:.3e}, {:.3e})",
                left, right, left_residual, right_residual
            ),
        ));
    }

    for iter in 1..=config.max_iters {
        let mid = 0.5 * (left + right);
        let mid_residual = checked(&residual, mid, what)?;
        trace!(iter, left, right, mid, mid_residual, "bisection step");

        if (right - left).abs() <= config.x_abs_tol || mid_residual.abs() <= config.residual_tol {
            return Ok(mid);
        }

        if left_residual.signum() == mid_residual.signum() {
            left = mid;
            left_residual = mid_residual;
        } else {
            right = mid;
        }
    }

    Err(CalcError::calculation_failed(
        what,
        format!("did not converge in {} iterations", config.max_iters),
    ))
}

fn checked<F: Fn(f64) -> f64>(residual: &F, x: f64, what: &str) -> CalcResult<f64> {
    let value = residual(x);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::calculation_failed(
            what,
            format!("residual is not finite at x = {}", x),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_finds_square_root() {
        let config = BisectionConfig {
            residual_tol: 0.0,
            ..BisectionConfig::default()
        };
        let root = solve(|x| x * x - 2.0, [0.0, 2.0], &config, "sqrt").unwrap();
        assert_relative_eq!(root, 2.0_f64.sqrt(), epsilon = 1e-8);
    }

    #[test]
    fn test_residual_tolerance_stops_early() {
        let root = solve(|x| x * x - 2.0, [0.0, 2.0], &BisectionConfig::default(), "sqrt").unwrap();
        assert!((root * root - 2.0).abs() <= 1e-6);
    }

    #[test]
    fn test_reversed_bracket() {
        let root = solve(|x| x - 1.5, [3.0, 0.0], &BisectionConfig::default(), "line").unwrap();
        assert_relative_eq!(root, 1.5, epsilon = 1e-8);
    }

    #[test]
    fn test_root_at_endpoint() {
        let root = solve(|x| x - 1.0, [1.0, 4.0], &BisectionConfig::default(), "line").unwrap();
        assert_eq!(root, 1.0);
    }

    #[test]
    fn test_no_sign_change() {
        let err = solve(|x| x * x + 1.0, [-1.0, 1.0], &BisectionConfig::default(), "parabola").unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_invalid_bracket() {
        let config = BisectionConfig::default();
        assert!(solve(|x| x, [1.0, 1.0], &config, "zero width").is_err());
        assert!(solve(|x| x, [f64::NAN, 1.0], &config, "nan").is_err());
    }

    #[test]
    fn test_iteration_limit() {
        let config = BisectionConfig {
            x_abs_tol: 0.0,
            residual_tol: 0.0,
            max_iters: 3,
        };
        let err = solve(|x| x - 0.3, [0.0, 1.0], &config, "limited").unwrap_err();
        assert!(err.to_string().contains("did not converge"));
    }
}
