//! Newton-Raphson with a numerical derivative.

use crate::error::{MathError, MathResult};
use crate::solvers::{FiniteDifference, SolverConfig, SolverResult};

/// Newton-Raphson with a finite-difference derivative.
///
/// Uses the iteration `x_{n+1} = x_n - f(x_n) / f'(x_n)` and stops as soon as
/// `|f(x_n)| < config.tolerance`. The forward scheme reuses `f(x)` from the
/// residual check, so each iteration costs two evaluations; the central
/// scheme costs three.
///
/// # Errors
///
/// - [`MathError::DivisionByZero`] if `|f'(x)|` drops below
///   `config.derivative_floor` (or is not finite)
/// - [`MathError::ConvergenceFailed`] if the iteration budget runs out
///
/// Both errors carry the last iterate, see [`MathError::last_estimate`].
///
/// # Example
///
/// ```rust
/// use basis_math::solvers::{newton_raphson_numerical, FiniteDifference, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result =
///     newton_raphson_numerical(f, 1.5, FiniteDifference::default(), &SolverConfig::default())
///         .unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson_numerical<F>(
    f: F,
    initial_guess: f64,
    scheme: FiniteDifference,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        let fx = f(x);

        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        let dfx = scheme.derivative(&f, x, fx);

        // Written so that NaN also fails the check.
        if !(dfx.abs() >= config.derivative_floor) {
            return Err(MathError::DivisionByZero { value: dfx, at: x });
        }

        x -= fx / dfx;
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f(x).abs(),
        x,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result =
            newton_raphson_numerical(f, 1.5, FiniteDifference::default(), &SolverConfig::default())
                .unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert!(result.iterations < 10);
    }

    #[test]
    fn test_forward_difference() {
        let f = |x: f64| x.exp() - 3.0;

        let config = SolverConfig::new(1e-12, 50);
        let result =
            newton_raphson_numerical(f, 1.0, FiniteDifference::Forward(1e-7), &config).unwrap();

        assert_relative_eq!(result.root, 3.0_f64.ln(), epsilon = 1e-10);
    }

    #[test]
    fn test_already_at_root() {
        let f = |x: f64| x - 0.25;
        let result =
            newton_raphson_numerical(f, 0.25, FiniteDifference::default(), &SolverConfig::default())
                .unwrap();

        assert_eq!(result.iterations, 0);
        assert_eq!(result.root, 0.25);
    }

    #[test]
    fn test_flat_derivative_reports_position() {
        // Central difference of x^3 at 0 is h^2, far below the floor.
        let f = |x: f64| x * x * x - 1.0;

        let err =
            newton_raphson_numerical(f, 0.0, FiniteDifference::Central(1e-8), &SolverConfig::default())
                .unwrap_err();

        assert!(matches!(err, MathError::DivisionByZero { .. }));
        assert_eq!(err.last_estimate(), Some(0.0));
    }

    #[test]
    fn test_budget_exhausted_keeps_last_iterate() {
        let f = |x: f64| x.atan() - 1.0;

        let config = SolverConfig::new(1e-14, 1);
        let err = newton_raphson_numerical(f, 0.0, FiniteDifference::Central(1e-6), &config)
            .unwrap_err();

        match err {
            MathError::ConvergenceFailed {
                iterations,
                last_estimate,
                ..
            } => {
                assert_eq!(iterations, 1);
                // One step from 0 with f'(0) = 1 lands on 1.
                assert_relative_eq!(last_estimate, 1.0, epsilon = 1e-9);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
