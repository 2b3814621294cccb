//! Damped Newton solver for square nonlinear systems.

use super::SystemSolverConfig;
use crate::types::SolverError;

/// Maximum number of step halvings per Newton iteration.
const MAX_BACKTRACKS: usize = 25;

/// Outcome of a nonlinear system solve.
///
/// Convergence is reported explicitly rather than inferred from the
/// parameter values: callers must check [`converged`](Self::converged)
/// before trusting [`params`](Self::params).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemSolverResult {
    /// Final parameter vector.
    pub params: Vec<f64>,
    /// Residual infinity norm at the final parameters.
    pub residual_norm: f64,
    /// Number of Newton iterations performed.
    pub iterations: usize,
    /// Whether the residual tolerance was met.
    pub converged: bool,
}

/// Damped Newton root finder for square systems F(x) = 0.
///
/// Each iteration approximates the Jacobian by forward differences,
/// computes the Newton step from `J δ = -F(x)` via Gaussian elimination
/// with partial pivoting, and backtracks (halving the step) until the
/// residual infinity norm decreases. Backtracking keeps the iteration
/// stable when the initial guess is far from the root or the residual
/// surface contains penalty plateaus.
///
/// # Termination
///
/// The solve always terminates: either the residual norm drops below the
/// configured tolerance (`converged = true`), the iteration cap is reached
/// or no descent step can be found (`converged = false`), or a structural
/// fault occurs (`Err`).
///
/// # Example
///
/// ```
/// use merton_core::math::solvers::{NewtonSystemSolver, SystemSolverConfig};
///
/// // Solve x + y = 3, x·y = 2
/// let system = |p: &[f64]| vec![p[0] + p[1] - 3.0, p[0] * p[1] - 2.0];
///
/// let solver = NewtonSystemSolver::new(SystemSolverConfig::default());
/// let result = solver.solve(system, vec![0.5, 3.5]).unwrap();
///
/// assert!(result.converged);
/// let product = result.params[0] * result.params[1];
/// assert!((product - 2.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonSystemSolver {
    config: SystemSolverConfig,
}

impl NewtonSystemSolver {
    /// Create a new solver with the given configuration.
    pub fn new(config: SystemSolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SystemSolverConfig::default(),
        }
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SystemSolverConfig {
        &self.config
    }

    /// Solve the square system `F(x) = 0` starting from `initial`.
    ///
    /// # Arguments
    ///
    /// * `system` - Function returning one residual per unknown
    /// * `initial` - Initial parameter guess
    ///
    /// # Returns
    ///
    /// * `Ok(SystemSolverResult)` - Terminated run; check `converged`
    /// * `Err(SolverError)` - The solve could not proceed at all
    ///
    /// # Errors
    ///
    /// - [`SolverError::EmptySystem`] if `initial` is empty
    /// - [`SolverError::DimensionMismatch`] if the residual count differs
    ///   from the unknown count
    /// - [`SolverError::SingularJacobian`] if no Newton step exists
    /// - [`SolverError::NumericalInstability`] if non-finite values appear
    pub fn solve<F>(&self, system: F, initial: Vec<f64>) -> Result<SystemSolverResult, SolverError>
    where
        F: Fn(&[f64]) -> Vec<f64>,
    {
        let n = initial.len();
        if n == 0 {
            return Err(SolverError::EmptySystem);
        }

        let mut x = initial;
        let mut r = system(&x);
        if r.len() != n {
            return Err(SolverError::DimensionMismatch {
                equations: r.len(),
                unknowns: n,
            });
        }
        if !all_finite(&r) {
            return Err(SolverError::NumericalInstability(
                "Residual is non-finite at the initial guess".to_string(),
            ));
        }

        let mut norm = inf_norm(&r);

        for iteration in 0..self.config.max_iterations {
            if norm < self.config.tolerance {
                return Ok(SystemSolverResult {
                    params: x,
                    residual_norm: norm,
                    iterations: iteration,
                    converged: true,
                });
            }

            let jacobian = forward_jacobian(&system, &x, &r, self.config.fd_step);

            // Newton step: J δ = -F(x)
            let neg_r: Vec<f64> = r.iter().map(|v| -v).collect();
            let delta = match solve_linear(&jacobian, &neg_r) {
                Some(d) => d,
                None => return Err(SolverError::SingularJacobian { iteration }),
            };
            if !all_finite(&delta) {
                return Err(SolverError::NumericalInstability(
                    "Newton step is non-finite".to_string(),
                ));
            }

            // Backtracking: halve the step until the residual norm drops.
            let mut step = 1.0;
            let mut accepted = false;
            for _ in 0..MAX_BACKTRACKS {
                let trial: Vec<f64> = x
                    .iter()
                    .zip(&delta)
                    .map(|(xi, di)| xi + step * di)
                    .collect();
                let trial_r = system(&trial);
                if trial_r.len() != n {
                    return Err(SolverError::DimensionMismatch {
                        equations: trial_r.len(),
                        unknowns: n,
                    });
                }
                let trial_norm = inf_norm(&trial_r);

                // all_finite guards the norm: f64::max drops NaN, so an
                // all-NaN residual would otherwise look like norm 0.
                if all_finite(&trial_r) && trial_norm < norm {
                    x = trial;
                    r = trial_r;
                    norm = trial_norm;
                    accepted = true;
                    break;
                }
                step *= 0.5;
            }

            if !accepted {
                // Stalled: no step length reduces the residual.
                return Ok(SystemSolverResult {
                    params: x,
                    residual_norm: norm,
                    iterations: iteration,
                    converged: false,
                });
            }

            if !all_finite(&x) {
                return Err(SolverError::NumericalInstability(
                    "Iteration produced non-finite parameters".to_string(),
                ));
            }
        }

        let converged = norm < self.config.tolerance;
        Ok(SystemSolverResult {
            params: x,
            residual_norm: norm,
            iterations: self.config.max_iterations,
            converged,
        })
    }
}

/// Infinity norm of a vector.
#[inline]
fn inf_norm(v: &[f64]) -> f64 {
    v.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()))
}

/// Check that every component is finite.
#[inline]
fn all_finite(v: &[f64]) -> bool {
    v.iter().all(|x| x.is_finite())
}

/// Forward-difference Jacobian, one column per unknown.
///
/// Reuses the residual `r0` at the base point so each column costs a
/// single extra system evaluation.
fn forward_jacobian<F>(system: &F, params: &[f64], r0: &[f64], fd_step: f64) -> Vec<Vec<f64>>
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    let n = params.len();
    let mut jacobian = vec![vec![0.0; n]; n];

    for j in 0..n {
        let h = fd_step * params[j].abs().max(1.0);

        let mut bumped = params.to_vec();
        bumped[j] += h;
        let r_bumped = system(&bumped);

        for (i, row) in jacobian.iter_mut().enumerate() {
            row[j] = (r_bumped[i] - r0[i]) / h;
        }
    }

    jacobian
}

/// Solve `A x = b` by Gaussian elimination with partial pivoting.
///
/// Returns `None` when a pivot is numerically zero.
fn solve_linear(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return None;
    }

    // Augmented working copy
    let mut m: Vec<Vec<f64>> = a
        .iter()
        .zip(b)
        .map(|(row, rhs)| {
            let mut r = row.clone();
            r.push(*rhs);
            r
        })
        .collect();

    for col in 0..n {
        // Partial pivoting
        let pivot_row = (col..n).max_by(|&i, &j| {
            m[i][col]
                .abs()
                .partial_cmp(&m[j][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if m[pivot_row][col].abs() < 1e-14 {
            return None;
        }
        m.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = m[row][col] / m[col][col];
            for k in col..=n {
                m[row][k] -= factor * m[col][k];
            }
        }
    }

    // Back substitution
    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut sum = m[row][n];
        for (k, xk) in x.iter().enumerate().skip(row + 1) {
            sum -= m[row][k] * xk;
        }
        x[row] = sum / m[row][row];
    }

    Some(x)
}
