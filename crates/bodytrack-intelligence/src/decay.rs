// ABOUTME: Levenberg-Marquardt fit of an exponential heart-rate recovery curve
// ABOUTME: Models y = a * exp(-b * t) + c and reports the decay rate b as heart-rate lifetime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Heart-rate decay fitting
//!
//! After exercise the heart rate relaxes towards a resting asymptote. The
//! recovery is modelled as `y(t) = a * exp(-b * t) + c` and fitted to the
//! `(t, heart_rate)` samples by damped least squares (Levenberg-Marquardt).
//!
//! The fitter is bounded by [`DecayFitConfig::max_iterations`] and never
//! substitutes a default value: a fit that does not converge is an error.

use bodytrack_core::constants::limits::MIN_DECAY_SAMPLES;
use bodytrack_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Damping above this bound means no descent direction is left
const MAX_DAMPING: f64 = 1e16;

/// Floor applied to diagonal entries before they are scaled by the damping
const MIN_DIAGONAL: f64 = 1e-12;

/// One heart-rate reading during recovery
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecaySample {
    /// Elapsed time since the end of effort, in the caller's time unit
    pub t: f64,
    /// Heart rate in beats per minute
    pub heart_rate: f64,
}

impl DecaySample {
    /// Pair an elapsed time with a heart rate
    #[must_use]
    pub const fn new(t: f64, heart_rate: f64) -> Self {
        Self { t, heart_rate }
    }
}

/// Fitted recovery curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayFit {
    /// Amplitude
    pub a: f64,
    /// Decay rate, persisted as heart-rate lifetime
    pub b: f64,
    /// Asymptote
    pub c: f64,
    /// Residual sum of squares at the solution
    pub residual_sum_squares: f64,
    /// Iterations used
    pub iterations: u32,
}

impl DecayFit {
    /// Evaluate the fitted curve at `t`
    #[must_use]
    pub fn predict(&self, t: f64) -> f64 {
        self.a.mul_add((-self.b * t).exp(), self.c)
    }
}

/// Solver settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayFitConfig {
    /// Iteration budget
    pub max_iterations: u32,
    /// Relative tolerance for step size and cost improvement
    pub tolerance: f64,
    /// Starting damping factor
    pub initial_damping: f64,
}

impl Default for DecayFitConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerance: 1e-10,
            initial_damping: 1e-3,
        }
    }
}

type Params = [f64; 3];

/// Levenberg-Marquardt solver for the recovery model
#[derive(Debug, Clone, Copy, Default)]
pub struct DecayFitter {
    config: DecayFitConfig,
}

impl DecayFitter {
    /// Create a fitter with the given settings
    #[must_use]
    pub const fn new(config: DecayFitConfig) -> Self {
        Self { config }
    }

    /// Settings in use
    #[must_use]
    pub const fn config(&self) -> &DecayFitConfig {
        &self.config
    }

    /// Fit the recovery curve to `samples`
    ///
    /// # Errors
    ///
    /// - `InsufficientSamples` with fewer than three samples, fewer than
    ///   three distinct times, or non-finite values
    /// - `FitNotConverged` when the objective becomes non-finite, the damping
    ///   overflows, or the iteration budget runs out
    pub fn fit(&self, samples: &[DecaySample]) -> AppResult<DecayFit> {
        validate(samples)?;

        let mut params = initial_guess(samples);
        let mut cost = sum_squares(samples, params);
        if !cost.is_finite() {
            return Err(AppError::fit_not_converged(
                "objective is not finite at the starting point",
            ));
        }

        let tolerance = self.config.tolerance;
        let mut damping = self.config.initial_damping;

        for iteration in 1..=self.config.max_iterations {
            let (mut normal, gradient) = normal_equations(samples, params);
            for (i, row) in normal.iter_mut().enumerate() {
                row[i] += damping * row[i].max(MIN_DIAGONAL);
            }

            let Some(step) = solve3(normal, gradient) else {
                damping *= 10.0;
                if damping > MAX_DAMPING {
                    return Err(AppError::fit_not_converged("damping factor overflowed"));
                }
                continue;
            };

            let candidate = [
                params[0] + step[0],
                params[1] + step[1],
                params[2] + step[2],
            ];
            let candidate_cost = sum_squares(samples, candidate);
            let small_step = norm(step) <= tolerance * (norm(params) + tolerance);

            debug!(
                iteration,
                cost,
                candidate_cost,
                damping,
                "Decay fit iteration"
            );

            if candidate_cost.is_finite() && candidate_cost < cost {
                let improvement = cost - candidate_cost;
                params = candidate;
                cost = candidate_cost;
                damping /= 10.0;
                if small_step || improvement <= tolerance * cost {
                    return Ok(finish(params, cost, iteration));
                }
            } else {
                if small_step {
                    return Ok(finish(params, cost, iteration));
                }
                damping *= 10.0;
                if damping > MAX_DAMPING {
                    return Err(AppError::fit_not_converged("damping factor overflowed"));
                }
            }
        }

        Err(AppError::fit_not_converged(format!(
            "no convergence within {} iterations",
            self.config.max_iterations
        )))
    }
}

fn finish(params: Params, cost: f64, iterations: u32) -> DecayFit {
    let [a, b, c] = params;
    debug!(a, b, c, rss = cost, iterations, "Decay fit converged");
    DecayFit {
        a,
        b,
        c,
        residual_sum_squares: cost,
        iterations,
    }
}

fn validate(samples: &[DecaySample]) -> AppResult<()> {
    if samples.len() < MIN_DECAY_SAMPLES {
        return Err(AppError::insufficient_samples(format!(
            "need at least {MIN_DECAY_SAMPLES} samples, got {}",
            samples.len()
        )));
    }
    if samples
        .iter()
        .any(|s| !s.t.is_finite() || !s.heart_rate.is_finite())
    {
        return Err(AppError::insufficient_samples(
            "samples must be finite numbers",
        ));
    }

    let mut times: Vec<f64> = samples.iter().map(|s| s.t).collect();
    times.sort_by(f64::total_cmp);
    times.dedup();
    if times.len() < MIN_DECAY_SAMPLES {
        return Err(AppError::insufficient_samples(format!(
            "need at least {MIN_DECAY_SAMPLES} distinct times, got {}",
            times.len()
        )));
    }
    Ok(())
}

/// Starting point from a log-linear regression against a shifted asymptote
fn initial_guess(samples: &[DecaySample]) -> Params {
    let (t_min, t_max) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s.t), hi.max(s.t))
        });
    let (y_min, y_max) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s.heart_rate), hi.max(s.heart_rate))
        });

    let first = samples
        .iter()
        .min_by(|l, r| l.t.total_cmp(&r.t))
        .map_or(y_max, |s| s.heart_rate);
    let last = samples
        .iter()
        .max_by(|l, r| l.t.total_cmp(&r.t))
        .map_or(y_min, |s| s.heart_rate);
    let decaying = first >= last;

    let span = y_max - y_min;
    let margin = if span > 0.0 { 0.1 * span } else { 1.0 };
    let c0 = if decaying { y_min - margin } else { y_max + margin };

    let n = samples.len() as f64;
    let xs: Vec<f64> = samples.iter().map(|s| s.t).collect();
    let ys: Vec<f64> = samples
        .iter()
        .map(|s| (s.heart_rate - c0).abs().ln())
        .collect();

    let sum_x = xs.iter().sum::<f64>();
    let sum_y = ys.iter().sum::<f64>();
    let sum_xx = xs.iter().map(|x| x * x).sum::<f64>();
    let sum_x_y = xs.iter().zip(&ys).map(|(x, y)| x * y).sum::<f64>();
    let mean_x = sum_x / n;
    let mean_y = sum_y / n;

    let denominator = (n * mean_x).mul_add(-mean_x, sum_xx);
    let slope = (n * mean_x).mul_add(-mean_y, sum_x_y) / denominator;
    let intercept = slope.mul_add(-mean_x, mean_y);

    let b0 = if slope.is_finite() && slope < 0.0 {
        -slope
    } else {
        1.0 / (t_max - t_min)
    };
    let magnitude = if intercept.is_finite() {
        intercept.exp()
    } else {
        span.max(1.0)
    };
    let a0 = if decaying { magnitude } else { -magnitude };

    debug!(a0, b0, c0, "Decay fit starting point");
    [a0, b0, c0]
}

fn sum_squares(samples: &[DecaySample], [a, b, c]: Params) -> f64 {
    samples
        .iter()
        .map(|s| {
            let residual = s.heart_rate - a.mul_add((-b * s.t).exp(), c);
            residual * residual
        })
        .sum()
}

/// Gauss-Newton normal equations `JᵀJ` and `Jᵀr` for the current parameters
fn normal_equations(samples: &[DecaySample], [a, b, c]: Params) -> ([Params; 3], Params) {
    let mut normal = [[0.0; 3]; 3];
    let mut gradient = [0.0; 3];
    for s in samples {
        let decay = (-b * s.t).exp();
        let jacobian = [decay, -a * s.t * decay, 1.0];
        let residual = s.heart_rate - a.mul_add(decay, c);
        for i in 0..3 {
            gradient[i] += jacobian[i] * residual;
            for j in 0..3 {
                normal[i][j] += jacobian[i] * jacobian[j];
            }
        }
    }
    (normal, gradient)
}

/// Gaussian elimination with partial pivoting; `None` when singular
fn solve3(mut matrix: [Params; 3], mut rhs: Params) -> Option<Params> {
    for col in 0..3 {
        let pivot = (col..3).max_by(|&l, &r| matrix[l][col].abs().total_cmp(&matrix[r][col].abs()))?;
        if !matrix[pivot][col].is_finite() || matrix[pivot][col].abs() < f64::MIN_POSITIVE {
            return None;
        }
        matrix.swap(col, pivot);
        rhs.swap(col, pivot);

        for row in (col + 1)..3 {
            let factor = matrix[row][col] / matrix[col][col];
            for k in col..3 {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut solution = [0.0; 3];
    for row in (0..3).rev() {
        let tail: f64 = ((row + 1)..3).map(|k| matrix[row][k] * solution[k]).sum();
        solution[row] = (rhs[row] - tail) / matrix[row][row];
    }
    solution.iter().all(|v| v.is_finite()).then_some(solution)
}

fn norm(v: Params) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}
