// ABOUTME: One-repetition maximum estimate from a submaximal set
// ABOUTME: Wathen (1994) exponential equation evaluated in pounds, reported in kilograms
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use bodytrack_core::units::{lb_to_kg, WeightUnit};

/// Estimate the one-repetition maximum in kilograms
///
/// `weight` is the load lifted for `reps` repetitions, expressed in `unit`.
/// The equation runs in pounds and the result is converted back to kilograms
/// exactly once.
///
/// # Scientific Reference
///
/// Wathen, D. (1994). Load assignment. In T.R. Baechle (Ed.), *Essentials of
/// Strength Training and Conditioning* (pp. 435-439). Human Kinetics. Reported
/// by `LeSuer` et al. (1997) as the best-correlated predictor among common
/// equations.
#[must_use]
pub fn one_rep_max(weight: f64, reps: u32, unit: WeightUnit) -> f64 {
    let pounds = unit.to_lb(weight);
    let estimate = 100.0 * pounds / (48.8 + 53.8 * (-0.075 * f64::from(reps)).exp());
    lb_to_kg(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_rep_in_kilograms() {
        let denominator = 48.8 + 53.8 * (-0.075f64).exp();
        let expected = 100.0 * (100.0 * 2.20462) / denominator / 2.20462;
        assert!((one_rep_max(100.0, 1, WeightUnit::Kg) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_pound_input_is_converted_once() {
        let from_lb = one_rep_max(220.462, 5, WeightUnit::Lb);
        let from_kg = one_rep_max(100.0, 5, WeightUnit::Kg);
        assert!((from_lb - from_kg).abs() < 1e-9);
    }

    #[test]
    fn test_more_reps_raise_the_estimate() {
        let three = one_rep_max(80.0, 3, WeightUnit::Kg);
        let eight = one_rep_max(80.0, 8, WeightUnit::Kg);
        assert!(eight > three);
        assert!(three > 80.0);
    }
}
