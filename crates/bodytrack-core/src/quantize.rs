// ABOUTME: Round-half-away-from-zero onto a fixed precision grid
// ABOUTME: Normalizes every derived or converted value before it is stored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Round `value` to the nearest multiple of `precision`, halves away from zero
///
/// `precision` must be positive; the grids in
/// [`crate::constants::precision`] are the ones used for stored values.
///
/// ```
/// use bodytrack_core::quantize::round_to;
///
/// assert!((round_to(72.26, 0.5) - 72.5).abs() < 1e-12);
/// assert!((round_to(-0.25, 0.5) + 0.5).abs() < 1e-12);
/// ```
#[must_use]
pub fn round_to(value: f64, precision: f64) -> f64 {
    if value >= 0.0 {
        (value / precision + 0.5).floor() * precision
    } else {
        (value / precision - 0.5).ceil() * precision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::precision;
    use proptest::prelude::*;

    const GRIDS: [f64; 8] = [
        precision::BODY_FAT,
        precision::BMR,
        precision::CENTIMETER,
        precision::INCH,
        precision::KILOGRAM,
        precision::POUND,
        precision::AGE,
        precision::DECAY_RATE,
    ];

    #[test]
    fn test_rounds_to_grid() {
        assert!((round_to(80.24, precision::KILOGRAM) - 80.0).abs() < 1e-12);
        assert!((round_to(80.25, precision::KILOGRAM) - 80.5).abs() < 1e-12);
        assert!((round_to(91.449, precision::CENTIMETER) - 91.4).abs() < 1e-9);
        assert!((round_to(0.18849, precision::BODY_FAT) - 0.188).abs() < 1e-12);
        assert!((round_to(1712.3456, precision::BMR) - 1712.346).abs() < 1e-9);
    }

    #[test]
    fn test_halves_round_away_from_zero() {
        assert!((round_to(2.5, 1.0) - 3.0).abs() < f64::EPSILON);
        assert!((round_to(-2.5, 1.0) + 3.0).abs() < f64::EPSILON);
        assert!((round_to(-0.75, 0.5) + 1.0).abs() < f64::EPSILON);
        assert!((round_to(-0.7, 0.5) + 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_stays_zero() {
        assert!(round_to(0.0, precision::KILOGRAM).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn prop_idempotent_on_every_grid(x in -1.0e6f64..1.0e6f64, grid in 0usize..GRIDS.len()) {
            let p = GRIDS[grid];
            let once = round_to(x, p);
            prop_assert_eq!(round_to(once, p), once);
        }

        #[test]
        fn prop_within_half_step(x in -1.0e6f64..1.0e6f64, grid in 0usize..GRIDS.len()) {
            let p = GRIDS[grid];
            prop_assert!((round_to(x, p) - x).abs() <= p / 2.0 + 1e-6);
        }
    }
}
