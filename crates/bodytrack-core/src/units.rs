// ABOUTME: Metric and imperial conversions for lengths and masses
// ABOUTME: Typed unit tokens that normalize readings to centimeters and kilograms
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Unit conversion
//!
//! The mass factor is applied asymmetrically: `kg_to_lb` multiplies by
//! [`LB_PER_KG`] and `lb_to_kg` divides by it. Stored records depend on that
//! exact arithmetic, so no reciprocal constant is used.

use crate::constants::conversion::{CM_PER_INCH, LB_PER_KG};
use crate::constants::precision;
use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Convert centimeters to inches
#[must_use]
pub fn cm_to_inch(cm: f64) -> f64 {
    cm / CM_PER_INCH
}

/// Convert inches to centimeters
#[must_use]
pub fn inch_to_cm(inch: f64) -> f64 {
    inch * CM_PER_INCH
}

/// Convert kilograms to pounds
#[must_use]
pub fn kg_to_lb(kg: f64) -> f64 {
    kg * LB_PER_KG
}

/// Convert pounds to kilograms
#[must_use]
pub fn lb_to_kg(lb: f64) -> f64 {
    lb / LB_PER_KG
}

/// Unit of a length reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Centimeters
    Cm,
    /// Inches
    Inch,
}

impl LengthUnit {
    /// Menu order
    pub const ALL: [Self; 2] = [Self::Cm, Self::Inch];

    /// Token used in menus and parsing
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Cm => "cm",
            Self::Inch => "inch",
        }
    }

    /// Quantization grid for readings in this unit
    #[must_use]
    pub const fn precision(self) -> f64 {
        match self {
            Self::Cm => precision::CENTIMETER,
            Self::Inch => precision::INCH,
        }
    }

    /// Normalize a reading in this unit to centimeters
    #[must_use]
    pub fn to_cm(self, value: f64) -> f64 {
        match self {
            Self::Cm => value,
            Self::Inch => inch_to_cm(value),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for LengthUnit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cm" => Ok(Self::Cm),
            "inch" => Ok(Self::Inch),
            other => Err(AppError::unsupported_unit(other, "cm, inch")),
        }
    }
}

/// Unit of a mass reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    /// Kilograms
    Kg,
    /// Pounds
    Lb,
}

impl WeightUnit {
    /// Menu order
    pub const ALL: [Self; 2] = [Self::Kg, Self::Lb];

    /// Token used in menus and parsing
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Lb => "lb",
        }
    }

    /// Quantization grid for readings in this unit
    #[must_use]
    pub const fn precision(self) -> f64 {
        match self {
            Self::Kg => precision::KILOGRAM,
            Self::Lb => precision::POUND,
        }
    }

    /// Normalize a reading in this unit to kilograms
    #[must_use]
    pub fn to_kg(self, value: f64) -> f64 {
        match self {
            Self::Kg => value,
            Self::Lb => lb_to_kg(value),
        }
    }

    /// Normalize a reading in this unit to pounds
    #[must_use]
    pub fn to_lb(self, value: f64) -> f64 {
        match self {
            Self::Kg => kg_to_lb(value),
            Self::Lb => value,
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for WeightUnit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" => Ok(Self::Kg),
            "lb" => Ok(Self::Lb),
            other => Err(AppError::unsupported_unit(other, "kg, lb")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use proptest::prelude::*;

    #[test]
    fn test_length_conversions() {
        assert!((cm_to_inch(2.54) - 1.0).abs() < 1e-12);
        assert!((inch_to_cm(10.0) - 25.4).abs() < 1e-12);
        assert!((LengthUnit::Inch.to_cm(1.0) - 2.54).abs() < 1e-12);
        assert!((LengthUnit::Cm.to_cm(80.0) - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mass_factor_applied_asymmetrically() {
        assert!((kg_to_lb(1.0) - 2.20462).abs() < 1e-12);
        assert!((lb_to_kg(2.20462) - 1.0).abs() < 1e-12);
        assert!((WeightUnit::Lb.to_kg(220.462) - 100.0).abs() < 1e-9);
        assert!((WeightUnit::Kg.to_lb(100.0) - 220.462).abs() < 1e-9);
    }

    #[test]
    fn test_negative_values_pass_through() {
        assert!((cm_to_inch(-2.54) + 1.0).abs() < 1e-12);
        assert!((kg_to_lb(-1.0) + 2.20462).abs() < 1e-12);
    }

    #[test]
    fn test_unit_tokens_parse() {
        assert_eq!("CM".parse::<LengthUnit>().unwrap(), LengthUnit::Cm);
        assert_eq!(" inch ".parse::<LengthUnit>().unwrap(), LengthUnit::Inch);
        assert_eq!("lb".parse::<WeightUnit>().unwrap(), WeightUnit::Lb);

        let error = "stone".parse::<WeightUnit>().unwrap_err();
        assert_eq!(error.code, ErrorCode::UnsupportedUnit);
        let error = "m".parse::<LengthUnit>().unwrap_err();
        assert_eq!(error.code, ErrorCode::UnsupportedUnit);
    }

    proptest! {
        #[test]
        fn prop_inch_cm_round_trip(x in -1.0e9f64..1.0e9f64) {
            let back = inch_to_cm(cm_to_inch(x));
            prop_assert!((back - x).abs() <= 1e-12 * x.abs().max(1.0));
        }

        #[test]
        fn prop_lb_kg_round_trip(x in -1.0e9f64..1.0e9f64) {
            let back = lb_to_kg(kg_to_lb(x));
            prop_assert!((back - x).abs() <= 1e-12 * x.abs().max(1.0));
        }
    }
}
