// ABOUTME: Application constants for precision grids, unit factors and input limits
// ABOUTME: Single source for numeric constants shared by estimators, store and prompts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Quantization grid per stored quantity
///
/// Every derived or converted value is rounded onto one of these grids before
/// it is stored, so reloading a record reproduces the same numbers.
pub mod precision {
    /// Body-fat fraction
    pub const BODY_FAT: f64 = 0.001;
    /// Basal metabolic rate (kcal/day)
    pub const BMR: f64 = 0.001;
    /// Lengths in centimeters
    pub const CENTIMETER: f64 = 0.1;
    /// Lengths in inches
    pub const INCH: f64 = 0.1;
    /// Masses in kilograms
    pub const KILOGRAM: f64 = 0.5;
    /// Masses in pounds
    pub const POUND: f64 = 1.0;
    /// Age in years
    pub const AGE: f64 = 0.001;
    /// Heart-rate decay rate
    pub const DECAY_RATE: f64 = 0.001;
}

/// Unit conversion factors
pub mod conversion {
    /// Centimeters per inch
    pub const CM_PER_INCH: f64 = 2.54;
    /// Pounds per kilogram
    ///
    /// Applied by multiplication for kg to lb and by division for lb to kg.
    pub const LB_PER_KG: f64 = 2.20462;
}

/// Input limits and calendar constants
pub mod limits {
    /// Minimum samples for the three-parameter decay fit
    pub const MIN_DECAY_SAMPLES: usize = 3;
    /// Lowest heart rate accepted for a decay sample (bpm)
    pub const MIN_DECAY_HEART_RATE: f64 = 60.0;
    /// Highest heart rate accepted for a decay sample (bpm)
    pub const MAX_DECAY_HEART_RATE: f64 = 200.0;
    /// Days per year used for age derivation
    pub const DAYS_PER_YEAR: f64 = 365.0;
    /// Hours in a day
    pub const HOURS_PER_DAY: u32 = 24;
    /// Minutes in an hour
    pub const MINUTES_PER_HOUR: u32 = 60;
}

/// Persisted record format
pub mod record {
    /// Default record file extension
    pub const DEFAULT_FILE_EXTENSION: &str = "dat";
    /// Date format used in the date columns
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
    /// Suffix appended to a measurement column to name its time column
    pub const MEASUREMENT_TIME_SUFFIX: &str = " measurement time";
}
