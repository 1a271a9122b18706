// ABOUTME: Subject attributes, observation entries and measurement catalogs
// ABOUTME: Typed record with explicit optional fields for one day of measurements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Core data models
//!
//! An [`ObservationEntry`] is one row of a subject's history. The
//! circumference, lift and vital catalogs are enums with a fixed order; the
//! persisted column layout and the interactive prompts both iterate them
//! through their `ALL` arrays.

use crate::constants::limits::DAYS_PER_YEAR;
use crate::errors::AppError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gender used to select formula branches
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
}

impl Gender {
    /// Menu order
    pub const ALL: [Self; 2] = [Self::Male, Self::Female];

    /// Lowercase token used in records and menus
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(AppError::unsupported_gender(other)),
        }
    }
}

/// Attributes that stay constant across a subject's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Gender
    pub gender: Gender,
    /// Height in centimeters
    pub height_cm: f64,
    /// Date of birth
    pub date_of_birth: NaiveDate,
}

impl Subject {
    /// Age in years on `date`, as calendar days elapsed divided by 365
    #[must_use]
    pub fn age_on(&self, date: NaiveDate) -> f64 {
        (date - self.date_of_birth).num_days() as f64 / DAYS_PER_YEAR
    }
}

/// A value paired with the time of day it was measured
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timed<T> {
    /// Measured or derived value
    pub value: T,
    /// Time of day in fractional hours (13:30 is 13.5)
    pub time: f64,
}

impl<T> Timed<T> {
    /// Pair a value with its measurement time
    pub const fn new(value: T, time: f64) -> Self {
        Self { value, time }
    }
}

/// Body circumference sites, in record order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Circumference {
    /// Waist at its narrowest point
    WaistNarrowest,
    /// Waist at the navel
    WaistNaval,
    /// Hips at the widest point
    HipWidest,
    /// Thigh at the widest point
    ThighWidest,
    /// Neck at the narrowest point
    NeckNarrowest,
    /// Biceps at the widest point
    BicepsWidest,
    /// Forearm at the widest point
    ForearmWidest,
    /// Wrist at the narrowest point
    WristNarrowest,
    /// Calf at the widest point
    CalfWidest,
}

impl Circumference {
    /// Number of sites
    pub const COUNT: usize = 9;

    /// Every site in record order
    pub const ALL: [Self; Self::COUNT] = [
        Self::WaistNarrowest,
        Self::WaistNaval,
        Self::HipWidest,
        Self::ThighWidest,
        Self::NeckNarrowest,
        Self::BicepsWidest,
        Self::ForearmWidest,
        Self::WristNarrowest,
        Self::CalfWidest,
    ];

    /// Column name and prompt label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::WaistNarrowest => "waist size at narrowest point",
            Self::WaistNaval => "waist size at naval",
            Self::HipWidest => "hip size at widest point",
            Self::ThighWidest => "thigh size at widest point",
            Self::NeckNarrowest => "neck at narrowest point",
            Self::BicepsWidest => "biceps at widest point",
            Self::ForearmWidest => "forearm at widest point",
            Self::WristNarrowest => "wrist at narrowest point",
            Self::CalfWidest => "calf at widest point",
        }
    }

    /// Position in [`Self::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Tracked lifts, in record order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lift {
    /// Back squat
    Squat,
    /// Bench press
    BenchPress,
    /// Barbell row
    Row,
    /// Overhead press
    OverheadPress,
    /// Deadlift
    Deadlift,
}

impl Lift {
    /// Number of lifts
    pub const COUNT: usize = 5;

    /// Every lift in record order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Squat,
        Self::BenchPress,
        Self::Row,
        Self::OverheadPress,
        Self::Deadlift,
    ];

    /// Column name and prompt label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Squat => "squat",
            Self::BenchPress => "bench press",
            Self::Row => "row",
            Self::OverheadPress => "overhead press",
            Self::Deadlift => "deadlift",
        }
    }

    /// Position in [`Self::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Tracked vitals, in record order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vital {
    /// Resting heart rate in beats per minute
    RestingHeartRate,
}

impl Vital {
    /// Number of vitals
    pub const COUNT: usize = 1;

    /// Every vital in record order
    pub const ALL: [Self; Self::COUNT] = [Self::RestingHeartRate];

    /// Column name and prompt label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RestingHeartRate => "resting heart rate",
        }
    }

    /// Position in [`Self::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One day of measurements and derived metrics for a subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationEntry {
    /// Observation date; the record key
    pub date: NaiveDate,
    /// Constant subject attributes, repeated on every entry
    pub subject: Subject,
    /// Age in years on `date`
    pub age: f64,
    /// Body weight in kilograms
    pub weight: Option<Timed<f64>>,
    /// Basal metabolic rate in kcal/day
    pub bmr: Option<f64>,
    /// Body-fat fraction
    pub bf: Option<f64>,
    /// Circumferences in centimeters, indexed by [`Circumference::index`]
    pub circumferences: [Option<Timed<f64>>; Circumference::COUNT],
    /// Estimated one-rep maximum in kilograms, indexed by [`Lift::index`]
    pub lifts: [Option<Timed<f64>>; Lift::COUNT],
    /// Vitals, indexed by [`Vital::index`]
    pub vitals: [Option<Timed<u32>>; Vital::COUNT],
    /// Heart-rate recovery decay rate
    pub heart_rate_lifetime: Option<Timed<f64>>,
}

impl ObservationEntry {
    /// Entry with only its key, subject and age set
    #[must_use]
    pub const fn new(date: NaiveDate, subject: Subject, age: f64) -> Self {
        Self {
            date,
            subject,
            age,
            weight: None,
            bmr: None,
            bf: None,
            circumferences: [None; Circumference::COUNT],
            lifts: [None; Lift::COUNT],
            vitals: [None; Vital::COUNT],
            heart_rate_lifetime: None,
        }
    }

    /// Circumference reading for `site`
    #[must_use]
    pub const fn circumference(&self, site: Circumference) -> Option<Timed<f64>> {
        self.circumferences[site.index()]
    }

    /// Set the circumference reading for `site`
    pub fn set_circumference(&mut self, site: Circumference, reading: Option<Timed<f64>>) {
        self.circumferences[site.index()] = reading;
    }

    /// One-rep maximum for `lift`
    #[must_use]
    pub const fn lift(&self, lift: Lift) -> Option<Timed<f64>> {
        self.lifts[lift.index()]
    }

    /// Set the one-rep maximum for `lift`
    pub fn set_lift(&mut self, lift: Lift, reading: Option<Timed<f64>>) {
        self.lifts[lift.index()] = reading;
    }

    /// Reading for `vital`
    #[must_use]
    pub const fn vital(&self, vital: Vital) -> Option<Timed<u32>> {
        self.vitals[vital.index()]
    }

    /// Set the reading for `vital`
    pub fn set_vital(&mut self, vital: Vital, reading: Option<Timed<u32>>) {
        self.vitals[vital.index()] = reading;
    }

    /// All nine circumference values when every site was measured
    #[must_use]
    pub fn complete_circumferences(&self) -> Option<[f64; Circumference::COUNT]> {
        let mut values = [0.0; Circumference::COUNT];
        for site in Circumference::ALL {
            values[site.index()] = self.circumference(site)?.value;
        }
        Some(values)
    }
}
