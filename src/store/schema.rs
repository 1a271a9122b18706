// ABOUTME: Fixed column layout of the persisted record
// ABOUTME: Each measurement column is followed by its measurement-time column
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::record::MEASUREMENT_TIME_SUFFIX;
use crate::models::{Circumference, Lift, Vital};

/// One persisted column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Observation date, the record key
    Date,
    /// Subject gender
    Gender,
    /// Subject height in centimeters
    Height,
    /// Subject date of birth
    DateOfBirth,
    /// Age in years on the observation date
    Age,
    /// Body weight in kilograms
    Weight,
    /// Time the weight was measured
    WeightTime,
    /// Basal metabolic rate
    Bmr,
    /// Body-fat fraction
    BodyFat,
    /// Circumference in centimeters
    Circumference(Circumference),
    /// Time the circumference was measured
    CircumferenceTime(Circumference),
    /// One-rep maximum in kilograms
    Lift(Lift),
    /// Time the lift was performed
    LiftTime(Lift),
    /// Vital reading
    Vital(Vital),
    /// Time the vital was measured
    VitalTime(Vital),
    /// Heart-rate recovery decay rate
    HeartRateLifetime,
    /// Time the recovery was measured
    HeartRateLifetimeTime,
}

impl Column {
    /// Header text
    #[must_use]
    pub fn name(self) -> String {
        match self {
            Self::Date => "date".into(),
            Self::Gender => "gender".into(),
            Self::Height => "height".into(),
            Self::DateOfBirth => "date of birth".into(),
            Self::Age => "age".into(),
            Self::Weight => "weight".into(),
            Self::WeightTime => timed("weight"),
            Self::Bmr => "bmr".into(),
            Self::BodyFat => "bf".into(),
            Self::Circumference(site) => site.label().into(),
            Self::CircumferenceTime(site) => timed(site.label()),
            Self::Lift(lift) => lift.label().into(),
            Self::LiftTime(lift) => timed(lift.label()),
            Self::Vital(vital) => vital.label().into(),
            Self::VitalTime(vital) => timed(vital.label()),
            Self::HeartRateLifetime => "heart-rate lifetime".into(),
            Self::HeartRateLifetimeTime => timed("heart-rate lifetime"),
        }
    }
}

fn timed(label: &str) -> String {
    format!("{label}{MEASUREMENT_TIME_SUFFIX}")
}

/// Ordered column list used for both reading and writing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    columns: Vec<Column>,
}

impl RecordSchema {
    /// The standard layout
    #[must_use]
    pub fn standard() -> Self {
        let mut columns = vec![
            Column::Date,
            Column::Gender,
            Column::Height,
            Column::DateOfBirth,
            Column::Age,
            Column::Weight,
            Column::WeightTime,
            Column::Bmr,
            Column::BodyFat,
        ];
        for site in Circumference::ALL {
            columns.extend([Column::Circumference(site), Column::CircumferenceTime(site)]);
        }
        for lift in Lift::ALL {
            columns.extend([Column::Lift(lift), Column::LiftTime(lift)]);
        }
        for vital in Vital::ALL {
            columns.extend([Column::Vital(vital), Column::VitalTime(vital)]);
        }
        columns.extend([Column::HeartRateLifetime, Column::HeartRateLifetimeTime]);
        Self { columns }
    }

    /// Columns in write order
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Header row
    #[must_use]
    pub fn header(&self) -> Vec<String> {
        self.columns.iter().map(|column| column.name()).collect()
    }
}
