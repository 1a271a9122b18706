// ABOUTME: Conversion between observation entries and textual CSV cells
// ABOUTME: Columns are located by header name; absent values are empty cells
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::schema::Column;
use crate::constants::precision;
use crate::constants::record::DATE_FORMAT;
use crate::errors::{AppError, AppResult};
use crate::models::{Circumference, Gender, Lift, ObservationEntry, Subject, Timed, Vital};
use crate::quantize::round_to;
use chrono::NaiveDate;
use csv::StringRecord;
use std::collections::HashMap;
use std::str::FromStr;

/// Text of `column` for `entry`; empty when the value is absent
pub fn encode_cell(entry: &ObservationEntry, column: Column) -> String {
    fn value<T: ToString>(reading: Option<Timed<T>>) -> String {
        reading.map_or_else(String::new, |r| r.value.to_string())
    }
    fn time<T>(reading: Option<Timed<T>>) -> String {
        reading.map_or_else(String::new, |r| r.time.to_string())
    }

    match column {
        Column::Date => entry.date.format(DATE_FORMAT).to_string(),
        Column::Gender => entry.subject.gender.to_string(),
        Column::Height => entry.subject.height_cm.to_string(),
        Column::DateOfBirth => entry.subject.date_of_birth.format(DATE_FORMAT).to_string(),
        Column::Age => entry.age.to_string(),
        Column::Weight => value(entry.weight),
        Column::WeightTime => time(entry.weight),
        Column::Bmr => entry.bmr.map_or_else(String::new, |v| v.to_string()),
        Column::BodyFat => entry.bf.map_or_else(String::new, |v| v.to_string()),
        Column::Circumference(site) => value(entry.circumference(site)),
        Column::CircumferenceTime(site) => time(entry.circumference(site)),
        Column::Lift(lift) => value(entry.lift(lift)),
        Column::LiftTime(lift) => time(entry.lift(lift)),
        Column::Vital(vital) => value(entry.vital(vital)),
        Column::VitalTime(vital) => time(entry.vital(vital)),
        Column::HeartRateLifetime => value(entry.heart_rate_lifetime),
        Column::HeartRateLifetimeTime => time(entry.heart_rate_lifetime),
    }
}

/// Header positions by column name
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    /// Index a header row
    pub fn new(header: &StringRecord) -> Self {
        let positions = header
            .iter()
            .enumerate()
            .map(|(position, name)| (name.trim().to_owned(), position))
            .collect();
        Self { positions }
    }

    /// Whether the header names `column`
    pub fn contains(&self, column: Column) -> bool {
        self.positions.contains_key(&column.name())
    }
}

/// One data row being decoded; `line` is the 1-based file line for messages
pub struct RowDecoder<'a> {
    index: &'a HeaderIndex,
    record: &'a StringRecord,
    line: usize,
}

impl<'a> RowDecoder<'a> {
    /// Decode `record`, found on file line `line`
    pub const fn new(index: &'a HeaderIndex, record: &'a StringRecord, line: usize) -> Self {
        Self {
            index,
            record,
            line,
        }
    }

    /// File line of the row
    pub const fn line(&self) -> usize {
        self.line
    }

    fn cell(&self, column: Column) -> Option<&'a str> {
        let position = *self.index.positions.get(&column.name())?;
        self.record
            .get(position)
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    fn parse<T: FromStr>(&self, column: Column) -> AppResult<Option<T>> {
        self.cell(column)
            .map(|text| {
                text.parse::<T>().map_err(|_| {
                    AppError::invalid_format(format!(
                        "row {}: '{text}' is not a valid {}",
                        self.line,
                        column.name()
                    ))
                })
            })
            .transpose()
    }

    fn date(&self, column: Column) -> AppResult<Option<NaiveDate>> {
        self.cell(column)
            .map(|text| {
                NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|source| {
                    AppError::invalid_format(format!(
                        "row {}: '{text}' is not a valid {}",
                        self.line,
                        column.name()
                    ))
                    .with_source(source)
                })
            })
            .transpose()
    }

    fn required<T>(&self, value: Option<T>, column: Column) -> AppResult<T> {
        value.ok_or_else(|| {
            AppError::invalid_format(format!("row {}: missing {}", self.line, column.name()))
        })
    }

    fn timed<T: FromStr>(&self, value: Column, time: Column) -> AppResult<Option<Timed<T>>> {
        let Some(reading) = self.parse::<T>(value)? else {
            return Ok(None);
        };
        let measured_at = self.required(self.parse::<f64>(time)?, time)?;
        Ok(Some(Timed::new(reading, measured_at)))
    }

    /// Constant subject attributes of the row
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` when an attribute is missing or malformed, and
    /// `UnsupportedGender` for an unknown gender token
    pub fn subject(&self) -> AppResult<Subject> {
        let gender_text = self.required(self.cell(Column::Gender), Column::Gender)?;
        let gender = Gender::from_str(gender_text)?;
        let height_cm = self.required(self.parse(Column::Height)?, Column::Height)?;
        let date_of_birth = self.required(self.date(Column::DateOfBirth)?, Column::DateOfBirth)?;
        Ok(Subject {
            gender,
            height_cm,
            date_of_birth,
        })
    }

    /// Full entry for the row, given its already-decoded subject
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for missing keys, malformed values, or a value
    /// without its measurement time
    pub fn entry(&self, subject: Subject) -> AppResult<ObservationEntry> {
        let date = self.required(self.date(Column::Date)?, Column::Date)?;
        let age = match self.parse(Column::Age)? {
            Some(age) => age,
            None => round_to(subject.age_on(date), precision::AGE),
        };

        let mut entry = ObservationEntry::new(date, subject, age);
        entry.weight = self.timed(Column::Weight, Column::WeightTime)?;
        entry.bmr = self.parse(Column::Bmr)?;
        entry.bf = self.parse(Column::BodyFat)?;

        for site in Circumference::ALL {
            let reading = self.timed(
                Column::Circumference(site),
                Column::CircumferenceTime(site),
            )?;
            entry.set_circumference(site, reading);
        }
        for lift in Lift::ALL {
            entry.set_lift(lift, self.timed(Column::Lift(lift), Column::LiftTime(lift))?);
        }
        for vital in Vital::ALL {
            entry.set_vital(vital, self.timed(Column::Vital(vital), Column::VitalTime(vital))?);
        }
        entry.heart_rate_lifetime =
            self.timed(Column::HeartRateLifetime, Column::HeartRateLifetimeTime)?;

        Ok(entry)
    }
}
