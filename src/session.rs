// ABOUTME: Assembles observation entries from raw readings and drives the interactive session
// ABOUTME: Converts units, runs the estimators, quantizes, then upserts and saves the record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Session workflow
//!
//! [`assemble_entry`] is the pure pipeline from unit-tagged readings to a
//! stored [`ObservationEntry`]. [`run_session`] collects those readings
//! through a [`Prompter`] and persists the result.

use crate::algorithms::{
    estimate_bmr, estimate_body_fat, one_rep_max, ActivityLevel, BmrInputs, BodyFatInputs,
};
use crate::config::BodytrackConfig;
use crate::constants::limits::{MAX_DECAY_HEART_RATE, MIN_DECAY_HEART_RATE, MIN_DECAY_SAMPLES};
use crate::constants::precision;
use crate::decay::{DecayFitter, DecaySample};
use crate::errors::{AppResult, ErrorCode};
use crate::models::{Circumference, Gender, Lift, ObservationEntry, Subject, Timed, Vital};
use crate::prompt::{Bounds, Prompter, DATE_OF_BIRTH, ENTRY_DATE};
use crate::quantize::round_to;
use crate::store::{LoadedStore, RecordSchema, RecordStore, Upsert};
use crate::units::{LengthUnit, WeightUnit};
use chrono::NaiveDate;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{info, warn};

/// Body weight as entered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightReading {
    /// Value in `unit`
    pub value: f64,
    /// Unit of `value`
    pub unit: WeightUnit,
    /// Time of day in fractional hours
    pub time: f64,
}

/// All nine circumferences, measured together
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircumferenceReadings {
    /// Values in `unit`, indexed by [`Circumference::index`]
    pub values: [f64; Circumference::COUNT],
    /// Unit of every value
    pub unit: LengthUnit,
    /// Time of day in fractional hours
    pub time: f64,
}

/// One submaximal set of a lift
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiftSet {
    /// Load lifted
    pub weight: f64,
    /// Repetitions completed
    pub reps: u32,
    /// Unit of `weight`
    pub unit: WeightUnit,
    /// Time of day in fractional hours
    pub time: f64,
}

/// Heart-rate recovery samples
#[derive(Debug, Clone, PartialEq)]
pub struct DecayReadings {
    /// `(t, heart rate)` pairs
    pub samples: Vec<DecaySample>,
    /// Time of day in fractional hours
    pub time: f64,
}

/// Everything entered in one session before conversion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMeasurements {
    /// Body weight
    pub weight: Option<WeightReading>,
    /// Vitals, indexed by [`Vital::index`]
    pub vitals: [Option<Timed<u32>>; Vital::COUNT],
    /// Circumferences
    pub circumferences: Option<CircumferenceReadings>,
    /// Lift sets, indexed by [`Lift::index`]
    pub lifts: [Option<LiftSet>; Lift::COUNT],
    /// Heart-rate recovery
    pub decay: Option<DecayReadings>,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The entry was written
    Saved {
        /// Observation date
        date: NaiveDate,
        /// Whether a previous entry for the date was replaced
        upsert: Upsert,
    },
    /// The user declined to overwrite an existing entry; nothing was written
    Abandoned,
}

/// Convert, estimate and quantize the readings of one observation date
///
/// Body fat and BMR are derived only when both weight and circumferences
/// are present. Body fat is estimated first and its quantized value feeds
/// the BMR ensemble.
///
/// # Errors
///
/// Returns `InvalidInput` when a body-fat equation is undefined for the
/// measurements, and `InsufficientSamples` or `FitNotConverged` when the
/// heart-rate decay cannot be fitted
pub fn assemble_entry(
    subject: &Subject,
    date: NaiveDate,
    raw: &RawMeasurements,
    fitter: &DecayFitter,
) -> AppResult<ObservationEntry> {
    assemble(subject, date, raw, fitter, true)
}

fn assemble(
    subject: &Subject,
    date: NaiveDate,
    raw: &RawMeasurements,
    fitter: &DecayFitter,
    estimate_composition: bool,
) -> AppResult<ObservationEntry> {
    let age = round_to(subject.age_on(date), precision::AGE);
    let mut entry = ObservationEntry::new(date, subject.clone(), age);

    entry.weight = raw.weight.map(|reading| {
        let kg = round_to(reading.unit.to_kg(reading.value), precision::KILOGRAM);
        Timed::new(kg, reading.time)
    });
    entry.vitals = raw.vitals;

    if let Some(readings) = &raw.circumferences {
        for site in Circumference::ALL {
            let cm = round_to(
                readings.unit.to_cm(readings.values[site.index()]),
                precision::CENTIMETER,
            );
            entry.set_circumference(site, Some(Timed::new(cm, readings.time)));
        }
    }

    if let (true, Some(weight), Some(circumferences)) = (
        estimate_composition,
        entry.weight,
        entry.complete_circumferences(),
    ) {
        let body_fat = estimate_body_fat(&BodyFatInputs {
            circumferences,
            weight: weight.value,
            height: subject.height_cm,
            age_years: age,
            gender: subject.gender,
            metric: true,
        })?;
        let bf = round_to(body_fat.value, precision::BODY_FAT);

        let bmr = estimate_bmr(&BmrInputs {
            weight_kg: weight.value,
            height_cm: subject.height_cm,
            age_years: age,
            gender: subject.gender,
            body_fat: bf,
        });
        entry.bf = Some(bf);
        entry.bmr = Some(round_to(bmr.value, precision::BMR));
    }

    for lift in Lift::ALL {
        let reading = raw.lifts[lift.index()].map(|set| {
            let kg = round_to(one_rep_max(set.weight, set.reps, set.unit), precision::KILOGRAM);
            Timed::new(kg, set.time)
        });
        entry.set_lift(lift, reading);
    }

    if let Some(decay) = &raw.decay {
        let fit = fitter.fit(&decay.samples)?;
        entry.heart_rate_lifetime = Some(Timed::new(
            round_to(fit.b, precision::DECAY_RATE),
            decay.time,
        ));
    }

    Ok(entry)
}

/// Ask for the username; trimmed and lowercased
///
/// The username names the record file, so path separators are re-prompted.
///
/// # Errors
///
/// Returns `InputClosed` at end of input
pub fn ask_username<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> AppResult<String> {
    loop {
        let username = prompter.ask_text("Enter username: ")?.to_lowercase();
        if !username.contains(['/', '\\']) {
            return Ok(username);
        }
        prompter.say("Username must not contain path separators.")?;
    }
}

/// Capture the constant attributes of a new subject
///
/// # Errors
///
/// Returns `InvalidDate` when the date of birth is invalid twice, and
/// `InputClosed` at end of input
pub fn collect_subject<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> AppResult<Subject> {
    prompter.say("Choose gender:")?;
    let gender = prompter.select(&Gender::ALL)?;

    let height: f64 = prompter.ask("Enter height: ", &Bounds::at_least(0.0))?;
    prompter.say("Choose among the following height units:")?;
    let unit = prompter.select(&LengthUnit::ALL)?;
    let height_cm = round_to(unit.to_cm(height), precision::CENTIMETER);

    let date_of_birth = prompter.ask_date(&DATE_OF_BIRTH)?;

    Ok(Subject {
        gender,
        height_cm,
        date_of_birth,
    })
}

/// Collect every optional reading of a session
///
/// # Errors
///
/// Returns `InputClosed` at end of input
pub fn collect_raw<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> AppResult<RawMeasurements> {
    let mut raw = RawMeasurements::default();

    prompter.blank()?;
    if prompter.confirm("Enter weight? (y/n) ")? {
        prompter.say("Choose among the following weight units:")?;
        let unit = prompter.select(&WeightUnit::ALL)?;
        let value = prompter.ask("Enter weight: ", &Bounds::at_least(0.0))?;
        let time = prompter.ask_time()?;
        raw.weight = Some(WeightReading { value, unit, time });
    }

    prompter.blank()?;
    if prompter.confirm("Enter vitals? (y/n) ")? {
        for vital in Vital::ALL {
            let value: u32 = prompter.ask(&format!("Enter {}: ", vital.label()), &Bounds::any())?;
            let time = prompter.ask_time()?;
            raw.vitals[vital.index()] = Some(Timed::new(value, time));
        }
    }

    prompter.blank()?;
    if prompter.confirm("Enter body size measurements? (y/n) ")? {
        prompter.say("Choose among the following length units:")?;
        let unit = prompter.select(&LengthUnit::ALL)?;
        let time = prompter.ask_time()?;
        let mut values = [0.0; Circumference::COUNT];
        for site in Circumference::ALL {
            values[site.index()] =
                prompter.ask(&format!("Enter {}: ", site.label()), &Bounds::at_least(0.0))?;
        }
        raw.circumferences = Some(CircumferenceReadings { values, unit, time });
    }

    for lift in Lift::ALL {
        prompter.blank()?;
        if prompter.confirm(&format!("Enter {} stats? (y/n) ", lift.label()))? {
            let weight: u32 =
                prompter.ask(&format!("Enter {} weight: ", lift.label()), &Bounds::any())?;
            let reps: u32 =
                prompter.ask(&format!("Enter {} reps: ", lift.label()), &Bounds::any())?;
            prompter.say("Choose among the following weight units:")?;
            let unit = prompter.select(&WeightUnit::ALL)?;
            let time = prompter.ask_time()?;
            raw.lifts[lift.index()] = Some(LiftSet {
                weight: f64::from(weight),
                reps,
                unit,
                time,
            });
        }
    }

    prompter.blank()?;
    if prompter.confirm("Enter heart rate decay information? (y/n) ")? {
        raw.decay = Some(collect_decay(prompter)?);
    }

    Ok(raw)
}

fn collect_decay<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> AppResult<DecayReadings> {
    prompter.blank()?;
    prompter.say(
        "(Assumption: t=0 is at 5 minutes of rigorous exercise, beginning from a resting heart rate.)",
    )?;
    prompter.blank()?;

    let heart_rate_bounds = Bounds::between(MIN_DECAY_HEART_RATE, MAX_DECAY_HEART_RATE);
    let mut samples = Vec::new();
    loop {
        let t = prompter.ask("Enter a time t (t>=0): ", &Bounds::at_least(0.0))?;
        let heart_rate = prompter.ask("Enter heart rate at t: ", &heart_rate_bounds)?;
        samples.push(DecaySample::new(t, heart_rate));

        if samples.len() >= MIN_DECAY_SAMPLES
            && !prompter.confirm("Enter more heart rate decay information? (y/n) ")?
        {
            break;
        }
    }

    let time = prompter.ask_time()?;
    Ok(DecayReadings { samples, time })
}

/// Run one interactive session against the record at `path`
///
/// An undefined body-fat estimate or a failed heart-rate decay fit is
/// reported, and the entry is saved without the affected values.
///
/// # Errors
///
/// Returns `InputClosed` at end of input, `InvalidDate` after two invalid
/// dates, and any load, estimation or save error
pub fn run_session<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    config: &BodytrackConfig,
    path: &Path,
) -> AppResult<SessionOutcome> {
    prompter.blank()?;
    prompter.say("DATE OF STATUS UPDATE:")?;
    let date = prompter.ask_date(&ENTRY_DATE)?;

    let schema = RecordSchema::standard();
    let LoadedStore {
        mut store,
        needs_subject,
    } = RecordStore::load(path, &schema)?;

    let subject = match store.subject() {
        Some(subject) if !needs_subject => subject.clone(),
        _ => {
            prompter.blank()?;
            prompter.say("Database does not yet exist; creating...")?;
            collect_subject(prompter)?
        }
    };

    if store.contains(date) {
        warn!(%date, path = %path.display(), "Overwriting an existing entry");
        prompter.blank()?;
        prompter.say("You are overwriting an entry.")?;
        if !prompter.confirm("Continue? (y/n) ")? {
            info!(%date, "Session abandoned before overwrite");
            return Ok(SessionOutcome::Abandoned);
        }
    }

    let mut raw = collect_raw(prompter)?;
    let fitter = DecayFitter::new(config.fit);
    let mut estimate_composition = true;
    let entry = loop {
        match assemble(&subject, date, &raw, &fitter, estimate_composition) {
            Ok(entry) => break entry,
            Err(error) if estimate_composition && error.code == ErrorCode::InvalidInput => {
                warn!(%error, "Body composition estimate failed");
                prompter.blank()?;
                prompter.say(format_args!("Body fat could not be estimated: {error}"))?;
                estimate_composition = false;
            }
            Err(error)
                if raw.decay.is_some()
                    && matches!(
                        error.code,
                        ErrorCode::FitNotConverged | ErrorCode::InsufficientSamples
                    ) =>
            {
                warn!(%error, "Heart-rate decay fit failed");
                prompter.blank()?;
                prompter.say(format_args!("Heart-rate decay could not be fitted: {error}"))?;
                raw.decay = None;
            }
            Err(error) => return Err(error),
        }
    };

    report_estimates(prompter, &entry)?;

    let upsert = store.upsert(entry)?;
    store.save(path, &schema)?;

    prompter.blank()?;
    prompter.say("Done.")?;
    info!(%date, ?upsert, "Session saved");
    Ok(SessionOutcome::Saved { date, upsert })
}

fn report_estimates<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    entry: &ObservationEntry,
) -> AppResult<()> {
    if let Some(bf) = entry.bf {
        prompter.blank()?;
        prompter.say(format_args!("Body fat: {:.1}%", bf * 100.0))?;
    }
    if let Some(bmr) = entry.bmr {
        prompter.say(format_args!("Basal metabolic rate: {bmr:.0} kcal/day"))?;
        prompter.say("Daily energy expenditure by activity level:")?;
        for level in ActivityLevel::ALL {
            prompter.say(format_args!(
                "  {:.3} {level}: {:.0} kcal/day",
                level.factor(),
                level.tdee(bmr)
            ))?;
        }
    }
    if let Some(lifetime) = entry.heart_rate_lifetime {
        prompter.say(format_args!("Heart-rate lifetime: {}", lifetime.value))?;
    }
    Ok(())
}
