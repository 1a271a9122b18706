// ABOUTME: Integration tests for entry assembly and the interactive session workflow
// ABOUTME: Drives scripted sessions end to end against temporary record files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use bodytrack::algorithms::{estimate_bmr, estimate_body_fat, BmrInputs, BodyFatInputs};
use bodytrack::config::BodytrackConfig;
use bodytrack::constants::precision;
use bodytrack::decay::{DecayFitter, DecaySample};
use bodytrack::errors::ErrorCode;
use bodytrack::models::{Circumference, Lift, Vital};
use bodytrack::quantize::round_to;
use bodytrack::session::{
    ask_username, assemble_entry, run_session, CircumferenceReadings, DecayReadings, LiftSet,
    RawMeasurements, SessionOutcome, WeightReading,
};
use bodytrack::store::{RecordSchema, RecordStore, Upsert};
use bodytrack::units::{LengthUnit, WeightUnit};
use common::{date, female_subject, full_entry, init_test_logging, scripted, transcript};
use std::fs;
use tempfile::TempDir;

const BODY_SIZE_CM: [f64; Circumference::COUNT] =
    [70.0, 80.0, 98.0, 56.0, 32.0, 27.0, 24.0, 15.0, 36.0];

fn decay_samples() -> Vec<DecaySample> {
    (0..5)
        .map(|t| {
            let t = f64::from(t);
            DecaySample::new(t, 80.0_f64.mul_add((-0.5 * t).exp(), 70.0))
        })
        .collect()
}

fn body_size(unit: LengthUnit, values: [f64; Circumference::COUNT]) -> CircumferenceReadings {
    CircumferenceReadings {
        values,
        unit,
        time: 8.0,
    }
}

#[test]
fn test_body_fat_and_bmr_follow_the_estimators() {
    let subject = female_subject();
    let on = date(2024, 3, 15);
    let raw = RawMeasurements {
        weight: Some(WeightReading {
            value: 62.3,
            unit: WeightUnit::Kg,
            time: 7.5,
        }),
        circumferences: Some(body_size(LengthUnit::Cm, BODY_SIZE_CM)),
        ..RawMeasurements::default()
    };

    let entry = assemble_entry(&subject, on, &raw, &DecayFitter::default()).unwrap();

    let age = round_to(subject.age_on(on), precision::AGE);
    let expected_bf = round_to(
        estimate_body_fat(&BodyFatInputs {
            circumferences: entry.complete_circumferences().unwrap(),
            weight: 62.5,
            height: subject.height_cm,
            age_years: age,
            gender: subject.gender,
            metric: true,
        })
        .unwrap()
        .value,
        precision::BODY_FAT,
    );
    let expected_bmr = round_to(
        estimate_bmr(&BmrInputs {
            weight_kg: 62.5,
            height_cm: subject.height_cm,
            age_years: age,
            gender: subject.gender,
            body_fat: expected_bf,
        })
        .value,
        precision::BMR,
    );

    assert_eq!(entry.weight.map(|w| w.value), Some(62.5));
    assert_eq!(entry.bf, Some(expected_bf));
    assert_eq!(entry.bmr, Some(expected_bmr));
    let bf = entry.bf.unwrap();
    assert!(bf > 0.15 && bf < 0.35, "implausible body fat {bf}");
}

#[test]
fn test_estimates_need_both_weight_and_body_size() {
    let raw = RawMeasurements {
        circumferences: Some(body_size(LengthUnit::Cm, BODY_SIZE_CM)),
        ..RawMeasurements::default()
    };
    let entry = assemble_entry(
        &female_subject(),
        date(2024, 3, 15),
        &raw,
        &DecayFitter::default(),
    )
    .unwrap();

    assert!(entry.bf.is_none());
    assert!(entry.bmr.is_none());
    assert_eq!(
        entry.circumference(Circumference::HipWidest).map(|c| c.value),
        Some(98.0)
    );
}

#[test]
fn test_inch_circumferences_are_stored_in_centimeters() {
    let mut inches = [10.0; Circumference::COUNT];
    inches[Circumference::NeckNarrowest.index()] = 14.5;
    let raw = RawMeasurements {
        circumferences: Some(body_size(LengthUnit::Inch, inches)),
        ..RawMeasurements::default()
    };
    let entry = assemble_entry(
        &female_subject(),
        date(2024, 3, 15),
        &raw,
        &DecayFitter::default(),
    )
    .unwrap();

    let neck = entry.circumference(Circumference::NeckNarrowest).unwrap();
    assert!((neck.value - 36.8).abs() < 1e-9);
    let calf = entry.circumference(Circumference::CalfWidest).unwrap();
    assert!((calf.value - 25.4).abs() < 1e-9);
    assert!((calf.time - 8.0).abs() < f64::EPSILON);
}

#[test]
fn test_lift_one_rep_max_is_quantized_to_half_kilograms() {
    let mut raw = RawMeasurements::default();
    raw.lifts[Lift::Squat.index()] = Some(LiftSet {
        weight: 100.0,
        reps: 5,
        unit: WeightUnit::Kg,
        time: 18.0,
    });
    raw.lifts[Lift::Deadlift.index()] = Some(LiftSet {
        weight: 220.0,
        reps: 1,
        unit: WeightUnit::Lb,
        time: 18.5,
    });

    let entry = assemble_entry(
        &female_subject(),
        date(2024, 3, 15),
        &raw,
        &DecayFitter::default(),
    )
    .unwrap();

    // 100 / (0.488 + 0.538 e^-0.375) = 116.58
    assert_eq!(entry.lift(Lift::Squat).map(|l| l.value), Some(116.5));
    let deadlift = entry.lift(Lift::Deadlift).unwrap();
    assert!((deadlift.value * 2.0).fract().abs() < 1e-9);
    assert!(entry.lift(Lift::Row).is_none());
}

#[test]
fn test_decay_lifetime_is_the_fitted_rate() {
    let raw = RawMeasurements {
        decay: Some(DecayReadings {
            samples: decay_samples(),
            time: 8.5,
        }),
        ..RawMeasurements::default()
    };
    let entry = assemble_entry(
        &female_subject(),
        date(2024, 3, 15),
        &raw,
        &DecayFitter::default(),
    )
    .unwrap();

    let lifetime = entry.heart_rate_lifetime.unwrap();
    assert!((lifetime.value - 0.5).abs() < 1e-9);
    assert!((lifetime.time - 8.5).abs() < f64::EPSILON);
}

#[test]
fn test_too_few_decay_samples_propagate_from_assembly() {
    let raw = RawMeasurements {
        decay: Some(DecayReadings {
            samples: decay_samples().into_iter().take(2).collect(),
            time: 8.5,
        }),
        ..RawMeasurements::default()
    };
    let error = assemble_entry(
        &female_subject(),
        date(2024, 3, 15),
        &raw,
        &DecayFitter::default(),
    )
    .unwrap_err();
    assert_eq!(error.code, ErrorCode::InsufficientSamples);
}

#[test]
fn test_username_is_lowercased() {
    let mut prompter = scripted(&["", "  Erin  "]);
    assert_eq!(ask_username(&mut prompter).unwrap(), "erin");
    assert!(transcript(prompter).contains("Input must not be empty."));
}

#[test]
fn test_username_with_path_separators_is_reprompted() {
    let mut prompter = scripted(&["../x", "a\\b", "Erin"]);
    assert_eq!(ask_username(&mut prompter).unwrap(), "erin");
    assert_eq!(
        transcript(prompter)
            .matches("Username must not contain path separators.")
            .count(),
        2
    );
}

#[test]
fn test_new_subject_session_end_to_end() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("erin.dat");
    let config = BodytrackConfig::default();

    let mut prompter = scripted(&[
        // entry date
        "2024", "3", "15",
        // subject: female, 165 cm, born 1990-06-01
        "1", "165", "0", "1990", "6", "1",
        // weight
        "y", "0", "62.3", "07:30",
        // vitals
        "y", "58", "07:35",
        // body size in cm
        "y", "0", "08:00", "70", "80", "98", "56", "32", "27", "24", "15", "36",
        // squat only
        "y", "60", "5", "0", "18:00",
        "n", "n", "n", "n",
        // heart-rate decay
        "y", "0", "150", "1", "118.522453", "2", "99.430355",
        "y", "3", "87.850413",
        "n", "08:30",
    ]);

    let outcome = run_session(&mut prompter, &config, &path).unwrap();
    assert_eq!(
        outcome,
        SessionOutcome::Saved {
            date: date(2024, 3, 15),
            upsert: Upsert::Inserted,
        }
    );

    let output = transcript(prompter);
    assert!(output.contains("Database does not yet exist; creating..."));
    assert!(output.contains("Body fat: "));
    assert!(output.contains("Basal metabolic rate: "));
    assert!(output.contains("Heart-rate lifetime: 0.5"));
    assert!(output.trim_end().ends_with("Done."));

    let loaded = RecordStore::load(&path, &RecordSchema::standard()).unwrap();
    assert_eq!(loaded.store.subject(), Some(&female_subject()));
    let entry = loaded.store.get(date(2024, 3, 15)).unwrap();
    assert_eq!(entry.weight.map(|w| w.value), Some(62.5));
    assert_eq!(entry.vital(Vital::RestingHeartRate).map(|v| v.value), Some(58));
    assert!(entry.bf.is_some());
    assert!(entry.bmr.is_some());
    assert!(entry.lift(Lift::Squat).is_some());
    assert!(entry.lift(Lift::BenchPress).is_none());
    let lifetime = entry.heart_rate_lifetime.unwrap();
    assert!((lifetime.value - 0.5).abs() < 1e-9);
    assert!((lifetime.time - 8.5).abs() < f64::EPSILON);
}

fn seed_record(path: &std::path::Path) {
    let mut store = RecordStore::new();
    store.upsert(full_entry(date(2024, 3, 15))).unwrap();
    store.save(path, &RecordSchema::standard()).unwrap();
}

#[test]
fn test_declining_overwrite_leaves_record_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("erin.dat");
    seed_record(&path);
    let before = fs::read_to_string(&path).unwrap();

    let mut prompter = scripted(&["2024", "3", "15", "n"]);
    let outcome = run_session(&mut prompter, &BodytrackConfig::default(), &path).unwrap();

    assert_eq!(outcome, SessionOutcome::Abandoned);
    assert!(transcript(prompter).contains("You are overwriting an entry."));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_accepted_overwrite_replaces_the_entry() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("erin.dat");
    seed_record(&path);

    // overwrite, then record only the resting heart rate
    let mut prompter = scripted(&[
        "2024", "3", "15", "y", "n", "y", "61", "07:00", "n", "n", "n", "n", "n", "n", "n",
    ]);
    let outcome = run_session(&mut prompter, &BodytrackConfig::default(), &path).unwrap();
    assert_eq!(
        outcome,
        SessionOutcome::Saved {
            date: date(2024, 3, 15),
            upsert: Upsert::Replaced,
        }
    );
    assert!(!transcript(prompter).contains("Database does not yet exist"));

    let loaded = RecordStore::load(&path, &RecordSchema::standard()).unwrap();
    let entry = loaded.store.get(date(2024, 3, 15)).unwrap();
    assert!(entry.weight.is_none());
    assert!(entry.bf.is_none());
    assert!(entry.heart_rate_lifetime.is_none());
    assert_eq!(entry.vital(Vital::RestingHeartRate).map(|v| v.value), Some(61));
}

#[test]
fn test_unfittable_decay_is_reported_and_entry_saved_without_it() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("erin.dat");
    seed_record(&path);

    // all samples at the same time cannot determine a decay curve
    let mut prompter = scripted(&[
        "2024", "3", "16", "n", "n", "n", "n", "n", "n", "n", "n", "y", "1", "120", "1", "110",
        "1", "100", "n", "09:00",
    ]);
    let outcome = run_session(&mut prompter, &BodytrackConfig::default(), &path).unwrap();
    assert_eq!(
        outcome,
        SessionOutcome::Saved {
            date: date(2024, 3, 16),
            upsert: Upsert::Inserted,
        }
    );
    assert!(transcript(prompter).contains("Heart-rate decay could not be fitted"));

    let loaded = RecordStore::load(&path, &RecordSchema::standard()).unwrap();
    assert_eq!(loaded.store.len(), 2);
    assert!(loaded
        .store
        .get(date(2024, 3, 16))
        .unwrap()
        .heart_rate_lifetime
        .is_none());
}

#[test]
fn test_end_of_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("erin.dat");

    let mut prompter = scripted(&["2024", "3", "15", "1", "165"]);
    let error = run_session(&mut prompter, &BodytrackConfig::default(), &path).unwrap_err();

    assert_eq!(error.code, ErrorCode::InputClosed);
    assert!(!path.exists());
}

#[test]
fn test_undefined_body_fat_is_reported_and_entry_saved_without_it() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sam.dat");

    // naval girth below the neck leaves the Navy equation undefined
    let mut prompter = scripted(&[
        "2024", "3", "15",
        "0", "180", "0", "1990", "1", "1",
        "y", "0", "80", "07:00",
        "n",
        "y", "0", "08:00", "80", "30", "100", "55", "40", "35", "30", "17", "38",
        "n", "n", "n", "n", "n",
        "n",
    ]);
    let outcome = run_session(&mut prompter, &BodytrackConfig::default(), &path).unwrap();
    assert_eq!(
        outcome,
        SessionOutcome::Saved {
            date: date(2024, 3, 15),
            upsert: Upsert::Inserted,
        }
    );

    let output = transcript(prompter);
    assert!(output.contains("Body fat could not be estimated"));
    assert!(!output.contains("Basal metabolic rate"));

    let loaded = RecordStore::load(&path, &RecordSchema::standard()).unwrap();
    let entry = loaded.store.get(date(2024, 3, 15)).unwrap();
    assert!(entry.bf.is_none());
    assert!(entry.bmr.is_none());
    assert_eq!(entry.weight.map(|w| w.value), Some(80.0));
    assert_eq!(
        entry.circumference(Circumference::WaistNaval).map(|c| c.value),
        Some(30.0)
    );
}

#[test]
fn test_non_finite_weight_never_reaches_the_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("erin.dat");
    seed_record(&path);

    let mut prompter = scripted(&[
        "2024", "3", "16", "y", "0", "NaN", "inf", "62", "07:30", "n", "n", "n", "n", "n", "n",
        "n", "n",
    ]);
    run_session(&mut prompter, &BodytrackConfig::default(), &path).unwrap();
    assert_eq!(
        transcript(prompter).matches("Input type must be float.").count(),
        2
    );

    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains("NaN"));
    assert!(!text.contains("inf"));
    let loaded = RecordStore::load(&path, &RecordSchema::standard()).unwrap();
    let entry = loaded.store.get(date(2024, 3, 16)).unwrap();
    assert_eq!(entry.weight.map(|w| w.value), Some(62.0));
}
