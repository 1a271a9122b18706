// ABOUTME: Integration tests for the CSV record store
// ABOUTME: Loading, saving, upserting and subject consistency checks across rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use bodytrack::errors::ErrorCode;
use bodytrack::models::{Circumference, Gender, Lift, ObservationEntry, Timed};
use bodytrack::store::{RecordSchema, RecordStore, Upsert};
use common::{date, female_subject, full_entry, init_test_logging};
use std::fs;
use tempfile::TempDir;

const GROUPED_HEADER: &str = "date,gender,height,date of birth,weight,bf,bmr,weight measurement time";

#[test]
fn test_missing_file_is_empty_and_needs_subject() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let loaded = RecordStore::load(&dir.path().join("nobody.dat"), &RecordSchema::standard())
        .unwrap();

    assert!(loaded.needs_subject);
    assert!(loaded.store.is_empty());
    assert!(loaded.store.subject().is_none());
}

#[test]
fn test_save_then_load_reproduces_entries() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("erin.dat");
    let schema = RecordSchema::standard();

    let mut store = RecordStore::new();
    let mut sparse = ObservationEntry::new(date(2024, 3, 1), female_subject(), 33.781);
    sparse.set_lift(Lift::Deadlift, Some(Timed::new(95.0, 17.0)));
    store.upsert(full_entry(date(2024, 3, 15))).unwrap();
    store.upsert(sparse.clone()).unwrap();
    store.save(&path, &schema).unwrap();

    let loaded = RecordStore::load(&path, &schema).unwrap();
    assert!(!loaded.needs_subject);
    assert_eq!(loaded.store.len(), 2);
    assert_eq!(loaded.store.subject(), Some(&female_subject()));
    assert_eq!(loaded.store.get(date(2024, 3, 1)), Some(&sparse));
    assert_eq!(
        loaded.store.get(date(2024, 3, 15)),
        Some(&full_entry(date(2024, 3, 15)))
    );

    let dates: Vec<_> = loaded.store.entries().map(|entry| entry.date).collect();
    assert_eq!(dates, vec![date(2024, 3, 1), date(2024, 3, 15)]);
}

#[test]
fn test_saved_file_starts_with_standard_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("erin.dat");
    let schema = RecordSchema::standard();

    let mut store = RecordStore::new();
    store.upsert(full_entry(date(2024, 3, 15))).unwrap();
    store.save(&path, &schema).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let header = text.lines().next().unwrap();
    assert!(header.starts_with("date,gender,height,date of birth,age,weight,weight measurement time,bmr,bf,"));
    assert!(header.ends_with("heart-rate lifetime,heart-rate lifetime measurement time"));
    assert_eq!(text.lines().count(), 2);
    assert!(text.lines().nth(1).unwrap().starts_with("2024-03-15,female,165,1990-06-01,"));
}

#[test]
fn test_save_creates_directories_and_leaves_no_staging_file() {
    let dir = TempDir::new().unwrap();
    let records = dir.path().join("records").join("2024");
    let path = records.join("erin.dat");

    let mut store = RecordStore::new();
    store.upsert(full_entry(date(2024, 3, 15))).unwrap();
    store.save(&path, &RecordSchema::standard()).unwrap();

    let names: Vec<_> = fs::read_dir(&records)
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("erin.dat")]);
}

#[test]
fn test_upsert_replaces_the_whole_entry() {
    let mut store = RecordStore::new();
    assert_eq!(
        store.upsert(full_entry(date(2024, 3, 15))).unwrap(),
        Upsert::Inserted
    );

    let mut replacement = ObservationEntry::new(date(2024, 3, 15), female_subject(), 33.811);
    replacement.set_circumference(Circumference::NeckNarrowest, Some(Timed::new(31.5, 9.0)));
    assert_eq!(store.upsert(replacement.clone()).unwrap(), Upsert::Replaced);

    let stored = store.get(date(2024, 3, 15)).unwrap();
    assert_eq!(stored, &replacement);
    assert!(stored.weight.is_none());
    assert!(stored.lift(Lift::Squat).is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn test_upsert_rejects_a_different_subject() {
    let mut store = RecordStore::new();
    store.upsert(full_entry(date(2024, 3, 15))).unwrap();

    let mut other = female_subject();
    other.gender = Gender::Male;
    let error = store
        .upsert(ObservationEntry::new(date(2024, 3, 16), other, 33.814))
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::DataIntegrity);
    assert!(error.message.contains("new entry"));
    assert!(!store.contains(date(2024, 3, 16)));
}

#[test]
fn test_rows_disagreeing_on_height_are_rejected() {
    init_test_logging();
    let text = format!(
        "{GROUPED_HEADER}\n\
         2024-03-14,female,165,1990-06-01,62.5,,,7.5\n\
         2024-03-15,female,166,1990-06-01,62.5,,,7.5\n"
    );
    let error = RecordStore::from_reader(text.as_bytes(), &RecordSchema::standard()).unwrap_err();
    assert_eq!(error.code, ErrorCode::DataIntegrity);
    assert!(error.message.contains("row 3"));
    assert!(error.message.contains("height"));
}

#[test]
fn test_rows_disagreeing_on_gender_are_rejected() {
    let text = format!(
        "{GROUPED_HEADER}\n\
         2024-03-14,female,165,1990-06-01,,,,\n\
         2024-03-15,male,165,1990-06-01,,,,\n"
    );
    let error = RecordStore::from_reader(text.as_bytes(), &RecordSchema::standard()).unwrap_err();
    assert_eq!(error.code, ErrorCode::DataIntegrity);
    assert!(error.message.contains("gender 'male' differs from 'female'"));
}

#[test]
fn test_rows_disagreeing_on_date_of_birth_are_rejected() {
    let text = format!(
        "{GROUPED_HEADER}\n\
         2024-03-14,female,165,1990-06-01,,,,\n\
         2024-03-15,female,165,1990-06-02,,,,\n"
    );
    let error = RecordStore::from_reader(text.as_bytes(), &RecordSchema::standard()).unwrap_err();
    assert_eq!(error.code, ErrorCode::DataIntegrity);
    assert!(error.message.contains("row 3"));
    assert!(error.message.contains("date of birth '1990-06-02' differs from '1990-06-01'"));
}

#[test]
fn test_date_of_birth_spellings_of_one_day_agree() {
    let text = format!(
        "{GROUPED_HEADER}\n\
         2024-03-14,female,165,1990-6-1,,,,\n\
         2024-03-15,Female,165,1990-06-01,,,,\n"
    );
    let loaded = RecordStore::from_reader(text.as_bytes(), &RecordSchema::standard()).unwrap();
    assert_eq!(loaded.store.len(), 2);
    assert_eq!(loaded.store.subject(), Some(&female_subject()));
}

#[test]
fn test_columns_are_found_by_name_in_any_order() {
    let text = format!(
        "{GROUPED_HEADER}\n\
         2024-03-15,female,165,1990-06-01,62.5,0.263,1391.234,7.5\n"
    );
    let loaded = RecordStore::from_reader(text.as_bytes(), &RecordSchema::standard()).unwrap();
    let entry = loaded.store.get(date(2024, 3, 15)).unwrap();

    assert_eq!(entry.weight, Some(Timed::new(62.5, 7.5)));
    assert_eq!(entry.bf, Some(0.263));
    assert_eq!(entry.bmr, Some(1391.234));
    // 12341 days / 365, age column absent
    assert!((entry.age - 33.811).abs() < 1e-9);
    assert!(entry.circumference(Circumference::CalfWidest).is_none());
}

#[test]
fn test_header_only_file_still_needs_subject() {
    let loaded = RecordStore::from_reader(
        format!("{GROUPED_HEADER}\n").as_bytes(),
        &RecordSchema::standard(),
    )
    .unwrap();
    assert!(loaded.needs_subject);
    assert!(loaded.store.is_empty());
}

#[test]
fn test_malformed_value_reports_its_row() {
    let text = format!(
        "{GROUPED_HEADER}\n\
         2024-03-15,female,165,1990-06-01,heavy,,,7.5\n"
    );
    let error = RecordStore::from_reader(text.as_bytes(), &RecordSchema::standard()).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidFormat);
    assert!(error.message.contains("row 2"));
    assert!(error.message.contains("weight"));
}
