// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides subjects, entries, scripted prompters and quiet logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `bodytrack`

use bodytrack::models::{Circumference, Gender, Lift, ObservationEntry, Subject, Timed, Vital};
use bodytrack::prompt::Prompter;
use chrono::NaiveDate;
use std::io::Cursor;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Calendar date shorthand
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Subject used across store and session tests
pub fn female_subject() -> Subject {
    Subject {
        gender: Gender::Female,
        height_cm: 165.0,
        date_of_birth: date(1990, 6, 1),
    }
}

/// Entry with a representative value in every field
pub fn full_entry(on: NaiveDate) -> ObservationEntry {
    let subject = female_subject();
    let age = 33.811;
    let mut entry = ObservationEntry::new(on, subject, age);
    entry.weight = Some(Timed::new(62.5, 7.5));
    entry.bmr = Some(1_391.234);
    entry.bf = Some(0.263);
    for site in Circumference::ALL {
        entry.set_circumference(site, Some(Timed::new(20.0 + site.index() as f64, 8.0)));
    }
    for lift in Lift::ALL {
        entry.set_lift(lift, Some(Timed::new(40.0 + 5.0 * lift.index() as f64, 18.25)));
    }
    entry.set_vital(Vital::RestingHeartRate, Some(Timed::new(58, 7.583)));
    entry.heart_rate_lifetime = Some(Timed::new(0.5, 8.5));
    entry
}

/// Prompter fed from `lines`, one answer per line, capturing its output
pub fn scripted(lines: &[&str]) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
    let mut input = lines.join("\n");
    input.push('\n');
    Prompter::new(Cursor::new(input.into_bytes()), Vec::new())
}

/// Everything a scripted prompter printed
pub fn transcript(prompter: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8(prompter.into_output()).unwrap()
}
