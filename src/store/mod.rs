// ABOUTME: Per-subject record of observation entries keyed by date
// ABOUTME: Loads and saves the CSV file and enforces constant subject attributes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Record store
//!
//! The whole file is read into memory, one entry is upserted per session,
//! and the file is rewritten in full. Every row of a file must carry the
//! same gender, height and date of birth.

mod codec;

/// Persisted column layout
pub mod schema;

pub use schema::{Column, RecordSchema};

use crate::errors::{AppError, AppResult};
use crate::models::{ObservationEntry, Subject};
use chrono::NaiveDate;
use codec::{encode_cell, HeaderIndex, RowDecoder};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Result of [`RecordStore::load`]
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedStore {
    /// Entries read from the source
    pub store: RecordStore,
    /// No subject attributes are known yet and must be captured
    pub needs_subject: bool,
}

/// Outcome of [`RecordStore::upsert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// The date was new
    Inserted,
    /// An entry for the date existed and was replaced in full
    Replaced,
}

/// Entries for one subject, ordered by date
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    subject: Option<Subject>,
    entries: BTreeMap<NaiveDate, ObservationEntry>,
}

impl RecordStore {
    /// Empty store with no subject
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the record at `path`; a missing file yields an empty store
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the file cannot be read, `InvalidFormat`
    /// or `SerializationError` for malformed content, and `DataIntegrity`
    /// when rows disagree on the subject attributes
    pub fn load(path: &Path, schema: &RecordSchema) -> AppResult<LoadedStore> {
        if !path.exists() {
            info!(path = %path.display(), "Record does not exist yet");
            return Ok(LoadedStore {
                store: Self::new(),
                needs_subject: true,
            });
        }

        let file = File::open(path).map_err(|source| {
            AppError::storage(format!("cannot open {}", path.display())).with_source(source)
        })?;
        let loaded = Self::from_reader(file, schema)?;
        info!(
            path = %path.display(),
            entries = loaded.store.len(),
            "Loaded record"
        );
        Ok(loaded)
    }

    /// Load a record from any reader
    ///
    /// # Errors
    ///
    /// Same as [`RecordStore::load`], minus the missing-file case
    pub fn from_reader<R: Read>(reader: R, schema: &RecordSchema) -> AppResult<LoadedStore> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let header = csv_reader.headers().map_err(csv_error)?.clone();
        let index = HeaderIndex::new(&header);
        let missing: Vec<String> = schema
            .columns()
            .iter()
            .filter(|column| !index.contains(**column))
            .map(|column| column.name())
            .collect();
        if !missing.is_empty() && !header.is_empty() {
            debug!(?missing, "Record header lacks columns; reading them as empty");
        }

        let mut store = Self::new();
        for (row, record) in csv_reader.records().enumerate() {
            let record = record.map_err(csv_error)?;
            // header is line 1
            let decoder = RowDecoder::new(&index, &record, row + 2);
            let subject = decoder.subject()?;
            match &store.subject {
                Some(expected) => {
                    ensure_same_subject(expected, &subject, &format!("row {}", decoder.line()))?;
                }
                None => store.subject = Some(subject.clone()),
            }
            let entry = decoder.entry(subject)?;
            store.entries.insert(entry.date, entry);
        }

        let needs_subject = store.subject.is_none();
        Ok(LoadedStore {
            store,
            needs_subject,
        })
    }

    /// Insert `entry` at its date, replacing any existing entry
    ///
    /// # Errors
    ///
    /// Returns `DataIntegrity` when the entry's subject differs from the store's
    pub fn upsert(&mut self, entry: ObservationEntry) -> AppResult<Upsert> {
        match &self.subject {
            Some(expected) => ensure_same_subject(expected, &entry.subject, "new entry")?,
            None => self.subject = Some(entry.subject.clone()),
        }

        let date = entry.date;
        let outcome = if self.entries.insert(date, entry).is_some() {
            Upsert::Replaced
        } else {
            Upsert::Inserted
        };
        debug!(%date, ?outcome, "Upserted entry");
        Ok(outcome)
    }

    /// Write the record to `path` through a sibling temporary file
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the file cannot be written or moved into
    /// place, and `SerializationError` when encoding fails
    pub fn save(&self, path: &Path, schema: &RecordSchema) -> AppResult<()> {
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(directory)?;

        let mut staged = NamedTempFile::new_in(directory)?;
        self.write_to(BufWriter::new(staged.as_file_mut()), schema)?;
        staged.as_file().sync_all()?;
        staged.persist(path).map_err(|failure| {
            AppError::storage(format!("cannot replace {}", path.display()))
                .with_source(failure.error)
        })?;

        info!(path = %path.display(), entries = self.len(), "Saved record");
        Ok(())
    }

    /// Write the header and every entry in date order
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` when encoding or flushing fails
    pub fn write_to<W: Write>(&self, writer: W, schema: &RecordSchema) -> AppResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(schema.header()).map_err(csv_error)?;
        for entry in self.entries.values() {
            let row = schema
                .columns()
                .iter()
                .map(|column| encode_cell(entry, *column));
            csv_writer.write_record(row).map_err(csv_error)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Entry for `date`
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&ObservationEntry> {
        self.entries.get(&date)
    }

    /// Whether an entry exists for `date`
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.entries.contains_key(&date)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Subject attributes shared by every entry
    #[must_use]
    pub const fn subject(&self) -> Option<&Subject> {
        self.subject.as_ref()
    }

    /// Entries in date order
    pub fn entries(&self) -> impl Iterator<Item = &ObservationEntry> {
        self.entries.values()
    }
}

fn ensure_same_subject(expected: &Subject, found: &Subject, context: &str) -> AppResult<()> {
    if found.gender != expected.gender {
        return Err(AppError::data_integrity(format!(
            "{context}: gender '{}' differs from '{}'",
            found.gender, expected.gender
        )));
    }
    // exact comparison: heights are parsed from identical text
    if found.height_cm.to_bits() != expected.height_cm.to_bits() {
        return Err(AppError::data_integrity(format!(
            "{context}: height '{}' differs from '{}'",
            found.height_cm, expected.height_cm
        )));
    }
    if found.date_of_birth != expected.date_of_birth {
        return Err(AppError::data_integrity(format!(
            "{context}: date of birth '{}' differs from '{}'",
            found.date_of_birth, expected.date_of_birth
        )));
    }
    Ok(())
}

fn csv_error(error: csv::Error) -> AppError {
    AppError::serialization(format!("malformed record: {error}")).with_source(error)
}
