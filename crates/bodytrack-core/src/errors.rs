// ABOUTME: Unified error type and error codes shared by every bodytrack crate
// ABOUTME: Maps validation, domain, integrity, estimation and storage failures to codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the workspace returns [`AppResult`]. The
//! [`ErrorCode`] groups failures by the category the caller has to react to:
//! re-prompting, aborting a load, or reporting an estimation failure.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Input value failed a type or range check
    InvalidInput = 3000,
    /// Persisted value could not be parsed
    InvalidFormat = 3002,
    /// Year/month/day combination is not a calendar date
    InvalidDate = 3004,
    /// Interactive input ended before a value was supplied
    InputClosed = 3005,

    // Domain (4000-4999)
    /// Gender token outside the supported set
    UnsupportedGender = 4000,
    /// Unit token outside the supported set
    UnsupportedUnit = 4001,

    // Record integrity (5000-5999)
    /// Constant subject fields disagree across a record
    DataIntegrity = 5000,

    // Estimation (6000-6999)
    /// Not enough samples for a well-posed fit
    InsufficientSamples = 6000,
    /// Nonlinear solver failed to converge
    FitNotConverged = 6001,

    // Configuration (7000-7999)
    /// Configuration value is invalid
    ConfigInvalid = 7000,

    // Internal (9000-9999)
    /// Unexpected internal failure
    InternalError = 9000,
    /// Reading or writing the record file failed
    StorageError = 9002,
    /// Tabular encoding or decoding failed
    SerializationError = 9003,
}

impl ErrorCode {
    /// Process exit status for this error, following the BSD `sysexits` table
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            // EX_USAGE
            Self::InvalidInput | Self::InvalidDate | Self::InputClosed => 64,
            // EX_DATAERR
            Self::InvalidFormat
            | Self::UnsupportedGender
            | Self::UnsupportedUnit
            | Self::DataIntegrity
            | Self::InsufficientSamples
            | Self::FitNotConverged => 65,
            // EX_SOFTWARE
            Self::InternalError => 70,
            // EX_IOERR
            Self::StorageError | Self::SerializationError => 74,
            // EX_CONFIG
            Self::ConfigInvalid => 78,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::InvalidFormat => "A stored value has an invalid format",
            Self::InvalidDate => "The provided date is not a valid calendar date",
            Self::InputClosed => "Input ended before a value was entered",
            Self::UnsupportedGender => "The gender value is not supported",
            Self::UnsupportedUnit => "The unit is not supported",
            Self::DataIntegrity => "The record contains inconsistent subject data",
            Self::InsufficientSamples => "Not enough samples to fit the model",
            Self::FitNotConverged => "The model fit did not converge",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Record storage operation failed",
            Self::SerializationError => "Record serialization/deserialization failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience functions for creating common errors
impl AppError {
    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Malformed persisted value
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidFormat, message)
    }

    /// Date that does not exist on the calendar
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidDate, message)
    }

    /// Interactive input stream closed
    #[must_use]
    pub fn input_closed() -> Self {
        Self::new(ErrorCode::InputClosed, "end of input")
    }

    /// Unsupported gender token
    pub fn unsupported_gender(token: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::UnsupportedGender,
            format!("'{token}' is not one of: male, female"),
        )
    }

    /// Unsupported unit token
    pub fn unsupported_unit(token: impl fmt::Display, expected: &str) -> Self {
        Self::new(
            ErrorCode::UnsupportedUnit,
            format!("'{token}' is not one of: {expected}"),
        )
    }

    /// Constant subject fields disagree
    pub fn data_integrity(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DataIntegrity, message)
    }

    /// Too few samples for a fit
    pub fn insufficient_samples(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InsufficientSamples, message)
    }

    /// Solver failed to converge
    pub fn fit_not_converged(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::FitNotConverged, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Record file I/O error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Tabular encoding error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::storage(error.to_string()).with_source(error)
    }
}
