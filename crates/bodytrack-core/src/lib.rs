// ABOUTME: Core types and constants for the bodytrack measurement log
// ABOUTME: Foundation crate with error handling, unit conversion, quantization, and entry models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Bodytrack Core
//!
//! Foundation crate providing the shared types for the bodytrack workspace.
//! It changes rarely and has no knowledge of formulas, persistence or prompts.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Precision grids, conversion factors and input limits
//! - **units**: Metric/imperial length and mass conversion
//! - **quantize**: Round-half-away-from-zero onto a precision grid
//! - **models**: Subject, observation entry and measurement catalogs

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Length and mass unit conversion
pub mod units;

/// Fixed-grid rounding of numeric outputs
pub mod quantize;

/// Subject, observation entry and measurement catalogs
pub mod models;
