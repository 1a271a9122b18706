// ABOUTME: Main library entry point for the bodytrack measurement log
// ABOUTME: Prompt boundary, record store, session workflow, configuration and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Bodytrack
//!
//! Keeps a per-subject longitudinal record of body measurements and derives
//! body-fat fraction, basal metabolic rate, one-rep maxima and heart-rate
//! recovery from them.
//!
//! ## Architecture
//!
//! - **`bodytrack-core`**: errors, constants, units, quantization and models
//! - **`bodytrack-intelligence`**: formula ensembles and the decay fitter
//! - **store**: CSV-backed record keyed by observation date
//! - **session**: entry assembly and the interactive workflow
//! - **prompt**: typed, bounded console input
//!
//! ## Example
//!
//! ```rust,no_run
//! use bodytrack::config::BodytrackConfig;
//! use bodytrack::prompt::Prompter;
//! use bodytrack::session::{ask_username, run_session};
//! use std::io;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = BodytrackConfig::load()?;
//! let mut prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());
//! let username = ask_username(&mut prompter)?;
//! run_session(&mut prompter, &config, &config.record_path(&username))?;
//! # Ok(())
//! # }
//! ```

pub use bodytrack_core::{constants, errors, models, quantize, units};
pub use bodytrack_intelligence::{algorithms, decay, ensemble};

/// Environment-driven configuration
pub mod config;

/// Tracing subscriber setup
pub mod logging;

/// Typed console input with re-prompting
pub mod prompt;

/// Entry assembly and interactive session workflow
pub mod session;

/// CSV-backed record store
pub mod store;
