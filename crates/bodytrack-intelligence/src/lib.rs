// ABOUTME: Estimation engine for body composition, metabolism, strength and recovery
// ABOUTME: Extracted from the main crate so formulas stay free of storage and prompt concerns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Bodytrack Intelligence
//!
//! Pure estimators over well-typed inputs:
//!
//! - **algorithms**: BMR and body-fat formula ensembles, one-rep maximum,
//!   activity factors
//! - **ensemble**: unweighted-mean combination of formula outputs
//! - **decay**: Levenberg-Marquardt fit of heart-rate recovery samples
//!
//! Body fat has to be estimated before BMR: [`algorithms::bmr::BmrInputs`]
//! carries the body-fat fraction the Katch-McArdle formula needs.

/// Enum-dispatched estimation formulas
pub mod algorithms;

/// Exponential heart-rate decay fitting
pub mod decay;

/// Ensemble averaging of formula outputs
pub mod ensemble;

pub use decay::{DecayFit, DecayFitConfig, DecayFitter, DecaySample};
pub use ensemble::EnsembleEstimate;
