// ABOUTME: Algorithm abstraction layer with enum-dispatched estimation formulas
// ABOUTME: BMR and body-fat ensembles, one-rep maximum and activity factors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Algorithm Selection Module
//!
//! Each metric with competing predictive equations is an enum whose variants
//! are the equations. An ensemble evaluates every variant in `ALL` explicitly
//! and averages the results with equal weight.
//!
//! # Example
//!
//! ```rust
//! use bodytrack_core::models::Gender;
//! use bodytrack_intelligence::algorithms::bmr::{estimate_bmr, BmrFormula, BmrInputs};
//!
//! let inputs = BmrInputs {
//!     weight_kg: 70.0,
//!     height_cm: 175.0,
//!     age_years: 30.0,
//!     gender: Gender::Male,
//!     body_fat: 0.15,
//! };
//! let estimate = estimate_bmr(&inputs);
//! assert_eq!(estimate.components.len(), BmrFormula::ALL.len());
//! ```

pub mod activity;
pub mod bmr;
pub mod body_fat;
pub mod one_rep_max;

pub use activity::ActivityLevel;
pub use bmr::{estimate_bmr, BmrFormula, BmrInputs};
pub use body_fat::{estimate_body_fat, BodyFatFormula, BodyFatInputs};
pub use one_rep_max::one_rep_max;
