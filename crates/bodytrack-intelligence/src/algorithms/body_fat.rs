// ABOUTME: Body-fat fraction ensemble of three circumference-driven equations
// ABOUTME: Navy/DoD, circumference-based and modified YMCA, each converting its own inputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::ensemble::EnsembleEstimate;
use bodytrack_core::errors::{AppError, AppResult};
use bodytrack_core::models::{Circumference, Gender};
use bodytrack_core::units::{cm_to_inch, kg_to_lb};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Inputs shared by every body-fat equation
///
/// With `metric` set, lengths are centimeters and weight is kilograms; every
/// equation converts the subset it reads to inches and pounds. Otherwise the
/// values are already inches and pounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyFatInputs {
    /// Circumferences indexed by [`Circumference::index`]
    pub circumferences: [f64; Circumference::COUNT],
    /// Body weight
    pub weight: f64,
    /// Height
    pub height: f64,
    /// Age in years
    pub age_years: f64,
    /// Gender selecting the equation branch
    pub gender: Gender,
    /// Inputs are centimeters and kilograms
    pub metric: bool,
}

impl BodyFatInputs {
    fn inches(&self, value: f64) -> f64 {
        if self.metric {
            cm_to_inch(value)
        } else {
            value
        }
    }

    fn site(&self, site: Circumference) -> f64 {
        self.inches(self.circumferences[site.index()])
    }

    fn height_inches(&self) -> f64 {
        self.inches(self.height)
    }

    fn weight_pounds(&self) -> f64 {
        if self.metric {
            kg_to_lb(self.weight)
        } else {
            self.weight
        }
    }
}

/// Body-fat equation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BodyFatFormula {
    /// U.S. Navy / Department of Defense circumference method
    NavyDod,
    /// Hip, thigh, calf and wrist combination with an age split at 30
    CircumferenceBased,
    /// Modified YMCA, weight in pounds
    ModifiedYmca,
}

impl BodyFatFormula {
    /// Every equation of the ensemble, in evaluation order
    pub const ALL: [Self; 3] = [Self::NavyDod, Self::CircumferenceBased, Self::ModifiedYmca];

    /// Estimate the body-fat fraction
    ///
    /// Degenerate inputs (a non-positive logarithm argument, zero weight)
    /// yield a non-finite value; [`estimate_body_fat`] rejects those.
    #[must_use]
    pub fn estimate(self, inputs: &BodyFatInputs) -> f64 {
        use Circumference::{
            CalfWidest, ForearmWidest, HipWidest, NeckNarrowest, ThighWidest, WaistNarrowest,
            WaistNaval, WristNarrowest,
        };

        match self {
            Self::NavyDod => {
                let height = inputs.height_inches();
                let neck = inputs.site(NeckNarrowest);
                let percent = match inputs.gender {
                    Gender::Female => {
                        let girth = inputs.site(WaistNarrowest) + inputs.site(HipWidest) - neck;
                        163.205 * girth.log10() - 97.684 * height.log10() - 78.387
                    }
                    Gender::Male => {
                        let girth = inputs.site(WaistNaval) - neck;
                        86.010 * girth.log10() - 70.041 * height.log10() + 36.76
                    }
                };
                percent / 100.0
            }
            Self::CircumferenceBased => {
                let hips = inputs.site(HipWidest);
                let thigh = inputs.site(ThighWidest);
                let calf = inputs.site(CalfWidest);
                let wrist = inputs.site(WristNarrowest);
                let young = inputs.age_years <= 30.0;
                let percent = match (inputs.gender, young) {
                    (Gender::Female, true) => hips + 0.8 * thigh - 2.0 * calf - wrist,
                    (Gender::Female, false) => hips + thigh - 2.0 * calf - wrist,
                    (Gender::Male, true) => 0.5 * hips + thigh - 3.0 * calf - wrist,
                    (Gender::Male, false) => 0.5 * hips + thigh - 2.7 * calf - wrist,
                };
                percent / 100.0
            }
            Self::ModifiedYmca => {
                let weight = inputs.weight_pounds();
                let wrist = inputs.site(WristNarrowest);
                match inputs.gender {
                    Gender::Female => {
                        (0.268 * weight - 0.318 * wrist + 0.157 * inputs.site(WaistNarrowest)
                            + 0.245 * inputs.site(HipWidest)
                            - 0.434 * inputs.site(ForearmWidest)
                            - 8.987)
                            / weight
                    }
                    Gender::Male => (-0.082 * weight + 4.15 * wrist - 94.42) / weight,
                }
            }
        }
    }

    /// Get algorithm name for logging and debugging
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NavyDod => "navy_dod",
            Self::CircumferenceBased => "circumference_based",
            Self::ModifiedYmca => "modified_ymca",
        }
    }
}

impl FromStr for BodyFatFormula {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "navy_dod" => Ok(Self::NavyDod),
            "circumference_based" => Ok(Self::CircumferenceBased),
            "modified_ymca" => Ok(Self::ModifiedYmca),
            other => Err(AppError::invalid_input(format!(
                "Unknown body-fat formula: '{other}'. Valid options: navy_dod, circumference_based, modified_ymca"
            ))),
        }
    }
}

/// Evaluate every body-fat equation and average them
///
/// # Errors
///
/// Returns `InvalidInput` when an equation produces a non-finite value.
pub fn estimate_body_fat(inputs: &BodyFatInputs) -> AppResult<EnsembleEstimate<BodyFatFormula>> {
    let mut components = Vec::with_capacity(BodyFatFormula::ALL.len());
    for formula in BodyFatFormula::ALL {
        let value = formula.estimate(inputs);
        if !value.is_finite() {
            return Err(AppError::invalid_input(format!(
                "{} body-fat equation is undefined for these measurements",
                formula.name()
            )));
        }
        components.push((formula, value));
    }

    let estimate = EnsembleEstimate::from_components(components);
    debug!(
        components = ?estimate.components,
        bf = estimate.value,
        "Estimated body-fat fraction"
    );
    Ok(estimate)
}
