// ABOUTME: Basal metabolic rate ensemble of four predictive equations
// ABOUTME: Katch-McArdle, revised Harris-Benedict, Mifflin-St Jeor and Owen, averaged
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::ensemble::EnsembleEstimate;
use bodytrack_core::errors::AppError;
use bodytrack_core::models::Gender;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Inputs shared by every BMR equation
///
/// `body_fat` is the fraction produced by the body-fat ensemble; it has to be
/// estimated first because Katch-McArdle works from lean mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmrInputs {
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Age in years
    pub age_years: f64,
    /// Gender selecting the equation branch
    pub gender: Gender,
    /// Body-fat fraction
    pub body_fat: f64,
}

/// Basal metabolic rate equation
///
/// # Scientific References
///
/// - Katch, F.I. & `McArdle`, W.D. (1996). *Nutrition, Weight Control, and Exercise*.
/// - Roza, A.M. & Shizgal, H.M. (1984). The Harris Benedict equation reevaluated.
///   *Am J Clin Nutr*, 40(1), 168-182.
/// - Mifflin, M.D. et al. (1990). A new predictive equation for resting energy
///   expenditure. *Am J Clin Nutr*, 51(2), 241-247.
/// - Owen, O.E. et al. (1986, 1987). A reappraisal of caloric requirements in
///   healthy women / men. *Am J Clin Nutr*, 44(1), 1-19 and 46(6), 875-885.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BmrFormula {
    /// 370 + 21.6 x lean mass (kg)
    KatchMcArdle,
    /// Roza-Shizgal revision of Harris-Benedict
    RevisedHarrisBenedict,
    /// Mifflin-St Jeor
    MifflinStJeor,
    /// Owen, weight only
    Owen,
}

impl BmrFormula {
    /// Every equation of the ensemble, in evaluation order
    pub const ALL: [Self; 4] = [
        Self::KatchMcArdle,
        Self::RevisedHarrisBenedict,
        Self::MifflinStJeor,
        Self::Owen,
    ];

    /// Estimate BMR in kcal/day
    #[must_use]
    pub fn estimate(self, inputs: &BmrInputs) -> f64 {
        let BmrInputs {
            weight_kg: w,
            height_cm: h,
            age_years: a,
            gender,
            body_fat,
        } = *inputs;

        match (self, gender) {
            (Self::KatchMcArdle, _) => 370.0 + 21.6 * (w * (1.0 - body_fat)),
            (Self::RevisedHarrisBenedict, Gender::Female) => {
                447.593 + 9.247 * w + 3.098 * h - 4.330 * a
            }
            (Self::RevisedHarrisBenedict, Gender::Male) => {
                88.362 + 13.397 * w + 4.799 * h - 5.677 * a
            }
            (Self::MifflinStJeor, Gender::Female) => 9.99 * w + 6.25 * h - 4.92 * a - 161.0,
            (Self::MifflinStJeor, Gender::Male) => 9.99 * w + 6.25 * h - 4.92 * a + 5.0,
            (Self::Owen, Gender::Female) => 7.18 * w + 795.0,
            (Self::Owen, Gender::Male) => 10.2 * w + 879.0,
        }
    }

    /// Get algorithm name for logging and debugging
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::KatchMcArdle => "katch_mcardle",
            Self::RevisedHarrisBenedict => "revised_harris_benedict",
            Self::MifflinStJeor => "mifflin_st_jeor",
            Self::Owen => "owen",
        }
    }
}

impl FromStr for BmrFormula {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "katch_mcardle" => Ok(Self::KatchMcArdle),
            "revised_harris_benedict" => Ok(Self::RevisedHarrisBenedict),
            "mifflin_st_jeor" => Ok(Self::MifflinStJeor),
            "owen" => Ok(Self::Owen),
            other => Err(AppError::invalid_input(format!(
                "Unknown BMR formula: '{other}'. Valid options: katch_mcardle, revised_harris_benedict, mifflin_st_jeor, owen"
            ))),
        }
    }
}

/// Evaluate every BMR equation and average them
#[must_use]
pub fn estimate_bmr(inputs: &BmrInputs) -> EnsembleEstimate<BmrFormula> {
    let components = BmrFormula::ALL
        .iter()
        .map(|formula| (*formula, formula.estimate(inputs)))
        .collect();
    let estimate = EnsembleEstimate::from_components(components);
    debug!(
        components = ?estimate.components,
        bmr = estimate.value,
        "Estimated basal metabolic rate"
    );
    estimate
}
