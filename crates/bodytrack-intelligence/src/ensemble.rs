// ABOUTME: Unweighted-mean combination of independent formula estimates
// ABOUTME: Keeps each formula's component next to the ensemble value for reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Result of evaluating every formula of an ensemble
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleEstimate<F> {
    /// Each formula with the value it produced, in evaluation order
    pub components: Vec<(F, f64)>,
    /// Arithmetic mean of the components
    pub value: f64,
}

impl<F: Copy + PartialEq> EnsembleEstimate<F> {
    /// Average the given components with equal weight
    #[must_use]
    pub fn from_components(components: Vec<(F, f64)>) -> Self {
        let sum: f64 = components.iter().map(|(_, value)| value).sum();
        let value = sum / components.len() as f64;
        Self { components, value }
    }

    /// Value produced by `formula`, if it is part of the ensemble
    #[must_use]
    pub fn component(&self, formula: F) -> Option<f64> {
        self.components
            .iter()
            .find(|(candidate, _)| *candidate == formula)
            .map(|(_, value)| *value)
    }
}
