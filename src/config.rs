// ABOUTME: Environment-driven configuration for record location and decay fitting
// ABOUTME: Defaults, then BODYTRACK_* overrides, then validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration Module
//!
//! All values can be overridden via environment variables with the
//! `BODYTRACK_` prefix. The loaded value is passed by reference to the
//! session; there is no global instance.

use crate::constants::record::DEFAULT_FILE_EXTENSION;
use crate::decay::DecayFitConfig;
use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value is outside its allowed range
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::config(error.to_string()).with_source(error)
    }
}

/// Bodytrack configuration container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodytrackConfig {
    /// Directory holding `<username>.<extension>` record files
    pub data_dir: PathBuf,
    /// Record file extension, without the dot
    pub file_extension: String,
    /// Heart-rate decay solver settings
    pub fit: DecayFitConfig,
}

impl Default for BodytrackConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            file_extension: DEFAULT_FILE_EXTENSION.to_owned(),
            fit: DecayFitConfig::default(),
        }
    }
}

impl BodytrackConfig {
    /// Load configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.file_extension.is_empty() {
            return Err(ConfigError::ValueOutOfRange(
                "file_extension must not be empty",
            ));
        }
        if self.file_extension.contains(['/', '\\']) {
            return Err(ConfigError::ValueOutOfRange(
                "file_extension must not contain path separators",
            ));
        }
        if self.fit.max_iterations == 0 {
            return Err(ConfigError::ValueOutOfRange("fit max_iterations must be > 0"));
        }
        if !(self.fit.tolerance.is_finite() && self.fit.tolerance > 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "fit tolerance must be a positive number",
            ));
        }
        if !(self.fit.initial_damping.is_finite() && self.fit.initial_damping > 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "fit initial_damping must be a positive number",
            ));
        }
        Ok(())
    }

    /// Backing file for `username`
    #[must_use]
    pub fn record_path(&self, username: &str) -> PathBuf {
        self.data_dir
            .join(format!("{username}.{}", self.file_extension))
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var("BODYTRACK_DATA_DIR", &mut self.data_dir)?;
        Self::apply_env_var("BODYTRACK_FILE_EXTENSION", &mut self.file_extension)?;
        self.file_extension = self.file_extension.trim_start_matches('.').to_owned();

        Self::apply_env_var(
            "BODYTRACK_FIT_MAX_ITERATIONS",
            &mut self.fit.max_iterations,
        )?;
        Self::apply_env_var("BODYTRACK_FIT_TOLERANCE", &mut self.fit.tolerance)?;
        Self::apply_env_var(
            "BODYTRACK_FIT_INITIAL_DAMPING",
            &mut self.fit.initial_damping,
        )?;

        Ok(self)
    }
}
