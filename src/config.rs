// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};

pub const DEFAULT_FIELD_NAME: &str = "seo_meta";

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// The `seo` section of the host configuration file.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct SeoBridgeConfig {
    /// Name the virtual field is exposed under in resource representations.
    #[serde(default = "default_field_name")]
    pub field_name: String,
    /// Whether publicly exposed custom resource types get the field too.
    #[serde(default = "default_include_custom_types")]
    pub include_custom_types: bool,
}

fn default_field_name() -> String {
    DEFAULT_FIELD_NAME.to_string()
}

fn default_include_custom_types() -> bool {
    true
}

impl Default for SeoBridgeConfig {
    fn default() -> Self {
        Self {
            field_name: default_field_name(),
            include_custom_types: default_include_custom_types(),
        }
    }
}

impl SeoBridgeConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(raw)
            .map_err(|e| ConfigError::LoadError(format!("Failed to parse seo config: {}", e)))
    }

    /// Loads and validates the section at startup. If validation fails, the
    /// host should not install the field bridge.
    pub fn load_and_validate(raw: &str) -> Result<Self, ConfigError> {
        let config = Self::from_yaml_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "seo field_name must not be empty".to_string(),
            ));
        }
        if self.field_name.chars().any(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "seo field_name must not contain whitespace, got: '{}'",
                self.field_name
            )));
        }
        // A leading underscore would collide with the storage key namespace.
        if self.field_name.starts_with('_') {
            return Err(ConfigError::ValidationError(format!(
                "seo field_name must not start with '_', got: '{}'",
                self.field_name
            )));
        }
        Ok(())
    }
}
