// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Processor configuration
//!
//! ```toml
//! validate = true
//! max-race-retries = 3
//! race-backoff = "10ms"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid processor config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Tunables for [`Processor`](crate::Processor)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ProcessorConfig {
    /// Run the schema validator on every document
    pub validate: bool,
    /// How many times a trigger may lose a race with a peer scheduler
    /// before the run fails
    pub max_race_retries: u32,
    /// Base delay between race retries; the n-th retry waits n times this
    #[serde(with = "humantime_serde")]
    pub race_backoff: Duration,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            validate: true,
            max_race_retries: 3,
            race_backoff: Duration::from_millis(10),
        }
    }
}

impl ProcessorConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&content)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
