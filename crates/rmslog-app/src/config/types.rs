//! Configuration types for RMS Log Outline
//!
//! Defines:
//! - `Settings` - Settings read from `.rmslog/config.toml`
//! - `ParserSettings`, `DisplaySettings` - Its sections

use rmslog_core::prelude::*;
use rmslog_core::{ExtractConfig, DEFAULT_DURATION_WINDOW};
use serde::{Deserialize, Serialize};

/// Application settings (.rmslog/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub parser: ParserSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl Settings {
    /// Reject values the parser cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.parser.duration_window == 0 {
            return Err(Error::config_invalid(
                "parser.duration_window must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Extractor configuration derived from the parser section
    pub fn extract_config(&self) -> ExtractConfig {
        ExtractConfig {
            duration_window: self.parser.duration_window,
        }
    }
}

/// Block parser settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ParserSettings {
    /// Characters after a job record searched for its elapsed time
    #[serde(default = "default_duration_window")]
    pub duration_window: usize,

    /// Close unterminated deactivated-job records before scanning
    #[serde(default = "default_true")]
    pub preprocess: bool,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            duration_window: default_duration_window(),
            preprocess: true,
        }
    }
}

/// Outline display settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DisplaySettings {
    /// Annotate nodes with their elapsed time
    #[serde(default = "default_true")]
    pub show_elapsed: bool,

    /// Wrap top-level jobs in one node per realization
    #[serde(default = "default_true")]
    pub group_by_realization: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_elapsed: true,
            group_by_realization: true,
        }
    }
}

fn default_duration_window() -> usize {
    DEFAULT_DURATION_WINDOW
}

fn default_true() -> bool {
    true
}
