//! Overlay configuration.
//!
//! A small, flat config struct the host hands to `splice_stages` and
//! `tick`. Defaults are always valid; a JSON form exists so hosts that
//! already load JSON settings can embed this as a section.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Host-facing configuration for stage assembly and ticking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Prefix stamped onto every overlay stage name so host stage lists
    /// stay greppable (e.g. `"overlay: toggle strip"`).
    pub stage_prefix: String,

    /// Catch panics at the per-stage boundary so one broken panel cannot
    /// take down the host render cycle. Disable to let panics propagate
    /// (useful under a debugger).
    pub guard_panics: bool,

    /// Log a trace line for stages skipped because they are not visible.
    pub log_hidden_stages: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            stage_prefix: "overlay: ".to_string(),
            guard_panics: true,
            log_hidden_stages: false,
        }
    }
}

impl OverlayConfig {
    /// Parse a config from a JSON string. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }
}
