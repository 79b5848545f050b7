//! Runtime configuration
//!
//! All tunable parameters for the console and the reference device.
//! Defaults are compiled in; a JSON file can override them at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    // --- Diagnostics ---
    /// Mirror every dispatcher / engine status line to the log
    pub debug_mode: bool,

    // --- Timing ---
    /// Host tick period (milliseconds)
    pub tick_interval_ms: u32,

    // --- Device behaviour ---
    /// How long a run lasts before the device cools down (milliseconds)
    pub run_timeout_ms: u64,
    /// Cooldown period before returning to idle (milliseconds)
    pub cooldown_ms: u64,
    /// Faults tolerated before `clear` refuses to leave the fault state
    pub max_faults: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            // Diagnostics
            debug_mode: false,

            // Timing
            tick_interval_ms: 20, // 50 Hz

            // Device
            run_timeout_ms: 30_000,
            cooldown_ms: 5_000,
            max_faults: 3,
        }
    }
}

impl ConsoleConfig {
    /// Range-check every field.  Rejects, never clamps.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(Error::Config("tick_interval_ms must be > 0"));
        }
        if self.tick_interval_ms > 1_000 {
            return Err(Error::Config("tick_interval_ms must be <= 1000"));
        }
        if self.run_timeout_ms < u64::from(self.tick_interval_ms) {
            return Err(Error::Config("run_timeout_ms must be at least one tick"));
        }
        if self.cooldown_ms < u64::from(self.tick_interval_ms) {
            return Err(Error::Config("cooldown_ms must be at least one tick"));
        }
        if self.max_faults == 0 {
            return Err(Error::Config("max_faults must be > 0"));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.  Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }
}

/// Load configuration from a JSON file.
pub fn load(path: &Path) -> Result<ConsoleConfig> {
    let text = std::fs::read_to_string(path).map_err(|_| Error::Config("file unreadable"))?;
    ConsoleConfig::from_json(&text)
}
