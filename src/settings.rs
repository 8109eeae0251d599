//! Game settings and tuning
//!
//! Loaded from an optional JSON file; any missing field takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{BLINK_DIVIDER, TICK_MS};

/// Failure to load a settings file
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for spawn jitter
    pub seed: u64,

    // === Timing ===
    /// Tick source period (ms)
    pub tick_period_ms: u32,
    /// Blink flag every Nth tick
    pub blink_divider: u32,

    // === Input ===
    /// Minimum slider change (raw units) before the cursor moves
    pub input_deadband: u16,
    /// Gameplay ticks the button must be held to confirm a menu choice
    pub confirm_hold_ticks: u32,
    /// Gameplay ticks Win/Lose stay on screen before input is accepted
    pub result_hold_ticks: u32,

    // === Gameplay ===
    /// Delay before the first block of a level
    pub lead_in_ticks: u32,
    /// Extra random ticks (0..=N) added between spawns
    pub spawn_jitter_ticks: u32,
    /// A level still running after this many ticks is lost
    pub level_time_limit_ticks: u32,
    /// Losing threshold for blocks that pass without a single hit
    pub max_missed_blocks: u32,
    /// Percentage needed to win once the song has played through
    pub win_percent: u8,

    // === Audio ===
    pub music_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x7120_B055,

            tick_period_ms: TICK_MS,
            blink_divider: BLINK_DIVIDER,

            input_deadband: 3,
            confirm_hold_ticks: 20,
            result_hold_ticks: 80,

            lead_in_ticks: 40,
            spawn_jitter_ticks: 4,
            level_time_limit_ticks: 7_200,
            max_missed_blocks: 15,
            win_percent: 50,

            music_enabled: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path` if given, falling back to defaults on any error
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_path(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }

    /// Clamp values that would stall or divide by zero
    pub fn sanitized(mut self) -> Self {
        self.tick_period_ms = self.tick_period_ms.max(1);
        self.blink_divider = self.blink_divider.max(1);
        self.input_deadband = self.input_deadband.max(1);
        self.confirm_hold_ticks = self.confirm_hold_ticks.max(1);
        self.win_percent = self.win_percent.min(100);
        self
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
