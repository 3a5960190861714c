//! Round settings
//!
//! Loaded from an optional JSON file; anything missing falls back to the
//! defaults, which match the classic 15 bubbles / 30 seconds round.

use std::ops::Range;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Upper bound on bubbles per round
pub const MAX_BUBBLE_COUNT: usize = 10_000;

/// Spawn field for bubble centers and radii (integer, half-open ranges)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub x: Range<i32>,
    pub y: Range<i32>,
    pub radius: Range<i32>,
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self {
            x: FIELD_X,
            y: FIELD_Y,
            radius: BUBBLE_RADIUS,
        }
    }
}

impl FieldBounds {
    /// Widen any empty range to a single value so sampling never fails
    fn validated(mut self) -> Self {
        for range in [&mut self.x, &mut self.y, &mut self.radius] {
            if range.end <= range.start {
                let widened = if range.start == i32::MAX {
                    i32::MAX - 1..i32::MAX
                } else {
                    range.start..range.start + 1
                };
                log::warn!("Empty field range {:?}, using {:?}", range, widened);
                *range = widened;
            }
        }
        if self.radius.start < 1 {
            log::warn!("Non-positive bubble radius {:?}, clamping to 1", self.radius);
            self.radius.start = 1;
            self.radius.end = self.radius.end.max(2);
        }
        self
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Countdown start value
    pub round_seconds: u32,
    /// Countdown interval in milliseconds
    pub tick_interval_ms: u64,
    /// Bubbles spawned per round
    pub bubble_count: usize,
    /// Spawn field
    pub field: FieldBounds,
    /// Post a notification when the round ends
    pub notifications_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round_seconds: ROUND_SECONDS,
            tick_interval_ms: TICK_INTERVAL_MS,
            bubble_count: BUBBLE_COUNT,
            field: FieldBounds::default(),
            notifications_enabled: true,
        }
    }
}

impl Settings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Settings>(json).map(Settings::validated)
    }

    /// Clamp values that would stall the clock or break generation
    pub fn validated(mut self) -> Self {
        if self.round_seconds == 0 {
            log::warn!("round_seconds must be at least 1, using 1");
            self.round_seconds = 1;
        }
        if self.tick_interval_ms == 0 {
            log::warn!("tick_interval_ms must be at least 1, using 1");
            self.tick_interval_ms = 1;
        }
        if self.bubble_count > MAX_BUBBLE_COUNT {
            log::warn!(
                "bubble_count {} is too large, using {}",
                self.bubble_count,
                MAX_BUBBLE_COUNT
            );
            self.bubble_count = MAX_BUBBLE_COUNT;
        }
        if self.bubble_count == 0 {
            log::warn!("bubble_count is 0, rounds will start with an empty field");
        }
        self.field = self.field.validated();
        self
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
