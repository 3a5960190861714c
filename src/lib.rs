//! Bubble Pop - tap the bubbles before the clock runs out
//!
//! Core modules:
//! - `sim`: Deterministic game core (bubbles, hit testing, countdown, session)
//! - `runtime`: Single-writer game loop with a cancellable tick timer
//! - `renderer`: Pure projection of a session snapshot into a drawable frame
//! - `notify`: Game-over notification seam (permission gated)
//! - `settings`: Data-driven round configuration

pub mod notify;
pub mod renderer;
pub mod runtime;
pub mod settings;
pub mod sim;

pub use notify::{GatedNotifier, LogNotifier, Notification, Notifier, PermissionCheck};
pub use runtime::{GameHandle, LoopClosed, spawn_game};
pub use settings::{FieldBounds, Settings};

/// Game configuration constants
pub mod consts {
    use std::ops::Range;

    /// Bubbles per round
    pub const BUBBLE_COUNT: usize = 15;

    /// Spawn field (integer ranges, half-open)
    pub const FIELD_X: Range<i32> = 100..900;
    pub const FIELD_Y: Range<i32> = 200..1800;
    pub const BUBBLE_RADIUS: Range<i32> = 40..90;

    /// Countdown start value in seconds
    pub const ROUND_SECONDS: u32 = 30;
    /// Countdown tick interval
    pub const TICK_INTERVAL_MS: u64 = 1000;
}
