//! Deterministic game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (generation order, ids ascending)
//! - No timers, rendering or platform dependencies

pub mod bubble;
pub mod clock;
pub mod hit;
pub mod sdf;
pub mod state;
pub mod tick;

pub use bubble::{Bubble, generate_bubbles};
pub use clock::{ClockTick, GameClock};
pub use hit::{PointerEvent, find_hit, find_hit_index};
pub use sdf::sd_circle;
pub use state::{GameEvent, GamePhase, GameSession, Snapshot};
pub use tick::{Command, apply};
