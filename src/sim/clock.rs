//! Round countdown
//!
//! Pure counter half of the game clock. The sleeping half (a periodic timer)
//! lives in the game loop and calls [`GameClock::tick`] once per interval.

use serde::{Deserialize, Serialize};

/// Outcome of a single clock tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// Still counting down, seconds remaining after this tick
    Counting(u32),
    /// Just reached zero. Reported once per arm.
    Expired,
    /// Already expired, tick ignored
    Stopped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameClock {
    start_seconds: u32,
    remaining: u32,
    expired: bool,
}

impl GameClock {
    pub fn new(start_seconds: u32) -> Self {
        let mut clock = Self {
            start_seconds,
            remaining: 0,
            expired: false,
        };
        clock.reset();
        clock
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Advance by one interval
    pub fn tick(&mut self) -> ClockTick {
        if self.expired {
            return ClockTick::Stopped;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.expired = true;
            ClockTick::Expired
        } else {
            ClockTick::Counting(self.remaining)
        }
    }

    /// Re-arm from the start value
    pub fn reset(&mut self) {
        self.remaining = self.start_seconds;
        self.expired = false;
    }
}
