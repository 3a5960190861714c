//! Pointer hit testing against the live bubble set

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bubble::Bubble;
use super::sdf::inside_circle;

/// A single tap, consumed once
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec2> for PointerEvent {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Index of the first bubble (in iteration order) strictly containing `point`
///
/// This is first-match, not nearest-match: when bubbles overlap, the one
/// generated earlier wins even if the tap is closer to a later one.
pub fn find_hit_index(bubbles: &[Bubble], point: PointerEvent) -> Option<usize> {
    let p = point.pos();
    bubbles.iter().position(|b| inside_circle(p, b.pos, b.radius))
}

/// First bubble strictly containing `point`
pub fn find_hit(bubbles: &[Bubble], point: PointerEvent) -> Option<&Bubble> {
    find_hit_index(bubbles, point).map(|i| &bubbles[i])
}
