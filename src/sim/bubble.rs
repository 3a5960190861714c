//! Bubble targets and batch generation

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::settings::FieldBounds;

/// A circular tap target
///
/// Bubbles are never mutated after generation. Popping removes the bubble
/// from the session by `id`, so two bubbles that happen to share the same
/// center and radius are still told apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
}

impl Bubble {
    pub fn new(id: u32, x: f32, y: f32, radius: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(x, y),
            radius,
        }
    }

    /// Distance from the center to `p`
    #[inline]
    pub fn distance_to(&self, p: Vec2) -> f32 {
        self.pos.distance(p)
    }
}

/// Generate `count` bubbles uniformly inside `bounds`
///
/// Coordinates are drawn as integers and then widened to `f32`. Overlap is
/// allowed. Ids are taken from `next_id`, which is advanced past the batch.
pub fn generate_bubbles<R: Rng>(
    rng: &mut R,
    bounds: &FieldBounds,
    count: usize,
    next_id: &mut u32,
) -> Vec<Bubble> {
    let mut bubbles = Vec::with_capacity(count);
    for _ in 0..count {
        let x = rng.random_range(bounds.x.clone()) as f32;
        let y = rng.random_range(bounds.y.clone()) as f32;
        let radius = rng.random_range(bounds.radius.clone()) as f32;

        bubbles.push(Bubble::new(*next_id, x, y, radius));
        *next_id = next_id.wrapping_add(1);
    }
    bubbles
}
