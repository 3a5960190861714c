//! Signed distance helpers
//!
//! Negative inside, zero on the surface, positive outside.

use glam::Vec2;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Strictly inside a circle (the surface itself is outside)
#[inline]
pub fn inside_circle(p: Vec2, center: Vec2, radius: f32) -> bool {
    sd_circle(p, center, radius) < 0.0
}
