//! Snapshot → frame projection
//!
//! Nothing here touches the session. A frame is rebuilt from scratch for
//! every snapshot the game loop publishes.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{GamePhase, Snapshot};

/// Triangle segments per bubble
pub const CIRCLE_SEGMENTS: u32 = 32;
/// Rim thickness in field units
const RIM_WIDTH: f32 = 3.0;

/// One bubble, ready to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleSprite {
    pub bubble_id: u32,
    pub center: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
}

/// End-of-round dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub body: String,
    pub button: String,
}

impl Dialog {
    fn game_over(score: u64) -> Self {
        Self {
            title: "Game Over".to_string(),
            body: format!("Final score: {score}"),
            button: "Restart".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub clear_color: [f32; 4],
    pub circles: Vec<CircleSprite>,
    /// Top-left HUD label
    pub score_text: String,
    /// Top-right HUD label
    pub time_text: String,
    pub dialog: Option<Dialog>,
}

impl Frame {
    pub fn project(snapshot: &Snapshot) -> Self {
        let circles = snapshot
            .bubbles
            .iter()
            .map(|b| CircleSprite {
                bubble_id: b.id,
                center: b.pos,
                radius: b.radius,
                color: bubble_color(b.id),
            })
            .collect();

        let dialog = match snapshot.phase {
            GamePhase::Ended => Some(Dialog::game_over(snapshot.score)),
            GamePhase::Running => None,
        };

        Self {
            clear_color: colors::BACKGROUND,
            circles,
            score_text: format!("Score: {}", snapshot.score),
            time_text: format!("Time: {}", snapshot.remaining_seconds),
            dialog,
        }
    }

    /// Triangle list for every bubble (fill, then rim)
    pub fn vertices(&self) -> Vec<Vertex> {
        let mut out = Vec::with_capacity(self.circles.len() * CIRCLE_SEGMENTS as usize * 9);
        for c in &self.circles {
            out.extend(shapes::circle(c.center, c.radius, c.color, CIRCLE_SEGMENTS));
            out.extend(shapes::ring(
                c.center,
                (c.radius - RIM_WIDTH).max(0.0),
                c.radius,
                colors::BUBBLE_RIM,
                CIRCLE_SEGMENTS,
            ));
        }
        out
    }

    /// Plain-text rendering for terminal hosts
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("{:<16}{:>16}", self.score_text, self.time_text)];
        match &self.dialog {
            Some(d) => {
                lines.push(format!("== {} ==", d.title));
                lines.push(d.body.clone());
                lines.push(format!("[{}]", d.button));
            }
            None => {
                for c in &self.circles {
                    lines.push(format!(
                        "  #{:<3} ({:>4}, {:>4}) r={}",
                        c.bubble_id, c.center.x, c.center.y, c.radius
                    ));
                }
            }
        }
        lines
    }
}

/// Stable per-bubble color so a bubble keeps its look between frames
pub fn bubble_color(id: u32) -> [f32; 4] {
    let h = id.wrapping_mul(2654435761);
    let channel = |shift: u32| 0.25 + 0.75 * (((h >> shift) & 0xff) as f32 / 255.0);
    [channel(0), channel(8), channel(16), 1.0]
}
