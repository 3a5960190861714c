//! Rendering module
//!
//! A render surface only ever reads: it takes a [`Snapshot`](crate::sim::Snapshot),
//! projects it into a [`Frame`] and draws that.

pub mod frame;
pub mod shapes;
pub mod vertex;

pub use frame::{CircleSprite, Dialog, Frame};
pub use vertex::Vertex;
