//! Layers module - floating content rendered outside normal layout.

pub mod overlay;

pub use overlay::{Placement, Position, Side, place};
