//! Dropdown overlay - a floating panel anchored to an origin element.

mod events;
mod state;

pub use state::{Dropdown, Phase};
