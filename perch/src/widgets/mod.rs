//! Widgets.

pub mod dropdown;
pub mod select;

pub use dropdown::{Dropdown, Phase};
pub use select::Select;
