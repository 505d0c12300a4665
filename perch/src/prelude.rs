//! Common imports for hosts embedding the widgets.

pub use crate::config::OverlayConfig;
pub use crate::error::SelectError;
pub use crate::events::{DropdownEvent, SelectEvent};
pub use crate::layers::overlay::{Placement, Position, Side, place};
pub use crate::widgets::{Dropdown, Phase, Select};

pub use perchdom::{ElementId, Platform, Rect, Signal, Viewport};
