//! Anchored dropdown overlay and select widget.
//!
//! Widgets in this crate never talk to a real rendering environment. They
//! create, style and measure elements, observe visibility and schedule work
//! through [`perchdom::Platform`], and receive the results as
//! [`perchdom::Signal`]s routed back by the host.

pub mod config;
pub mod error;
pub mod events;
pub mod layers;
pub mod prelude;
pub mod widgets;

pub use config::OverlayConfig;
pub use error::SelectError;
pub use events::{DropdownEvent, SelectEvent};
