pub mod document;
pub mod error;
pub mod geometry;
pub mod platform;
pub mod style;
pub mod transitions;

pub use document::{Document, ElementView};
pub use error::PlatformError;
pub use geometry::{Rect, Viewport};
pub use platform::{ElementId, FrameId, ObserverId, Platform, Signal, TimerId};
pub use style::{Overflow, StyleProp, Styles};
pub use transitions::{Easing, TransitionConfig};
