//! The environment a widget runs in.
//!
//! Widgets never touch a real document, clock or observer directly. Everything
//! they need from the host goes through [`Platform`]: creating and styling
//! elements, measuring them, observing their visibility and scheduling work.
//!
//! Scheduling does not take callbacks. Each scheduling call returns a handle,
//! and when the scheduled thing happens the host delivers a [`Signal`] carrying
//! that handle back to the widget. A widget recognises its own signals by
//! comparing handles, so a signal for a handle it has already released is
//! simply not recognised.

use std::fmt;
use std::time::Duration;

use crate::error::PlatformError;
use crate::geometry::{Rect, Viewport};
use crate::style::StyleProp;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw handle value. Platforms must never reuse a value.
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            pub const fn raw(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

handle!(
    /// Handle to an element owned by the platform.
    ElementId,
    "el"
);
handle!(
    /// Handle to a one-shot or repeating timer.
    TimerId,
    "timer"
);
handle!(
    /// Handle to a pending animation-frame request.
    FrameId,
    "frame"
);
handle!(
    /// Handle to an intersection observer.
    ObserverId,
    "observer"
);

/// Something the platform reports back to the widget that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// A requested animation frame is being painted.
    Frame(FrameId),
    /// A timeout elapsed or an interval ticked.
    Timer(TimerId),
    /// The observed element entered or left the viewport.
    Intersection { observer: ObserverId, visible: bool },
}

/// Host services consumed by widgets.
pub trait Platform {
    /// Create a detached element with the given class attribute.
    fn create_element(&mut self, class: &str) -> ElementId;

    /// Replace the element's text content, one entry per line.
    fn set_content(&mut self, element: ElementId, lines: &[String]) -> Result<(), PlatformError>;

    /// Apply an inline style declaration.
    fn set_style(&mut self, element: ElementId, style: StyleProp) -> Result<(), PlatformError>;

    /// Attach the element to the document body.
    fn append_to_body(&mut self, element: ElementId) -> Result<(), PlatformError>;

    /// Detach the element and destroy it. The handle is dead afterwards.
    fn remove(&mut self, element: ElementId) -> Result<(), PlatformError>;

    /// The element's rectangle in viewport coordinates.
    fn bounding_rect(&self, element: ElementId) -> Result<Rect, PlatformError>;

    fn viewport(&self) -> Viewport;

    /// Start observing the element's intersection with the viewport.
    ///
    /// The first notification reports the current visibility.
    fn observe_intersection(&mut self, target: ElementId) -> Result<ObserverId, PlatformError>;

    /// Stop an observer. Unknown handles are ignored.
    fn disconnect(&mut self, observer: ObserverId);

    /// Ask for a [`Signal::Frame`] before the next paint.
    fn request_frame(&mut self) -> FrameId;

    /// Cancel a frame request. Unknown handles are ignored.
    fn cancel_frame(&mut self, frame: FrameId);

    /// Fire [`Signal::Timer`] every `period` until cleared.
    fn set_interval(&mut self, period: Duration) -> TimerId;

    /// Fire [`Signal::Timer`] once after `delay`.
    fn set_timeout(&mut self, delay: Duration) -> TimerId;

    /// Clear a timer. Unknown handles are ignored.
    fn clear_timer(&mut self, timer: TimerId);
}
