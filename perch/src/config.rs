//! Overlay configuration.

use std::time::Duration;

use perchdom::{Easing, TransitionConfig};

/// Behaviour and geometry of a dropdown overlay.
///
/// Defaults match a browser host: a 300px panel, repositioned every 100ms,
/// sliding open and closed over 150ms.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Height the overlay expands to, in pixels.
    pub height: f64,

    /// How often the overlay re-measures its anchor while open.
    pub poll_interval: Duration,

    /// Height transition used for both the open and the close slide.
    /// The close sequence waits for `transition.duration` before removing
    /// the overlay.
    pub transition: TransitionConfig,

    /// Class attribute given to the overlay element.
    pub class: &'static str,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            height: 300.0,
            poll_interval: Duration::from_millis(100),
            transition: TransitionConfig::new(Duration::from_millis(150), Easing::EaseInOut),
            class: "dropdown",
        }
    }
}

impl OverlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expanded overlay height.
    pub fn height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    /// Set the repositioning interval.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the open/close slide.
    pub fn transition(mut self, duration: Duration, easing: Easing) -> Self {
        self.transition = TransitionConfig::new(duration, easing);
        self
    }

    /// Set the overlay element's class attribute.
    pub fn class(mut self, class: &'static str) -> Self {
        self.class = class;
        self
    }
}
