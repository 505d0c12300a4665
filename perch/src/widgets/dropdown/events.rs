//! Platform signal handling for the dropdown.

use log::{debug, trace};
use perchdom::{FrameId, ObserverId, Platform, Signal, StyleProp, TimerId};

use super::{Dropdown, Phase};

impl Dropdown {
    /// Deliver a platform signal.
    ///
    /// Returns `true` if the signal belonged to this dropdown's current
    /// cycle. Signals for released handles are ignored.
    pub fn handle(&mut self, platform: &mut dyn Platform, signal: Signal) -> bool {
        match signal {
            Signal::Frame(frame) => self.on_frame(platform, frame),
            Signal::Timer(timer) => self.on_timer(platform, timer),
            Signal::Intersection { observer, visible } => {
                self.on_intersection(platform, observer, visible)
            }
        }
    }

    fn on_frame(&mut self, platform: &mut dyn Platform, frame: FrameId) -> bool {
        if !self.owns_expand_frame(frame) {
            return false;
        }
        self.take_expand_frame();

        if self.phase == Phase::Open {
            self.set_style(platform, StyleProp::Transition(self.config.transition));
            self.set_style(platform, StyleProp::Height(self.config.height));
        }
        true
    }

    fn on_timer(&mut self, platform: &mut dyn Platform, timer: TimerId) -> bool {
        if self.owns_poll(timer) {
            if self.phase == Phase::Open {
                trace!("Dropdown: poll tick generation={}", self.generation);
                self.refresh_position(platform);
            }
            return true;
        }

        if self.owns_collapse(timer) {
            self.finish_close(platform);
            return true;
        }

        false
    }

    fn on_intersection(
        &mut self,
        platform: &mut dyn Platform,
        observer: ObserverId,
        visible: bool,
    ) -> bool {
        if !self.owns_observer(observer) {
            return false;
        }
        if self.phase != Phase::Open {
            return true;
        }

        if visible {
            debug!("Dropdown: origin visible, resuming tracking");
            self.refresh_position(platform);
            self.start_polling(platform);
        } else {
            debug!("Dropdown: origin hidden, suspending tracking");
            self.stop_polling(platform);
            self.collapse_position(platform);
        }
        true
    }
}
