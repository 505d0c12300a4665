//! Dropdown overlay state and lifecycle.

use std::collections::VecDeque;

use log::{debug, warn};
use perchdom::{ElementId, FrameId, ObserverId, Overflow, Platform, StyleProp, TimerId};

use crate::config::OverlayConfig;
use crate::events::DropdownEvent;
use crate::layers::overlay::{Position, Side, place};

/// Where the overlay is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No overlay exists.
    #[default]
    Closed,
    /// The overlay is attached, expanding or expanded, and tracks its origin.
    Open,
    /// The overlay is collapsing and will be removed when the slide ends.
    Closing,
}

/// Platform resources held by the current open cycle.
///
/// Every handle here is released on close or dispose. A signal carrying a
/// handle that is no longer stored here belongs to an earlier cycle.
#[derive(Debug, Default)]
struct Resources {
    overlay: Option<ElementId>,
    expand_frame: Option<FrameId>,
    poll: Option<TimerId>,
    observer: Option<ObserverId>,
    collapse: Option<TimerId>,
}

/// A dropdown overlay anchored to an origin element.
///
/// The dropdown owns a single overlay element, created on open and removed
/// after the close slide. While open it re-measures its origin on a fixed
/// interval and whenever the origin scrolls back into view.
///
/// The host feeds platform [`Signal`](perchdom::Signal)s back through
/// [`Dropdown::handle`] and drains notifications with
/// [`Dropdown::take_events`].
///
/// # Example
///
/// ```ignore
/// let mut dropdown = Dropdown::new(OverlayConfig::default())
///     .with_origin(trigger)
///     .with_options(vec!["Kim".into(), "Joe".into()]);
///
/// dropdown.set_open(&mut doc, true);
/// for signal in doc.take_signals() {
///     dropdown.handle(&mut doc, signal);
/// }
/// ```
#[derive(Debug)]
pub struct Dropdown {
    pub(super) config: OverlayConfig,
    pub(super) origin: Option<ElementId>,
    pub(super) options: Vec<String>,
    /// The open input as last set by the owner.
    pub(super) is_open: bool,
    pub(super) phase: Phase,
    pub(super) position: Position,
    pub(super) side: Side,
    /// Bumped on every open cycle.
    pub(super) generation: u64,
    res: Resources,
    pub(super) events: VecDeque<DropdownEvent>,
}

impl Dropdown {
    /// Create a closed dropdown with no origin and no options.
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            origin: None,
            options: Vec::new(),
            is_open: false,
            phase: Phase::Closed,
            position: Position::default(),
            side: Side::default(),
            generation: 0,
            res: Resources::default(),
            events: VecDeque::new(),
        }
    }

    /// Set the origin before the dropdown is first used.
    pub fn with_origin(mut self, origin: ElementId) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Set the option lines rendered inside the overlay.
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    /// Provide the origin once it has been rendered.
    ///
    /// If the open input is already set, the overlay opens now. An open
    /// overlay moves to the new origin and observes it instead of the old one.
    pub fn set_origin(&mut self, platform: &mut dyn Platform, origin: ElementId) {
        let previous = self.origin.replace(origin);
        match self.phase {
            Phase::Closed if self.is_open => self.open(platform),
            Phase::Open if previous != Some(origin) => {
                debug!(
                    "Dropdown::set_origin generation={} now tracking {}",
                    self.generation, origin
                );
                self.refresh_position(platform);
                self.start_polling(platform);
                self.observe_origin(platform, origin);
            }
            _ => {}
        }
    }

    /// Replace the overlay content.
    pub fn set_options(&mut self, platform: &mut dyn Platform, options: Vec<String>) {
        self.options = options;
        if let Some(overlay) = self.res.overlay
            && let Err(err) = platform.set_content(overlay, &self.options)
        {
            warn!("Dropdown::set_options failed: {}", err);
        }
    }

    /// Drive the open input. Only changes have an effect.
    pub fn set_open(&mut self, platform: &mut dyn Platform, open: bool) {
        if self.is_open == open {
            return;
        }
        if open {
            self.open(platform);
        } else {
            self.close(platform);
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The open input, which may run ahead of the phase.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// The last computed position record.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The side chosen by the last placement.
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn overlay(&self) -> Option<ElementId> {
        self.res.overlay
    }

    pub fn origin(&self) -> Option<ElementId> {
        self.origin
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Number of open cycles started so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_polling(&self) -> bool {
        self.res.poll.is_some()
    }

    pub fn is_observing(&self) -> bool {
        self.res.observer.is_some()
    }

    /// Drain emitted notifications, oldest first.
    pub fn take_events(&mut self) -> Vec<DropdownEvent> {
        self.events.drain(..).collect()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Open the overlay and start tracking the origin.
    ///
    /// Without an origin the open input is recorded and the overlay opens
    /// when [`Dropdown::set_origin`] is called. Opening while the previous
    /// overlay is still collapsing discards that overlay and starts a fresh
    /// cycle.
    pub fn open(&mut self, platform: &mut dyn Platform) {
        self.is_open = true;

        let Some(origin) = self.origin else {
            debug!("Dropdown::open deferred: no origin yet");
            return;
        };

        match self.phase {
            Phase::Open => return,
            Phase::Closing => self.abandon_close(platform),
            Phase::Closed => {}
        }

        self.generation += 1;
        self.position = Position::ZERO;
        self.side = Side::default();
        self.refresh_position(platform);

        let overlay = platform.create_element(self.config.class);
        self.res.overlay = Some(overlay);
        debug!(
            "Dropdown::open generation={} overlay={} side={:?}",
            self.generation, overlay, self.side
        );

        if let Err(err) = platform.set_content(overlay, &self.options) {
            warn!("Dropdown::open content failed: {}", err);
        }
        self.apply_position(platform);
        if let Err(err) = platform.append_to_body(overlay) {
            warn!("Dropdown::open attach failed: {}", err);
        }
        self.set_style(platform, StyleProp::Height(0.0));
        self.set_style(platform, StyleProp::Overflow(Overflow::Hidden));

        self.res.expand_frame = Some(platform.request_frame());
        self.phase = Phase::Open;
        self.start_polling(platform);
        self.observe_origin(platform, origin);
    }

    /// Start the close slide. Does nothing unless the overlay is open.
    ///
    /// Tracking stops immediately. The overlay is removed and
    /// [`DropdownEvent::Closed`] emitted once the slide has had
    /// `transition.duration` to run.
    pub fn close(&mut self, platform: &mut dyn Platform) {
        self.is_open = false;

        if self.phase != Phase::Open {
            debug!("Dropdown::close ignored in phase {:?}", self.phase);
            return;
        }

        self.stop_polling(platform);
        self.disconnect_observer(platform);
        if let Some(frame) = self.res.expand_frame.take() {
            platform.cancel_frame(frame);
        }

        self.set_style(platform, StyleProp::Transition(self.config.transition));
        self.set_style(platform, StyleProp::Height(0.0));

        self.res.collapse = Some(platform.set_timeout(self.config.transition.duration));
        self.phase = Phase::Closing;
        debug!("Dropdown::close generation={} collapsing", self.generation);
    }

    /// Emit a selection. The dropdown stays open; closing is up to the owner.
    pub fn select_option(&mut self, option: impl Into<String>) {
        let option = option.into();
        debug!("Dropdown::select_option {:?}", option);
        self.events.push_back(DropdownEvent::Selected(option));
    }

    /// Release everything immediately, whatever the phase.
    ///
    /// No notification is emitted. Safe to call any number of times.
    pub fn dispose(&mut self, platform: &mut dyn Platform) {
        self.stop_polling(platform);
        self.disconnect_observer(platform);
        if let Some(frame) = self.res.expand_frame.take() {
            platform.cancel_frame(frame);
        }
        if let Some(timer) = self.res.collapse.take() {
            platform.clear_timer(timer);
        }
        self.remove_overlay(platform);

        if self.phase != Phase::Closed {
            debug!("Dropdown::dispose generation={} from {:?}", self.generation, self.phase);
        }
        self.phase = Phase::Closed;
        self.is_open = false;
    }

    // -------------------------------------------------------------------------
    // Positioning
    // -------------------------------------------------------------------------

    /// Re-measure the origin and move the overlay.
    ///
    /// Updates the position record even when no overlay exists.
    pub fn refresh_position(&mut self, platform: &mut dyn Platform) {
        let Some(origin) = self.origin else { return };

        match platform.bounding_rect(origin) {
            Ok(rect) => {
                let placement = place(rect, platform.viewport(), self.config.height);
                self.position = placement.position;
                self.side = placement.side;
                self.apply_position(platform);
            }
            Err(err) => warn!("Dropdown::refresh_position failed: {}", err),
        }
    }

    /// Collapse the overlay onto the page origin while the anchor is hidden.
    pub(super) fn collapse_position(&mut self, platform: &mut dyn Platform) {
        self.position = Position::ZERO;
        self.apply_position(platform);
    }

    fn apply_position(&self, platform: &mut dyn Platform) {
        let Position { top, left, width } = self.position;
        self.set_style(platform, StyleProp::Top(top));
        self.set_style(platform, StyleProp::Left(left));
        self.set_style(platform, StyleProp::Width(width));
    }

    /// Write a style to the overlay. No overlay, no write.
    pub(super) fn set_style(&self, platform: &mut dyn Platform, prop: StyleProp) {
        if let Some(overlay) = self.res.overlay
            && let Err(err) = platform.set_style(overlay, prop)
        {
            warn!("Dropdown: failed to set {} on {}: {}", prop, overlay, err);
        }
    }

    // -------------------------------------------------------------------------
    // Resources
    // -------------------------------------------------------------------------

    pub(super) fn start_polling(&mut self, platform: &mut dyn Platform) {
        self.stop_polling(platform);
        self.res.poll = Some(platform.set_interval(self.config.poll_interval));
    }

    pub(super) fn stop_polling(&mut self, platform: &mut dyn Platform) {
        if let Some(timer) = self.res.poll.take() {
            platform.clear_timer(timer);
        }
    }

    fn observe_origin(&mut self, platform: &mut dyn Platform, origin: ElementId) {
        self.disconnect_observer(platform);
        match platform.observe_intersection(origin) {
            Ok(observer) => self.res.observer = Some(observer),
            Err(err) => warn!("Dropdown: cannot observe origin {}: {}", origin, err),
        }
    }

    fn disconnect_observer(&mut self, platform: &mut dyn Platform) {
        if let Some(observer) = self.res.observer.take() {
            platform.disconnect(observer);
        }
    }

    fn remove_overlay(&mut self, platform: &mut dyn Platform) {
        if let Some(overlay) = self.res.overlay.take()
            && let Err(err) = platform.remove(overlay)
        {
            warn!("Dropdown: failed to remove {}: {}", overlay, err);
        }
    }

    /// Drop a collapsing overlay without finishing its close.
    fn abandon_close(&mut self, platform: &mut dyn Platform) {
        if let Some(timer) = self.res.collapse.take() {
            platform.clear_timer(timer);
        }
        debug!(
            "Dropdown: generation={} superseded while closing",
            self.generation
        );
        self.remove_overlay(platform);
        self.phase = Phase::Closed;
    }

    /// The collapse timer fired: remove the overlay and notify.
    pub(super) fn finish_close(&mut self, platform: &mut dyn Platform) {
        self.res.collapse = None;
        self.remove_overlay(platform);
        self.phase = Phase::Closed;
        debug!("Dropdown: generation={} closed", self.generation);
        self.events.push_back(DropdownEvent::Closed);
    }

    // Handle matching for signal dispatch.

    pub(super) fn owns_expand_frame(&self, frame: FrameId) -> bool {
        self.res.expand_frame == Some(frame)
    }

    pub(super) fn take_expand_frame(&mut self) {
        self.res.expand_frame = None;
    }

    pub(super) fn owns_poll(&self, timer: TimerId) -> bool {
        self.res.poll == Some(timer)
    }

    pub(super) fn owns_collapse(&self, timer: TimerId) -> bool {
        self.res.collapse == Some(timer)
    }

    pub(super) fn owns_observer(&self, observer: ObserverId) -> bool {
        self.res.observer == Some(observer)
    }
}
