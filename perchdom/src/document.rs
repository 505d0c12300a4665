//! An in-memory document with a manual clock.
//!
//! `Document` implements [`Platform`] without any rendering environment.
//! Time only moves when the owner calls [`Document::advance`] or
//! [`Document::advance_to`], frames are only painted on
//! [`Document::run_frame`], and everything that fires is queued as a
//! [`Signal`] until [`Document::take_signals`] drains it.
//!
//! Tests drive it step by step. The terminal demo drives it with the wall
//! clock and renders [`Document::attached`] every frame.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::time::Duration;

use crate::error::PlatformError;
use crate::geometry::{Rect, Viewport};
use crate::platform::{ElementId, FrameId, ObserverId, Platform, Signal, TimerId};
use crate::style::{Overflow, StyleProp, Styles};
use crate::transitions::ActiveTransition;

/// Shortest period an interval may have. Keeps `advance` from spinning on a
/// zero-length interval.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Default)]
struct Node {
    class: String,
    content: Vec<String>,
    /// Box assigned by page layout, in page coordinates.
    layout: Option<Rect>,
    styles: Styles,
    height_transition: Option<ActiveTransition>,
    attached: bool,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    due: Duration,
    period: Option<Duration>,
}

#[derive(Debug, Clone, Copy)]
struct Observation {
    target: ElementId,
    /// Last reported visibility. `None` until the first notification.
    reported: Option<bool>,
}

/// A read-only view of an attached element, for rendering and hit testing.
#[derive(Debug, Clone)]
pub struct ElementView<'a> {
    pub id: ElementId,
    pub class: &'a str,
    pub content: &'a [String],
    /// Rectangle in viewport coordinates, with any height transition applied.
    pub rect: Rect,
    pub overflow: Overflow,
}

/// In-memory [`Platform`] implementation.
#[derive(Debug)]
pub struct Document {
    now: Duration,
    viewport: Viewport,
    page_width: f64,
    page_height: f64,
    next_handle: u64,
    elements: HashMap<ElementId, Node>,
    /// Attached elements in paint order.
    body: Vec<ElementId>,
    timers: BTreeMap<TimerId, Timer>,
    frames: Vec<FrameId>,
    observers: BTreeMap<ObserverId, Observation>,
    signals: VecDeque<Signal>,
    writes: Vec<(ElementId, StyleProp)>,
}

impl Document {
    /// Create a document whose page is exactly the size of the viewport.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            now: Duration::ZERO,
            viewport: Viewport::new(width, height),
            page_width: width,
            page_height: height,
            next_handle: 1,
            elements: HashMap::new(),
            body: Vec::new(),
            timers: BTreeMap::new(),
            frames: Vec::new(),
            observers: BTreeMap::new(),
            signals: VecDeque::new(),
            writes: Vec::new(),
        }
    }

    /// Set the scrollable page size.
    pub fn with_page_size(mut self, width: f64, height: f64) -> Self {
        self.set_page_size(width, height);
        self
    }

    fn next_raw(&mut self) -> u64 {
        let raw = self.next_handle;
        self.next_handle += 1;
        raw
    }

    // -------------------------------------------------------------------------
    // Clock
    // -------------------------------------------------------------------------

    /// Time elapsed on the document clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward by `dt`, firing every timer that falls due.
    pub fn advance(&mut self, dt: Duration) {
        self.advance_to(self.now + dt);
    }

    /// Move the clock to `at`, firing every timer that falls due on the way.
    ///
    /// Timers fire in deadline order; ties fire in creation order. Moving the
    /// clock backwards is ignored.
    pub fn advance_to(&mut self, at: Duration) {
        if at < self.now {
            return;
        }

        loop {
            let next = self
                .timers
                .iter()
                .filter(|(_, t)| t.due <= at)
                .min_by_key(|(id, t)| (t.due, **id))
                .map(|(id, t)| (*id, *t));
            let Some((id, timer)) = next else { break };

            self.now = timer.due;
            log::trace!("{} fired at {:?}", id, self.now);
            self.signals.push_back(Signal::Timer(id));

            match timer.period {
                Some(period) => {
                    if let Some(t) = self.timers.get_mut(&id) {
                        t.due = timer.due + period;
                    }
                }
                None => {
                    self.timers.remove(&id);
                }
            }
        }

        self.now = at;
        let now = self.now;
        for node in self.elements.values_mut() {
            if node.height_transition.is_some_and(|t| t.is_finished(now)) {
                node.height_transition = None;
            }
        }
    }

    /// The clock value at which the next timer fires.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.values().map(|t| t.due).min()
    }

    /// Paint a frame: fire every frame request made before this call.
    ///
    /// Returns the number of frame signals queued.
    pub fn run_frame(&mut self) -> usize {
        let frames = std::mem::take(&mut self.frames);
        let count = frames.len();
        self.signals
            .extend(frames.into_iter().map(Signal::Frame));
        count
    }

    /// Drain queued signals in the order they fired.
    pub fn take_signals(&mut self) -> Vec<Signal> {
        self.signals.drain(..).collect()
    }

    pub fn has_pending_signals(&self) -> bool {
        !self.signals.is_empty()
    }

    /// Whether any height transition is still running.
    pub fn is_animating(&self) -> bool {
        self.elements
            .values()
            .any(|node| node.height_transition.is_some())
    }

    // -------------------------------------------------------------------------
    // Page geometry
    // -------------------------------------------------------------------------

    pub fn set_page_size(&mut self, width: f64, height: f64) {
        self.page_width = width;
        self.page_height = height;
        self.scroll_to(self.viewport.scroll_x, self.viewport.scroll_y);
    }

    /// Resize the viewport, keeping the scroll offset inside the page.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.scroll_to(self.viewport.scroll_x, self.viewport.scroll_y);
    }

    /// Scroll the page, clamped so the viewport stays inside it.
    pub fn scroll_to(&mut self, x: f64, y: f64) {
        let max_x = (self.page_width - self.viewport.width).max(0.0);
        let max_y = (self.page_height - self.viewport.height).max(0.0);
        self.viewport.scroll_x = x.clamp(0.0, max_x);
        self.viewport.scroll_y = y.clamp(0.0, max_y);
        self.refresh_intersections();
    }

    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.scroll_to(self.viewport.scroll_x + dx, self.viewport.scroll_y + dy);
    }

    /// Place a flow element on the page, in page coordinates.
    pub fn set_layout(&mut self, element: ElementId, rect: Rect) -> Result<(), PlatformError> {
        let node = self
            .elements
            .get_mut(&element)
            .ok_or(PlatformError::UnknownElement(element))?;
        node.layout = Some(rect);
        self.refresh_intersections();
        Ok(())
    }

    fn computed_height(&self, node: &Node) -> Option<f64> {
        match node.height_transition {
            Some(transition) => Some(transition.value_at(self.now)),
            None => node.styles.height,
        }
    }

    /// Page-coordinate box of an element.
    fn page_rect(&self, node: &Node) -> Rect {
        let layout = node.layout.unwrap_or_default();
        let (x, y) = if node.styles.is_positioned() {
            (
                node.styles.left.unwrap_or(layout.x),
                node.styles.top.unwrap_or(layout.y),
            )
        } else {
            (layout.x, layout.y)
        };
        Rect::new(
            x,
            y,
            node.styles.width.unwrap_or(layout.width),
            self.computed_height(node).unwrap_or(layout.height),
        )
    }

    fn viewport_rect(&self, node: &Node) -> Rect {
        self.page_rect(node)
            .translate(-self.viewport.scroll_x, -self.viewport.scroll_y)
    }

    fn is_visible(&self, element: ElementId) -> bool {
        self.elements
            .get(&element)
            .filter(|node| node.attached)
            .is_some_and(|node| self.viewport_rect(node).overlaps(&self.viewport.bounds()))
    }

    /// Queue a notification for every observer whose target changed visibility.
    fn refresh_intersections(&mut self) {
        let changes: Vec<(ObserverId, bool)> = self
            .observers
            .iter()
            .filter_map(|(id, obs)| {
                let visible = self.is_visible(obs.target);
                (obs.reported != Some(visible)).then_some((*id, visible))
            })
            .collect();

        for (id, visible) in changes {
            if let Some(obs) = self.observers.get_mut(&id) {
                obs.reported = Some(visible);
            }
            log::trace!("{} reports visible={}", id, visible);
            self.signals
                .push_back(Signal::Intersection { observer: id, visible });
        }
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    pub fn exists(&self, element: ElementId) -> bool {
        self.elements.contains_key(&element)
    }

    pub fn is_attached(&self, element: ElementId) -> bool {
        self.elements
            .get(&element)
            .is_some_and(|node| node.attached)
    }

    pub fn style(&self, element: ElementId) -> Option<&Styles> {
        self.elements.get(&element).map(|node| &node.styles)
    }

    pub fn content(&self, element: ElementId) -> Option<&[String]> {
        self.elements
            .get(&element)
            .map(|node| node.content.as_slice())
    }

    pub fn class(&self, element: ElementId) -> Option<&str> {
        self.elements.get(&element).map(|node| node.class.as_str())
    }

    /// Height of the element at the current clock, transitions applied.
    pub fn height_of(&self, element: ElementId) -> Option<f64> {
        self.elements
            .get(&element)
            .and_then(|node| self.computed_height(node))
    }

    /// Every style write made to the element, oldest first. Survives removal.
    pub fn style_writes(&self, element: ElementId) -> impl Iterator<Item = StyleProp> + '_ {
        self.writes
            .iter()
            .filter(move |(id, _)| *id == element)
            .map(|(_, prop)| *prop)
    }

    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    pub fn has_timer(&self, timer: TimerId) -> bool {
        self.timers.contains_key(&timer)
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Attached elements in paint order (last is topmost).
    pub fn attached(&self) -> Vec<ElementView<'_>> {
        self.body
            .iter()
            .filter_map(|id| {
                self.elements.get(id).map(|node| ElementView {
                    id: *id,
                    class: &node.class,
                    content: &node.content,
                    rect: self.viewport_rect(node),
                    overflow: node.styles.overflow,
                })
            })
            .collect()
    }

    /// Topmost attached element containing the viewport point.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<ElementId> {
        self.body.iter().rev().copied().find(|id| {
            self.elements
                .get(id)
                .is_some_and(|node| self.viewport_rect(node).contains(x, y))
        })
    }
}

impl Platform for Document {
    fn create_element(&mut self, class: &str) -> ElementId {
        let id = ElementId::from_raw(self.next_raw());
        self.elements.insert(
            id,
            Node {
                class: class.to_string(),
                ..Default::default()
            },
        );
        id
    }

    fn set_content(&mut self, element: ElementId, lines: &[String]) -> Result<(), PlatformError> {
        let node = self
            .elements
            .get_mut(&element)
            .ok_or(PlatformError::UnknownElement(element))?;
        node.content = lines.to_vec();
        Ok(())
    }

    fn set_style(&mut self, element: ElementId, style: StyleProp) -> Result<(), PlatformError> {
        let now = self.now;
        let current_height = self
            .elements
            .get(&element)
            .ok_or(PlatformError::UnknownElement(element))
            .map(|node| self.computed_height(node))?;

        let node = self
            .elements
            .get_mut(&element)
            .ok_or(PlatformError::UnknownElement(element))?;

        if let StyleProp::Height(to) = style {
            node.height_transition = match (node.styles.transition, current_height) {
                (Some(config), Some(from)) if node.attached && from != to => {
                    Some(ActiveTransition::new(from, to, now, config))
                }
                _ => None,
            };
        }
        node.styles.apply(style);
        self.writes.push((element, style));

        if matches!(
            style,
            StyleProp::Top(_) | StyleProp::Left(_) | StyleProp::Width(_) | StyleProp::Height(_)
        ) {
            self.refresh_intersections();
        }
        Ok(())
    }

    fn append_to_body(&mut self, element: ElementId) -> Result<(), PlatformError> {
        let node = self
            .elements
            .get_mut(&element)
            .ok_or(PlatformError::UnknownElement(element))?;
        node.attached = true;
        self.body.retain(|id| *id != element);
        self.body.push(element);
        self.refresh_intersections();
        Ok(())
    }

    fn remove(&mut self, element: ElementId) -> Result<(), PlatformError> {
        self.elements
            .remove(&element)
            .ok_or(PlatformError::UnknownElement(element))?;
        self.body.retain(|id| *id != element);
        self.refresh_intersections();
        Ok(())
    }

    fn bounding_rect(&self, element: ElementId) -> Result<Rect, PlatformError> {
        let node = self
            .elements
            .get(&element)
            .ok_or(PlatformError::UnknownElement(element))?;
        if !node.attached {
            return Err(PlatformError::Detached(element));
        }
        Ok(self.viewport_rect(node))
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn observe_intersection(&mut self, target: ElementId) -> Result<ObserverId, PlatformError> {
        if !self.elements.contains_key(&target) {
            return Err(PlatformError::UnknownElement(target));
        }
        let id = ObserverId::from_raw(self.next_raw());
        self.observers.insert(
            id,
            Observation {
                target,
                reported: None,
            },
        );
        self.refresh_intersections();
        Ok(id)
    }

    fn disconnect(&mut self, observer: ObserverId) {
        self.observers.remove(&observer);
        self.signals.retain(|signal| {
            !matches!(signal, Signal::Intersection { observer: o, .. } if *o == observer)
        });
    }

    fn request_frame(&mut self) -> FrameId {
        let id = FrameId::from_raw(self.next_raw());
        self.frames.push(id);
        id
    }

    fn cancel_frame(&mut self, frame: FrameId) {
        self.frames.retain(|id| *id != frame);
    }

    fn set_interval(&mut self, period: Duration) -> TimerId {
        let period = period.max(MIN_INTERVAL);
        let id = TimerId::from_raw(self.next_raw());
        self.timers.insert(
            id,
            Timer {
                due: self.now + period,
                period: Some(period),
            },
        );
        id
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = TimerId::from_raw(self.next_raw());
        self.timers.insert(
            id,
            Timer {
                due: self.now + delay,
                period: None,
            },
        );
        id
    }

    fn clear_timer(&mut self, timer: TimerId) {
        self.timers.remove(&timer);
    }
}
