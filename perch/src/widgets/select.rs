//! Select widget - a trigger that opens a dropdown of options.

use std::collections::VecDeque;

use log::debug;
use perchdom::{ElementId, Platform, Signal};

use crate::config::OverlayConfig;
use crate::error::SelectError;
use crate::events::{DropdownEvent, SelectEvent};
use crate::widgets::dropdown::Dropdown;

/// Options shown by a select created with [`Select::default`].
const SAMPLE_OPTIONS: [&str; 15] = [
    "Option 1", "Option 2", "Option 3", "Option 4", "Option 4", "Option 4", "Option 4",
    "Option 4", "Option 4", "Option 4", "Option 4", "Option 4", "Option 4", "Option 4",
    "Option 4",
];

/// Trigger label shown while nothing is selected.
const DEFAULT_PLACEHOLDER: &str = "Select...";

/// A select box: owns the open flag, the option list and the chosen option,
/// and mounts a [`Dropdown`] anchored to its trigger.
///
/// The trigger element is rendered by the host. The select only learns its
/// handle in [`Select::after_view_init`], since the dropdown needs a real
/// rendered element to measure.
///
/// # Example
///
/// ```ignore
/// let mut select = Select::new(friends, OverlayConfig::default());
/// select.after_view_init(&mut doc, trigger);
///
/// select.toggle_dropdown(&mut doc);
/// select.choose(&mut doc, 2)?;
/// for event in select.take_events() {
///     // SelectEvent::Selected(..)
/// }
/// ```
#[derive(Debug)]
pub struct Select {
    options: Vec<String>,
    selected: Option<String>,
    placeholder: String,
    is_open: bool,
    trigger: Option<ElementId>,
    dropdown: Dropdown,
    events: VecDeque<SelectEvent>,
}

impl Default for Select {
    fn default() -> Self {
        Self::new(
            SAMPLE_OPTIONS.iter().map(|s| s.to_string()).collect(),
            OverlayConfig::default(),
        )
    }
}

impl Select {
    /// Create a closed select over `options`.
    pub fn new(options: Vec<String>, config: OverlayConfig) -> Self {
        let dropdown = Dropdown::new(config).with_options(options.clone());
        Self {
            options,
            selected: None,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            is_open: false,
            trigger: None,
            dropdown,
            events: VecDeque::new(),
        }
    }

    /// Set the label shown while nothing is selected.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Record the rendered trigger element and hand it to the dropdown.
    ///
    /// Happens once: later calls are ignored. If the select was toggled open
    /// before its view existed, the overlay opens now.
    pub fn after_view_init(&mut self, platform: &mut dyn Platform, trigger: ElementId) {
        if let Some(existing) = self.trigger {
            debug!(
                "Select::after_view_init ignored: trigger already {}",
                existing
            );
            return;
        }
        debug!("Select::after_view_init trigger={}", trigger);
        self.trigger = Some(trigger);
        self.dropdown.set_origin(platform, trigger);
    }

    /// Tear down the dropdown and its overlay.
    pub fn dispose(&mut self, platform: &mut dyn Platform) {
        self.dropdown.dispose(platform);
        self.is_open = false;
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Flip the open flag.
    pub fn toggle_dropdown(&mut self, platform: &mut dyn Platform) {
        self.is_open = !self.is_open;
        debug!("Select::toggle_dropdown open={}", self.is_open);
        self.dropdown.set_open(platform, self.is_open);
    }

    /// Force the open flag off.
    pub fn close_dropdown(&mut self, platform: &mut dyn Platform) {
        self.is_open = false;
        self.dropdown.set_open(platform, false);
    }

    /// Record the chosen option. Leaves the dropdown open.
    pub fn on_select(&mut self, option: impl Into<String>) {
        self.selected = Some(option.into());
    }

    /// The user picked the option at `index` in the overlay.
    pub fn choose(&mut self, platform: &mut dyn Platform, index: usize) -> Result<(), SelectError> {
        let option = self
            .options
            .get(index)
            .cloned()
            .ok_or(SelectError::NoSuchOption {
                index,
                len: self.options.len(),
            })?;
        self.dropdown.select_option(option);
        self.pump(platform);
        Ok(())
    }

    /// Deliver a platform signal to the dropdown.
    ///
    /// Returns `true` if the signal belonged to it.
    pub fn handle(&mut self, platform: &mut dyn Platform, signal: Signal) -> bool {
        let handled = self.dropdown.handle(platform, signal);
        self.pump(platform);
        handled
    }

    /// React to everything the dropdown emitted.
    fn pump(&mut self, platform: &mut dyn Platform) {
        for event in self.dropdown.take_events() {
            match event {
                DropdownEvent::Selected(option) => {
                    self.on_select(option.clone());
                    self.events.push_back(SelectEvent::Selected(option));
                }
                DropdownEvent::Closed => self.close_dropdown(platform),
            }
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Text for the trigger: the chosen option or the placeholder.
    pub fn label(&self) -> &str {
        self.selected.as_deref().unwrap_or(&self.placeholder)
    }

    /// The trigger element, once the view has been initialized.
    pub fn trigger(&self) -> Option<ElementId> {
        self.trigger
    }

    pub fn dropdown(&self) -> &Dropdown {
        &self.dropdown
    }

    /// Drain notifications for the consumer, oldest first.
    pub fn take_events(&mut self) -> Vec<SelectEvent> {
        self.events.drain(..).collect()
    }
}
