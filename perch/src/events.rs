//! Notifications emitted by widgets to their owners.
//!
//! Widgets queue events while handling an operation or a platform signal.
//! The owner drains them with `take_events` after each call, in the order
//! they were emitted.

/// Emitted by a [`Dropdown`](crate::widgets::Dropdown).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownEvent {
    /// The user picked an option. The dropdown stays open.
    Selected(String),
    /// The close slide finished and the overlay was removed.
    Closed,
}

/// Emitted by a [`Select`](crate::widgets::Select) to its consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectEvent {
    /// The chosen option changed.
    Selected(String),
}
