use std::fmt;

use crate::transitions::TransitionConfig;

/// How content that exceeds an element's box is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
}

/// A single inline style declaration.
///
/// Lengths are in pixels. Offsets (`Top`, `Left`) are page coordinates, so an
/// element positioned with them moves with the page when it scrolls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleProp {
    Top(f64),
    Left(f64),
    Width(f64),
    Height(f64),
    Overflow(Overflow),
    /// Transition applied to height changes.
    Transition(TransitionConfig),
}

impl fmt::Display for StyleProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleProp::Top(v) => write!(f, "top: {v}px"),
            StyleProp::Left(v) => write!(f, "left: {v}px"),
            StyleProp::Width(v) => write!(f, "width: {v}px"),
            StyleProp::Height(v) => write!(f, "height: {v}px"),
            StyleProp::Overflow(Overflow::Visible) => f.write_str("overflow: visible"),
            StyleProp::Overflow(Overflow::Hidden) => f.write_str("overflow: hidden"),
            StyleProp::Transition(t) => write!(f, "transition: height {t}"),
        }
    }
}

/// The resolved inline styles of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Styles {
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub overflow: Overflow,
    pub transition: Option<TransitionConfig>,
}

impl Styles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a declaration, replacing any previous value of the property.
    pub fn apply(&mut self, prop: StyleProp) {
        match prop {
            StyleProp::Top(v) => self.top = Some(v),
            StyleProp::Left(v) => self.left = Some(v),
            StyleProp::Width(v) => self.width = Some(v),
            StyleProp::Height(v) => self.height = Some(v),
            StyleProp::Overflow(o) => self.overflow = o,
            StyleProp::Transition(t) => self.transition = Some(t),
        }
    }

    /// Whether the element is positioned by its own offsets rather than by
    /// page layout.
    pub fn is_positioned(&self) -> bool {
        self.top.is_some() && self.left.is_some()
    }
}
