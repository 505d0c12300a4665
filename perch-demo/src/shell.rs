//! Root shell: the page that hosts the select.

use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use perch::widgets::Select;
use perch::{OverlayConfig, SelectError, SelectEvent};
use perchdom::{ElementId, Platform, Rect, Signal};
use thiserror::Error;

pub const TITLE: &str = "perch";

pub const FRIENDS: [&str; 13] = [
    "Kim",
    "Joe",
    "Kit",
    "Tom",
    "Henry",
    "Hanna",
    "Dave",
    "Ellen",
    "Tina",
    "Bobby",
    "Todd",
    "Pam",
    "Zena The Warrior Princess",
];

/// Trigger size in cells.
pub const TRIGGER_WIDTH: f64 = 28.0;
pub const TRIGGER_HEIGHT: f64 = 1.0;

/// Distance kept between an edge-aligned trigger and the area's border.
const MARGIN: f64 = 1.0;

/// Where the trigger sits inside the first screen of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuAlignment {
    TopLeft,
    TopRight,
    #[default]
    Center,
    BottomLeft,
    BottomRight,
}

impl MenuAlignment {
    pub const ALL: [MenuAlignment; 5] = [
        MenuAlignment::TopLeft,
        MenuAlignment::TopRight,
        MenuAlignment::Center,
        MenuAlignment::BottomLeft,
        MenuAlignment::BottomRight,
    ];

    pub fn class_name(self) -> &'static str {
        match self {
            MenuAlignment::TopLeft => "top-left",
            MenuAlignment::TopRight => "top-right",
            MenuAlignment::Center => "center",
            MenuAlignment::BottomLeft => "bottom-left",
            MenuAlignment::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for MenuAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown menu alignment `{0}`")]
pub struct ParseAlignmentError(String);

impl FromStr for MenuAlignment {
    type Err = ParseAlignmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MenuAlignment::ALL
            .into_iter()
            .find(|alignment| alignment.class_name() == s)
            .ok_or_else(|| ParseAlignmentError(s.to_string()))
    }
}

/// Top-level state of the demo page.
#[derive(Debug)]
pub struct Shell {
    title: &'static str,
    bff: Option<String>,
    friends: Vec<String>,
    menu_class: MenuAlignment,
    select: Select,
}

impl Shell {
    pub fn new(config: OverlayConfig) -> Self {
        let friends: Vec<String> = FRIENDS.iter().map(|s| s.to_string()).collect();
        let select = Select::new(friends.clone(), config).with_placeholder("Pick a friend...");
        Self {
            title: TITLE,
            bff: None,
            friends,
            menu_class: MenuAlignment::default(),
            select,
        }
    }

    pub fn reposition(&mut self, alignment: MenuAlignment) {
        if alignment != self.menu_class {
            info!("Shell: menu alignment {} -> {}", self.menu_class, alignment);
        }
        self.menu_class = alignment;
    }

    /// Trigger box for the current alignment, inside `area` (page coordinates).
    pub fn trigger_rect(&self, area: Rect) -> Rect {
        let width = TRIGGER_WIDTH.min((area.width - 2.0 * MARGIN).max(1.0));
        let left = area.left() + MARGIN;
        let right = (area.right() - MARGIN - width).max(left);
        let top = area.top() + MARGIN;
        let bottom = (area.bottom() - MARGIN - TRIGGER_HEIGHT).max(top);

        let (x, y) = match self.menu_class {
            MenuAlignment::TopLeft => (left, top),
            MenuAlignment::TopRight => (right, top),
            MenuAlignment::Center => (
                (area.left() + (area.width - width) / 2.0).floor(),
                (area.top() + (area.height - TRIGGER_HEIGHT) / 2.0).floor(),
            ),
            MenuAlignment::BottomLeft => (left, bottom),
            MenuAlignment::BottomRight => (right, bottom),
        };
        Rect::new(x, y, width, TRIGGER_HEIGHT)
    }

    /// Mount the select on its rendered trigger.
    pub fn mount(&mut self, platform: &mut dyn Platform, trigger: ElementId) {
        self.select.after_view_init(platform, trigger);
    }

    pub fn toggle(&mut self, platform: &mut dyn Platform) {
        self.select.toggle_dropdown(platform);
    }

    pub fn close(&mut self, platform: &mut dyn Platform) {
        self.select.close_dropdown(platform);
    }

    /// Choose the friend at `index` in the overlay.
    pub fn choose(&mut self, platform: &mut dyn Platform, index: usize) -> Result<(), SelectError> {
        self.select.choose(platform, index)?;
        self.collect_selection();
        Ok(())
    }

    pub fn handle(&mut self, platform: &mut dyn Platform, signal: Signal) -> bool {
        let handled = self.select.handle(platform, signal);
        self.collect_selection();
        handled
    }

    pub fn dispose(&mut self, platform: &mut dyn Platform) {
        self.select.dispose(platform);
    }

    fn collect_selection(&mut self) {
        for event in self.select.take_events() {
            let SelectEvent::Selected(friend) = event;
            debug!("Shell: bff is now {}", friend);
            self.bff = Some(friend);
        }
    }

    pub fn title(&self) -> &str {
        self.title
    }

    pub fn bff(&self) -> Option<&str> {
        self.bff.as_deref()
    }

    pub fn friends(&self) -> &[String] {
        &self.friends
    }

    pub fn menu_class(&self) -> MenuAlignment {
        self.menu_class
    }

    pub fn select(&self) -> &Select {
        &self.select
    }
}

#[cfg(test)]
mod tests {
    use perchdom::Document;

    use super::*;

    fn area() -> Rect {
        Rect::from_size(80.0, 24.0)
    }

    fn mounted() -> (Document, Shell) {
        let mut doc = Document::new(80.0, 24.0).with_page_size(80.0, 72.0);
        let mut shell = Shell::new(OverlayConfig::new().height(6.0));
        let trigger = doc.create_element("trigger");
        doc.set_layout(trigger, shell.trigger_rect(area())).unwrap();
        doc.append_to_body(trigger).unwrap();
        shell.mount(&mut doc, trigger);
        (doc, shell)
    }

    // =========================================================================
    // MenuAlignment
    // =========================================================================

    #[test]
    fn test_alignment_parses_class_names() {
        for alignment in MenuAlignment::ALL {
            let parsed: MenuAlignment = alignment.to_string().parse().unwrap();
            assert_eq!(parsed, alignment);
        }
        assert_eq!(
            "middle".parse::<MenuAlignment>(),
            Err(ParseAlignmentError("middle".to_string()))
        );
    }

    #[test]
    fn test_default_alignment_is_center() {
        assert_eq!(MenuAlignment::default().to_string(), "center");
    }

    // =========================================================================
    // Shell
    // =========================================================================

    #[test]
    fn test_new_shell() {
        let shell = Shell::new(OverlayConfig::default());
        assert_eq!(shell.title(), "perch");
        assert_eq!(shell.bff(), None);
        assert_eq!(shell.friends().len(), 13);
        assert_eq!(shell.friends()[12], "Zena The Warrior Princess");
        assert_eq!(shell.menu_class(), MenuAlignment::Center);
        assert_eq!(shell.select().options(), shell.friends());
        assert!(!shell.select().is_open());
    }

    #[test]
    fn test_reposition() {
        let mut shell = Shell::new(OverlayConfig::default());
        shell.reposition(MenuAlignment::BottomRight);
        assert_eq!(shell.menu_class(), MenuAlignment::BottomRight);
        shell.reposition(MenuAlignment::BottomRight);
        assert_eq!(shell.menu_class(), MenuAlignment::BottomRight);
    }

    #[test]
    fn test_trigger_rect_per_alignment() {
        let mut shell = Shell::new(OverlayConfig::default());
        let expected = [
            (MenuAlignment::TopLeft, 1.0, 1.0),
            (MenuAlignment::TopRight, 51.0, 1.0),
            (MenuAlignment::Center, 26.0, 11.0),
            (MenuAlignment::BottomLeft, 1.0, 22.0),
            (MenuAlignment::BottomRight, 51.0, 22.0),
        ];
        for (alignment, x, y) in expected {
            shell.reposition(alignment);
            assert_eq!(
                shell.trigger_rect(area()),
                Rect::new(x, y, TRIGGER_WIDTH, TRIGGER_HEIGHT),
                "{}",
                alignment
            );
        }
    }

    #[test]
    fn test_trigger_rect_shrinks_in_narrow_area() {
        let shell = Shell::new(OverlayConfig::default());
        let rect = shell.trigger_rect(Rect::from_size(12.0, 5.0));
        assert_eq!(rect.width, 10.0);
        assert!(rect.right() <= 12.0);
    }

    #[test]
    fn test_choosing_sets_bff() {
        let (mut doc, mut shell) = mounted();
        shell.toggle(&mut doc);

        shell.choose(&mut doc, 12).unwrap();
        assert_eq!(shell.bff(), Some("Zena The Warrior Princess"));
        assert_eq!(shell.select().label(), "Zena The Warrior Princess");

        assert!(shell.choose(&mut doc, 13).is_err());
        assert_eq!(shell.bff(), Some("Zena The Warrior Princess"));
    }

    #[test]
    fn test_dispose_removes_overlay() {
        let (mut doc, mut shell) = mounted();
        shell.toggle(&mut doc);
        assert_eq!(doc.attached().len(), 2);

        shell.dispose(&mut doc);
        assert_eq!(doc.attached().len(), 1);
        assert_eq!(doc.timer_count(), 0);
    }
}
