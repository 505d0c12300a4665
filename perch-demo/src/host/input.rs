//! Terminal input mapped to demo actions.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::shell::MenuAlignment;

/// Rows scrolled per wheel notch.
pub const WHEEL_STEP: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Toggle,
    Close,
    /// Primary click at a viewport cell.
    Click { x: u16, y: u16 },
    /// Scroll by this many rows (negative is up).
    Scroll(f64),
    /// Mouse wheel at a viewport cell, in rows (negative is up).
    Wheel { x: u16, y: u16, rows: i32 },
    /// Scroll by this many pages.
    ScrollPages(f64),
    ScrollHome,
    ScrollEnd,
    Reposition(MenuAlignment),
    Resize { width: u16, height: u16 },
    Quit,
}

pub fn map_event(event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(width, height) => Some(Action::Resize { width, height }),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Action::Quit);
    }

    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Toggle),
        KeyCode::Esc => Some(Action::Close),
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Scroll(-1.0)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Scroll(1.0)),
        KeyCode::PageUp => Some(Action::ScrollPages(-1.0)),
        KeyCode::PageDown => Some(Action::ScrollPages(1.0)),
        KeyCode::Home => Some(Action::ScrollHome),
        KeyCode::End => Some(Action::ScrollEnd),
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            MenuAlignment::ALL.get(index).copied().map(Action::Reposition)
        }
        _ => None,
    }
}

fn map_mouse(mouse: MouseEvent) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Action::Click {
            x: mouse.column,
            y: mouse.row,
        }),
        MouseEventKind::ScrollUp => Some(Action::Wheel {
            x: mouse.column,
            y: mouse.row,
            rows: -WHEEL_STEP,
        }),
        MouseEventKind::ScrollDown => Some(Action::Wheel {
            x: mouse.column,
            y: mouse.row,
            rows: WHEEL_STEP,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 7,
            row: 3,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_toggle_and_close_keys() {
        assert_eq!(map_event(key(KeyCode::Enter)), Some(Action::Toggle));
        assert_eq!(map_event(key(KeyCode::Char(' '))), Some(Action::Toggle));
        assert_eq!(map_event(key(KeyCode::Esc)), Some(Action::Close));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_event(key(KeyCode::Char('q'))), Some(Action::Quit));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(ctrl_c), Some(Action::Quit));
        let ctrl_x = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL));
        assert_eq!(map_event(ctrl_x), None);
    }

    #[test]
    fn test_digits_pick_alignment() {
        assert_eq!(
            map_event(key(KeyCode::Char('1'))),
            Some(Action::Reposition(MenuAlignment::TopLeft))
        );
        assert_eq!(
            map_event(key(KeyCode::Char('5'))),
            Some(Action::Reposition(MenuAlignment::BottomRight))
        );
        assert_eq!(map_event(key(KeyCode::Char('6'))), None);
    }

    #[test]
    fn test_scroll_inputs() {
        assert_eq!(map_event(key(KeyCode::Down)), Some(Action::Scroll(1.0)));
        assert_eq!(map_event(key(KeyCode::PageUp)), Some(Action::ScrollPages(-1.0)));
        assert_eq!(
            map_event(mouse(MouseEventKind::ScrollDown)),
            Some(Action::Wheel {
                x: 7,
                y: 3,
                rows: WHEEL_STEP
            })
        );
    }

    #[test]
    fn test_left_click() {
        assert_eq!(
            map_event(mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(Action::Click { x: 7, y: 3 })
        );
        assert_eq!(map_event(mouse(MouseEventKind::Down(MouseButton::Right))), None);
        assert_eq!(map_event(mouse(MouseEventKind::Moved)), None);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut release = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_event(Event::Key(release)), None);
    }
}
