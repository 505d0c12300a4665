//! Paint the document into the screen buffer.

use crossterm::style::Color;
use perchdom::{Document, ElementView, Platform};
use unicode_width::UnicodeWidthStr;

use super::TRIGGER_CLASS;
use super::screen::{Pen, Screen};
use crate::shell::Shell;

const PAGE: Pen = Pen::new(Color::Reset, Color::Reset);
const RULER: Pen = Pen::new(Color::DarkGrey, Color::Reset);
const TITLE: Pen = Pen::new(Color::Cyan, Color::Reset).bold();
const TRIGGER: Pen = Pen::new(Color::Black, Color::Grey);
const OVERLAY: Pen = Pen::new(Color::White, Color::DarkBlue);
const CHOSEN: Pen = Pen::new(Color::Yellow, Color::DarkBlue).bold();
const STATUS: Pen = Pen::new(Color::Black, Color::DarkCyan);

/// Page rows between ruler marks.
const RULER_STEP: f64 = 5.0;
const RULER_WIDTH: u16 = 4;

const HELP: &str = " Enter toggle  Esc close  ↑↓/wheel scroll  1-5 align  q quit ";

/// `list_offset` is the first option row shown in the overlay.
pub fn draw(screen: &mut Screen, doc: &Document, shell: &Shell, list_offset: usize) {
    draw_page(screen, doc, shell);
    for view in doc.attached() {
        if view.class == TRIGGER_CLASS {
            draw_trigger(screen, &view);
        } else {
            draw_overlay(screen, &view, list_offset, shell.bff());
        }
    }
    draw_status(screen, doc, shell);
}

/// Row ruler and title, both scrolling with the page.
fn draw_page(screen: &mut Screen, doc: &Document, shell: &Shell) {
    let viewport = doc.viewport();
    let rows = viewport.height as i32;
    let (width, _) = screen.size();

    for y in 0..rows {
        let page_row = f64::from(y) + viewport.scroll_y.floor();
        if page_row % RULER_STEP == 0.0 {
            screen.print(0, y, &format!("{:>3}", page_row), RULER_WIDTH, RULER);
        }
    }

    let title_row = (-viewport.scroll_y).floor() as i32;
    let title = format!(
        "{} · choose your bff from {} friends",
        shell.title(),
        shell.friends().len()
    );
    screen.print(
        i32::from(RULER_WIDTH) + 1,
        title_row,
        &title,
        width.saturating_sub(RULER_WIDTH + 1),
        TITLE,
    );
    if let Some(bff) = shell.bff() {
        screen.print(
            i32::from(RULER_WIDTH) + 1,
            title_row + 2,
            &format!("Your bff is {}.", bff),
            width.saturating_sub(RULER_WIDTH + 1),
            PAGE,
        );
    }
}

fn draw_trigger(screen: &mut Screen, view: &ElementView<'_>) {
    let x = view.rect.x.floor() as i32;
    let y = view.rect.y.floor() as i32;
    let width = view.rect.width.max(0.0) as u16;
    let label = view.content.first().map(String::as_str).unwrap_or_default();

    screen.fill(x, y, width, TRIGGER);
    let used = screen.print(x + 1, y, label, width.saturating_sub(3), TRIGGER);
    let arrow_x = (x + i32::from(width) - 2).max(x + 1 + i32::from(used));
    screen.print(arrow_x, y, "▾", 1, TRIGGER);
}

/// Only the rows inside the animated height are painted.
fn draw_overlay(
    screen: &mut Screen,
    view: &ElementView<'_>,
    offset: usize,
    chosen: Option<&str>,
) {
    let x = view.rect.x.floor() as i32;
    let y = view.rect.y.floor() as i32;
    let width = view.rect.width.max(0.0) as u16;
    let rows = view.rect.height.max(0.0).round() as usize;

    for row in 0..rows {
        let line = view.content.get(offset + row).map(String::as_str);
        let pen = if line.is_some() && line == chosen {
            CHOSEN
        } else {
            OVERLAY
        };
        let y = y + row as i32;
        screen.fill(x, y, width, pen);
        if let Some(line) = line {
            screen.print(x + 1, y, line, width.saturating_sub(2), pen);
        }
    }
}

fn draw_status(screen: &mut Screen, doc: &Document, shell: &Shell) {
    let (width, height) = screen.size();
    let Some(y) = height.checked_sub(1).map(i32::from) else {
        return;
    };

    let dropdown = shell.select().dropdown();
    let state = format!(
        " {} | {:?} {:?} | scroll {} | bff {} ",
        shell.menu_class(),
        dropdown.phase(),
        dropdown.side(),
        doc.viewport().scroll_y,
        shell.bff().unwrap_or("-"),
    );

    screen.fill(0, y, width, STATUS);
    let used = screen.print(0, y, &state, width, STATUS);
    let room = width.saturating_sub(used);
    let help_width = HELP.width() as u16;
    if help_width <= room {
        screen.print(i32::from(width - help_width), y, HELP, help_width, STATUS);
    }
}

#[cfg(test)]
mod tests {
    use perch::OverlayConfig;
    use perchdom::Rect;

    use super::*;

    fn row(screen: &Screen, y: u16) -> String {
        (0..screen.size().0)
            .filter_map(|x| screen.get(x, y))
            .filter(|cell| !cell.wide_continuation)
            .map(|cell| cell.char)
            .collect()
    }

    fn setup() -> (Document, Shell) {
        let mut doc = Document::new(60.0, 20.0).with_page_size(60.0, 60.0);
        let mut shell = Shell::new(OverlayConfig::new().height(3.0));
        let trigger = doc.create_element(TRIGGER_CLASS);
        doc.set_layout(trigger, Rect::new(10.0, 5.0, 20.0, 1.0)).unwrap();
        doc.set_content(trigger, &["Pick".to_string()]).unwrap();
        doc.append_to_body(trigger).unwrap();
        shell.mount(&mut doc, trigger);
        (doc, shell)
    }

    #[test]
    fn test_draws_trigger_label() {
        let (doc, shell) = setup();
        let mut screen = Screen::new(60, 21);
        draw(&mut screen, &doc, &shell, 0);

        let line = row(&screen, 5);
        assert_eq!(&line[11..15], "Pick");
        assert!(line.contains('▾'));
    }

    #[test]
    fn test_collapsed_overlay_paints_nothing() {
        let (mut doc, mut shell) = setup();
        shell.toggle(&mut doc);
        let mut screen = Screen::new(60, 21);
        draw(&mut screen, &doc, &shell, 0);

        assert!(!row(&screen, 6).contains("Kim"));
    }

    #[test]
    fn test_ruler_follows_scroll() {
        let (mut doc, shell) = setup();
        doc.scroll_to(0.0, 7.0);
        let mut screen = Screen::new(60, 21);
        draw(&mut screen, &doc, &shell, 0);

        // Page row 10 is viewport row 3.
        assert!(row(&screen, 3).starts_with(" 10"));
        assert!(row(&screen, 20).contains("scroll 7"));
    }
}
