//! Double-buffered cell grid with diff flushing.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Attribute, Color, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub wide_continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
            bold: false,
            wide_continuation: false,
        }
    }
}

/// Colors and weight for a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

impl Pen {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg, bold: false }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Screen {
    width: u16,
    height: u16,
    current: Vec<Cell>,
    previous: Vec<Cell>,
}

impl Screen {
    pub fn new(width: u16, height: u16) -> Self {
        let len = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            current: vec![Cell::default(); len],
            // Differs from every real cell so the first flush paints everything.
            previous: vec![
                Cell {
                    char: '\0',
                    ..Cell::default()
                };
                len
            ],
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    #[cfg(test)]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|idx| &self.current[idx])
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    pub fn clear(&mut self) {
        self.current.fill(Cell::default());
    }

    /// Paint `width` cells starting at `(x, y)` with spaces.
    pub fn fill(&mut self, x: i32, y: i32, width: u16, pen: Pen) {
        for dx in 0..i32::from(width) {
            self.put(x + dx, y, ' ', pen);
        }
    }

    /// Write `text` from `(x, y)`, clipped to `max_width` cells and the screen.
    ///
    /// Returns the number of cells used.
    pub fn print(&mut self, x: i32, y: i32, text: &str, max_width: u16, pen: Pen) -> u16 {
        let text = truncate_to_width(text, usize::from(max_width));
        let mut col = x;
        for ch in text.chars() {
            let width = ch.width().unwrap_or(0) as i32;
            if width == 0 {
                continue;
            }
            self.put(col, y, ch, pen);
            if width == 2
                && let Some(idx) = self.signed_index(col + 1, y)
            {
                self.current[idx] = Cell {
                    char: ' ',
                    wide_continuation: true,
                    ..self.current[idx]
                };
            }
            col += width;
        }
        (col - x) as u16
    }

    fn put(&mut self, x: i32, y: i32, char: char, pen: Pen) {
        if let Some(idx) = self.signed_index(x, y) {
            self.current[idx] = Cell {
                char,
                fg: pen.fg,
                bg: pen.bg,
                bold: pen.bold,
                wide_continuation: false,
            };
        }
    }

    fn signed_index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u16::try_from(x).ok()?;
        let y = u16::try_from(y).ok()?;
        self.index(x, y)
    }

    /// Emit the cells that changed since the previous flush, then swap.
    pub fn flush_diff(&mut self, out: &mut impl Write) -> io::Result<()> {
        let mut last: Option<(u16, u16)> = None;
        let mut last_fg = Color::Reset;
        let mut last_bg = Color::Reset;
        let mut last_bold = false;

        queue!(out, SetAttribute(Attribute::Reset))?;

        for (i, (cell, old)) in self.current.iter().zip(self.previous.iter()).enumerate() {
            if cell == old || cell.wide_continuation {
                continue;
            }
            let x = (i % usize::from(self.width)) as u16;
            let y = (i / usize::from(self.width)) as u16;

            if last != Some((x, y)) {
                queue!(out, cursor::MoveTo(x, y))?;
            }
            if cell.fg != last_fg {
                queue!(out, SetForegroundColor(cell.fg))?;
                last_fg = cell.fg;
            }
            if cell.bg != last_bg {
                queue!(out, SetBackgroundColor(cell.bg))?;
                last_bg = cell.bg;
            }
            if cell.bold != last_bold {
                let attribute = if cell.bold {
                    Attribute::Bold
                } else {
                    Attribute::NormalIntensity
                };
                queue!(out, SetAttribute(attribute))?;
                last_bold = cell.bold;
            }

            write!(out, "{}", cell.char)?;
            let advance = cell.char.width().unwrap_or(1).max(1) as u16;
            last = Some((x + advance, y));
        }

        queue!(out, SetAttribute(Attribute::Reset))?;
        self.previous.clone_from(&self.current);
        Ok(())
    }
}

/// Cut `s` to at most `max_width` cells, marking the cut with an ellipsis.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target = max_width - 1;
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEN: Pen = Pen::new(Color::White, Color::Blue);

    fn row(screen: &Screen, y: u16) -> String {
        (0..screen.size().0)
            .filter_map(|x| screen.get(x, y))
            .filter(|cell| !cell.wide_continuation)
            .map(|cell| cell.char)
            .collect()
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Kim", 5), "Kim");
        assert_eq!(truncate_to_width("Zena The Warrior Princess", 8), "Zena Th…");
        assert_eq!(truncate_to_width("Henry", 0), "");
        assert_eq!(truncate_to_width("日本語", 4), "日…");
    }

    #[test]
    fn test_print_clips_to_screen() {
        let mut screen = Screen::new(6, 2);
        let used = screen.print(3, 0, "Hanna", 10, PEN);
        assert_eq!(used, 5);
        assert_eq!(row(&screen, 0), "   Han");

        screen.print(-2, 1, "Bobby", 10, PEN);
        assert_eq!(row(&screen, 1), "bby   ");
    }

    #[test]
    fn test_print_marks_wide_continuation() {
        let mut screen = Screen::new(4, 1);
        screen.print(0, 0, "日x", 4, PEN);
        assert!(screen.get(1, 0).unwrap().wide_continuation);
        assert_eq!(screen.get(2, 0).unwrap().char, 'x');
    }

    #[test]
    fn test_flush_only_writes_changes() {
        let mut screen = Screen::new(4, 1);
        screen.print(0, 0, "ab", 4, PEN);
        let mut first = Vec::new();
        screen.flush_diff(&mut first).unwrap();
        assert!(String::from_utf8_lossy(&first).contains("ab"));

        screen.clear();
        screen.print(0, 0, "ab", 4, PEN);
        let mut second = Vec::new();
        screen.flush_diff(&mut second).unwrap();
        let text = String::from_utf8_lossy(&second);
        assert!(!text.contains('a'));
        assert!(!text.contains('b'));
    }
}
