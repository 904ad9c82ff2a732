//! TextArea — a small multi-line editor for the song-list text input.
//!
//! Lines are stored separately; the cursor is (row, char index). Rendering
//! keeps the cursor row in view and measures columns with unicode-width so
//! wide glyphs do not throw the terminal cursor off.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{style_default, C_INPUT_BG, C_MUTED};

#[derive(Debug, PartialEq, Eq)]
pub enum AreaAction {
    Changed(String),
    Left,
    None,
}

pub struct TextArea {
    lines: Vec<String>,
    row: usize,
    col: usize,
    scroll: usize,
    placeholder: String,
}

impl TextArea {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            scroll: 0,
            placeholder: placeholder.into(),
        }
    }

    pub fn value(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    #[cfg(test)]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[cfg(test)]
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
        self.row = 0;
        self.col = 0;
        self.scroll = 0;
    }

    /// Replace the content; the cursor lands at the end.
    #[cfg(test)]
    pub fn set_value(&mut self, value: &str) {
        self.lines = value.split('\n').map(str::to_string).collect();
        self.row = self.lines.len() - 1;
        self.col = self.lines[self.row].chars().count();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AreaAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let changed = match key.code {
            KeyCode::Esc => return AreaAction::Left,
            KeyCode::Char('u') if ctrl => {
                self.clear();
                true
            }
            KeyCode::Char(c) if !ctrl => {
                self.insert_char(c);
                true
            }
            KeyCode::Enter => {
                self.newline();
                true
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Up => {
                self.move_vertical(-1);
                false
            }
            KeyCode::Down => {
                self.move_vertical(1);
                false
            }
            KeyCode::Home => {
                self.col = 0;
                false
            }
            KeyCode::End => {
                self.col = self.current_len();
                false
            }
            _ => false,
        };
        if changed {
            AreaAction::Changed(self.value())
        } else {
            AreaAction::None
        }
    }

    /// Insert pasted text at the cursor, keeping its line breaks.
    pub fn paste(&mut self, text: &str) -> AreaAction {
        if text.is_empty() {
            return AreaAction::None;
        }
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        for c in normalized.chars() {
            if c == '\n' {
                self.newline();
            } else {
                self.insert_char(c);
            }
        }
        AreaAction::Changed(self.value())
    }

    // ── Editing primitives ────────────────────────────────────────────────────

    fn current_len(&self) -> usize {
        self.lines[self.row].chars().count()
    }

    fn byte_index(&self, col: usize) -> usize {
        let line = &self.lines[self.row];
        line.char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.col);
        self.lines[self.row].insert(at, c);
        self.col += 1;
    }

    fn newline(&mut self) {
        let at = self.byte_index(self.col);
        let rest = self.lines[self.row].split_off(at);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
    }

    fn backspace(&mut self) -> bool {
        if self.col > 0 {
            let at = self.byte_index(self.col - 1);
            self.lines[self.row].remove(at);
            self.col -= 1;
            true
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.current_len();
            self.lines[self.row].push_str(&line);
            true
        } else {
            false
        }
    }

    fn delete(&mut self) -> bool {
        if self.col < self.current_len() {
            let at = self.byte_index(self.col);
            self.lines[self.row].remove(at);
            true
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
            true
        } else {
            false
        }
    }

    fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.current_len();
        }
    }

    fn move_right(&mut self) {
        if self.col < self.current_len() {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    fn move_vertical(&mut self, delta: isize) {
        let target = self.row as isize + delta;
        if target < 0 || target as usize >= self.lines.len() {
            return;
        }
        self.row = target as usize;
        self.col = self.col.min(self.current_len());
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, active: bool) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let height = area.height as usize;
        if self.row < self.scroll {
            self.scroll = self.row;
        } else if self.row >= self.scroll + height {
            self.scroll = self.row + 1 - height;
        }

        let lines: Vec<Line> = if self.is_empty() {
            vec![Line::from(Span::styled(
                self.placeholder.clone(),
                Style::default().fg(C_MUTED),
            ))]
        } else {
            self.lines
                .iter()
                .skip(self.scroll)
                .take(height)
                .map(|l| Line::from(Span::styled(l.clone(), style_default())))
                .collect()
        };
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(C_INPUT_BG)),
            area,
        );

        if active {
            let before: String = self.lines[self.row].chars().take(self.col).collect();
            let x = area.x + (before.width() as u16).min(area.width.saturating_sub(1));
            let y = area.y + (self.row - self.scroll) as u16;
            frame.set_cursor_position((x, y));
        }
    }
}
