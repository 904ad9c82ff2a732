//! TextField — single-line editor on top of tui-input, used for the
//! playlist link and the upload path.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input, InputRequest};

use crate::theme::{style_input, C_INPUT_BG, C_MUTED};

#[derive(Debug, PartialEq, Eq)]
pub enum FieldAction {
    Changed(String),
    Confirmed(String),
    /// Esc: leave the field, keeping its text.
    Left,
    None,
}

pub struct TextField {
    input: Input,
    placeholder: String,
}

impl TextField {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            placeholder: placeholder.into(),
        }
    }

    pub fn clear(&mut self) {
        self.input.reset();
    }

    pub fn set_value(&mut self, value: &str) {
        self.input = Input::new(value.to_string());
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FieldAction {
        match key.code {
            KeyCode::Esc => FieldAction::Left,
            KeyCode::Enter => FieldAction::Confirmed(self.value().to_string()),
            // Ctrl+U: wipe the whole field.
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
                FieldAction::Changed(String::new())
            }
            _ => match self.input.handle_event(&Event::Key(key)) {
                Some(change) if change.value => FieldAction::Changed(self.value().to_string()),
                _ => FieldAction::None,
            },
        }
    }

    /// Insert pasted text at the cursor. Line breaks are dropped.
    pub fn paste(&mut self, text: &str) -> FieldAction {
        let before = self.value().len();
        for c in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            self.input.handle(InputRequest::InsertChar(c));
        }
        if self.value().len() == before {
            FieldAction::None
        } else {
            FieldAction::Changed(self.value().to_string())
        }
    }

    /// Render as "› value" on an input-colored row.
    pub fn draw(&self, frame: &mut Frame, area: Rect, active: bool) {
        if area.width < 4 || area.height == 0 {
            return;
        }
        let width = area.width.saturating_sub(3) as usize;
        let scroll = self.input.visual_scroll(width);
        let value = self.input.value();
        let span = if value.is_empty() {
            Span::styled(format!("› {}", self.placeholder), Style::default().fg(C_MUTED))
        } else {
            let visible: String = value.chars().skip(scroll).collect();
            Span::styled(format!("› {}", visible), style_input())
        };
        let row = Rect { height: 1, ..area };
        frame.render_widget(
            Paragraph::new(Line::from(span)).style(Style::default().bg(C_INPUT_BG)),
            row,
        );

        if active {
            let cursor_x = area.x + 2 + (self.input.visual_cursor().saturating_sub(scroll)) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width - 1), area.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    #[test]
    fn typing_reports_changes() {
        let mut field = TextField::new("link");
        assert_eq!(
            field.handle_key(key(KeyCode::Char('h'))),
            FieldAction::Changed("h".into())
        );
        assert_eq!(
            field.handle_key(key(KeyCode::Enter)),
            FieldAction::Confirmed("h".into())
        );
        assert_eq!(field.handle_key(key(KeyCode::Esc)), FieldAction::Left);
        assert_eq!(field.value(), "h");
    }

    #[test]
    fn paste_drops_line_breaks() {
        let mut field = TextField::new("path");
        assert_eq!(
            field.paste("/tmp/songs.txt\n"),
            FieldAction::Changed("/tmp/songs.txt".into())
        );
        assert_eq!(field.paste("\n"), FieldAction::None);
    }
}
