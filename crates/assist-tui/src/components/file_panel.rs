//! FilePanel component — pick a .txt song list by path and preview it.
//!
//! Typing a path and pressing Enter uploads it. Pasting a path (what most
//! terminals do when a file is dropped onto them) uploads immediately.

use std::path::PathBuf;

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use assist_proto::model::InputMode;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{style_default, style_muted, style_secondary, C_BUSY, C_GENRE},
    widgets::{
        pane_chrome::pane_chrome,
        text_field::{FieldAction, TextField},
    },
};

pub struct FilePanel {
    field: TextField,
}

impl FilePanel {
    pub fn new() -> Self {
        Self {
            field: TextField::new("path to a .txt file"),
        }
    }
}

/// Turn typed or dropped text into a path: strips quotes and `file://`,
/// expands a leading `~/`.
pub fn parse_path(raw: &str) -> Option<PathBuf> {
    let mut s = raw.trim();
    for quote in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            s = &s[1..s.len() - 1];
        }
    }
    let s = s.strip_prefix("file://").unwrap_or(s);
    if s.is_empty() {
        return None;
    }
    if let Some(rest) = s.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Some(home.join(rest));
        }
    }
    Some(PathBuf::from(s))
}

impl Component for FilePanel {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if !state.is_editing() {
            return match key.code {
                KeyCode::Enter | KeyCode::Char('i') => vec![Action::BeginEditing],
                _ => vec![],
            };
        }
        match self.field.handle_key(key) {
            FieldAction::Confirmed(raw) => match parse_path(&raw) {
                Some(path) => vec![Action::EndEditing, Action::UploadFile(path)],
                None => vec![],
            },
            FieldAction::Left => vec![Action::EndEditing],
            FieldAction::Changed(_) | FieldAction::None => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) if !state.is_editing() => {
                vec![Action::BeginEditing]
            }
            _ => vec![],
        }
    }

    fn handle_paste(&mut self, text: &str, _state: &AppState) -> Vec<Action> {
        let Some(path) = parse_path(text) else {
            return vec![];
        };
        self.field.set_value(&path.display().to_string());
        vec![Action::EndEditing, Action::UploadFile(path)]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if *action == Action::InputsCleared {
            self.field.clear();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("file", Some('2'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 2 {
            return;
        }

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                InputMode::File.prompt(),
                style_secondary(),
            ))),
            Rect { height: 1, ..inner },
        );
        self.field.draw(
            frame,
            Rect {
                y: inner.y + 1,
                height: 1,
                ..inner
            },
            focused && state.is_editing(),
        );

        let body = Rect {
            y: inner.y + 2,
            height: inner.height.saturating_sub(2),
            ..inner
        };
        if body.height == 0 {
            return;
        }

        let inputs = state.session.inputs();
        let mut lines = Vec::new();
        if state.session.is_reading_file() {
            lines.push(Line::from(Span::styled(
                " reading…",
                Style::default().fg(C_BUSY),
            )));
        } else if let Some(name) = &inputs.file_name {
            lines.push(Line::from(vec![
                Span::styled(" ✓ ", Style::default().fg(C_GENRE)),
                Span::styled(name.clone(), style_default()),
            ]));
        }

        if !inputs.file_content.is_empty() {
            lines.push(Line::from(Span::styled("File Content:", style_secondary())));
            let room = (body.height as usize).saturating_sub(lines.len() + 1);
            let total = inputs.file_content.lines().count();
            for l in inputs.file_content.lines().take(room) {
                lines.push(Line::from(Span::styled(format!("  {}", l), style_muted())));
            }
            if total > room {
                lines.push(Line::from(Span::styled(
                    format!("  … {} more lines", total - room),
                    style_muted(),
                )));
            }
        }
        frame.render_widget(Paragraph::new(lines), body);
    }

    fn min_height(&self) -> u16 {
        6
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    #[test]
    fn dropped_paths_are_cleaned() {
        assert_eq!(
            parse_path("'/tmp/my songs.txt' "),
            Some(PathBuf::from("/tmp/my songs.txt"))
        );
        assert_eq!(
            parse_path("file:///tmp/list.txt\n"),
            Some(PathBuf::from("/tmp/list.txt"))
        );
        assert_eq!(parse_path("  "), None);
    }

    #[test]
    fn paste_uploads_immediately() {
        let mut panel = FilePanel::new();
        let state = AppState::new(Session::default(), "", PathBuf::new());
        assert_eq!(
            panel.handle_paste("\"/tmp/list.txt\"", &state),
            vec![
                Action::EndEditing,
                Action::UploadFile(PathBuf::from("/tmp/list.txt"))
            ]
        );
        assert_eq!(panel.field.value(), "/tmp/list.txt");
    }
}
