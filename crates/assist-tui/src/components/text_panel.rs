//! TextPanel component — multi-line song list entry.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use assist_proto::model::InputMode;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::style_secondary,
    widgets::{
        pane_chrome::pane_chrome,
        text_area::{AreaAction, TextArea},
    },
};

pub struct TextPanel {
    area: TextArea,
}

impl TextPanel {
    pub fn new() -> Self {
        Self {
            area: TextArea::new("one song per line, e.g. Midnight City - M83"),
        }
    }

    fn to_actions(result: AreaAction) -> Vec<Action> {
        match result {
            AreaAction::Changed(text) => vec![Action::TextChanged(text)],
            AreaAction::Left => vec![Action::EndEditing],
            AreaAction::None => vec![],
        }
    }
}

impl Component for TextPanel {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if state.is_editing() {
            return Self::to_actions(self.area.handle_key(key));
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char('i') => vec![Action::BeginEditing],
            _ => vec![],
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
        Self::to_actions(self.area.paste(text))
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if *action == Action::InputsCleared {
            self.area.clear();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("text", Some('2'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 2 {
            return;
        }
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(inner);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                InputMode::Text.prompt(),
                style_secondary(),
            ))),
            rows[0],
        );
        self.area.draw(frame, rows[1], focused && state.is_editing());
    }

    fn min_height(&self) -> u16 {
        6
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::EditMode;
    use crate::session::Session;
    use ratatui::crossterm::event::KeyModifiers;
    use std::path::PathBuf;

    fn state(edit_mode: EditMode) -> AppState {
        let mut state = AppState::new(Session::default(), "", PathBuf::new());
        state.edit_mode = edit_mode;
        state
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn keys_edit_only_in_edit_mode() {
        let mut panel = TextPanel::new();
        let normal = state(EditMode::Normal);
        assert_eq!(panel.handle_key(key(KeyCode::Enter), &normal), vec![Action::BeginEditing]);
        assert!(panel.handle_key(key(KeyCode::Char('x')), &normal).is_empty());

        let editing = state(EditMode::Editing);
        assert_eq!(
            panel.handle_key(key(KeyCode::Char('x')), &editing),
            vec![Action::TextChanged("x".into())]
        );
        assert_eq!(panel.handle_key(key(KeyCode::Esc), &editing), vec![Action::EndEditing]);
    }

    #[test]
    fn cleared_inputs_reset_the_editor() {
        let mut panel = TextPanel::new();
        let s = state(EditMode::Normal);
        panel.handle_paste("A\nB", &s);
        panel.on_action(&Action::InputsCleared, &s);
        assert!(panel.area.is_empty());
    }
}
