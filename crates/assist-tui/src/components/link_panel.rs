//! LinkPanel component — Spotify playlist link entry.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
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
        text_field::{FieldAction, TextField},
    },
};

pub struct LinkPanel {
    field: TextField,
}

impl LinkPanel {
    pub fn new() -> Self {
        Self {
            field: TextField::new("https://open.spotify.com/playlist/…"),
        }
    }

    fn to_actions(result: FieldAction) -> Vec<Action> {
        match result {
            FieldAction::Changed(link) => vec![Action::LinkChanged(link)],
            // Enter on the link submits, like a single-field form.
            FieldAction::Confirmed(_) => vec![Action::EndEditing, Action::Submit],
            FieldAction::Left => vec![Action::EndEditing],
            FieldAction::None => vec![],
        }
    }
}

impl Component for LinkPanel {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if state.is_editing() {
            return Self::to_actions(self.field.handle_key(key));
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
        Self::to_actions(self.field.paste(text.trim()))
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if *action == Action::InputsCleared {
            self.field.clear();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("spotify link", Some('2'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 2 {
            return;
        }
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                InputMode::SpotifyLink.prompt(),
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
    }

    fn min_height(&self) -> u16 {
        4
    }
}
