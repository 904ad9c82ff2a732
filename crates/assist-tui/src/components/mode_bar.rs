//! ModeBar component — the input selector buttons plus the submit button.
//!
//! The three selector buttons switch the active input; the submit button is
//! replaced by a spinner while a request is outstanding. A hidden mode whose
//! stored value will be sent instead of the active one is flagged.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use assist_proto::model::InputMode;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{style_button, C_BUSY, C_MUTED, C_TOAST_WARNING},
    widgets::{pane_chrome::pane_chrome, toast::spinner_frame},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Button {
    Mode(InputMode),
    Submit,
}

const BUTTONS: [Button; 4] = [
    Button::Mode(InputMode::Text),
    Button::Mode(InputMode::File),
    Button::Mode(InputMode::SpotifyLink),
    Button::Submit,
];

impl Button {
    fn label(self) -> &'static str {
        match self {
            Self::Mode(InputMode::Text) => " t  Text ",
            Self::Mode(InputMode::File) => " f  File ",
            Self::Mode(InputMode::SpotifyLink) => " l  Spotify Link ",
            Self::Mode(InputMode::None) => "",
            Self::Submit => " s  Submit ",
        }
    }

    fn action(self) -> Action {
        match self {
            Self::Mode(mode) => Action::SelectMode(mode),
            Self::Submit => Action::Submit,
        }
    }
}

pub struct ModeBar {
    /// Keyboard highlight within the bar.
    cursor: usize,
    /// Screen rects of the buttons from the last draw, for mouse hits.
    hit_boxes: Vec<(Button, Rect)>,
    spin: usize,
}

impl ModeBar {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            hit_boxes: Vec::new(),
            spin: 0,
        }
    }

    fn button_at(&self, col: u16, row: u16) -> Option<Button> {
        self.hit_boxes
            .iter()
            .find(|(_, r)| col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height)
            .map(|(b, _)| *b)
    }
}

impl Component for ModeBar {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Left => {
                self.cursor = self.cursor.checked_sub(1).unwrap_or(BUTTONS.len() - 1);
                vec![]
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1) % BUTTONS.len();
                vec![]
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let button = BUTTONS[self.cursor];
                if button == Button::Submit && state.session.is_busy() {
                    return vec![];
                }
                vec![button.action()]
            }
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        match self.button_at(event.column, event.row) {
            Some(Button::Submit) if state.session.is_busy() => vec![],
            Some(button) => {
                if let Some(pos) = BUTTONS.iter().position(|b| *b == button) {
                    self.cursor = pos;
                }
                vec![button.action()]
            }
            None => vec![],
        }
    }

    fn tick(&mut self, state: &AppState) -> Vec<Action> {
        if state.session.is_busy() {
            self.spin = self.spin.wrapping_add(1);
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::SelectMode(mode) = action {
            if let Some(pos) = BUTTONS.iter().position(|b| *b == Button::Mode(*mode)) {
                self.cursor = pos;
            }
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("organize songs", Some('1'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.hit_boxes.clear();
        if inner.height == 0 {
            return;
        }

        let active = state.session.mode();
        let busy = state.session.is_busy();
        let overriding = state.session.overriding_mode();
        let mut spans = Vec::new();
        let mut x = inner.x;
        for (i, button) in BUTTONS.iter().enumerate() {
            let hovered = focused && i == self.cursor;
            let (text, style) = match button {
                Button::Mode(mode) if overriding == Some(*mode) => (
                    format!("{}● ", button.label()),
                    style_button(false, hovered).fg(C_TOAST_WARNING),
                ),
                Button::Mode(mode) => (
                    button.label().to_string(),
                    style_button(*mode == active, hovered),
                ),
                Button::Submit if busy => (
                    format!(" {} Organizing… ", spinner_frame(self.spin)),
                    Style::default().fg(C_BUSY).add_modifier(Modifier::BOLD),
                ),
                Button::Submit => (button.label().to_string(), style_button(false, hovered)),
            };
            let width = text.chars().count() as u16;
            self.hit_boxes.push((
                *button,
                Rect {
                    x,
                    y: inner.y,
                    width,
                    height: 1,
                },
            ));
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
            x += width + 1;
        }
        if let Some(mode) = overriding {
            spans.push(Span::styled(
                format!(" {} is sent first ", mode.label()),
                Style::default().fg(C_TOAST_WARNING),
            ));
        }
        spans.push(Span::styled(
            format!(" {}", state.backend_url),
            Style::default().fg(C_MUTED),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use ratatui::crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;

    fn state() -> AppState {
        AppState::new(Session::default(), "http://127.0.0.1:5000", PathBuf::from("/tmp/x.log"))
    }

    fn click(col: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: col,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn clicking_a_button_selects_its_mode() {
        let state = state();
        let mut bar = ModeBar::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 3)).unwrap();
        terminal
            .draw(|f| bar.draw(f, f.area(), true, &state))
            .unwrap();

        // Row 1 is inside the border; "File" sits after " t  Text " plus a gap.
        let file_x = 1 + " t  Text ".len() as u16 + 1 + 2;
        assert_eq!(
            bar.handle_mouse(click(file_x, 1), Rect::default(), &state),
            vec![Action::SelectMode(InputMode::File)]
        );
        assert!(bar.handle_mouse(click(79, 2), Rect::default(), &state).is_empty());
    }

    fn bar_text(bar: &mut ModeBar, state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 3)).unwrap();
        terminal
            .draw(|f| bar.draw(f, f.area(), false, state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn hidden_link_that_will_be_sent_is_flagged() {
        let mut state = state();
        let mut bar = ModeBar::new();
        state.session.select_mode(InputMode::SpotifyLink);
        state.session.set_link_value("https://open.spotify.com/playlist/OLD");
        assert!(!bar_text(&mut bar, &state).contains("sent first"));

        state.session.select_mode(InputMode::Text);
        state.session.set_text_value("Song - Artist");
        let text = bar_text(&mut bar, &state);
        assert!(text.contains("Spotify Link ●"));
        assert!(text.contains("spotify link is sent first"));
    }

    #[test]
    fn enter_on_submit_is_ignored_while_busy() {
        let mut state = state();
        state.session.set_text_value("x");
        state.session.submit();
        let mut bar = ModeBar::new();
        bar.cursor = 3;
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert!(bar.handle_key(enter, &state).is_empty());
    }
}
