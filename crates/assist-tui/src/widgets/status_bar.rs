//! Status bar — bottom line with edit mode, busy state, and keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use assist_proto::model::InputMode;

use crate::app_state::EditMode;
use crate::theme::{C_BUSY, C_GENRE, C_MODE_EDIT, C_MODE_NORMAL, C_MUTED};

/// Key hints for the current mode pair.
pub fn key_hints(edit_mode: EditMode, input_mode: InputMode) -> &'static str {
    match (edit_mode, input_mode) {
        (EditMode::Editing, InputMode::Text) => {
            " type songs  Enter newline  Ctrl+S submit  Esc done"
        }
        (EditMode::Editing, InputMode::File) => " type a path  Enter upload  Esc done",
        (EditMode::Editing, _) => " paste a playlist link  Enter/Ctrl+S submit  Esc done",
        (EditMode::Normal, InputMode::None) => {
            " t text  f file  l link  Tab panes  ↑↓ scroll  y copy  L logs  ? help  q quit"
        }
        (EditMode::Normal, _) => {
            " t/f/l mode  Enter edit  s submit  Tab panes  y copy  L logs  ? help  q quit"
        }
    }
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(
    frame: &mut Frame,
    area: Rect,
    edit_mode: EditMode,
    input_mode: InputMode,
    busy: bool,
) {
    let label_color = match edit_mode {
        EditMode::Normal => C_MODE_NORMAL,
        EditMode::Editing => C_MODE_EDIT,
    };
    let dot = if busy {
        Span::styled("●", Style::default().fg(C_BUSY).add_modifier(Modifier::BOLD))
    } else {
        Span::styled("●", Style::default().fg(C_GENRE))
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", edit_mode.label()),
            Style::default().fg(label_color).add_modifier(Modifier::BOLD),
        ),
        dot,
        Span::raw(" "),
        Span::styled(key_hints(edit_mode, input_mode), Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
