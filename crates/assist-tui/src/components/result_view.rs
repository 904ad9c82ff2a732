//! ResultView component — the organized songs, grouped by genre.
//!
//! Every genre gets an upper-cased heading. Flat genres list their songs as
//! bullets; the reserved nested genre lists each sub-genre with its own
//! indented song list.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use assist_proto::model::{ResultView as View, SectionItem, NO_SONGS_MESSAGE};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{
        style_default, style_heading, style_muted, style_secondary, C_BADGE_OK, C_BADGE_PENDING,
        C_SUBGENRE,
    },
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct ResultView {
    scroll: usize,
    /// Rows available on the last draw, for page-sized scrolling.
    page: usize,
}

impl ResultView {
    pub fn new() -> Self {
        Self { scroll: 0, page: 10 }
    }

    fn scroll_by(&mut self, delta: isize) {
        self.scroll = if delta < 0 {
            self.scroll.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll.saturating_add(delta as usize)
        };
    }
}

/// Render a view into styled lines.
pub fn result_lines(view: &View) -> Vec<Line<'static>> {
    match view {
        View::Absent => vec![Line::from(Span::styled(
            "Choose Text, File or Spotify Link, then submit to organize your songs.",
            style_muted(),
        ))],
        View::Empty => vec![Line::from(Span::styled(NO_SONGS_MESSAGE, style_secondary()))],
        View::Sections(sections) => {
            let mut lines = Vec::new();
            for (i, section) in sections.iter().enumerate() {
                if i > 0 {
                    lines.push(Line::from(""));
                }
                lines.push(Line::from(Span::styled(
                    section.heading.clone(),
                    style_heading(),
                )));
                for item in &section.items {
                    match item {
                        SectionItem::Song(song) => lines.push(Line::from(vec![
                            Span::styled("  • ", style_muted()),
                            Span::styled(song.clone(), style_default()),
                        ])),
                        SectionItem::Group { name, songs } => {
                            lines.push(Line::from(vec![
                                Span::styled("  • ", style_muted()),
                                Span::styled(
                                    format!("{}:", name),
                                    Style::default().fg(C_SUBGENRE).add_modifier(Modifier::BOLD),
                                ),
                            ]));
                            for song in songs {
                                lines.push(Line::from(vec![
                                    Span::styled("      ◦ ", style_muted()),
                                    Span::styled(song.clone(), style_default()),
                                ]));
                            }
                        }
                    }
                }
            }
            lines
        }
    }
}

fn badge(state: &AppState) -> Option<Badge> {
    if state.session.is_busy() {
        return Some(Badge {
            text: "organizing…".to_string(),
            color: C_BADGE_PENDING,
        });
    }
    let result = state.session.result()?;
    let mut text = format!("{} songs · {} genres", result.song_count(), result.len());
    if let Some(at) = state.result_received_at {
        text.push_str(&format!(" · {}", at.format("%H:%M:%S")));
    }
    Some(Badge {
        text,
        color: C_BADGE_OK,
    })
}

impl Component for ResultView {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let page = self.page.max(1) as isize;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::PageDown => self.scroll_by(page),
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            KeyCode::End | KeyCode::Char('G') => self.scroll = usize::MAX,
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.scroll_by(-3),
            MouseEventKind::ScrollDown => self.scroll_by(3),
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if matches!(
            action,
            Action::SelectMode(_) | Action::Submit | Action::InputsCleared
        ) {
            self.scroll = 0;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("organized songs", Some('3'), focused, badge(state));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        let lines = result_lines(&state.session.view());
        let height = inner.height as usize;
        self.page = height.saturating_sub(1);
        self.scroll = self.scroll.min(lines.len().saturating_sub(height));

        let visible: Vec<Line> = lines.into_iter().skip(self.scroll).take(height).collect();
        frame.render_widget(Paragraph::new(visible), inner);
    }
}
