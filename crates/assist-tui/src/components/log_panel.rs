//! LogPanel component — tail of tui.log.
//!
//! One summary line when collapsed; a scrollable bordered panel when expanded.
//! Lines are shown as local time, a colored level and the message.

use chrono::{DateTime, Local};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Borders, Clear, Paragraph},
    Frame,
};
use tracing::Level;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{
        style_muted, style_secondary, C_MUTED, C_TOAST_ERROR, C_TOAST_INFO, C_TOAST_WARNING,
    },
    widgets::pane_chrome::pane_chrome_borders,
};

pub struct LogPanel {
    pub expanded: bool,
    scroll: usize,
    last_log_count: usize,
}

impl LogPanel {
    pub fn new() -> Self {
        Self {
            expanded: false,
            scroll: 0,
            last_log_count: 0,
        }
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
        if self.expanded {
            self.scroll = usize::MAX;
        }
    }
}

impl Component for LogPanel {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.expanded {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            KeyCode::End | KeyCode::Char('G') => self.scroll = usize::MAX,
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if self.expanded {
            match event.kind {
                MouseEventKind::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
                MouseEventKind::ScrollDown => self.scroll = self.scroll.saturating_add(1),
                _ => {}
            }
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if *action == Action::ToggleLogs {
            self.toggle();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        if area.height == 0 {
            return;
        }
        frame.render_widget(Clear, area);

        if !self.expanded || area.height <= 1 {
            let mut spans = vec![Span::styled(" log ", style_muted())];
            match state.tui_log_lines.last() {
                Some(raw) => spans.extend(LogRecord::parse(raw).spans()),
                None => spans.push(Span::styled("(no log)", style_secondary())),
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), area);
            return;
        }

        let title = format!("log  {}", state.log_path.display());
        let block = pane_chrome_borders(
            &title,
            None,
            focused,
            None,
            Borders::LEFT | Borders::BOTTOM | Borders::RIGHT,
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let logs = &state.tui_log_lines;
        let height = inner.height as usize;
        let max_scroll = logs.len().saturating_sub(height);

        // Follow the tail while the view is at the bottom.
        if logs.len() > self.last_log_count {
            if self.scroll >= max_scroll.saturating_sub(1) {
                self.scroll = usize::MAX;
            }
            self.last_log_count = logs.len();
        }

        if logs.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  no log entries yet", style_muted())),
                inner,
            );
            return;
        }

        self.scroll = self.scroll.min(max_scroll);
        let lines: Vec<Line> = logs
            .iter()
            .skip(self.scroll)
            .take(height)
            .map(|raw| {
                let mut spans = vec![Span::raw("  ")];
                spans.extend(LogRecord::parse(raw).spans());
                Line::from(spans)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn min_height(&self) -> u16 {
        1
    }
}

// ── Log records ───────────────────────────────────────────────────────────────

/// One `tui.log` line split into display parts.
///
/// Lines are written by `tracing_subscriber::fmt` with ANSI off:
/// `<rfc3339 time>  <LEVEL> <target>: <message>`. Anything that does not
/// fit (panics, wrapped text) is kept whole as the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord<'a> {
    pub time: Option<String>,
    pub level: Option<Level>,
    pub message: &'a str,
}

impl<'a> LogRecord<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let mut rest = raw.trim();

        let mut time = None;
        if let Some((token, tail)) = rest.split_once(char::is_whitespace) {
            if let Ok(stamp) = DateTime::parse_from_rfc3339(token) {
                time = Some(stamp.with_timezone(&Local).format("%H:%M:%S").to_string());
                rest = tail.trim_start();
            }
        }

        let mut level = None;
        let (token, tail) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        if let Ok(parsed) = token.parse::<Level>() {
            level = Some(parsed);
            rest = tail.trim_start();
        }

        if let Some((target, message)) = rest.split_once(": ") {
            if is_target(target) {
                rest = message;
            }
        }

        Self {
            time,
            level,
            message: rest,
        }
    }

    pub fn spans(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::with_capacity(3);
        if let Some(time) = &self.time {
            spans.push(Span::styled(format!("{} ", time), style_muted()));
        }
        if let Some(level) = self.level {
            spans.push(Span::styled(
                format!("{:<5} ", level.as_str()),
                Style::default().fg(level_color(level)),
            ));
        }
        spans.push(Span::styled(self.message.to_string(), style_secondary()));
        spans
    }
}

/// A tracing target such as `music_assistant::session`.
fn is_target(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

fn level_color(level: Level) -> Color {
    match level {
        Level::ERROR => C_TOAST_ERROR,
        Level::WARN => C_TOAST_WARNING,
        Level::INFO => C_TOAST_INFO,
        _ => C_MUTED,
    }
}
