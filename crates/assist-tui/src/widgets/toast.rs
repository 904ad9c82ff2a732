//! Toast notifications — the terminal stand-in for transient message popups.
//!
//! Expiring toasts stack in the top-right corner, newest first. A single
//! spinner toast can sit above them while a request is outstanding.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::theme::{C_TOAST_ERROR, C_TOAST_INFO, C_TOAST_SUCCESS, C_TOAST_WARNING};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    fn color(self) -> Color {
        match self {
            Self::Info => C_TOAST_INFO,
            Self::Success => C_TOAST_SUCCESS,
            Self::Warning => C_TOAST_WARNING,
            Self::Error => C_TOAST_ERROR,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Info => "·",
            Self::Success => "✓",
            Self::Warning => "!",
            Self::Error => "✗",
        }
    }

    /// How long a toast of this severity stays up.
    fn lifetime(self) -> Duration {
        match self {
            Self::Info | Self::Success => Duration::from_secs(3),
            Self::Warning => Duration::from_secs(4),
            Self::Error => Duration::from_secs(6),
        }
    }
}

struct Toast {
    message: String,
    severity: Severity,
    expires: Instant,
}

const SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

pub struct ToastManager {
    toasts: VecDeque<Toast>,
    spinner: Option<(String, usize)>,
    max_visible: usize,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: VecDeque::new(),
            spinner: None,
            max_visible: 4,
        }
    }

    /// Show `message`; an identical message already on screen is replaced.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) {
        let message = message.into();
        self.toasts.retain(|t| t.message != message);
        self.toasts.push_back(Toast {
            expires: Instant::now() + severity.lifetime(),
            message,
            severity,
        });
        while self.toasts.len() > self.max_visible * 2 {
            self.toasts.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Info);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Error);
    }

    /// Show a spinner until `dismiss_spinner`.
    pub fn spinner(&mut self, message: impl Into<String>) {
        self.spinner = Some((message.into(), 0));
    }

    pub fn dismiss_spinner(&mut self) {
        self.spinner = None;
    }

    #[cfg(test)]
    pub fn has_spinner(&self) -> bool {
        self.spinner.is_some()
    }

    /// Drop expired toasts and advance the spinner. Call every ~100ms.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.toasts.retain(|t| t.expires > now);
        if let Some((_, frame)) = self.spinner.as_mut() {
            *frame = frame.wrapping_add(1);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty() && self.spinner.is_none()
    }

    /// Messages currently shown, newest first.
    #[cfg(test)]
    pub fn messages(&self) -> Vec<(&str, Severity)> {
        self.toasts
            .iter()
            .rev()
            .map(|t| (t.message.as_str(), t.severity))
            .collect()
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        if self.is_empty() || area.height < 2 {
            return;
        }
        let max_width = (area.width / 2).clamp(30, 70).min(area.width);
        let mut y = area.y + 1;
        let bottom = area.y + area.height;

        if let Some((message, tick)) = &self.spinner {
            draw_row(
                frame,
                area,
                y,
                max_width,
                format!(" {} {} ", spinner_frame(*tick), message),
                C_TOAST_INFO,
            );
            y += 1;
        }

        for toast in self.toasts.iter().rev().take(self.max_visible) {
            if y >= bottom {
                break;
            }
            draw_row(
                frame,
                area,
                y,
                max_width,
                format!(" {} {} ", toast.severity.icon(), toast.message),
                toast.severity.color(),
            );
            y += 1;
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, y: u16, max_width: u16, text: String, color: Color) {
    let width = (text.chars().count() as u16).min(max_width);
    let row = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y,
        width,
        height: 1,
    };
    frame.render_widget(Clear, row);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))),
        row,
    );
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_messages_collapse() {
        let mut toasts = ToastManager::new();
        toasts.push("same", Severity::Warning);
        toasts.error("other");
        toasts.push("same", Severity::Warning);
        assert_eq!(
            toasts.messages(),
            vec![("same", Severity::Warning), ("other", Severity::Error)]
        );
    }

    #[test]
    fn spinner_is_independent_of_toasts() {
        let mut toasts = ToastManager::new();
        toasts.spinner("Organizing songs…");
        assert!(!toasts.is_empty());
        assert!(toasts.messages().is_empty());
        toasts.dismiss_spinner();
        assert!(toasts.is_empty());
    }
}
