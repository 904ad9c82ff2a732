//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read this for the session they display, but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::session::Session;

/// Whether keystrokes go to an input editor or to the global keymap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Normal,
    Editing,
}

impl EditMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Editing => "EDIT",
        }
    }
}

pub struct AppState {
    pub session: Session,
    pub edit_mode: EditMode,
    /// When the result on screen arrived.
    pub result_received_at: Option<DateTime<Local>>,
    /// Base URL of the organize backend, shown in the header.
    pub backend_url: String,
    /// Cached tail of tui.log (refreshed periodically by App).
    pub tui_log_lines: Vec<String>,
    pub log_path: PathBuf,
}

impl AppState {
    pub fn new(session: Session, backend_url: impl Into<String>, log_path: PathBuf) -> Self {
        Self {
            session,
            edit_mode: EditMode::Normal,
            result_received_at: None,
            backend_url: backend_url.into(),
            tui_log_lines: Vec::new(),
            log_path,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit_mode == EditMode::Editing
    }
}
