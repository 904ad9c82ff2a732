//! Action enum — all user-initiated intents and internal events.

use std::path::PathBuf;

use assist_proto::model::InputMode;

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    ModeBar,
    TextPanel,
    FilePanel,
    LinkPanel,
    ResultView,
    LogPanel,
}

impl ComponentId {
    /// The input panel shown for `mode`, if any.
    pub fn panel_for(mode: InputMode) -> Option<Self> {
        match mode {
            InputMode::None => None,
            InputMode::Text => Some(Self::TextPanel),
            InputMode::File => Some(Self::FilePanel),
            InputMode::SpotifyLink => Some(Self::LinkPanel),
        }
    }
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Input selector ───────────────────────────────────────────────────────
    SelectMode(InputMode),
    TextChanged(String),
    LinkChanged(String),
    UploadFile(PathBuf),
    /// Broadcast after a successful submission reset every stored input.
    InputsCleared,

    // ── Submission ───────────────────────────────────────────────────────────
    Submit,

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),
    BeginEditing,
    EndEditing,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleLogs,
    ToggleHelp,
    ToggleKeys,
    CopyResult,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
}
