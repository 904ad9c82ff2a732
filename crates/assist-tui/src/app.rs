//! App — component-based event loop around the organize session.
//!
//! - `App` owns all components, the `Session` (inside `AppState`) and the
//!   HTTP client.
//! - A `tokio::mpsc` channel carries `AppMessage`s in from background tasks:
//!   terminal events, finished file reads, finished organize requests.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Session transitions return an `Outcome`; App turns its notice into a
//!   toast and spawns its effect.

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use assist_proto::client::OrganizeClient;
use assist_proto::config::Config;
use assist_proto::error::RequestError;
use assist_proto::model::{InputMode, OrganizedResult};
use assist_proto::request::Endpoint;
use assist_proto::upload;

use crate::{
    action::{Action, ComponentId},
    app_state::{AppState, EditMode},
    component::Component,
    components::{
        file_panel::FilePanel, help_overlay::HelpOverlay, link_panel::LinkPanel,
        log_panel::LogPanel, mode_bar::ModeBar, result_view::ResultView, text_panel::TextPanel,
    },
    focus::FocusRing,
    session::{Effect, Outcome, Session},
    theme::C_BG,
    widgets::{status_bar, toast::ToastManager},
};

// ── Internal event bus ────────────────────────────────────────────────────────

pub enum AppMessage {
    Event(Event),
    FileLoaded {
        name: String,
        result: Result<String, String>,
    },
    SubmissionFinished(Result<OrganizedResult, RequestError>),
}

/// Screen rects from the last draw, for mouse hit-testing.
#[derive(Default, Clone, Copy)]
struct PaneAreas {
    mode_bar: Rect,
    input: Rect,
    result: Rect,
    log_panel: Rect,
}

const LOG_TAIL_LINES: usize = 500;

/// How long the terminal reader waits before rechecking its stop flag.
const EVENT_POLL: Duration = Duration::from_millis(100);

/// Forward terminal events until `stop` is set, the source fails, or the
/// App hangs up. `next` waits up to the given time for one event.
fn forward_events(
    stop: &AtomicBool,
    tx: &mpsc::Sender<AppMessage>,
    mut next: impl FnMut(Duration) -> io::Result<Option<Event>>,
) {
    while !stop.load(Ordering::Relaxed) {
        match next(EVENT_POLL) {
            Ok(Some(ev)) => {
                if tx.blocking_send(AppMessage::Event(ev)).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!("terminal event source failed: {}", e);
                break;
            }
        }
    }
}

pub struct App {
    state: AppState,
    client: OrganizeClient,
    toast: ToastManager,
    focus: FocusRing,

    mode_bar: ModeBar,
    text_panel: TextPanel,
    file_panel: FilePanel,
    link_panel: LinkPanel,
    result_view: ResultView,
    log_panel: LogPanel,
    help_overlay: HelpOverlay,

    show_keys_bar: bool,
    pane_areas: PaneAreas,
    should_quit: bool,

    msg_tx: mpsc::Sender<AppMessage>,
    msg_rx: Option<mpsc::Receiver<AppMessage>>,
}

impl App {
    pub fn new(config: &Config, log_path: PathBuf) -> anyhow::Result<Self> {
        let client = OrganizeClient::from_config(config)?;
        let session = Session::new(config.upload.accepted_media_type.clone());
        let state = AppState::new(session, config.backend.base_url.clone(), log_path);
        let (msg_tx, msg_rx) = mpsc::channel(256);

        let mut app = Self {
            state,
            client,
            toast: ToastManager::new(),
            focus: FocusRing::default(),
            mode_bar: ModeBar::new(),
            text_panel: TextPanel::new(),
            file_panel: FilePanel::new(),
            link_panel: LinkPanel::new(),
            result_view: ResultView::new(),
            log_panel: LogPanel::new(),
            help_overlay: HelpOverlay::new(),
            show_keys_bar: true,
            pane_areas: PaneAreas::default(),
            should_quit: false,
            msg_tx,
            msg_rx: Some(msg_rx),
        };
        app.sync_focus();
        info!(
            "backend endpoints: {} | {}",
            app.client.url_for(Endpoint::Playlist),
            app.client.url_for(Endpoint::Text)
        );
        Ok(app)
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut rx = self
            .msg_rx
            .take()
            .ok_or_else(|| anyhow::anyhow!("App::run called twice"))?;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        debug!("terminal ready, size={:?}", terminal.size());

        // ── Background task: keyboard/mouse/paste events ──────────────────────
        let event_tx = self.msg_tx.clone();
        let stop = Arc::new(AtomicBool::new(false));
        let reader_stop = Arc::clone(&stop);
        let reader = tokio::task::spawn_blocking(move || {
            forward_events(&reader_stop, &event_tx, |timeout| {
                if event::poll(timeout)? {
                    event::read().map(Some)
                } else {
                    Ok(None)
                }
            });
        });

        let result = self.event_loop(&mut terminal, &mut rx).await;

        // The reader must be gone before raw mode is dropped.
        stop.store(true, Ordering::Relaxed);
        if let Err(e) = reader.await {
            warn!("event reader ended abnormally: {}", e);
        }

        // ── Teardown (also after an error, so the shell is usable) ────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;
        info!("music-assistant exiting");
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        rx: &mut mpsc::Receiver<AppMessage>,
    ) -> anyhow::Result<()> {
        // Toast expiry + spinner animation.
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // tui.log tail refresh, only while the log panel is open.
        let mut log_refresh = tokio::time::interval(Duration::from_secs(2));
        log_refresh.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                msg = rx.recv() => {
                    let Some(msg) = msg else { break };
                    needs_redraw = self.handle_message(msg);
                    while let Ok(next) = rx.try_recv() {
                        needs_redraw |= self.handle_message(next);
                    }
                }

                _ = ui_tick.tick() => {
                    let had_toasts = !self.toast.is_empty();
                    self.toast.tick();
                    let tick_actions: Vec<Action> = {
                        let s = &self.state;
                        let mut all = Vec::new();
                        all.extend(self.mode_bar.tick(s));
                        all.extend(self.result_view.tick(s));
                        all
                    };
                    for action in tick_actions {
                        self.dispatch(action);
                    }
                    needs_redraw = had_toasts || self.state.session.is_busy();
                }

                _ = log_refresh.tick() => {
                    if self.log_panel.expanded {
                        self.reload_tui_log();
                        needs_redraw = true;
                    }
                }
            }
        }
        Ok(())
    }

    /// Handle one message. Returns whether the screen needs a redraw.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                if key.kind == KeyEventKind::Release {
                    return false;
                }
                for action in self.handle_key(key) {
                    self.dispatch(action);
                }
            }
            AppMessage::Event(Event::Mouse(mouse)) => {
                for action in self.handle_mouse(mouse) {
                    self.dispatch(action);
                }
            }
            AppMessage::Event(Event::Paste(text)) => {
                for action in self.handle_paste(&text) {
                    self.dispatch(action);
                }
            }
            AppMessage::Event(Event::Resize(..)) => {}
            AppMessage::Event(_) => return false,
            AppMessage::FileLoaded { name, result } => {
                let outcome = self.state.session.file_loaded(&name, result);
                self.apply_outcome(outcome);
            }
            AppMessage::SubmissionFinished(response) => {
                let succeeded = response.is_ok();
                self.toast.dismiss_spinner();
                let outcome = self.state.session.finish_submission(response);
                if succeeded {
                    self.state.result_received_at = Some(chrono::Local::now());
                    self.state.edit_mode = EditMode::Normal;
                    self.dispatch(Action::InputsCleared);
                    self.sync_focus();
                    self.focus.set(ComponentId::ResultView);
                }
                self.apply_outcome(outcome);
            }
        }
        true
    }

    // ── Session effects ───────────────────────────────────────────────────────

    fn apply_outcome(&mut self, outcome: Outcome) {
        if self.state.session.result().is_none() {
            self.state.result_received_at = None;
        }
        if let Some(notice) = outcome.notice {
            self.toast.push(notice.message, notice.severity);
        }
        if let Some(effect) = outcome.effect {
            self.spawn_effect(effect);
        }
    }

    fn spawn_effect(&mut self, effect: Effect) {
        let tx = self.msg_tx.clone();
        match effect {
            Effect::ReadFile { path, name } => {
                tokio::spawn(async move {
                    let result = upload::read_text_file(&path)
                        .await
                        .map_err(|e| e.root_cause().to_string());
                    let _ = tx.send(AppMessage::FileLoaded { name, result }).await;
                });
            }
            Effect::SendRequest(request) => {
                self.toast.spinner("Organizing songs…");
                let client = self.client.clone();
                tokio::spawn(async move {
                    let response = client.organize(&request).await;
                    let _ = tx.send(AppMessage::SubmissionFinished(response)).await;
                });
            }
        }
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global keys, active in every mode.
        match key.code {
            KeyCode::Char('c') if ctrl => return vec![Action::Quit],
            KeyCode::Char('s') if ctrl => return vec![Action::EndEditing, Action::Submit],
            _ => {}
        }

        // Help overlay captures all keys while visible; any other key closes it.
        if self.help_overlay.visible {
            let actions = self.help_overlay.handle_key(key, &self.state);
            return if actions.is_empty() {
                vec![Action::ToggleHelp]
            } else {
                actions
            };
        }

        match key.code {
            KeyCode::Tab => return vec![Action::EndEditing, Action::FocusNext],
            KeyCode::BackTab => return vec![Action::EndEditing, Action::FocusPrev],
            _ => {}
        }

        let plain = (key.modifiers - KeyModifiers::SHIFT).is_empty();
        if self.state.edit_mode == EditMode::Normal && plain {
            match key.code {
                KeyCode::Char('q') => return vec![Action::Quit],
                KeyCode::Char('?') => return vec![Action::ToggleHelp],
                KeyCode::Char('L') => return vec![Action::ToggleLogs],
                KeyCode::Char('K') => return vec![Action::ToggleKeys],
                KeyCode::Char('t') => return vec![Action::SelectMode(InputMode::Text)],
                KeyCode::Char('f') => return vec![Action::SelectMode(InputMode::File)],
                KeyCode::Char('l') => return vec![Action::SelectMode(InputMode::SpotifyLink)],
                KeyCode::Char('s') => return vec![Action::Submit],
                KeyCode::Char('y') => return vec![Action::CopyResult],
                KeyCode::Char('1') => return vec![Action::FocusPane(ComponentId::ModeBar)],
                KeyCode::Char('2') => {
                    return ComponentId::panel_for(self.state.session.mode())
                        .map(|id| vec![Action::FocusPane(id)])
                        .unwrap_or_default();
                }
                KeyCode::Char('3') => return vec![Action::FocusPane(ComponentId::ResultView)],
                _ => {}
            }
        }

        let s = &self.state;
        match self.focus.current() {
            Some(ComponentId::ModeBar) => self.mode_bar.handle_key(key, s),
            Some(ComponentId::TextPanel) => self.text_panel.handle_key(key, s),
            Some(ComponentId::FilePanel) => self.file_panel.handle_key(key, s),
            Some(ComponentId::LinkPanel) => self.link_panel.handle_key(key, s),
            Some(ComponentId::ResultView) => self.result_view.handle_key(key, s),
            Some(ComponentId::LogPanel) => self.log_panel.handle_key(key, s),
            None => vec![],
        }
    }

    /// Pastes go to the active input panel wherever focus is.
    fn handle_paste(&mut self, text: &str) -> Vec<Action> {
        let s = &self.state;
        let mut actions = match s.session.mode() {
            InputMode::Text => self.text_panel.handle_paste(text, s),
            InputMode::File => self.file_panel.handle_paste(text, s),
            InputMode::SpotifyLink => self.link_panel.handle_paste(text, s),
            InputMode::None => {
                debug!("paste ignored: no input selected");
                return vec![];
            }
        };
        if let Some(id) = ComponentId::panel_for(s.session.mode()) {
            if !self.focus.is_focused(id) {
                actions.insert(0, Action::FocusPane(id));
            }
        }
        actions
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let relevant = matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !relevant || self.help_overlay.visible {
            return vec![];
        }

        fn hit(r: Rect, col: u16, row: u16) -> bool {
            r.width > 0
                && r.height > 0
                && col >= r.x
                && col < r.x + r.width
                && row >= r.y
                && row < r.y + r.height
        }

        let areas = self.pane_areas;
        let (col, row) = (event.column, event.row);
        let s = &self.state;

        let (id, mut actions) = if hit(areas.mode_bar, col, row) {
            (
                ComponentId::ModeBar,
                self.mode_bar.handle_mouse(event, areas.mode_bar, s),
            )
        } else if hit(areas.input, col, row) {
            let Some(id) = ComponentId::panel_for(s.session.mode()) else {
                return vec![];
            };
            let actions = match id {
                ComponentId::TextPanel => self.text_panel.handle_mouse(event, areas.input, s),
                ComponentId::FilePanel => self.file_panel.handle_mouse(event, areas.input, s),
                _ => self.link_panel.handle_mouse(event, areas.input, s),
            };
            (id, actions)
        } else if hit(areas.result, col, row) {
            (
                ComponentId::ResultView,
                self.result_view.handle_mouse(event, areas.result, s),
            )
        } else if hit(areas.log_panel, col, row) {
            (
                ComponentId::LogPanel,
                self.log_panel.handle_mouse(event, areas.log_panel, s),
            )
        } else {
            return vec![];
        };

        if matches!(event.kind, MouseEventKind::Down(_)) && !self.focus.is_focused(id) {
            actions.insert(0, Action::FocusPane(id));
        }
        actions
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        // Components see every action first, focused or not.
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.mode_bar.on_action(&action, s));
            out.extend(self.text_panel.on_action(&action, s));
            out.extend(self.file_panel.on_action(&action, s));
            out.extend(self.link_panel.on_action(&action, s));
            out.extend(self.result_view.on_action(&action, s));
            out.extend(self.log_panel.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };

        self.apply_action(action);

        // Secondary actions are applied one level deep only.
        for a in secondary {
            self.apply_action(a);
        }
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::SelectMode(mode) => {
                let outcome = self.state.session.select_mode(mode);
                self.apply_outcome(outcome);
                self.sync_focus();
                if let Some(id) = ComponentId::panel_for(mode) {
                    self.focus.set(id);
                    self.state.edit_mode = EditMode::Editing;
                }
            }
            Action::TextChanged(text) => self.state.session.set_text_value(text),
            Action::LinkChanged(link) => self.state.session.set_link_value(link),
            Action::UploadFile(path) => {
                let outcome = self.state.session.accept_file(&path);
                self.apply_outcome(outcome);
            }
            Action::InputsCleared => {}
            Action::Submit => {
                let outcome = self.state.session.submit();
                self.apply_outcome(outcome);
            }
            Action::FocusNext => {
                self.focus.next();
            }
            Action::FocusPrev => {
                self.focus.prev();
            }
            Action::FocusPane(id) => {
                if self.focus.current() != Some(id) {
                    self.state.edit_mode = EditMode::Normal;
                }
                self.focus.set(id);
            }
            Action::BeginEditing => {
                let panel = ComponentId::panel_for(self.state.session.mode());
                let on_input = panel.is_some() && self.focus.current() == panel;
                if on_input {
                    self.state.edit_mode = EditMode::Editing;
                }
            }
            Action::EndEditing => self.state.edit_mode = EditMode::Normal,
            Action::ToggleLogs => {
                if self.log_panel.expanded {
                    self.reload_tui_log();
                }
                self.sync_focus();
            }
            Action::ToggleHelp => {}
            Action::ToggleKeys => self.show_keys_bar = !self.show_keys_bar,
            Action::CopyResult => self.copy_result(),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Rebuild the focus ring from the panes currently on screen.
    fn sync_focus(&mut self) {
        let mut items = vec![ComponentId::ModeBar];
        items.extend(ComponentId::panel_for(self.state.session.mode()));
        items.push(ComponentId::ResultView);
        if self.log_panel.expanded {
            items.push(ComponentId::LogPanel);
        }
        self.focus.set_items(items, ComponentId::ModeBar);
    }

    fn copy_result(&mut self) {
        let text = self.state.session.view().to_plain_text();
        if self.state.session.result().is_none() {
            self.toast.info("Nothing to copy yet");
            return;
        }
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
            Ok(()) => {
                let lines = text.lines().count();
                self.toast.success(format!("copied {} lines", lines));
            }
            Err(e) => {
                warn!("clipboard error: {}", e);
                self.toast.error(format!("clipboard error: {}", e));
            }
        }
    }

    /// Read the last lines of tui.log into state.tui_log_lines.
    fn reload_tui_log(&mut self) {
        match std::fs::read_to_string(&self.state.log_path) {
            Ok(content) => {
                let lines: Vec<&str> = content.lines().collect();
                let start = lines.len().saturating_sub(LOG_TAIL_LINES);
                self.state.tui_log_lines = lines[start..].iter().map(|l| l.to_string()).collect();
            }
            Err(e) => debug!("log tail unavailable: {}", e),
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        let log_h = if self.log_panel.expanded { 10 } else { 1 };
        let status_h = if self.show_keys_bar { 1 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(log_h),
                Constraint::Length(status_h),
            ])
            .split(area);
        let (bar_area, body_area, log_area, status_area) = (outer[0], outer[1], outer[2], outer[3]);

        let focused = self.focus.current();
        let s = &self.state;

        self.mode_bar
            .draw(frame, bar_area, focused == Some(ComponentId::ModeBar), s);
        self.pane_areas.mode_bar = bar_area;

        // ── Body: active input panel above the results ───────────────────────
        let panel = ComponentId::panel_for(s.session.mode());
        let share = body_area.height * 2 / 5;
        let input_h = match panel {
            Some(ComponentId::TextPanel) => share.max(self.text_panel.min_height()),
            Some(ComponentId::FilePanel) => share.max(self.file_panel.min_height()),
            Some(_) => self.link_panel.min_height(),
            None => 0,
        };
        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(input_h), Constraint::Min(0)])
            .split(body_area);
        let (input_area, result_area) = (body[0], body[1]);

        if let Some(id) = panel {
            let has_focus = focused == Some(id);
            match id {
                ComponentId::TextPanel => self.text_panel.draw(frame, input_area, has_focus, s),
                ComponentId::FilePanel => self.file_panel.draw(frame, input_area, has_focus, s),
                _ => self.link_panel.draw(frame, input_area, has_focus, s),
            }
        }
        self.pane_areas.input = input_area;

        self.result_view.draw(
            frame,
            result_area,
            focused == Some(ComponentId::ResultView),
            s,
        );
        self.pane_areas.result = result_area;

        self.log_panel
            .draw(frame, log_area, focused == Some(ComponentId::LogPanel), s);
        self.pane_areas.log_panel = log_area;

        if self.show_keys_bar {
            status_bar::draw_keys_bar(
                frame,
                status_area,
                s.edit_mode,
                s.session.mode(),
                s.session.is_busy(),
            );
        }

        // ── Overlays ──────────────────────────────────────────────────────────
        self.help_overlay.draw(frame, area, false, s);
        self.toast.draw(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assist_proto::config::BackendConfig;
    use axum::{routing::post, Router};
    use crate::widgets::toast::Severity;
    use ratatui::backend::TestBackend;
    use std::io::Write;

    async fn mock_backend(body: &'static str) -> String {
        let app = Router::new().route("/organize/:kind", post(move || async move { body }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn app_for(base_url: &str) -> App {
        let config = Config {
            backend: BackendConfig {
                base_url: base_url.to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        App::new(&config, PathBuf::from("/tmp/music-assistant-test.log")).unwrap()
    }

    /// Wait for the next background message and handle it.
    async fn pump(app: &mut App) {
        let msg = app
            .msg_rx
            .as_mut()
            .unwrap()
            .recv()
            .await
            .expect("message channel closed");
        app.handle_message(msg);
    }

    fn screen_text(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[tokio::test]
    async fn typed_text_round_trip_renders_genres() {
        let base = mock_backend(r#"{"rock":["SongA","SongB"]}"#).await;
        let mut app = app_for(&base);

        app.dispatch(Action::SelectMode(InputMode::Text));
        assert!(app.focus.is_focused(ComponentId::TextPanel));
        app.dispatch(Action::TextChanged("SongA\nSongB".into()));
        app.dispatch(Action::Submit);
        assert!(app.state.session.is_busy());
        assert!(app.toast.has_spinner());

        pump(&mut app).await;

        assert!(!app.state.session.is_busy());
        assert!(!app.toast.has_spinner());
        assert_eq!(app.state.session.mode(), InputMode::None);
        assert!(app.state.session.inputs().text.is_empty());
        assert!(app.state.result_received_at.is_some());
        assert!(app
            .toast
            .messages()
            .contains(&("Songs organized successfully!", Severity::Success)));

        let screen = screen_text(&mut app);
        assert!(screen.contains("ROCK"));
        assert!(screen.contains("SongB"));
    }

    #[tokio::test]
    async fn empty_submit_warns_and_sends_nothing() {
        let mut app = app_for("http://127.0.0.1:9");
        app.dispatch(Action::SelectMode(InputMode::SpotifyLink));
        app.dispatch(Action::Submit);
        assert!(!app.state.session.is_busy());
        assert_eq!(
            app.toast.messages(),
            vec![(
                "Please insert text, select a file, or enter a Spotify link before submitting.",
                Severity::Warning
            )]
        );
    }

    #[tokio::test]
    async fn png_upload_is_refused_with_a_warning() {
        let mut app = app_for("http://127.0.0.1:9");
        app.dispatch(Action::SelectMode(InputMode::File));
        app.dispatch(Action::UploadFile(PathBuf::from("/tmp/cover.png")));
        assert_eq!(
            app.toast.messages(),
            vec![("You can only upload .txt files!", Severity::Warning)]
        );
        assert!(!app.state.session.is_reading_file());
    }

    #[tokio::test]
    async fn txt_upload_loads_content() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "Midnight City - M83\nJóga - Björk\n").unwrap();

        let mut app = app_for("http://127.0.0.1:9");
        app.dispatch(Action::SelectMode(InputMode::File));
        app.dispatch(Action::UploadFile(file.path().to_path_buf()));
        pump(&mut app).await;

        let inputs = app.state.session.inputs();
        assert_eq!(inputs.file_content, "Midnight City - M83\nJóga - Björk\n");
        assert!(screen_text(&mut app).contains("File Content:"));
    }

    #[tokio::test]
    async fn backend_error_keeps_inputs() {
        let app_router = Router::new().route(
            "/organize/:kind",
            post(|| async {
                (
                    axum::http::StatusCode::BAD_REQUEST,
                    r#"{"error":"bad format"}"#,
                )
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app_router).await.unwrap();
        });

        let mut app = app_for(&format!("http://{}", addr));
        app.dispatch(Action::SelectMode(InputMode::Text));
        app.dispatch(Action::TextChanged("???".into()));
        app.dispatch(Action::Submit);
        pump(&mut app).await;

        assert_eq!(app.state.session.inputs().text, "???");
        assert!(app.state.session.result().is_none());
        let messages = app.toast.messages();
        assert_eq!(messages[0].1, Severity::Error);
        assert!(messages[0].0.contains("bad format"));
    }

    #[test]
    fn event_reader_stops_when_asked() {
        let (tx, mut rx) = mpsc::channel(8);
        let stop = AtomicBool::new(false);
        let mut polls = 0;
        forward_events(&stop, &tx, |_| {
            polls += 1;
            match polls {
                1 => Ok(Some(Event::FocusGained)),
                2 => Ok(None),
                _ => {
                    stop.store(true, Ordering::Relaxed);
                    Ok(None)
                }
            }
        });
        assert_eq!(polls, 3);
        assert!(matches!(rx.try_recv(), Ok(AppMessage::Event(Event::FocusGained))));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn event_reader_stops_when_the_app_hangs_up() {
        let (tx, rx) = mpsc::channel(8);
        drop(rx);
        let stop = AtomicBool::new(false);
        let mut polls = 0;
        forward_events(&stop, &tx, |_| {
            polls += 1;
            Ok(Some(Event::FocusLost))
        });
        assert_eq!(polls, 1);
    }

    #[test]
    fn only_the_active_panel_is_drawn() {
        let mut app = app_for("http://127.0.0.1:9");
        let prompts = [
            (InputMode::Text, "Enter Text:"),
            (InputMode::File, "Select a TXT File:"),
            (InputMode::SpotifyLink, "Enter Spotify Playlist Link:"),
        ];
        let screen = screen_text(&mut app);
        assert!(prompts.iter().all(|(_, p)| !screen.contains(p)));

        for (mode, _) in prompts {
            app.dispatch(Action::SelectMode(mode));
            let screen = screen_text(&mut app);
            for (other, prompt) in prompts {
                assert_eq!(screen.contains(prompt), other == mode, "{:?} / {}", mode, prompt);
            }
        }
    }

    #[test]
    fn global_mode_keys_only_in_normal_mode() {
        let mut app = app_for("http://127.0.0.1:9");

        let key = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        assert_eq!(
            app.handle_key(key('l')),
            vec![Action::SelectMode(InputMode::SpotifyLink)]
        );

        app.dispatch(Action::SelectMode(InputMode::Text));
        assert_eq!(app.state.edit_mode, EditMode::Editing);
        assert_eq!(app.handle_key(key('l')), vec![Action::TextChanged("l".into())]);
    }
}
