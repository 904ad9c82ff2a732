//! Session — the input selector and submission pipeline as one state object.
//!
//! All mutation goes through the transition methods below. Each returns an
//! `Outcome`: an optional notice for the toast layer and an optional effect
//! (file read, HTTP request) for the App to run. Completions of those effects
//! come back in through `file_loaded` / `finish_submission`.
//!
//! ```text
//!  Idle ──submit (inputs present)──▶ Submitting ──finish Ok──▶ Idle (result set, inputs cleared)
//!   ▲                                   │
//!   └───────────────finish Err──────────┘       (result cleared, inputs kept)
//! ```

use std::path::{Path, PathBuf};

use assist_proto::error::{AssistError, RequestError};
use assist_proto::model::{InputMode, InputValues, OrganizedResult, ResultView};
use assist_proto::request::SubmissionRequest;
use assist_proto::upload;
use tracing::{debug, info, warn};

use crate::widgets::toast::Severity;

pub const SUCCESS_MESSAGE: &str = "Songs organized successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
}

/// A transient, user-visible message.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Work the App must start on the session's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ReadFile { path: PathBuf, name: String },
    SendRequest(SubmissionRequest),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub notice: Option<Notice>,
    pub effect: Option<Effect>,
}

impl Outcome {
    fn none() -> Self {
        Self::default()
    }

    fn notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            effect: None,
        }
    }

    fn effect(effect: Effect) -> Self {
        Self {
            notice: None,
            effect: Some(effect),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    mode: InputMode,
    inputs: InputValues,
    result: Option<OrganizedResult>,
    phase: Phase,
    accepted_media_type: String,
    /// Files whose read is still in flight.
    reading: Vec<String>,
}

impl Session {
    pub fn new(accepted_media_type: impl Into<String>) -> Self {
        Self {
            mode: InputMode::None,
            inputs: InputValues::default(),
            result: None,
            phase: Phase::Idle,
            accepted_media_type: accepted_media_type.into(),
            reading: Vec::new(),
        }
    }

    // ── Read access ───────────────────────────────────────────────────────────

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn inputs(&self) -> &InputValues {
        &self.inputs
    }

    pub fn result(&self) -> Option<&OrganizedResult> {
        self.result.as_ref()
    }

    pub fn view(&self) -> ResultView {
        ResultView::of(self.result.as_ref())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// A hidden mode whose stored value outranks the active one and would
    /// be the one sent by `submit`.
    pub fn overriding_mode(&self) -> Option<InputMode> {
        let winner = SubmissionRequest::from_inputs(&self.inputs)?.source.mode();
        (winner != self.mode).then_some(winner)
    }

    pub fn is_reading_file(&self) -> bool {
        !self.reading.is_empty()
    }

    // ── Input selector ────────────────────────────────────────────────────────

    /// Switch the active input. Hides the other panels and drops any result;
    /// stored values of hidden modes are kept.
    pub fn select_mode(&mut self, mode: InputMode) -> Outcome {
        debug!("select_mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.result = None;
        Outcome::none()
    }

    pub fn set_text_value(&mut self, text: impl Into<String>) {
        self.inputs.text = text.into();
    }

    pub fn set_link_value(&mut self, link: impl Into<String>) {
        self.inputs.link = link.into();
    }

    /// Offer a file for upload. Anything that is not plain text is refused
    /// before it is read.
    pub fn accept_file(&mut self, path: &Path) -> Outcome {
        match upload::check_upload(path, &self.accepted_media_type) {
            Ok(name) => {
                info!("reading {}", path.display());
                self.reading.push(name.clone());
                Outcome::effect(Effect::ReadFile {
                    path: path.to_path_buf(),
                    name,
                })
            }
            Err(e) => {
                if let AssistError::RejectedUpload { media_type, .. } = &e {
                    warn!("rejected upload {} ({})", path.display(), media_type);
                }
                Outcome::notice(Notice::warning(e.to_string()))
            }
        }
    }

    /// A file read finished.
    pub fn file_loaded(&mut self, name: &str, content: Result<String, String>) -> Outcome {
        if let Some(pos) = self.reading.iter().position(|n| n == name) {
            self.reading.remove(pos);
        }
        match content {
            Ok(text) => {
                debug!("{} loaded ({} bytes)", name, text.len());
                self.inputs.file_content = text;
                self.inputs.file_name = Some(name.to_string());
                Outcome::notice(Notice::success(format!("{} file uploaded successfully", name)))
            }
            Err(e) => {
                warn!("file read failed: {}", e);
                Outcome::notice(Notice::error(format!("{} file upload failed: {}", name, e)))
            }
        }
    }

    // ── Submission pipeline ───────────────────────────────────────────────────

    /// Start a submission. Ignored while one is already outstanding.
    pub fn submit(&mut self) -> Outcome {
        if self.is_busy() {
            debug!("submit ignored: request already outstanding");
            return Outcome::none();
        }
        match SubmissionRequest::from_inputs(&self.inputs) {
            None => {
                self.result = None;
                Outcome::notice(Notice::warning(AssistError::Validation.to_string()))
            }
            Some(request) => {
                info!("submitting {}", request.describe());
                self.phase = Phase::Submitting;
                self.result = None;
                Outcome::effect(Effect::SendRequest(request))
            }
        }
    }

    /// The outstanding request resolved.
    pub fn finish_submission(
        &mut self,
        response: Result<OrganizedResult, RequestError>,
    ) -> Outcome {
        self.phase = Phase::Idle;
        match response {
            Ok(result) => {
                info!(
                    "organized {} songs into {} genres",
                    result.song_count(),
                    result.len()
                );
                self.result = Some(result);
                self.inputs.clear();
                self.mode = InputMode::None;
                Outcome::notice(Notice::success(SUCCESS_MESSAGE))
            }
            Err(e) => {
                warn!("submission failed: {}", e);
                self.result = None;
                Outcome::notice(Notice::error(AssistError::from(e).to_string()))
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new("text/plain")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assist_proto::model::{GenreEntry, NO_SONGS_MESSAGE};
    use assist_proto::request::{Endpoint, RequestBody};

    fn result(body: &str) -> OrganizedResult {
        OrganizedResult::from_json_str(body, "organized songs").unwrap()
    }

    fn sent_request(outcome: &Outcome) -> &SubmissionRequest {
        match &outcome.effect {
            Some(Effect::SendRequest(req)) => req,
            other => panic!("expected a request, got {:?}", other),
        }
    }

    /// Session holding a result, with the given mode active.
    fn session_with_result(mode: InputMode) -> Session {
        let mut s = Session::default();
        s.select_mode(mode);
        s.set_text_value("Song - Artist");
        s.submit();
        s.finish_submission(Ok(result(r#"{"rock":["SongA"]}"#)));
        assert!(s.result().is_some());
        s
    }

    #[test]
    fn selecting_any_mode_clears_result() {
        for mode in [InputMode::Text, InputMode::File, InputMode::SpotifyLink] {
            let mut s = session_with_result(InputMode::Text);
            s.select_mode(mode);
            assert_eq!(s.mode(), mode);
            assert!(s.result().is_none(), "{:?} kept the result", mode);
            assert_eq!(s.view(), ResultView::Absent);
        }
    }

    #[test]
    fn hidden_mode_values_are_retained() {
        let mut s = Session::default();
        s.select_mode(InputMode::SpotifyLink);
        s.set_link_value("https://open.spotify.com/playlist/X");
        s.select_mode(InputMode::Text);
        assert_eq!(s.inputs().link, "https://open.spotify.com/playlist/X");
        assert_eq!(s.mode(), InputMode::Text);
    }

    #[test]
    fn hidden_link_outranks_active_text() {
        let mut s = Session::default();
        s.select_mode(InputMode::SpotifyLink);
        s.set_link_value("https://open.spotify.com/playlist/OLD");
        assert_eq!(s.overriding_mode(), None);

        s.select_mode(InputMode::Text);
        s.set_text_value("Song - Artist");
        assert_eq!(s.overriding_mode(), Some(InputMode::SpotifyLink));

        let out = s.submit();
        let req = sent_request(&out);
        assert_eq!(s.mode(), InputMode::Text);
        assert_eq!(req.endpoint, Endpoint::Playlist);
        assert_eq!(
            req.body,
            RequestBody::Link {
                link: "https://open.spotify.com/playlist/OLD".into()
            }
        );
    }

    #[test]
    fn no_override_when_active_value_wins() {
        let mut s = Session::default();
        s.select_mode(InputMode::Text);
        s.set_text_value("typed");
        s.select_mode(InputMode::SpotifyLink);
        s.set_link_value("https://open.spotify.com/playlist/X");
        assert_eq!(s.overriding_mode(), None);
        s.set_link_value("");
        assert_eq!(s.overriding_mode(), Some(InputMode::Text));
    }

    #[test]
    fn empty_submit_warns_without_request() {
        let mut s = session_with_result(InputMode::Text);
        s.select_mode(InputMode::Text);
        let out = s.submit();
        assert!(out.effect.is_none());
        let notice = out.notice.unwrap();
        assert_eq!(notice.severity, Severity::Warning);
        assert_eq!(notice.message, AssistError::Validation.to_string());
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.result().is_none());
    }

    #[test]
    fn link_submission_targets_playlist() {
        let mut s = Session::default();
        s.select_mode(InputMode::SpotifyLink);
        s.set_link_value("https://open.spotify.com/playlist/X");
        let out = s.submit();
        let req = sent_request(&out);
        assert_eq!(req.endpoint, Endpoint::Playlist);
        assert_eq!(
            req.to_json().unwrap(),
            r#"{"link":"https://open.spotify.com/playlist/X"}"#
        );
        assert!(s.is_busy());
    }

    #[test]
    fn typed_text_submission_targets_text() {
        let mut s = Session::default();
        s.select_mode(InputMode::Text);
        s.set_text_value("Song - Artist");
        let out = s.submit();
        let req = sent_request(&out);
        assert_eq!(req.endpoint, Endpoint::Text);
        assert_eq!(
            req.body,
            RequestBody::Text {
                text: "Song - Artist".into()
            }
        );
    }

    #[test]
    fn submit_while_busy_is_ignored() {
        let mut s = Session::default();
        s.set_text_value("a");
        assert!(s.submit().effect.is_some());
        assert_eq!(s.submit(), Outcome::default());
        assert!(s.is_busy());
    }

    #[test]
    fn png_upload_is_rejected_before_read() {
        let mut s = Session::default();
        s.select_mode(InputMode::File);
        let out = s.accept_file(Path::new("/tmp/cover.png"));
        assert!(out.effect.is_none());
        let notice = out.notice.unwrap();
        assert_eq!(notice.severity, Severity::Warning);
        assert_eq!(notice.message, "You can only upload .txt files!");
        assert!(s.inputs().file_content.is_empty());
        assert!(s.inputs().file_name.is_none());
        assert!(!s.is_reading_file());
    }

    #[test]
    fn txt_upload_reads_then_stores_content() {
        let mut s = Session::default();
        s.select_mode(InputMode::File);
        let out = s.accept_file(Path::new("/tmp/list.txt"));
        assert_eq!(
            out.effect,
            Some(Effect::ReadFile {
                path: PathBuf::from("/tmp/list.txt"),
                name: "list.txt".into(),
            })
        );
        assert!(s.is_reading_file());
        assert!(s.inputs().file_content.is_empty());

        let done = s.file_loaded("list.txt", Ok("A - B\n".into()));
        assert_eq!(done.notice.unwrap().severity, Severity::Success);
        assert!(!s.is_reading_file());
        assert_eq!(s.inputs().file_content, "A - B\n");
        assert_eq!(s.inputs().file_name.as_deref(), Some("list.txt"));

        let req_out = s.submit();
        assert_eq!(sent_request(&req_out).body, RequestBody::Text { text: "A - B\n".into() });
    }

    #[test]
    fn failed_read_leaves_file_input_unset() {
        let mut s = Session::default();
        s.accept_file(Path::new("/tmp/gone.txt"));
        let out = s.file_loaded("gone.txt", Err("No such file".into()));
        assert_eq!(out.notice.unwrap().severity, Severity::Error);
        assert!(s.inputs().file_content.is_empty());
    }

    #[test]
    fn success_stores_result_and_clears_inputs() {
        let mut s = Session::default();
        s.select_mode(InputMode::Text);
        s.set_text_value("SongA\nSongB");
        s.set_link_value("");
        s.submit();
        let out = s.finish_submission(Ok(result(r#"{"rock":["SongA","SongB"]}"#)));
        assert_eq!(out.notice, Some(Notice::success(SUCCESS_MESSAGE)));
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.inputs(), &InputValues::default());
        assert_eq!(s.mode(), InputMode::None);
        assert_eq!(s.overriding_mode(), None);
        assert_eq!(
            s.result().and_then(|r| r.get("rock")),
            Some(&GenreEntry::Flat(vec!["SongA".into(), "SongB".into()]))
        );
    }

    #[test]
    fn http_failure_clears_result_but_keeps_inputs() {
        let mut s = session_with_result(InputMode::Text);
        s.select_mode(InputMode::Text);
        s.set_text_value("???");
        s.submit();
        let out = s.finish_submission(Err(RequestError::Http {
            status: 400,
            message: "bad format".into(),
        }));
        let notice = out.notice.unwrap();
        assert_eq!(notice.severity, Severity::Error);
        assert!(notice.message.contains("bad format"));
        assert!(s.result().is_none());
        assert_eq!(s.inputs().text, "???");
        assert_eq!(s.mode(), InputMode::Text);
        assert!(!s.is_busy());
    }

    #[test]
    fn transport_failure_shows_connectivity_message() {
        let mut s = Session::default();
        s.set_text_value("x");
        s.submit();
        let out = s.finish_submission(Err(RequestError::Transport("refused".into())));
        assert_eq!(
            out.notice.unwrap().message,
            "Failed to connect to backend: refused"
        );
        assert_eq!(s.inputs().text, "x");
    }

    #[test]
    fn empty_result_renders_no_songs_message() {
        let mut s = Session::default();
        s.set_text_value("x");
        s.submit();
        s.finish_submission(Ok(result("{}")));
        assert_eq!(s.view(), ResultView::Empty);
        assert_eq!(s.view().to_plain_text(), NO_SONGS_MESSAGE);
    }

    #[test]
    fn mode_switch_while_submitting_keeps_busy() {
        let mut s = Session::default();
        s.set_text_value("x");
        s.submit();
        s.select_mode(InputMode::SpotifyLink);
        assert!(s.is_busy());
        s.finish_submission(Ok(result(r#"{"pop":["y"]}"#)));
        assert!(s.result().is_some());
        assert_eq!(s.mode(), InputMode::None);
    }
}
