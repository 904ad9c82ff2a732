//! Error kinds surfaced to the user as notifications.
//!
//! None of these are fatal: each one maps to a transient message and the
//! session stays usable. `RequestError` also discards any stored result.

use thiserror::Error;

/// The three user-facing failure kinds of the input/submit cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistError {
    /// Nothing to submit: every input is empty. No request is sent.
    #[error("Please insert text, select a file, or enter a Spotify link before submitting.")]
    Validation,

    /// A file whose media type is not plain text was offered for upload.
    #[error("You can only upload .txt files!")]
    RejectedUpload {
        file_name: String,
        media_type: String,
    },

    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Failure of a single organize request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The backend answered with a non-success status. `message` is the
    /// body's `error` field, or the status text when the body has none.
    #[error("Failed to organize songs: {message}")]
    Http { status: u16, message: String },

    /// No response was obtained at all.
    #[error("Failed to connect to backend: {0}")]
    Transport(String),

    /// Success status, but the body is not an organized result.
    #[error("Failed to read backend response: {0}")]
    Decode(String),
}

impl RequestError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Why a response body could not be turned into an `OrganizedResult`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResultShapeError {
    #[error("malformed result: {0}")]
    Malformed(String),

    #[error("genre {genre:?}: {reason}")]
    BadEntry { genre: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_notifications() {
        assert_eq!(
            AssistError::Validation.to_string(),
            "Please insert text, select a file, or enter a Spotify link before submitting."
        );
        let rejected = AssistError::RejectedUpload {
            file_name: "cover.png".into(),
            media_type: "image/png".into(),
        };
        assert_eq!(rejected.to_string(), "You can only upload .txt files!");

        let http = AssistError::from(RequestError::Http {
            status: 400,
            message: "bad format".into(),
        });
        assert_eq!(http.to_string(), "Failed to organize songs: bad format");
        assert!(RequestError::Transport("refused".into()).is_transport());
    }
}
