//! Organize request contract: which field to send and where.
//!
//! Exactly one field is populated. Precedence is playlist link, then typed
//! text, then text loaded from a file, across every stored value whether or
//! not its panel is showing. Link requests go to the playlist endpoint and
//! both text sources go to the text endpoint.

use serde::Serialize;

use crate::model::{InputMode, InputValues};

/// Backend organize endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Playlist,
    Text,
}

impl Endpoint {
    /// Path used when config does not override it.
    pub fn default_path(self) -> &'static str {
        match self {
            Self::Playlist => "/organize/playlist",
            Self::Text => "/organize/text",
        }
    }
}

/// JSON body of an organize request: `{"link": …}` or `{"text": …}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RequestBody {
    Link { link: String },
    Text { text: String },
}

/// Which raw input a request was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Link,
    TypedText,
    FileText,
}

impl InputSource {
    /// The input mode whose panel edits this source.
    pub fn mode(self) -> InputMode {
        match self {
            Self::Link => InputMode::SpotifyLink,
            Self::TypedText => InputMode::Text,
            Self::FileText => InputMode::File,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub endpoint: Endpoint,
    pub body: RequestBody,
    pub source: InputSource,
}

impl SubmissionRequest {
    /// Build the request for the highest-precedence non-empty input.
    /// Returns `None` when every input is empty.
    pub fn from_inputs(inputs: &InputValues) -> Option<Self> {
        if !inputs.link.is_empty() {
            Some(Self {
                endpoint: Endpoint::Playlist,
                body: RequestBody::Link {
                    link: inputs.link.clone(),
                },
                source: InputSource::Link,
            })
        } else if !inputs.text.is_empty() {
            Some(Self {
                endpoint: Endpoint::Text,
                body: RequestBody::Text {
                    text: inputs.text.clone(),
                },
                source: InputSource::TypedText,
            })
        } else if !inputs.file_content.is_empty() {
            Some(Self {
                endpoint: Endpoint::Text,
                body: RequestBody::Text {
                    text: inputs.file_content.clone(),
                },
                source: InputSource::FileText,
            })
        } else {
            None
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.body)
    }

    /// Short description for logs; never includes the payload itself.
    pub fn describe(&self) -> String {
        let len = match &self.body {
            RequestBody::Link { link } => link.len(),
            RequestBody::Text { text } => text.len(),
        };
        format!("{:?} from {:?} ({} bytes)", self.endpoint, self.source, len)
    }
}
