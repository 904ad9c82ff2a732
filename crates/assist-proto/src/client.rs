//! HTTP client for the organize backend.

use anyhow::Context;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{BackendConfig, Config};
use crate::error::RequestError;
use crate::model::OrganizedResult;
use crate::request::{Endpoint, SubmissionRequest};

/// Error body the backend sends with non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Clone)]
pub struct OrganizeClient {
    http: reqwest::Client,
    backend: BackendConfig,
    nested_key: String,
}

impl OrganizeClient {
    pub fn new(backend: BackendConfig, nested_key: impl Into<String>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = backend.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            backend,
            nested_key: nested_key.into(),
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(config.backend.clone(), config.display.nested_genre_key.clone())
    }

    pub fn url_for(&self, endpoint: Endpoint) -> String {
        self.backend.url_for(endpoint)
    }

    /// Send one organize request and decode the answer.
    pub async fn organize(
        &self,
        request: &SubmissionRequest,
    ) -> Result<OrganizedResult, RequestError> {
        let url = self.url_for(request.endpoint);
        debug!("POST {} [{}]", url, request.describe());

        let response = self
            .http
            .post(&url)
            .json(&request.body)
            .send()
            .await
            .map_err(|e| RequestError::Transport(transport_detail(&e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| RequestError::Transport(transport_detail(&e)))?;

        if status.is_success() {
            OrganizedResult::from_slice(&body, &self.nested_key).map_err(|e| {
                warn!("undecodable organize response from {}: {}", url, e);
                RequestError::Decode(e.to_string())
            })
        } else {
            let message = error_message(&body).unwrap_or_else(|| status_text(status));
            warn!("organize request failed: {} {}", status.as_u16(), message);
            Err(RequestError::Http {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// The body's `error` field, if it is JSON and the field is non-empty.
fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.is_empty())
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

fn transport_detail(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        "connection refused or unreachable".to_string()
    } else {
        e.to_string()
    }
}
