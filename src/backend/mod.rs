//! HTTP client for the upload/collection backend.
//!
//! The backend is opaque: each call is a single blocking attempt with no
//! retry, and its result is surfaced as-is. Transport failures and non-2xx
//! statuses become outcome values, never errors, so the caller can append
//! them to the display list.
//!
//! # Endpoints
//!
//! - `POST /api/validate`: multipart, one `file` part per upload
//! - `POST /api/collect/auto`: multipart fields `host`, `sid`, optional
//!   `client` and `rfc_user`
//! - `GET /api/collect/status/{session}`: body returned verbatim
mod multipart;
mod outcome;

pub use multipart::MultipartForm;
pub use outcome::{CollectionOutcome, UploadOutcome, ValidateResponse};

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::time::Instant;
use ureq::Agent;

/// Base URL used when neither flag, config, nor environment provide one.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Inputs for `POST /api/collect/auto`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionRequest {
    pub host: String,
    pub sid: String,
    pub client: Option<String>,
    pub rfc_user: Option<String>,
}

/// Raw reply from the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReply {
    pub status: u16,
    pub body: String,
}

pub struct BackendClient {
    base: String,
    agent: Agent,
}

impl BackendClient {
    pub fn new(api_base: &str) -> Self {
        let base = api_base.trim().trim_end_matches('/').to_string();
        let mut config = Agent::config_builder().http_status_as_error(false);
        if is_loopback(&base) {
            config = config.proxy(None);
        }
        Self {
            base,
            agent: Agent::new_with_config(config.build()),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Upload files to the validation endpoint in one multipart request.
    ///
    /// Returns `None` when there is nothing to upload.
    pub fn validate_files(&self, paths: &[PathBuf]) -> Option<UploadOutcome> {
        if paths.is_empty() {
            return None;
        }
        let outcome = match self.post_validate(paths) {
            Ok(outcome) => outcome,
            Err(err) => UploadOutcome::Failed {
                error: format!("{err:#}"),
            },
        };
        if let UploadOutcome::Failed { error } = &outcome {
            tracing::warn!(error = %error, "validate upload failed");
        }
        Some(outcome)
    }

    fn post_validate(&self, paths: &[PathBuf]) -> Result<UploadOutcome> {
        let mut form = MultipartForm::new();
        for path in paths {
            let contents =
                std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .ok_or_else(|| anyhow!("no file name in {}", path.display()))?;
            form.file("file", &filename, &contents);
        }

        let url = format!("{}/api/validate", self.base);
        let start = Instant::now();
        let content_type = form.content_type();
        let body = form.finish();
        let mut response = self
            .agent
            .post(url.as_str())
            .header("Content-Type", content_type.as_str())
            .send(&body[..])
            .with_context(|| format!("POST {url}"))?;
        let status = response.status().as_u16();
        tracing::info!(
            elapsed_ms = start.elapsed().as_millis(),
            status,
            files = paths.len(),
            request_bytes = body.len(),
            "validate upload complete"
        );

        if !response.status().is_success() {
            return Ok(UploadOutcome::Rejected { status });
        }
        let parsed: ValidateResponse = response
            .body_mut()
            .read_json::<ValidateResponse>()
            .context("parse validate response JSON")?;
        Ok(UploadOutcome::Validated(parsed))
    }

    /// Ask the backend to start a simulated agentless collection.
    pub fn start_collection(&self, request: &CollectionRequest) -> CollectionOutcome {
        match self.post_collection(request) {
            Ok(outcome) => outcome,
            Err(err) => {
                let error = format!("{err:#}");
                tracing::warn!(error = %error, "collection request failed");
                CollectionOutcome::Failed { error }
            }
        }
    }

    fn post_collection(&self, request: &CollectionRequest) -> Result<CollectionOutcome> {
        let mut form = MultipartForm::new();
        form.text("host", &request.host);
        form.text("sid", &request.sid);
        if let Some(client) = &request.client {
            form.text("client", client);
        }
        if let Some(rfc_user) = &request.rfc_user {
            form.text("rfc_user", rfc_user);
        }

        let url = format!("{}/api/collect/auto", self.base);
        let start = Instant::now();
        let content_type = form.content_type();
        let body = form.finish();
        let mut response = self
            .agent
            .post(url.as_str())
            .header("Content-Type", content_type.as_str())
            .send(&body[..])
            .with_context(|| format!("POST {url}"))?;
        let status = response.status().as_u16();
        tracing::info!(
            elapsed_ms = start.elapsed().as_millis(),
            status,
            sid = %request.sid,
            "collection request complete"
        );

        if !response.status().is_success() {
            return Ok(CollectionOutcome::Rejected { status });
        }
        // No payload contract: a session id is picked up when present.
        let session_id = response
            .body_mut()
            .read_json::<serde_json::Value>()
            .ok()
            .and_then(|value| {
                value
                    .get("session_id")
                    .and_then(|id| id.as_str())
                    .map(str::to_string)
            });
        Ok(CollectionOutcome::Accepted { session_id })
    }

    /// Fetch the collection status for a session, body unparsed.
    pub fn collection_status(&self, session: &str) -> Result<StatusReply> {
        let session = session.trim();
        if session.is_empty() {
            return Err(anyhow!("session id must be non-empty"));
        }
        let url = format!("{}/api/collect/status/{session}", self.base);
        let start = Instant::now();
        let mut response = self
            .agent
            .get(url.as_str())
            .call()
            .with_context(|| format!("GET {url}"))?;
        let status = response.status().as_u16();
        tracing::info!(
            elapsed_ms = start.elapsed().as_millis(),
            status,
            "collection status complete"
        );
        let body = response
            .body_mut()
            .read_to_string()
            .context("read status response body")?;
        Ok(StatusReply { status, body })
    }
}

// Loopback backends bypass any proxy configured in the environment.
fn is_loopback(base: &str) -> bool {
    let rest = base
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(base);
    let authority = rest.split('/').next().unwrap_or_default();
    let host = if let Some(bracketed) = authority.strip_prefix('[') {
        bracketed.split(']').next().unwrap_or_default()
    } else {
        authority.split(':').next().unwrap_or_default()
    };
    matches!(host, "localhost" | "127.0.0.1" | "::1")
}
