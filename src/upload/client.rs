//! The single network exchange: one multipart POST per submission.
//!
//! There are deliberately no retries, timeouts, or cancellation here; a slow
//! server blocks only the submission attempt that reached it, and the UI
//! keeps the submit control disabled until the outcome lands.

use crate::config::UploadConfig;
use crate::error::UploadError;
use crate::session::StagedFile;
use crate::upload::disposition;
use crate::upload::types::Artifact;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;

/// Error body shape the service emits on failures.
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Clone)]
pub struct UploadClient {
    http: reqwest::Client,
    config: UploadConfig,
}

impl UploadClient {
    pub fn new(config: UploadConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// POST every staged file under the repeated `files` part plus the
    /// `model` field, and interpret the response into an [`Artifact`] or an
    /// [`UploadError`].
    pub async fn upload(&self, files: &[StagedFile], model: &str) -> Result<Artifact, UploadError> {
        let mut form = Form::new();
        for file in files {
            let bytes = tokio::fs::read(&file.path)
                .await
                .map_err(|e| UploadError::FileRead {
                    name: file.name.clone(),
                    source: e,
                })?;
            form = form.part("files", Part::bytes(bytes).file_name(file.name.clone()));
        }
        form = form.text("model", model.to_string());

        tracing::info!(
            endpoint = %self.config.endpoint,
            files = files.len(),
            model,
            "sending upload request"
        );

        let response = self
            .http
            .post(&self.config.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Transport {
                host: self.config.host_label(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "server responded");

        if !status.is_success() {
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Server {
                status: status.as_u16(),
                message: error_message(status, content_type.as_deref(), &body),
            });
        }

        let disposition_header = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let filename = disposition::filename_or_default(
            disposition_header.as_deref(),
            &self.config.default_filename,
        );

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UploadError::Transport {
                host: self.config.host_label(),
                reason: e.to_string(),
            })?
            .to_vec();

        Ok(Artifact { filename, bytes })
    }
}

/// Failure-message priority for a non-2xx response: JSON `detail` field when
/// the Content-Type says JSON, otherwise the raw body text, otherwise the
/// status line.
fn error_message(status: StatusCode, content_type: Option<&str>, body: &str) -> String {
    if content_type.map_or(false, |ct| ct.contains("application/json")) {
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
            return parsed.detail;
        }
    } else if !body.is_empty() {
        return body.to_string();
    }
    format!(
        "Error {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    )
}
