//! Runtime configuration for the uploader.
//!
//! The original service hard-codes both the endpoint and the wording that
//! marks a failure as OCR-related. Both are held as data here: the endpoint
//! can be overridden through `AGILIZA_API_URL`, and the OCR trigger set can
//! be extended by deployments that localise the server differently.

use std::env;

/// Where the conversion service listens by default.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/upload";

/// Artifact name used when the response carries no usable Content-Disposition.
pub const DEFAULT_DOWNLOAD_NAME: &str = "AgilizaConverter.xlsx";

/// Environment variable that overrides [`DEFAULT_ENDPOINT`].
pub const ENDPOINT_ENV_VAR: &str = "AGILIZA_API_URL";

/// Case-sensitive substrings the server is known to emit when the OCR engine
/// is missing or produced nothing.
const DEFAULT_OCR_TRIGGERS: [&str; 3] = ["tesseract", "OCR", "Nenhum dado extraído"];

#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Full URL of the upload endpoint.
    pub endpoint: String,
    /// Fallback filename for the downloaded artifact.
    pub default_filename: String,
    /// Substrings that classify a failure message as OCR-related.
    pub ocr_hint_triggers: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            default_filename: DEFAULT_DOWNLOAD_NAME.to_string(),
            ocr_hint_triggers: DEFAULT_OCR_TRIGGERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl UploadConfig {
    /// Default configuration with the endpoint taken from `AGILIZA_API_URL`
    /// when the variable is set and non-empty.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var(ENDPOINT_ENV_VAR) {
            let url = url.trim();
            if !url.is_empty() {
                config.endpoint = url.to_string();
            }
        }
        config
    }

    /// The `host:port` part of the endpoint, used in transport error messages.
    pub fn host_label(&self) -> String {
        let rest = self
            .endpoint
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.endpoint);
        rest.split('/').next().unwrap_or(rest).to_string()
    }

    /// Whether a failure message looks like an OCR/text-extraction problem.
    /// Matching is a plain case-sensitive substring check, mirroring the
    /// wording the server actually produces.
    pub fn is_ocr_related(&self, message: &str) -> bool {
        self.ocr_hint_triggers
            .iter()
            .any(|trigger| message.contains(trigger.as_str()))
    }
}
