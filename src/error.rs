//! Error taxonomy for the upload pipeline.
//!
//! Three classes exist:
//!
//! * **Validation** — raised before any network traffic (empty selection,
//!   missing model, no allowed file in a staged batch, bad removal index).
//! * **Transport** — the request never completed; the message names the
//!   target host so the user can tell a dead server from a bad upload.
//! * **Server** — a non-2xx response; the message carries whatever the
//!   server said (JSON `detail`, raw body, or the status line).
//!
//! Display strings double as the user-facing notice text, so they are
//! written for the person staring at the window, not for a log file.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    /// A staged batch contained no file with an allowed extension.
    #[error("No valid files selected. Use only TXT, PDF, Excel or image files.")]
    NoValidFiles,

    /// Submission attempted with an empty selection.
    #[error("Select at least one file")]
    NoFilesSelected,

    /// Submission attempted before a spreadsheet model was chosen.
    #[error("Select a spreadsheet model")]
    NoModelSelected,

    /// Removal index outside the current selection.
    #[error("File index {index} is out of range ({len} files staged)")]
    IndexOutOfRange { index: usize, len: usize },

    /// A staged file could not be read back from disk.
    #[error("Failed to read '{name}': {source}")]
    FileRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The request never reached or never returned from the server.
    #[error("Failed to reach the server ({host}): {reason}")]
    Transport { host: String, reason: String },

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Server { status: u16, message: String },
}

impl UploadError {
    /// True for errors raised before any network call is made.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            UploadError::NoValidFiles
                | UploadError::NoFilesSelected
                | UploadError::NoModelSelected
                | UploadError::IndexOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_displays_message_only() {
        let e = UploadError::Server {
            status: 400,
            message: "invalid model".into(),
        };
        assert_eq!(e.to_string(), "invalid model");
    }

    #[test]
    fn transport_error_names_the_host() {
        let e = UploadError::Transport {
            host: "localhost:5000".into(),
            reason: "connection refused".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("localhost:5000"), "got: {msg}");
        assert!(msg.contains("connection refused"), "got: {msg}");
    }

    #[test]
    fn validation_classification() {
        assert!(UploadError::NoFilesSelected.is_validation());
        assert!(UploadError::NoModelSelected.is_validation());
        assert!(UploadError::NoValidFiles.is_validation());
        assert!(UploadError::IndexOutOfRange { index: 3, len: 1 }.is_validation());
        assert!(!UploadError::Server {
            status: 500,
            message: "boom".into()
        }
        .is_validation());
    }
}
