mod state;
mod ui;

use agiliza_uploader::config::UploadConfig;
use agiliza_uploader::error::UploadError;
use agiliza_uploader::session::{StagedFile, UploadSession};
use agiliza_uploader::upload::{Artifact, UploadClient, UploadOutcome};
use eframe::{egui, App};
use state::UiState;
use std::path::PathBuf;
use std::sync::mpsc as std_mpsc;
use std::time::Duration;

/// The egui adapter: translates UI events into [`UploadSession`] calls and
/// renders the session's state. All mutation happens on the UI thread; the
/// worker thread only reports an [`UploadOutcome`] over a channel.
pub struct AgilizaApp {
    session: UploadSession,
    config: UploadConfig,
    state: UiState,
}

impl AgilizaApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = UploadConfig::from_env();
        tracing::info!(endpoint = %config.endpoint, "initializing Agiliza uploader");
        Self {
            session: UploadSession::new(),
            config,
            state: UiState::default(),
        }
    }

    /// Stage a batch of picked or dropped paths. A batch with no allowed file
    /// becomes an error notice; a usable batch opens the model modal.
    pub fn stage_paths(&mut self, paths: Vec<PathBuf>) {
        let mut candidates = Vec::with_capacity(paths.len());
        for path in paths {
            match StagedFile::from_path(&path) {
                Ok(file) => candidates.push(file),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable file")
                }
            }
        }
        match self.session.stage_files(candidates) {
            Ok(count) => {
                tracing::info!(count, "files staged");
                self.state.dismiss_notice();
                self.state.model_modal_open = true;
            }
            Err(e) => self.state.set_error(e.to_string()),
        }
    }

    pub fn remove_file(&mut self, index: usize) {
        if let Err(e) = self.session.remove_file(index) {
            tracing::warn!(error = %e, "remove ignored");
        }
    }

    pub fn choose_model(&mut self, model: &str) {
        tracing::debug!(model, "model chosen");
        self.session.choose_model(model);
        self.state.model_modal_open = false;
    }

    pub fn clear_session(&mut self) {
        self.session.clear();
        self.state.dismiss_notice();
    }

    /// Validate and, if the preconditions hold, kick off the one network
    /// exchange on a worker thread. The submit control stays disabled until
    /// the outcome arrives.
    pub fn start_upload(&mut self) {
        if self.state.in_flight {
            return;
        }
        if let Err(e) = self.session.validate_submit() {
            self.state.set_error(e.to_string());
            if matches!(e, UploadError::NoModelSelected) {
                self.state.model_modal_open = true;
            }
            return;
        }

        self.state.in_flight = true;
        self.state.dismiss_notice();

        let client = UploadClient::new(self.config.clone());
        let config = self.config.clone();
        let files: Vec<StagedFile> = self.session.files().to_vec();
        let model = self.session.model().unwrap_or_default().to_string();
        let (sender, receiver) = std_mpsc::channel();
        self.state.outcome_receiver = Some(receiver);

        std::thread::spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    let _ = sender.send(UploadOutcome::Failure {
                        message: format!("Failed to start the upload runtime: {e}"),
                        ocr_related: false,
                    });
                    return;
                }
            };
            let outcome = rt.block_on(async {
                match client.upload(&files, &model).await {
                    Ok(artifact) => UploadOutcome::Success(artifact),
                    Err(e) => {
                        let message = e.to_string();
                        let ocr_related = config.is_ocr_related(&message);
                        UploadOutcome::Failure {
                            message,
                            ocr_related,
                        }
                    }
                }
            });
            let _ = sender.send(outcome);
        });
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if self.state.expire_notice() {
            ctx.request_repaint();
        }

        let outcome = match &self.state.outcome_receiver {
            Some(receiver) => receiver.try_recv().ok(),
            None => None,
        };
        if let Some(outcome) = outcome {
            // Unconditional cleanup: the submit control and the file list
            // come back in every path.
            self.state.in_flight = false;
            self.state.outcome_receiver = None;
            match outcome {
                UploadOutcome::Success(artifact) => self.finish_success(artifact),
                UploadOutcome::Failure {
                    message,
                    ocr_related,
                } => {
                    tracing::error!(error = %message, ocr_related, "upload failed");
                    self.state.set_error(message);
                    if ocr_related {
                        self.state.show_ocr_hint = true;
                    }
                    // Selection and model stay put so the user can retry.
                }
            }
            ctx.request_repaint();
        }

        if self.state.in_flight || self.state.notice.is_some() {
            ctx.request_repaint_after(Duration::from_millis(200));
        }
    }

    fn finish_success(&mut self, artifact: Artifact) {
        let count = self.session.file_count();
        match self.save_artifact(&artifact) {
            Ok(Some(path)) => {
                tracing::info!(path = %path.display(), "artifact saved");
                self.state
                    .set_success(format!("{count} file(s) processed. Download started."));
            }
            Ok(None) => {
                self.state
                    .set_success(format!("{count} file(s) processed; download skipped."));
            }
            Err(e) => {
                self.state
                    .set_error(format!("Failed to save '{}': {e}", artifact.filename));
                // Keep the session so the user can submit again.
                return;
            }
        }
        self.session.clear();
    }

    fn save_artifact(&self, artifact: &Artifact) -> std::io::Result<Option<PathBuf>> {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(&artifact.filename)
            .save_file()
        else {
            return Ok(None);
        };
        std::fs::write(&path, &artifact.bytes)?;
        Ok(Some(path))
    }
}

impl App for AgilizaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
