use agiliza_uploader::upload::UploadOutcome;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

// Notices auto-hide like the original service UI: errors linger a little
// longer than success confirmations.
const ERROR_NOTICE_TTL: Duration = Duration::from_secs(5);
const SUCCESS_NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    shown_at: Instant,
}

impl Notice {
    fn new(kind: NoticeKind, message: String) -> Self {
        Self {
            kind,
            message,
            shown_at: Instant::now(),
        }
    }

    fn is_expired(&self) -> bool {
        let ttl = match self.kind {
            NoticeKind::Success => SUCCESS_NOTICE_TTL,
            NoticeKind::Error => ERROR_NOTICE_TTL,
        };
        self.shown_at.elapsed() >= ttl
    }
}

/// Render-side state: everything here is about what is on screen, never
/// about what is selected (that lives in the session controller).
#[derive(Default)]
pub struct UiState {
    pub in_flight: bool,
    pub model_modal_open: bool,
    pub show_ocr_hint: bool,
    pub notice: Option<Notice>,
    pub outcome_receiver: Option<Receiver<UploadOutcome>>,
}

impl UiState {
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::new(NoticeKind::Error, message.into()));
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::new(NoticeKind::Success, message.into()));
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Drop the notice once its display window has passed. Returns true when
    /// something changed so the caller can repaint.
    pub fn expire_notice(&mut self) -> bool {
        if self.notice.as_ref().map_or(false, Notice::is_expired) {
            self.notice = None;
            true
        } else {
            false
        }
    }
}
