/// The downloadable result of a successful conversion.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Filename resolved from the Content-Disposition header, or the
    /// configured default.
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Terminal state of one submission attempt, reported back to the UI thread.
#[derive(Debug)]
pub enum UploadOutcome {
    Success(Artifact),
    Failure {
        message: String,
        /// Set when the message matches a configured OCR trigger, so the UI
        /// can surface the Tesseract setup hint alongside the error.
        ocr_related: bool,
    },
}
