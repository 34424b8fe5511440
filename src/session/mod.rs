//! Upload session controller.
//!
//! Owns the staged file selection and the chosen spreadsheet model, and
//! validates both before a submission is allowed to touch the network. The
//! GUI layer only translates events into calls on [`UploadSession`], which
//! keeps the whole contract testable without a window.

use crate::error::UploadError;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions the conversion service accepts. This allow-list is the sole
/// client-side type check; no content sniffing is done.
pub const ALLOWED_EXTENSIONS: [&str; 8] = ["txt", "pdf", "xlsx", "xls", "jpg", "jpeg", "png", "bmp"];

/// One file staged for upload. Bytes are read back from `path` at submit
/// time, so staging stays cheap even for large inputs.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

impl StagedFile {
    /// Stage a file from disk, capturing its name and current size.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, UploadError> {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let size = fs::metadata(&path)
            .map(|m| m.len())
            .map_err(|e| UploadError::FileRead {
                name: name.clone(),
                source: e,
            })?;
        Ok(Self { name, path, size })
    }

    /// Lower-cased extension of the display name, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    pub fn is_allowed(&self) -> bool {
        self.extension()
            .map_or(false, |ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
    }
}

/// Selection state for one upload attempt. Files keep their staging order;
/// the model resets whenever a new batch is staged.
#[derive(Debug, Default)]
pub struct UploadSession {
    files: Vec<StagedFile>,
    model: Option<String>,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Replace the selection with the allowed subset of `candidates`, keeping
    /// their relative order. A batch that filters down to nothing leaves the
    /// current selection untouched. Staging always resets the model choice,
    /// so the caller should re-prompt for one.
    pub fn stage_files(&mut self, candidates: Vec<StagedFile>) -> Result<usize, UploadError> {
        let kept: Vec<StagedFile> = candidates.into_iter().filter(|f| f.is_allowed()).collect();
        if kept.is_empty() {
            return Err(UploadError::NoValidFiles);
        }
        let count = kept.len();
        self.files = kept;
        self.model = None;
        Ok(count)
    }

    /// Remove the file at `index`. Callers drive this from the rendered list
    /// so the index is valid in practice, but it is bounds-checked anyway.
    pub fn remove_file(&mut self, index: usize) -> Result<StagedFile, UploadError> {
        if index >= self.files.len() {
            return Err(UploadError::IndexOutOfRange {
                index,
                len: self.files.len(),
            });
        }
        Ok(self.files.remove(index))
    }

    /// The identifier comes from the fixed set the UI exposes, so it is
    /// stored verbatim.
    pub fn choose_model(&mut self, model: impl Into<String>) {
        self.model = Some(model.into());
    }

    /// Submission preconditions, checked in order. Each violation is a
    /// distinct validation error raised before any network call.
    pub fn validate_submit(&self) -> Result<(), UploadError> {
        if self.files.is_empty() {
            return Err(UploadError::NoFilesSelected);
        }
        if self.model.is_none() {
            return Err(UploadError::NoModelSelected);
        }
        Ok(())
    }

    /// Wipe the selection and the model choice. Called after a successful
    /// upload or an explicit clear; failures keep the session so the user
    /// can retry.
    pub fn clear(&mut self) {
        self.files.clear();
        self.model = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> StagedFile {
        StagedFile {
            name: name.to_string(),
            path: PathBuf::from(name),
            size: 42,
        }
    }

    #[test]
    fn staging_keeps_only_allowed_extensions_in_order() {
        let mut session = UploadSession::new();
        let count = session
            .stage_files(vec![
                file("a.pdf"),
                file("script.exe"),
                file("b.XLSX"),
                file("notes"),
                file("c.Jpeg"),
            ])
            .unwrap();
        assert_eq!(count, 3);
        let names: Vec<&str> = session.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a.pdf", "b.XLSX", "c.Jpeg"]);
    }

    #[test]
    fn staging_nothing_allowed_fails_and_keeps_selection() {
        let mut session = UploadSession::new();
        session.stage_files(vec![file("a.txt")]).unwrap();
        session.choose_model("model-a");

        let err = session
            .stage_files(vec![file("virus.exe"), file("movie.mp4")])
            .unwrap_err();
        assert!(matches!(err, UploadError::NoValidFiles));
        // Untouched: the failed batch never replaced anything.
        assert_eq!(session.file_count(), 1);
        assert_eq!(session.model(), Some("model-a"));
    }

    #[test]
    fn staging_a_new_batch_resets_the_model() {
        let mut session = UploadSession::new();
        session.stage_files(vec![file("a.txt")]).unwrap();
        session.choose_model("model-b");
        session.stage_files(vec![file("b.png")]).unwrap();
        assert_eq!(session.model(), None);
    }

    #[test]
    fn remove_shifts_the_tail_down() {
        let mut session = UploadSession::new();
        session
            .stage_files(vec![file("a.txt"), file("b.txt"), file("c.txt")])
            .unwrap();
        let removed = session.remove_file(1).unwrap();
        assert_eq!(removed.name, "b.txt");
        let names: Vec<&str> = session.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a.txt", "c.txt"]);
    }

    #[test]
    fn remove_out_of_range_is_rejected() {
        let mut session = UploadSession::new();
        session.stage_files(vec![file("a.txt")]).unwrap();
        let err = session.remove_file(5).unwrap_err();
        assert!(matches!(
            err,
            UploadError::IndexOutOfRange { index: 5, len: 1 }
        ));
        assert_eq!(session.file_count(), 1);
    }

    #[test]
    fn submit_preconditions_are_checked_in_order() {
        let mut session = UploadSession::new();
        assert!(matches!(
            session.validate_submit().unwrap_err(),
            UploadError::NoFilesSelected
        ));

        session.stage_files(vec![file("a.txt")]).unwrap();
        assert!(matches!(
            session.validate_submit().unwrap_err(),
            UploadError::NoModelSelected
        ));

        session.choose_model("model-a");
        assert!(session.validate_submit().is_ok());
    }

    #[test]
    fn clear_empties_files_and_model() {
        let mut session = UploadSession::new();
        session.stage_files(vec![file("a.txt")]).unwrap();
        session.choose_model("model-a");
        session.clear();
        assert!(session.is_empty());
        assert_eq!(session.model(), None);
        assert!(matches!(
            session.validate_submit().unwrap_err(),
            UploadError::NoFilesSelected
        ));
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert!(file("REPORT.PDF").is_allowed());
        assert!(file("photo.BmP").is_allowed());
        assert!(!file("archive.zip").is_allowed());
        assert!(!file("no_extension").is_allowed());
    }
}
