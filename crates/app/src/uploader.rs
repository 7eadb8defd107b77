//! Upload step of the processor screen.
//!
//! Holds the listed file, the in-flight request and its outcome. Only the
//! first file of a selection is sent.

use crate::state::PendingRequest;
use backend::{format_file_size, PermitBackend, UploadResponse, UploadedFile};
use shared::{Handoff, SelectionState};
use std::path::PathBuf;
use std::sync::Arc;

/// A file shown in the "Uploaded Files" list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

impl ListedFile {
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        Self { path, name, size }
    }

    pub fn size_label(&self) -> String {
        format_file_size(self.size)
    }
}

#[derive(Default)]
pub struct Uploader {
    files: Vec<ListedFile>,
    pending: Option<PendingRequest<UploadResponse>>,
    /// Selection captured when the request started.
    submitted: SelectionState,
    error: Option<String>,
    completed: Option<Handoff>,
}

impl Uploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[ListedFile] {
        &self.files
    }

    pub fn is_uploading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Handoff built from the last successful upload.
    pub fn completed(&self) -> Option<&Handoff> {
        self.completed.as_ref()
    }

    /// List `paths` and start uploading the first one.
    ///
    /// Returns false, leaving everything untouched, when nothing was given or
    /// an upload is already in flight.
    pub fn start(
        &mut self,
        paths: Vec<PathBuf>,
        selection: &SelectionState,
        backend: Arc<dyn PermitBackend>,
    ) -> bool {
        if paths.is_empty() {
            return false;
        }
        if self.is_uploading() {
            tracing::warn!("upload already in progress, ignoring {} new file(s)", paths.len());
            return false;
        }

        self.files = paths.iter().cloned().map(ListedFile::from_path).collect();
        self.error = None;
        self.completed = None;
        self.submitted = selection.clone();

        let permit_type = selection.permit_type();
        let modes = selection.modes().to_vec();
        tracing::info!(
            "uploading {} as {} with modes {:?}",
            self.files[0].name,
            permit_type,
            modes
        );

        self.pending = Some(PendingRequest::spawn(async move {
            let file = UploadedFile::first_of(&paths).map_err(|e| e.to_string())?;
            backend
                .upload(file, permit_type, &modes)
                .await
                .map_err(|e| e.to_string())
        }));
        true
    }

    /// Collect the upload result if it has arrived. Returns true when the
    /// request finished this call.
    pub fn poll(&mut self) -> bool {
        let Some(result) = self.pending.as_ref().and_then(|p| p.poll()) else {
            return false;
        };
        self.pending = None;

        match result {
            Ok(response) => {
                if response.metadata.is_none() {
                    tracing::warn!("upload response had no metadata");
                }
                tracing::debug!("upload response extra keys: {:?}", response.extra.keys());
                let payload = response.metadata.map(Arc::new);
                self.completed = Some(Handoff::from_upload(payload, &self.submitted));
                tracing::info!("upload finished");
            }
            Err(e) => {
                tracing::warn!("upload failed: {}", e);
                self.error = Some(e);
            }
        }
        true
    }

    /// Clear the listed file. Ignored while uploading.
    pub fn remove_file(&mut self) {
        if self.is_uploading() {
            return;
        }
        self.files.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::{wait_for, FakeBackend};
    use backend::BackendError;
    use shared::PermitType;
    use std::time::Duration;

    fn doc(dir: &tempfile::TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"%PDF-1.4 permit").unwrap();
        path
    }

    fn finish(uploader: &mut Uploader) {
        wait_for(|| uploader.poll().then_some(()));
    }

    #[test]
    fn test_success_builds_handoff_from_selection() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(FakeBackend::new());
        let mut selection = SelectionState::default();
        selection.select_permit(PermitType::Wind);

        let mut uploader = Uploader::new();
        assert!(uploader.start(
            vec![doc(&dir, "a.pdf"), doc(&dir, "b.pdf")],
            &selection,
            backend.clone()
        ));
        assert!(uploader.is_uploading());

        // Changing the selection mid-flight does not affect the result.
        selection.toggle_mode("legal-review");
        finish(&mut uploader);

        assert!(!uploader.is_uploading());
        let handoff = uploader.completed().unwrap();
        assert_eq!(handoff.permit_type, Some(PermitType::Wind));
        assert_eq!(handoff.modes, ["standard-extraction", "legal-review"]);
        assert_eq!(
            handoff.payload.as_ref().unwrap().get("project_name"),
            Some(&serde_json::json!("Sunfield"))
        );

        let uploads = backend.uploads.lock();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].0, "a.pdf");
        assert_eq!(uploader.files().len(), 2);
    }

    #[test]
    fn test_failure_keeps_files_and_reports_message() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(FakeBackend::new().with_upload(|| {
            Err(BackendError::UploadStatus {
                status: 500,
                body: "boom".into(),
            })
        }));
        let selection = SelectionState::default();

        let mut uploader = Uploader::new();
        uploader.start(vec![doc(&dir, "permit.docx")], &selection, backend);
        finish(&mut uploader);

        assert_eq!(
            uploader.error(),
            Some("Backend upload failed (status 500): boom")
        );
        assert!(uploader.completed().is_none());
        assert_eq!(uploader.files()[0].name, "permit.docx");
        assert_eq!(uploader.files()[0].size, 15);
        assert_eq!(selection, SelectionState::default());
    }

    #[test]
    fn test_missing_metadata_gives_empty_handoff() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(
            FakeBackend::new().with_upload(|| UploadResponse::from_json(serde_json::json!({ "ok": true }))),
        );
        let mut uploader = Uploader::new();
        uploader.start(vec![doc(&dir, "a.pdf")], &SelectionState::default(), backend);
        finish(&mut uploader);

        let handoff = uploader.completed().unwrap();
        assert!(!handoff.has_payload());
    }

    #[test]
    fn test_second_upload_rejected_while_in_flight() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(FakeBackend::new().with_delay(Duration::from_millis(200)));
        let selection = SelectionState::default();

        let mut uploader = Uploader::new();
        assert!(uploader.start(vec![doc(&dir, "a.pdf")], &selection, backend.clone()));
        assert!(!uploader.start(vec![doc(&dir, "b.pdf")], &selection, backend.clone()));
        assert_eq!(uploader.files()[0].name, "a.pdf");

        uploader.remove_file();
        assert_eq!(uploader.files().len(), 1);

        finish(&mut uploader);
        assert_eq!(backend.uploads.lock().len(), 1);

        uploader.remove_file();
        assert!(uploader.files().is_empty());
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        let backend = Arc::new(FakeBackend::new());
        let mut uploader = Uploader::new();
        uploader.start(
            vec![PathBuf::from("/definitely/not/here.pdf")],
            &SelectionState::default(),
            backend.clone(),
        );
        finish(&mut uploader);

        assert!(uploader.error().unwrap().starts_with("Could not read"));
        assert!(backend.uploads.lock().is_empty());
    }

    #[test]
    fn test_empty_selection_is_ignored() {
        let mut uploader = Uploader::new();
        assert!(!uploader.start(Vec::new(), &SelectionState::default(), Arc::new(FakeBackend::new())));
        assert!(!uploader.is_uploading());
    }
}
