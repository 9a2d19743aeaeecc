//! File selection and preview lifecycle.
//!
//! `select_file` and `clear_file` are the only operations that replace or
//! remove the active file, and therefore the only places where resources
//! derived from the previous selection — the preview object URL and a
//! `Succeeded` submission's result URL — are released. Centralizing the
//! release here keeps the pairing airtight: a preview can never outlive the
//! file it was derived from, and a stale result can never be shown for a
//! file no longer selected.

use std::sync::Arc;

use crate::object_url::ObjectUrl;
use crate::types::{Event, SelectedFile, SelectionId, SubmissionState};

use super::{CompressWorkflow, WorkflowState};

impl CompressWorkflow {
    /// Select a file, replacing any prior selection unconditionally
    ///
    /// No dedup and no validation of media kind or size. Side effects, in
    /// order: the previous preview URL is revoked, a previous result URL is
    /// revoked, submission state resets to `Idle`, and — when the new file's
    /// media kind starts with `image/` or `video/` — a fresh preview URL is
    /// created. A non-previewable file silently gets no preview.
    ///
    /// Returns the generation id of the new selection.
    pub async fn select_file(&self, file: SelectedFile) -> SelectionId {
        let mut state = self.state.lock().await;
        let (selection, displaced) = state.selection.select(file);
        self.release_dependents(&mut state, displaced.map(|d| d.id));

        tracing::info!(
            selection_id = %selection.id,
            name = %selection.file.name,
            media_kind = %selection.file.media_kind,
            size_bytes = selection.file.size_bytes,
            "file selected"
        );
        self.emit_event(Event::FileSelected {
            id: selection.id,
            name: selection.file.name.clone(),
            size_bytes: selection.file.size_bytes,
        });

        if selection.file.is_previewable() {
            let url = self.object_urls.create(Arc::clone(&selection.file.content));
            state.preview = Some(url.clone());
            self.emit_event(Event::PreviewReady {
                id: selection.id,
                url,
            });
        }

        selection.id
    }

    /// Clear the active selection
    ///
    /// Same invalidation side effects as [`select_file`](Self::select_file):
    /// preview and result URLs are revoked and submission state resets to
    /// `Idle`. No-op when nothing is selected.
    pub async fn clear_file(&self) {
        let mut state = self.state.lock().await;
        let Some(displaced) = state.selection.clear() else {
            return;
        };

        self.release_dependents(&mut state, Some(displaced.id));
        tracing::info!(selection_id = %displaced.id, name = %displaced.file.name, "selection cleared");
        self.emit_event(Event::SelectionCleared { id: displaced.id });
    }

    /// Whether the active file qualifies for preview
    pub async fn is_previewable(&self) -> bool {
        self.state.lock().await.selection.is_previewable()
    }

    /// The live preview object URL, if any
    pub async fn preview_url(&self) -> Option<ObjectUrl> {
        self.state.lock().await.preview.clone()
    }

    /// The active file, if any
    pub async fn active_file(&self) -> Option<Arc<SelectedFile>> {
        self.state
            .lock()
            .await
            .selection
            .active()
            .map(|a| Arc::clone(&a.file))
    }

    /// Current submission state for the active selection
    pub async fn submission_state(&self) -> SubmissionState {
        self.state.lock().await.submission.clone()
    }

    /// Release every resource derived from a displaced selection: the
    /// preview URL and, when the previous submission had succeeded, its
    /// result URL. Submission state always resets to `Idle`.
    pub(crate) fn release_dependents(
        &self,
        state: &mut WorkflowState,
        displaced: Option<SelectionId>,
    ) {
        if let Some(url) = state.preview.take() {
            self.object_urls.revoke(&url);
            if let Some(id) = displaced {
                self.emit_event(Event::PreviewReleased { id });
            }
        }

        if let SubmissionState::Succeeded { result } = &state.submission {
            self.object_urls.revoke(result);
            tracing::debug!(selection_id = ?displaced, "revoked result URL of superseded submission");
        }
        state.submission = SubmissionState::Idle;
    }
}
