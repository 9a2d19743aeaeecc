//! Selection store
//!
//! Holds the at-most-one active [`SelectedFile`] and derives preview
//! eligibility. The store itself is pure and infallible: it only replaces or
//! clears state. Releasing the resources that depend on a displaced
//! selection (preview and result object URLs) is the workflow's job, which
//! is why `select` and `clear` hand the displaced selection back to the
//! caller instead of dropping it silently.

use std::sync::Arc;

use crate::types::{SelectedFile, SelectionId};

/// The active selection together with its generation id
#[derive(Clone, Debug)]
pub struct ActiveSelection {
    /// Generation id minted when the file was selected
    pub id: SelectionId,
    /// The selected file
    pub file: Arc<SelectedFile>,
}

/// Store for the currently chosen file (or none)
#[derive(Debug, Default)]
pub struct SelectionStore {
    active: Option<ActiveSelection>,
    next_id: u64,
}

impl SelectionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active selection unconditionally
    ///
    /// No dedup and no validation of kind or size: selecting the same file
    /// twice produces a new generation. Returns the new selection and the
    /// one it displaced (if any) so dependent resources can be released.
    pub fn select(&mut self, file: SelectedFile) -> (ActiveSelection, Option<ActiveSelection>) {
        self.next_id += 1;
        let selection = ActiveSelection {
            id: SelectionId::new(self.next_id),
            file: Arc::new(file),
        };
        let displaced = self.active.replace(selection.clone());
        (selection, displaced)
    }

    /// Remove the active selection, returning it for dependent-resource
    /// release. No-op (returns `None`) when nothing is selected.
    pub fn clear(&mut self) -> Option<ActiveSelection> {
        self.active.take()
    }

    /// The active selection, if any
    pub fn active(&self) -> Option<&ActiveSelection> {
        self.active.as_ref()
    }

    /// Generation id of the active selection, if any
    pub fn active_id(&self) -> Option<SelectionId> {
        self.active.as_ref().map(|a| a.id)
    }

    /// Whether the active file qualifies for preview
    ///
    /// False when nothing is selected or the declared media kind lacks an
    /// `image/`/`video/` prefix.
    pub fn is_previewable(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| a.file.is_previewable())
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> SelectedFile {
        SelectedFile::new("photo.png", "image/png", vec![0u8; 8])
    }

    fn pdf() -> SelectedFile {
        SelectedFile::new("report.pdf", "application/pdf", vec![0u8; 8])
    }

    #[test]
    fn at_most_one_selection_after_any_sequence() {
        let mut store = SelectionStore::new();
        assert!(store.active().is_none());

        store.select(png());
        assert!(store.active().is_some());

        let (selection, displaced) = store.select(pdf());
        assert!(displaced.is_some(), "replacing must hand back the old selection");
        assert_eq!(store.active().unwrap().id, selection.id);
        assert_eq!(store.active().unwrap().file.name, "report.pdf");

        store.clear();
        assert!(store.active().is_none());
        assert!(store.clear().is_none(), "clearing an empty store is a no-op");
    }

    #[test]
    fn selection_ids_strictly_increase() {
        let mut store = SelectionStore::new();
        let (first, _) = store.select(png());
        store.clear();
        let (second, _) = store.select(png());
        assert!(
            second.id > first.id,
            "ids must never be reused, even across a clear — the stale-response guard depends on it"
        );
    }

    #[test]
    fn reselecting_the_same_file_mints_a_new_generation() {
        let mut store = SelectionStore::new();
        let (first, _) = store.select(png());
        let (second, displaced) = store.select(png());
        assert_ne!(first.id, second.id);
        assert_eq!(displaced.unwrap().id, first.id);
    }

    #[test]
    fn previewability_follows_the_active_kind() {
        let mut store = SelectionStore::new();
        assert!(!store.is_previewable(), "no selection means no preview");

        store.select(png());
        assert!(store.is_previewable());

        store.select(pdf());
        assert!(!store.is_previewable());

        store.select(SelectedFile::new("clip.mov", "video/quicktime", vec![1]));
        assert!(store.is_previewable());

        store.select(SelectedFile::new("unknown.bin", "", vec![1]));
        assert!(!store.is_previewable(), "empty media kind must not preview");

        store.clear();
        assert!(!store.is_previewable());
    }
}
