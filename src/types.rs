//! Core types for smartcompress

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::object_url::ObjectUrl;

/// Media-kind prefixes that qualify a file for preview
const PREVIEWABLE_PREFIXES: [&str; 2] = ["image/", "video/"];

/// Unique identifier for one selection generation
///
/// Every call to `select_file` mints a fresh, strictly increasing id. The
/// submission controller tags each in-flight request with the id it was
/// issued for and compares it against the current selection on resume; a
/// mismatch marks the response as stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionId(pub u64);

impl SelectionId {
    /// Create a new SelectionId
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner u64 value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for SelectionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<SelectionId> for u64 {
    fn from(id: SelectionId) -> Self {
        id.0
    }
}

impl std::fmt::Display for SelectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The file currently chosen by the user
///
/// At most one instance is active at a time; re-selection replaces it
/// wholesale. The raw content is shared behind an `Arc` so the submission
/// controller and the object-URL registry can hold it without copying.
#[derive(Clone, Debug)]
pub struct SelectedFile {
    /// Original filename as chosen by the user
    pub name: String,

    /// Declared media kind (MIME string). Not validated — an empty or bogus
    /// kind simply means the file is not previewable.
    pub media_kind: String,

    /// Size of the raw content in bytes
    pub size_bytes: u64,

    /// Raw file content
    pub content: Arc<Vec<u8>>,

    /// When the user selected the file
    pub selected_at: DateTime<Utc>,
}

impl SelectedFile {
    /// Create a selected file from its name, declared media kind, and content
    pub fn new(
        name: impl Into<String>,
        media_kind: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        let content = Arc::new(content);
        Self {
            name: name.into(),
            media_kind: media_kind.into(),
            size_bytes: content.len() as u64,
            content,
            selected_at: Utc::now(),
        }
    }

    /// Whether the declared media kind qualifies for preview
    ///
    /// True iff the kind begins with `image/` or `video/`. Everything else —
    /// documents, archives, empty or missing kind strings — is silently not
    /// previewable. That is documented behavior, not an error.
    pub fn is_previewable(&self) -> bool {
        PREVIEWABLE_PREFIXES
            .iter()
            .any(|prefix| self.media_kind.starts_with(prefix))
    }
}

/// State of the submission controller
///
/// Transitions: `Idle --submit--> InFlight --success--> Succeeded` and
/// `InFlight --failure--> Failed`. The only way back to `Idle` is a
/// selection change (a new or cleared selection resets submission state, so
/// a stale result is never shown for a file no longer selected). There is no
/// automatic retry from `Failed`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SubmissionState {
    /// No submission attempted for the current selection
    Idle,

    /// A request is on the wire; the busy flag is set
    InFlight,

    /// The service returned the compressed artifact
    Succeeded {
        /// Object URL wrapping the compressed bytes, ready for a
        /// client-local download
        result: ObjectUrl,
    },

    /// The exchange failed (transport error or service rejection)
    Failed {
        /// User-facing failure notice (generic by design)
        reason: String,
    },
}

impl SubmissionState {
    /// Whether no submission has been attempted for the current selection
    pub fn is_idle(&self) -> bool {
        matches!(self, SubmissionState::Idle)
    }

    /// Whether a request is currently on the wire
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::InFlight)
    }

    /// Whether the submission produced a downloadable result
    pub fn is_succeeded(&self) -> bool {
        matches!(self, SubmissionState::Succeeded { .. })
    }

    /// Whether the submission terminated in failure
    pub fn is_failed(&self) -> bool {
        matches!(self, SubmissionState::Failed { .. })
    }

    /// Short state label for logs and snapshots
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::InFlight => "in_flight",
            SubmissionState::Succeeded { .. } => "succeeded",
            SubmissionState::Failed { .. } => "failed",
        }
    }
}

/// Event emitted during the workflow lifecycle
///
/// Presentation shells subscribe via
/// [`CompressWorkflow::subscribe`](crate::CompressWorkflow::subscribe) and
/// re-render from these plus [`WorkflowSnapshot`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A file was selected (replacing any prior selection)
    FileSelected {
        /// Selection generation id
        id: SelectionId,
        /// Filename
        name: String,
        /// Size in bytes
        size_bytes: u64,
    },

    /// The active selection was cleared by the user
    SelectionCleared {
        /// Id of the selection that was cleared
        id: SelectionId,
    },

    /// A preview object URL is available for the active selection
    PreviewReady {
        /// Selection the preview belongs to
        id: SelectionId,
        /// Object URL to dereference for rendering
        url: ObjectUrl,
    },

    /// A preview object URL was revoked (selection replaced, cleared, or
    /// workflow shut down)
    PreviewReleased {
        /// Selection the preview belonged to
        id: SelectionId,
    },

    /// A submission left for the compression endpoint
    SubmissionStarted {
        /// Selection the request was issued for
        id: SelectionId,
    },

    /// The compression endpoint returned the compressed artifact
    SubmissionSucceeded {
        /// Selection the result belongs to
        id: SelectionId,
        /// Object URL wrapping the compressed bytes
        url: ObjectUrl,
        /// Compressed size in bytes
        size_bytes: u64,
    },

    /// The submission failed (transport error or service rejection — the
    /// event carries only the generic user notice)
    SubmissionFailed {
        /// Selection the request was issued for
        id: SelectionId,
        /// User-facing failure notice
        error: String,
    },

    /// A response arrived for a selection that is no longer active and was
    /// discarded without touching current state
    StaleResponseDiscarded {
        /// The superseded selection the response belonged to
        id: SelectionId,
    },

    /// The theme flag was toggled
    ThemeToggled {
        /// New value (true = dark)
        dark: bool,
    },

    /// The workflow was torn down; all object URLs are revoked
    Shutdown,
}

/// Serializable read-model of the whole workflow state
///
/// This is the contract consumed by a presentation shell: render the
/// snapshot, subscribe to [`Event`]s for invalidation, and feed user intents
/// back through the workflow methods (`select_file`, `clear_file`, `submit`,
/// `toggle_theme`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowSnapshot {
    /// Name of the active file (None when nothing is selected)
    pub file_name: Option<String>,

    /// Declared media kind of the active file
    pub media_kind: Option<String>,

    /// Size of the active file in bytes
    pub size_bytes: Option<u64>,

    /// When the active file was selected
    pub selected_at: Option<DateTime<Utc>>,

    /// Whether the active file qualifies for preview
    pub previewable: bool,

    /// Live preview object URL, if any
    pub preview_url: Option<ObjectUrl>,

    /// Current submission state
    pub submission: SubmissionState,

    /// Whether a submission is in flight
    pub busy: bool,

    /// Suggested filename for saving the compressed result
    pub download_filename: String,

    /// Current theme flag (true = dark)
    pub dark_mode: bool,
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn file(kind: &str) -> SelectedFile {
        SelectedFile::new("sample", kind, vec![0u8; 4])
    }

    // --- Previewability derivation ---

    #[test]
    fn image_and_video_kinds_are_previewable() {
        assert!(file("image/png").is_previewable());
        assert!(file("image/jpeg").is_previewable());
        assert!(file("video/mp4").is_previewable());
    }

    #[test]
    fn document_kinds_are_not_previewable() {
        assert!(!file("application/pdf").is_previewable());
        assert!(!file("text/plain").is_previewable());
    }

    #[test]
    fn empty_or_bare_kinds_are_not_previewable() {
        assert!(!file("").is_previewable(), "empty kind must not preview");
        assert!(
            !file("image").is_previewable(),
            "prefix match requires the trailing slash — bare 'image' is not a media kind"
        );
    }

    #[test]
    fn previewability_is_a_prefix_match_not_containment() {
        assert!(
            !file("application/image/x").is_previewable(),
            "'image/' occurring mid-string must not qualify"
        );
    }

    // --- SelectedFile construction ---

    #[test]
    fn selected_file_records_size_from_content() {
        let f = SelectedFile::new("photo.png", "image/png", vec![1, 2, 3]);
        assert_eq!(f.size_bytes, 3);
        assert_eq!(f.name, "photo.png");
    }

    // --- SubmissionState helpers ---

    #[test]
    fn submission_state_predicates_match_variants() {
        assert!(SubmissionState::Idle.is_idle());
        assert!(SubmissionState::InFlight.is_in_flight());
        let ok = SubmissionState::Succeeded {
            result: ObjectUrl::from_raw("blob:test"),
        };
        assert!(ok.is_succeeded());
        let failed = SubmissionState::Failed {
            reason: "nope".to_string(),
        };
        assert!(failed.is_failed());
        assert_eq!(failed.as_str(), "failed");
    }

    // --- SelectionId ---

    #[test]
    fn selection_id_round_trips_and_displays() {
        let id = SelectionId::from(7_u64);
        let raw: u64 = id.into();
        assert_eq!(raw, 7);
        assert_eq!(id.to_string(), "7");
        assert_eq!(SelectionId::new(7), id);
    }

    // --- Event serialization (shell-facing wire shape) ---

    #[test]
    fn events_serialize_with_snake_case_type_tag() {
        let event = Event::SubmissionStarted {
            id: SelectionId::new(3),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "submission_started");
        assert_eq!(json["id"], 3);
    }
}
