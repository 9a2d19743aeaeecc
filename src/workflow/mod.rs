//! Core workflow implementation split into focused submodules.
//!
//! The `CompressWorkflow` struct and its methods are organized by domain:
//! - [`selection`] - File selection and preview lifecycle
//! - [`submission`] - Submission to the compression endpoint
//! - [`lifecycle`] - Teardown coordination

mod lifecycle;
mod selection;
mod submission;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::object_url::ObjectUrlRegistry;
use crate::selection::SelectionStore;
use crate::types::{Event, SubmissionState, WorkflowSnapshot};

/// Buffer size of the event broadcast channel. A subscriber that falls
/// further behind receives `RecvError::Lagged`.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Mutable workflow state, guarded by a single async mutex
///
/// The mutex is only held for synchronous mutations — never across the
/// network await — so the selection stays freely mutable while a submission
/// is in flight. Ordering between an in-flight response and a newer
/// selection comes from the identity check on resume, not from this lock.
pub(crate) struct WorkflowState {
    /// The at-most-one active file
    pub(crate) selection: SelectionStore,
    /// Submission state machine for the current selection
    pub(crate) submission: SubmissionState,
    /// Live preview object URL, present iff the active file is previewable
    pub(crate) preview: Option<crate::object_url::ObjectUrl>,
}

/// Main workflow instance (cloneable - all fields are Arc-wrapped)
///
/// Owns the full selection → preview → submission → result lifecycle. A
/// presentation shell embeds a clone, renders [`WorkflowSnapshot`]s, listens
/// on [`subscribe`](Self::subscribe), and feeds user intents back through
/// [`select_file`](Self::select_file), [`clear_file`](Self::clear_file),
/// [`submit`](Self::submit) and [`toggle_theme`](Self::toggle_theme).
#[derive(Clone)]
pub struct CompressWorkflow {
    /// Configuration (shared across clones)
    pub(crate) config: Arc<Config>,
    /// Validated compression endpoint
    pub(crate) endpoint: url::Url,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
    /// Shared HTTP client (connection pooling across submissions)
    pub(crate) http: reqwest::Client,
    /// Object-URL registry backing previews and results
    pub(crate) object_urls: Arc<ObjectUrlRegistry>,
    /// Mutable workflow state
    pub(crate) state: Arc<tokio::sync::Mutex<WorkflowState>>,
    /// One-permit gate serializing submissions; holding the permit IS the
    /// busy flag, so it clears on every exit path by construction
    pub(crate) submit_gate: Arc<tokio::sync::Semaphore>,
    /// Theme flag (true = dark); purely cosmetic, never persisted
    pub(crate) dark_mode: Arc<AtomicBool>,
}

impl CompressWorkflow {
    /// Create a new workflow from configuration
    ///
    /// Validates the endpoint URL up front so misconfiguration surfaces at
    /// construction rather than on first submit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the endpoint is not a valid http(s) URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use smartcompress::{CompressWorkflow, Config};
    ///
    /// let workflow = CompressWorkflow::new(Config::default())?;
    /// assert!(!workflow.is_busy());
    /// # Ok::<(), smartcompress::Error>(())
    /// ```
    pub fn new(config: Config) -> Result<Self> {
        let endpoint = url::Url::parse(&config.endpoint)
            .map_err(|e| Error::config("endpoint", format!("{}: {e}", config.endpoint)))?;
        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err(Error::config(
                "endpoint",
                format!("unsupported scheme '{}'", endpoint.scheme()),
            ));
        }

        let (event_tx, _rx) = tokio::sync::broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let state = WorkflowState {
            selection: SelectionStore::new(),
            submission: SubmissionState::Idle,
            preview: None,
        };

        let dark_mode = config.dark_mode;

        Ok(Self {
            config: Arc::new(config),
            endpoint,
            event_tx,
            http: reqwest::Client::new(),
            object_urls: Arc::new(ObjectUrlRegistry::new()),
            state: Arc::new(tokio::sync::Mutex::new(state)),
            submit_gate: Arc::new(tokio::sync::Semaphore::new(1)),
            dark_mode: Arc::new(AtomicBool::new(dark_mode)),
        })
    }

    /// Subscribe to workflow events
    ///
    /// Multiple subscribers are supported; each receives all events
    /// independently. Events are buffered, but a subscriber that falls
    /// behind by more than the channel capacity receives
    /// `RecvError::Lagged`.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Get the current configuration
    pub fn get_config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// The object-URL registry backing previews and results
    ///
    /// Shells dereference preview/result URLs against this registry to
    /// render a preview or save the download — fully client-local, no
    /// server round trip.
    pub fn object_urls(&self) -> Arc<ObjectUrlRegistry> {
        Arc::clone(&self.object_urls)
    }

    /// Whether a submission is currently in flight
    pub fn is_busy(&self) -> bool {
        self.submit_gate.available_permits() == 0
    }

    /// Current theme flag (true = dark)
    pub fn dark_mode(&self) -> bool {
        self.dark_mode.load(Ordering::Relaxed)
    }

    /// Toggle the theme flag, returning the new value
    ///
    /// Initializes from [`Config::dark_mode`] (default light) and is lost on
    /// restart; persistence is deliberately unspecified.
    pub fn toggle_theme(&self) -> bool {
        let dark = !self.dark_mode.fetch_xor(true, Ordering::Relaxed);
        self.emit_event(Event::ThemeToggled { dark });
        dark
    }

    /// Capture a serializable snapshot of the whole workflow state
    ///
    /// This is the read-model a presentation shell renders from.
    pub async fn snapshot(&self) -> WorkflowSnapshot {
        let state = self.state.lock().await;
        let active = state.selection.active();

        WorkflowSnapshot {
            file_name: active.map(|a| a.file.name.clone()),
            media_kind: active.map(|a| a.file.media_kind.clone()),
            size_bytes: active.map(|a| a.file.size_bytes),
            selected_at: active.map(|a| a.file.selected_at),
            previewable: state.selection.is_previewable(),
            preview_url: state.preview.clone(),
            submission: state.submission.clone(),
            busy: self.is_busy(),
            download_filename: self.config.download_filename.clone(),
            dark_mode: self.dark_mode(),
        }
    }

    /// Emit an event to all subscribers
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// the workflow never depends on anyone listening.
    pub(crate) fn emit_event(&self, event: Event) {
        self.event_tx.send(event).ok();
    }
}
