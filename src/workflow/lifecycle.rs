//! Teardown coordination.

use crate::types::Event;

use super::CompressWorkflow;

impl CompressWorkflow {
    /// Tear down the workflow deterministically
    ///
    /// Revokes the preview and result object URLs, clears the selection and
    /// resets submission state, then emits [`Event::Shutdown`]. This is the
    /// exit path that has no subsequent selection change to trigger cleanup,
    /// so embedding shells should call it when the surrounding scope goes
    /// away; afterwards `created_count == revoked_count` holds on the
    /// object-URL registry.
    ///
    /// A response still in flight at shutdown resolves against the now-empty
    /// selection and is discarded by the stale-response guard, releasing
    /// nothing further.
    pub async fn shutdown(&self) {
        tracing::info!("tearing down workflow");

        let mut state = self.state.lock().await;
        let displaced = state.selection.clear();
        self.release_dependents(&mut state, displaced.map(|d| d.id));
        drop(state);

        self.emit_event(Event::Shutdown);
        tracing::info!(
            live_urls = self.object_urls.live_count(),
            "teardown complete"
        );
    }
}
