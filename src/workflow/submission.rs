//! Submission to the compression endpoint.
//!
//! One multipart POST per submission, no retry, no timeout, no cancellation.
//! Concurrency is gated by a one-permit semaphore: holding the permit is the
//! busy flag, so the flag clears on every exit path — success, rejection,
//! transport failure, stale discard — by construction.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::{Event, SelectedFile, SubmissionState};

use super::CompressWorkflow;

impl CompressWorkflow {
    /// Submit the active file to the compression endpoint
    ///
    /// State machine: `Idle --submit--> InFlight`, then `--success-->
    /// Succeeded` or `--failure--> Failed`. Back to `Idle` only via a
    /// selection change.
    ///
    /// - With no active file — including while a request for a since-cleared
    ///   selection is still on the wire — fails immediately with
    ///   [`Error::NoFileSelected`] and makes no network call. The busy flag
    ///   is never touched on this path.
    /// - Otherwise, while a submission is in flight, further calls are
    ///   idempotent no-ops: not queued, not parallel, no state change.
    /// - Resubmitting a selection whose previous submission succeeded
    ///   displaces that result: its object URL is revoked before the new
    ///   attempt starts.
    /// - Transport failures and non-success statuses terminate identically
    ///   in `Failed` with the generic user notice; the real cause is logged
    ///   to the diagnostic channel only. Neither escapes as an `Err`.
    /// - A response that arrives after the selection it was issued for has
    ///   been replaced is discarded silently: current state is never
    ///   overwritten and no result URL is retained. The discard is
    ///   observable as [`Event::StaleResponseDiscarded`].
    pub async fn submit(&self) -> Result<()> {
        let (_permit, id, file) = {
            let mut state = self.state.lock().await;
            // Precondition before the busy gate: a rejected submit must not
            // flicker the busy flag, which is bound strictly to the
            // in-flight window.
            let Some(active) = state.selection.active() else {
                tracing::warn!("submit called with no file selected");
                return Err(Error::NoFileSelected);
            };

            let permit = match Arc::clone(&self.submit_gate).try_acquire_owned() {
                Ok(permit) => permit,
                Err(_) => {
                    tracing::debug!("submission already in flight; ignoring submit");
                    return Ok(());
                }
            };

            let id = active.id;
            let file = Arc::clone(&active.file);

            // A repeat submit for the same selection displaces the previous
            // result; revoke its URL so the registry pairing stays exact.
            if let SubmissionState::Succeeded { result } = &state.submission {
                self.object_urls.revoke(result);
                tracing::debug!(selection_id = %id, "revoked result URL of resubmitted selection");
            }
            state.submission = SubmissionState::InFlight;
            (permit, id, file)
        };

        tracing::info!(
            selection_id = %id,
            name = %file.name,
            size_bytes = file.size_bytes,
            "submitting file for compression"
        );
        self.emit_event(Event::SubmissionStarted { id });

        // The workflow's only suspension point. No state lock is held here,
        // so the selection stays freely mutable while the request is on the
        // wire; the identity check below handles whatever happened meanwhile.
        let outcome = self.exchange(&file).await;

        let mut state = self.state.lock().await;
        if state.selection.active_id() != Some(id) {
            drop(state);
            tracing::debug!(
                selection_id = %id,
                "response arrived for a superseded selection; discarding"
            );
            self.emit_event(Event::StaleResponseDiscarded { id });
            return Ok(());
        }

        match outcome {
            Ok(bytes) => {
                let size_bytes = bytes.len() as u64;
                let url = self.object_urls.create(Arc::new(bytes));
                state.submission = SubmissionState::Succeeded { result: url.clone() };
                drop(state);
                tracing::info!(selection_id = %id, size_bytes, "compression succeeded");
                self.emit_event(Event::SubmissionSucceeded {
                    id,
                    url,
                    size_bytes,
                });
            }
            Err(e) => {
                let reason = e.user_notice().to_string();
                state.submission = SubmissionState::Failed {
                    reason: reason.clone(),
                };
                drop(state);
                // The diagnostic channel keeps the distinction between
                // "unreachable" and "rejected"; the user notice does not.
                tracing::warn!(selection_id = %id, error = %e, "compression submission failed");
                self.emit_event(Event::SubmissionFailed { id, error: reason });
            }
        }

        Ok(())
    }

    /// Perform the single POST exchange: file bytes as one multipart field,
    /// full response body back as the compressed artifact.
    async fn exchange(&self, file: &SelectedFile) -> Result<Vec<u8>> {
        let make_part = || {
            reqwest::multipart::Part::bytes(file.content.as_ref().clone())
                .file_name(file.name.clone())
        };

        // Forward the declared kind when it parses; the client performs no
        // MIME validation of its own, so an unparseable kind is simply not
        // attached rather than failing the submission.
        let part = if file.media_kind.is_empty() {
            make_part()
        } else {
            match make_part().mime_str(&file.media_kind) {
                Ok(part) => part,
                Err(e) => {
                    tracing::debug!(media_kind = %file.media_kind, error = %e, "unparseable media kind; submitting without one");
                    make_part()
                }
            }
        };

        let form = reqwest::multipart::Form::new().part(self.config.file_field.clone(), part);

        let response = self
            .http
            .post(self.endpoint.as_str())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ServiceRejection {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}
