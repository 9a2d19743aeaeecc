//! Error types for smartcompress
//!
//! The error taxonomy mirrors the workflow's failure surface:
//! - `NoFileSelected` — a submission was attempted with nothing selected
//! - `Transport` — the compression endpoint could not be reached
//! - `ServiceRejection` — the endpoint answered with a non-success status
//! - `Config` — the workflow was constructed with invalid settings
//!
//! A stale response (one that arrives after the selection it was issued for
//! has been replaced) is deliberately not an error: it is discarded silently
//! inside the submission controller and is only observable as an
//! [`Event::StaleResponseDiscarded`](crate::types::Event::StaleResponseDiscarded).

use thiserror::Error;

/// Result type alias for smartcompress operations
pub type Result<T> = std::result::Result<T, Error>;

/// Generic user-facing notice for any submission failure.
///
/// Transport failures and service rejections are intentionally not
/// distinguished in user-visible output; the distinction is kept only in the
/// `tracing` diagnostic channel.
pub const PROCESSING_FAILED_NOTICE: &str = "Processing failed. Please try again.";

/// User-facing notice shown when `submit` is called with no file selected.
pub const NO_FILE_NOTICE: &str = "No file chosen. Select a file first.";

/// Main error type for smartcompress
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "endpoint")
        key: Option<String>,
    },

    /// Submission attempted with no active file selection
    #[error("no file selected")]
    NoFileSelected,

    /// The compression endpoint could not be reached or the exchange did not
    /// complete (connection refused, interrupted transfer, truncated body)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The compression endpoint was reachable but returned a non-success
    /// status; no partial output is exposed
    #[error("compression service rejected the request with status {status}")]
    ServiceRejection {
        /// HTTP status code returned by the service
        status: u16,
    },
}

impl Error {
    /// The user-facing wording for this error.
    ///
    /// Every failure the workflow can produce maps to a short, generic
    /// notice. Transport errors and service rejections share the same text
    /// on purpose — "server unreachable" vs "server rejected" is diagnostic
    /// detail, not something the user can act on differently.
    pub fn user_notice(&self) -> &'static str {
        match self {
            Error::NoFileSelected => NO_FILE_NOTICE,
            Error::Transport(_) | Error::ServiceRejection { .. } => PROCESSING_FAILED_NOTICE,
            Error::Config { .. } => "The workflow is misconfigured.",
        }
    }

    /// Build a configuration error for a specific key
    pub(crate) fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_and_rejection_share_one_user_notice() {
        let rejection = Error::ServiceRejection { status: 500 };
        assert_eq!(
            rejection.user_notice(),
            PROCESSING_FAILED_NOTICE,
            "service rejection must surface the generic failure notice"
        );
        // The two failure classes are indistinguishable to the user by design;
        // only the Display/tracing output carries the status code.
        assert!(rejection.to_string().contains("500"));
    }

    #[test]
    fn no_file_selected_has_its_own_notice() {
        assert_eq!(Error::NoFileSelected.user_notice(), NO_FILE_NOTICE);
    }

    #[test]
    fn config_error_reports_key_and_message() {
        let err = Error::config("endpoint", "relative URL without a base");
        match err {
            Error::Config {
                ref message,
                ref key,
            } => {
                assert_eq!(key.as_deref(), Some("endpoint"));
                assert!(message.contains("relative URL"));
            }
            other => panic!("expected Config error, got {other:?}"),
        }
    }
}
