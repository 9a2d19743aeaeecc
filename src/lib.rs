//! # smartcompress
//!
//! Embeddable client-side workflow library for file-compression front ends.
//!
//! ## Design Philosophy
//!
//! smartcompress is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Event-driven** - Presentation shells subscribe to events, no polling
//! - **Leak-proof** - Preview and result object URLs are created and revoked
//!   in exactly one place, never outliving the state they derive from
//! - **Sensible defaults** - Works out of the box against a local
//!   compression service
//!
//! The crate owns the full client-side lifecycle: a file is selected, a
//! preview object URL appears when the media kind allows it, the file is
//! submitted once as a multipart POST to the compression endpoint, and the
//! result comes back as a client-local downloadable object URL. Failures are
//! uniform and locally recoverable; a response arriving for a selection that
//! has since changed is discarded rather than shown.
//!
//! ## Quick Start
//!
//! ```no_run
//! use smartcompress::{CompressWorkflow, Config, SelectedFile};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let workflow = CompressWorkflow::new(Config::default())?;
//!
//!     // Subscribe to events
//!     let mut events = workflow.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     // Select and submit a file
//!     let bytes = std::fs::read("photo.png")?;
//!     workflow
//!         .select_file(SelectedFile::new("photo.png", "image/png", bytes))
//!         .await;
//!     workflow.submit().await?;
//!
//!     // Render from the snapshot
//!     let snapshot = workflow.snapshot().await;
//!     println!("submission: {}", snapshot.submission.as_str());
//!
//!     workflow.shutdown().await;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Object-URL manager (previews and downloadable results)
pub mod object_url;
/// Selection store (the at-most-one active file)
pub mod selection;
/// Core types and events
pub mod types;
/// Core workflow implementation (decomposed into focused submodules)
pub mod workflow;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result, NO_FILE_NOTICE, PROCESSING_FAILED_NOTICE};
pub use object_url::{ObjectUrl, ObjectUrlRegistry};
pub use selection::{ActiveSelection, SelectionStore};
pub use types::{Event, SelectedFile, SelectionId, SubmissionState, WorkflowSnapshot};
pub use workflow::CompressWorkflow;
