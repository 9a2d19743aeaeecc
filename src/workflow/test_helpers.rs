//! Shared test helpers for creating CompressWorkflow instances in tests.

use crate::config::Config;
use crate::types::SelectedFile;

use super::CompressWorkflow;

/// Create a workflow pointed at the given endpoint.
pub(crate) fn create_test_workflow(endpoint: &str) -> CompressWorkflow {
    let config = Config {
        endpoint: endpoint.to_string(),
        ..Config::default()
    };
    CompressWorkflow::new(config).expect("test config must be valid")
}

/// Create a workflow pointed at a closed local port, for paths that must
/// fail at the transport level (or never reach the network at all).
pub(crate) fn create_offline_workflow() -> CompressWorkflow {
    // Port 9 (discard) is essentially never listening on loopback.
    create_test_workflow("http://127.0.0.1:9/compress")
}

/// A previewable image selection.
pub(crate) fn png_file() -> SelectedFile {
    SelectedFile::new("photo.png", "image/png", vec![0x89, 0x50, 0x4E, 0x47])
}

/// A non-previewable document selection.
pub(crate) fn pdf_file() -> SelectedFile {
    SelectedFile::new("report.pdf", "application/pdf", b"%PDF-1.4".to_vec())
}

/// A previewable video selection.
pub(crate) fn mp4_file() -> SelectedFile {
    SelectedFile::new("clip.mp4", "video/mp4", vec![0u8; 16])
}
