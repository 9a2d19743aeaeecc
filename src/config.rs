//! Configuration types for smartcompress

use serde::{Deserialize, Serialize};

/// Main configuration for [`CompressWorkflow`](crate::CompressWorkflow)
///
/// All fields have defaults targeting the reference backend, so
/// `Config::default()` works out of the box against a local compression
/// service:
///
/// ```
/// use smartcompress::Config;
///
/// let config = Config::default();
/// assert_eq!(config.endpoint, "http://127.0.0.1:5000/compress");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Full URL of the compression endpoint (default:
    /// "http://127.0.0.1:5000/compress"). Validated when the workflow is
    /// constructed; an unparseable URL is a configuration error.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Multipart form field name the file is submitted under (default: "file")
    #[serde(default = "default_file_field")]
    pub file_field: String,

    /// Suggested filename for saving the compressed result
    /// (default: "compressed-file"). The download itself is fully
    /// client-local; this is only the name offered to the user.
    #[serde(default = "default_download_filename")]
    pub download_filename: String,

    /// Initial theme flag (default: false = light). Purely cosmetic state
    /// threaded through the workflow so embedding shells don't need a
    /// process-wide global; toggled at runtime, never persisted.
    #[serde(default)]
    pub dark_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            file_field: default_file_field(),
            download_filename: default_download_filename(),
            dark_mode: false,
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:5000/compress".to_string()
}

fn default_file_field() -> String {
    "file".to_string()
}

fn default_download_filename() -> String {
    "compressed-file".to_string()
}
