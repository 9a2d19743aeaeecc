//! Object-URL manager
//!
//! Browser object URLs let in-process binary content be addressed through a
//! pointer-like string without serializing it to text. They are a leak-prone
//! resource: the backing storage is process-wide and lives until the URL is
//! explicitly revoked. This module centralizes the create/revoke pairing in
//! one registry so no call site can forget to release, and keeps acquire and
//! revoke counters so tests can prove the no-leak invariant
//! (`created_count == revoked_count` after any sequence ending with nothing
//! selected).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A pointer-like reference to in-process binary content
///
/// Modeled on browser `blob:` URLs: an opaque token that a presentation
/// shell can hand to an `<img>`/`<video>` element or a save dialog, resolved
/// against the [`ObjectUrlRegistry`] that minted it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// Wrap a raw URL string (used when reconstructing from serialized state)
    pub fn from_raw(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The URL string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn generate() -> Self {
        Self(format!("blob:{:032x}", rand::random::<u128>()))
    }
}

impl std::fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registry of live object URLs and their backing content
///
/// Exclusively owned by the workflow; everything else only reads. All
/// operations are synchronous (the internal mutex is never held across an
/// await point), so a plain `std::sync::Mutex` suffices.
#[derive(Debug, Default)]
pub struct ObjectUrlRegistry {
    entries: Mutex<HashMap<ObjectUrl, Arc<Vec<u8>>>>,
    created: AtomicU64,
    revoked: AtomicU64,
}

impl ObjectUrlRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register content under a fresh object URL
    ///
    /// The content is shared, not copied. The returned URL stays resolvable
    /// until [`revoke`](Self::revoke) is called for it.
    pub fn create(&self, content: Arc<Vec<u8>>) -> ObjectUrl {
        let url = ObjectUrl::generate();
        {
            let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            entries.insert(url.clone(), content);
        }
        self.created.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(url = %url, "object URL created");
        url
    }

    /// Invalidate an object URL
    ///
    /// Safe to call for a URL that was already revoked or never existed:
    /// the call is a no-op and does not disturb the revoke count, so the
    /// acquire/release pairing stays verifiable.
    pub fn revoke(&self, url: &ObjectUrl) {
        let removed = {
            let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            entries.remove(url).is_some()
        };
        if removed {
            self.revoked.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(url = %url, "object URL revoked");
        }
    }

    /// Resolve an object URL to its backing content
    ///
    /// Returns `None` once the URL has been revoked.
    pub fn resolve(&self, url: &ObjectUrl) -> Option<Arc<Vec<u8>>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(url).cloned()
    }

    /// Number of currently live (unrevoked) URLs
    pub fn live_count(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.len()
    }

    /// Total URLs ever created
    pub fn created_count(&self) -> u64 {
        self.created.load(Ordering::Relaxed)
    }

    /// Total URLs revoked
    pub fn revoked_count(&self) -> u64 {
        self.revoked.load(Ordering::Relaxed)
    }
}
