//! The Blob Store abstraction — the only I/O surface the core depends on.
//!
//! Every file is opaque bytes to the store; this crate owns all framing.
//! Concrete backends (sandboxed filesystem, native filesystem, etc.) are out
//! of scope here — only the interface and a test-only in-memory stand-in
//! live in this crate.

use crate::error::Result;

/// Named, length-addressable blob storage.
///
/// Implementations must serialize calls per engine instance; this trait
/// makes no concurrency guarantees of its own (see the crate's top-level
/// docs on single-threaded cooperative use).
pub trait BlobStore: Send + Sync {
    /// Replace `name` wholesale with `bytes`.
    fn write(&self, name: &str, bytes: &[u8]) -> Result<()>;

    /// Create `name` if absent, then append `bytes` at its current end.
    fn append(&self, name: &str, bytes: &[u8]) -> Result<()>;

    /// Read the full contents of `name`. Returns `None` if absent.
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Read `[start, end)` of `name`. Returns `None` if absent; if `end`
    /// exceeds the file's length, returns the available prefix.
    fn read_range(&self, name: &str, start: u64, end: u64) -> Result<Option<Vec<u8>>>;

    /// Current length of `name` in bytes, or 0 if absent.
    fn size(&self, name: &str) -> Result<u64>;

    /// Remove `name`. Idempotent — removing an absent name is not an error.
    fn remove(&self, name: &str) -> Result<()>;

    /// List every blob name currently stored under this store's namespace.
    fn list(&self) -> Result<Vec<String>>;

    /// Remove everything under this store's namespace.
    fn clear_all(&self) -> Result<()>;
}

#[cfg(any(test, feature = "test-util"))]
pub mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Non-production, in-memory `BlobStore` used by this crate's own tests
    /// and available to integration tests under the `test-util` feature.
    /// Not a production facade — never compiled into a default build.
    ///
    /// `Clone` shares the same backing map (via `Arc`) rather than copying
    /// it, so a test can construct two independent `Engine`s against "the
    /// same base directory" the way spec.md's reload scenarios require.
    #[derive(Default, Clone)]
    pub struct MemoryBlobStore {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MemoryBlobStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl BlobStore for MemoryBlobStore {
        fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
            self.files
                .lock()
                .unwrap()
                .insert(name.to_string(), bytes.to_vec());
            Ok(())
        }

        fn append(&self, name: &str, bytes: &[u8]) -> Result<()> {
            let mut files = self.files.lock().unwrap();
            files.entry(name.to_string()).or_default().extend_from_slice(bytes);
            Ok(())
        }

        fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
            Ok(self.files.lock().unwrap().get(name).cloned())
        }

        fn read_range(&self, name: &str, start: u64, end: u64) -> Result<Option<Vec<u8>>> {
            let files = self.files.lock().unwrap();
            let Some(data) = files.get(name) else {
                return Ok(None);
            };
            let start = start as usize;
            let end = (end as usize).min(data.len());
            if start >= data.len() || start >= end {
                return Ok(Some(Vec::new()));
            }
            Ok(Some(data[start..end].to_vec()))
        }

        fn size(&self, name: &str) -> Result<u64> {
            Ok(self
                .files
                .lock()
                .unwrap()
                .get(name)
                .map(|d| d.len() as u64)
                .unwrap_or(0))
        }

        fn remove(&self, name: &str) -> Result<()> {
            self.files.lock().unwrap().remove(name);
            Ok(())
        }

        fn list(&self) -> Result<Vec<String>> {
            Ok(self.files.lock().unwrap().keys().cloned().collect())
        }

        fn clear_all(&self) -> Result<()> {
            self.files.lock().unwrap().clear();
            Ok(())
        }
    }

}
