//! Photo blob storage.
//!
//! Blobs live as flat files under the configured cache directory, named by
//! generated identifiers with the uploader's file extension preserved.
//!
//! Blob I/O is not coordinated across concurrent requests: a delete racing a
//! photo replacement on the same item can orphan a blob or leave a dangling
//! reference. The same window exists around a crash between a database
//! update and the matching blob write/removal.

use std::path::{Path, PathBuf};

use stockpile_common::{BlobId, Result};

/// Compute the storage file name for an uploaded blob.
///
/// Pure mapping from a generated blob id and the client's original file
/// name; the original extension is preserved, and a missing extension yields
/// the bare id.
pub fn blob_file_name(blob_id: BlobId, original_name: &str) -> String {
    match Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(ext) => format!("{}.{}", blob_id, ext),
        None => blob_id.to_string(),
    }
}

/// Filesystem-backed photo store rooted at the cache directory.
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write an uploaded photo under a freshly generated name, returning the
    /// stored path.
    pub fn save(&self, original_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.root.join(blob_file_name(BlobId::new(), original_name));
        std::fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Release a stored blob, best-effort.
    ///
    /// Idempotent: a missing file is a success. Other failures are logged
    /// and swallowed so the enclosing request never fails on them.
    pub fn remove(&self, path: &str) {
        match std::fs::remove_file(path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove blob {}: {}", path, e),
        }
    }

    /// Open a stored blob for streaming. Returns `None` when the file is
    /// absent or unreadable.
    pub async fn open(&self, path: &str) -> Option<tokio::fs::File> {
        tokio::fs::File::open(path).await.ok()
    }
}
