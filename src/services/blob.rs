//! Binary storage for photos attached to work orders.

use crate::errors::AppResult;
use std::fs;
use std::path::PathBuf;

pub trait BlobStore {
    /// Store `bytes` under `name` and return a durable URL to them.
    fn save(&self, bytes: &[u8], name: &str) -> AppResult<String>;
}

/// Stores blobs as files below a root directory.
pub struct DirBlobStore {
    root: PathBuf,
}

impl DirBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl BlobStore for DirBlobStore {
    fn save(&self, bytes: &[u8], name: &str) -> AppResult<String> {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;
        let absolute = fs::canonicalize(&path).unwrap_or(path);
        tracing::debug!(path = %absolute.display(), size = bytes.len(), "blob stored");
        Ok(format!("file://{}", absolute.display()))
    }
}

/// Blob name of a work order photo: `<order>/<kind>_<order>_<millis>.jpg`.
pub fn photo_name(order_id: &str, kind: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    format!("{order_id}/{kind}_{order_id}_{millis}.jpg")
}
