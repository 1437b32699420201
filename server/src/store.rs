//! Storage for shared SVG documents.
//!
//! DESIGN
//! ======
//! Handlers talk to the `SvgStore` trait so the backend is chosen at startup:
//! `MemoryStore` for development and tests, `FileStore` for anything that
//! should survive a restart. Both issue ids from `new_id` and never overwrite
//! an existing entry; a colliding id is simply redrawn.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rand::Rng;
use share::wire::{ID_BYTES, encode_id, is_valid_id};
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

/// How many fresh ids to try before giving up on a put.
const MAX_ID_ATTEMPTS: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not allocate an unused id")]
    IdsExhausted,
    #[error("invalid id `{0}`")]
    InvalidId(String),
}

/// Content-agnostic store of SVG documents keyed by share id.
#[async_trait::async_trait]
pub trait SvgStore: Send + Sync {
    /// Store `content` under a fresh id and return the id.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend fails to persist the content.
    async fn put(&self, content: String) -> Result<String, StoreError>;

    /// Look up a stored document. `Ok(None)` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidId`] for malformed ids and
    /// [`StoreError::Io`] when the backend cannot be read.
    async fn get(&self, id: &str) -> Result<Option<String>, StoreError>;
}

/// A fresh random share id.
#[must_use]
pub fn new_id() -> String {
    let bytes: [u8; ID_BYTES] = rand::rng().random();
    encode_id(bytes)
}

// =============================================================================
// MEMORY
// =============================================================================

/// Process-lifetime store; everything is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SvgStore for MemoryStore {
    async fn put(&self, content: String) -> Result<String, StoreError> {
        let mut entries = self.entries.write().await;
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = new_id();
            if !entries.contains_key(&id) {
                entries.insert(id.clone(), content);
                return Ok(id);
            }
        }
        Err(StoreError::IdsExhausted)
    }

    async fn get(&self, id: &str) -> Result<Option<String>, StoreError> {
        if !is_valid_id(id) {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.entries.read().await.get(id).cloned())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// One `<id>.svg` file per entry inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.svg"))
    }
}

#[async_trait::async_trait]
impl SvgStore for FileStore {
    async fn put(&self, content: String) -> Result<String, StoreError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = new_id();
            let path = self.path_for(&id);
            let opened = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;
            let mut file = match opened {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };
            let written = write_contents(&mut file, content.as_bytes()).await;
            drop(file);
            discard_on_error(&path, written).await?;
            return Ok(id);
        }
        Err(StoreError::IdsExhausted)
    }

    async fn get(&self, id: &str) -> Result<Option<String>, StoreError> {
        // The id becomes a file name, so it must be validated before any path is built.
        if !is_valid_id(id) {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        match tokio::fs::read_to_string(self.path_for(id)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

async fn write_contents(file: &mut tokio::fs::File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await
}

/// Remove the entry at `path` when writing it failed, so a truncated document
/// is never served under an id. Cleanup failures are logged; the write error
/// is what gets returned.
async fn discard_on_error(path: &Path, written: std::io::Result<()>) -> Result<(), StoreError> {
    let Err(e) = written else {
        return Ok(());
    };
    if let Err(cleanup) = tokio::fs::remove_file(path).await {
        tracing::warn!(path = %path.display(), error = %cleanup, "could not remove partial share file");
    }
    Err(e.into())
}
