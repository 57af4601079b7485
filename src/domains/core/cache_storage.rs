use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum CacheStorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),
    #[error("Invalid base64 payload: {0}")]
    InvalidPayload(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

pub type CacheStorageResult<T> = Result<T, CacheStorageError>;

/// Service trait abstracting the cache directory that holds export files
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Absolute path a cache file will occupy. Validates the file name
    /// without touching the filesystem.
    fn file_path(&self, file_name: &str) -> CacheStorageResult<PathBuf>;

    /// Decode a base64 payload and write the bytes to `path`, replacing any
    /// existing file. Returns the number of bytes written.
    async fn write_base64(&self, path: &Path, payload: &str) -> CacheStorageResult<u64>;

    /// Delete a cache file. Succeeds if the file is already gone.
    async fn delete(&self, path: &Path) -> CacheStorageResult<()>;
}

// --- Local cache directory implementation ---

pub struct LocalCacheStorage {
    base_path: PathBuf,
}

impl LocalCacheStorage {
    /// Creates a new LocalCacheStorage rooted at the given directory.
    /// Ensures the directory exists.
    pub fn new(cache_dir: &str) -> io::Result<Self> {
        let base_path = PathBuf::from(cache_dir);

        // Create the root synchronously during setup
        std::fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Rejects file names that would escape the cache directory.
    fn sanitize_file_name(name: &str) -> CacheStorageResult<&str> {
        if name.is_empty()
            || name.contains('/')
            || name.contains('\\')
            || name == "."
            || name == ".."
        {
            Err(CacheStorageError::InvalidFileName(name.to_string()))
        } else {
            Ok(name)
        }
    }
}

#[async_trait]
impl CacheStorage for LocalCacheStorage {
    fn file_path(&self, file_name: &str) -> CacheStorageResult<PathBuf> {
        let name = Self::sanitize_file_name(file_name)?;
        Ok(self.base_path.join(name))
    }

    async fn write_base64(&self, path: &Path, payload: &str) -> CacheStorageResult<u64> {
        if !path.starts_with(&self.base_path) {
            return Err(CacheStorageError::PermissionDenied(
                "Attempt to write outside the cache directory".to_string(),
            ));
        }

        let bytes = BASE64_STANDARD
            .decode(payload)
            .map_err(|e| CacheStorageError::InvalidPayload(e.to_string()))?;

        // The OS may reap cache directories between exports
        fs::create_dir_all(&self.base_path).await?;

        let size = bytes.len() as u64;
        fs::write(path, bytes).await?;

        Ok(size)
    }

    async fn delete(&self, path: &Path) -> CacheStorageResult<()> {
        if !path.starts_with(&self.base_path) {
            return Err(CacheStorageError::PermissionDenied(
                "Attempt to delete outside the cache directory".to_string(),
            ));
        }

        match fs::remove_file(path).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                // Consider it success if the file is already gone
                Ok(())
            }
            Err(e) => Err(CacheStorageError::Io(e)),
        }
    }
}
