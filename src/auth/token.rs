use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;

use crate::errors::{ServiceError, ServiceResult};

/// Supplies the bearer token attached to backend requests.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns the current token, or an authentication error when none is stored.
    async fn bearer_token(&self) -> ServiceResult<String>;
}

/// Token storage backed by a single file under the app data directory.
///
/// The host app persists the token here after login and clears it on logout,
/// keeping this store in step with its own session state.
pub struct FileTokenStore {
    token_path: PathBuf,
}

impl FileTokenStore {
    pub fn new(data_dir: &str) -> Self {
        Self {
            token_path: PathBuf::from(data_dir).join("auth_token"),
        }
    }

    /// Persists a new token, replacing any previous one.
    pub async fn set_token(&self, token: &str) -> ServiceResult<()> {
        if let Some(parent) = self.token_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                ServiceError::Configuration(format!("Failed to create token directory: {}", e))
            })?;
        }
        tokio::fs::write(&self.token_path, token.trim())
            .await
            .map_err(|e| ServiceError::Configuration(format!("Failed to store token: {}", e)))?;
        debug!("Stored auth token at {:?}", self.token_path);
        Ok(())
    }

    /// Removes the stored token. Succeeds when no token exists.
    pub async fn clear_token(&self) -> ServiceResult<()> {
        match tokio::fs::remove_file(&self.token_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ServiceError::Configuration(format!(
                "Failed to clear token: {}",
                e
            ))),
        }
    }
}

#[async_trait]
impl TokenProvider for FileTokenStore {
    async fn bearer_token(&self) -> ServiceResult<String> {
        let raw = match tokio::fs::read_to_string(&self.token_path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ServiceError::Authentication(
                    "No authentication token found".to_string(),
                ));
            }
            Err(e) => {
                return Err(ServiceError::Authentication(format!(
                    "Failed to read token: {}",
                    e
                )));
            }
        };

        let token = raw.trim();
        if token.is_empty() {
            return Err(ServiceError::Authentication(
                "Stored authentication token is empty".to_string(),
            ));
        }
        Ok(token.to_string())
    }
}

/// Fixed-token provider for tests and local tooling.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn bearer_token(&self) -> ServiceResult<String> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_set_and_read_token() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().to_str().unwrap());

        store.set_token("  abc123  ").await.unwrap();
        let token = store.bearer_token().await.unwrap();
        assert_eq!(token, "abc123");
    }

    #[tokio::test]
    async fn test_missing_token_is_authentication_error() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().to_str().unwrap());

        let result = store.bearer_token().await;
        assert!(matches!(result, Err(ServiceError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_empty_token_is_authentication_error() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().to_str().unwrap());

        store.set_token("   ").await.unwrap();
        let result = store.bearer_token().await;
        assert!(matches!(result, Err(ServiceError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_clear_token_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().to_str().unwrap());

        store.set_token("abc123").await.unwrap();
        store.clear_token().await.unwrap();
        store.clear_token().await.unwrap();
        assert!(store.bearer_token().await.is_err());
    }
}
