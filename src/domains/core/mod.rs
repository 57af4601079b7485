pub mod api_client;
pub mod cache_storage;
pub mod share;

// Re-export the traits and core types, not specific implementations usually
pub use api_client::ApiClient;
pub use cache_storage::{CacheStorage, CacheStorageError, CacheStorageResult, LocalCacheStorage};
pub use share::{CallbackShareService, ShareError, ShareOutcome, ShareService, StubShareService};
