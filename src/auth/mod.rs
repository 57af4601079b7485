pub mod token;

// Re-export public items
pub use token::{FileTokenStore, StaticTokenProvider, TokenProvider};
