// Public modules
pub mod auth;
pub mod domains;
pub mod errors;
pub mod ffi;
pub mod globals;
pub mod validation;

// Entry point for initialization
/// Initialize the library with the given data directory, cache directory, and
/// API base URL. This function must be called before any other function in the
/// library.
pub async fn initialize(data_dir: &str, cache_dir: &str, api_url: &str) -> ffi::FFIResult<()> {
    globals::initialize(data_dir, cache_dir, api_url).await
}
