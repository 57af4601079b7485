// src/ffi/core.rs
// ============================================================================
// Core FFI functions for library initialization and management
// ============================================================================

use crate::ffi::error::FFIError;
use crate::ffi::{handle_status_result, parse_string_input};
use std::ffi::{c_char, CString};
use std::os::raw::c_int;

/// Initialize the library with data directory, cache directory, and API base URL
/// Returns 0 on success, non-zero on error
#[unsafe(no_mangle)]
pub unsafe extern "C" fn distro_initialize(
    data_dir: *const c_char,
    cache_dir: *const c_char,
    api_url: *const c_char,
) -> c_int {
    let result = std::panic::catch_unwind(|| {
        if data_dir.is_null() || cache_dir.is_null() || api_url.is_null() {
            return Err(FFIError::invalid_argument("Null pointer(s) provided for initialization"));
        }

        let data_dir_str = parse_string_input(data_dir, "data_dir")?;
        let cache_dir_str = parse_string_input(cache_dir, "cache_dir")?;
        let api_url_str = parse_string_input(api_url, "api_url")?;

        // Use the centralized runtime to avoid conflicts
        crate::ffi::block_on_async(async {
            crate::initialize(&data_dir_str, &cache_dir_str, &api_url_str).await
        })
    });

    match result {
        Ok(ffi_result) => {
            handle_status_result(|| ffi_result)
        }
        Err(panic_payload) => {
            let panic_msg = if let Some(s) = panic_payload.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = panic_payload.downcast_ref::<&str>() {
                s.to_string()
            } else {
                "Panicked during FFI call, but panic message is not a string".to_string()
            };
            eprintln!("[Rust FFI Panic] in distro_initialize: {}", panic_msg);
            handle_status_result(|| Err(FFIError::internal(format!("Panic during initialization: {}", panic_msg))))
        }
    }
}

/// Store the bearer token used for API requests
/// Returns 0 on success, non-zero on error
#[unsafe(no_mangle)]
pub unsafe extern "C" fn distro_set_auth_token(token: *const c_char) -> c_int {
    handle_status_result(|| {
        let token_str = parse_string_input(token, "token")?;
        let store = crate::globals::get_token_store()?;

        crate::ffi::block_on_async(async {
            store.set_token(&token_str).await.map_err(FFIError::from)
        })
    })
}

/// Remove the stored bearer token
/// Returns 0 on success, non-zero on error
#[unsafe(no_mangle)]
pub unsafe extern "C" fn distro_clear_auth_token() -> c_int {
    handle_status_result(|| {
        let store = crate::globals::get_token_store()?;

        crate::ffi::block_on_async(async {
            store.clear_token().await.map_err(FFIError::from)
        })
    })
}

/// Frees a C string that was allocated by Rust and passed over FFI.
/// This function should be called by the C/Swift side for any string
/// that was created in Rust using `CString::into_raw()`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn distro_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        // This takes ownership of the CString and drops it when it goes out of scope.
        let _ = CString::from_raw(ptr);
    }
}

/// Get library version
/// Returns allocated string that must be freed with distro_free_string()
#[unsafe(no_mangle)]
pub unsafe extern "C" fn distro_library_version() -> *mut c_char {
    match CString::new(env!("CARGO_PKG_VERSION")) {
        Ok(c_string) => c_string.into_raw(),
        Err(_) => {
            // Fallback if CString creation fails
            match CString::new("unknown") {
                Ok(c_string) => c_string.into_raw(),
                Err(_) => std::ptr::null_mut(),
            }
        }
    }
}
