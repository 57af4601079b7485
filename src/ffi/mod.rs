// In src/ffi/mod.rs
use std::ffi::{CStr, CString};
use std::future::Future;
use std::os::raw::{c_char, c_int};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tokio::runtime::Runtime;

use crate::ffi::error::{ErrorCode, FFIError};

// Declare necessary FFI submodules
pub mod catalog;
pub mod core;
pub mod error;
pub mod export;
pub mod inventory;
pub mod order;
pub mod share;

lazy_static! {
    // Shared Tokio runtime for all blocking FFI calls
    static ref RUNTIME: Runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create FFI runtime");
}

/// Run an async operation to completion on the shared runtime.
pub fn block_on_async<F, T, E>(future: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    RUNTIME.block_on(future)
}

/// Error handling helper for FFI boundaries (returns error code)
pub fn handle_status_result<F>(func: F) -> c_int
where
    F: FnOnce() -> FFIResult<()>,
{
    match func() {
        Ok(_) => ErrorCode::Success as c_int,
        Err(e) => {
            eprintln!("[Rust FFI Error] Code: {:?}, Message: {}, Details: {:?}",
                      e.code, e.message, e.details.as_deref().unwrap_or("None"));
            e.code as c_int
        }
    }
}

/// Handles results for FFI functions that return data through an out pointer.
/// Serializes Ok(T) or Err(FFIError) to JSON, writes it through `result`, and
/// returns the matching status code. The caller frees the string.
pub unsafe fn handle_json_result<F, T>(result: *mut *mut c_char, func: F) -> c_int
where
    F: FnOnce() -> FFIResult<T>,
    T: Serialize,
{
    if result.is_null() {
        eprintln!("[Rust FFI Error] Null result pointer provided");
        return ErrorCode::NullPointer as c_int;
    }
    unsafe {
        *result = std::ptr::null_mut();
    }

    let (code, json_string) = match func() {
        Ok(value) => match serde_json::to_string(&value) {
            Ok(json) => (ErrorCode::Success, json),
            Err(e) => {
                // The FFI caller must always receive parseable JSON
                let error_msg = format!("Failed to serialize result: {}", e);
                eprintln!("[Rust FFI Error] Serialization failed: {}", error_msg);
                let json = format!(
                    "{{\"code\":\"{:?}\",\"message\":\"{}\",\"details\":null}}",
                    ErrorCode::InternalError, error_msg
                );
                (ErrorCode::InternalError, json)
            }
        },
        Err(ffi_error) => {
            eprintln!("[Rust FFI Error] Code: {:?}, Message: {}, Details: {:?}",
                      ffi_error.code, ffi_error.message,
                      ffi_error.details.as_deref().unwrap_or("None"));
            let json = serde_json::to_string(&ffi_error).unwrap_or_else(|_| {
                format!(
                    "{{\"code\":\"{:?}\",\"message\":\"{}\",\"details\":null}}",
                    ffi_error.code, ffi_error.message
                )
            });
            (ffi_error.code, json)
        }
    };

    match CString::new(json_string) {
        Ok(c_string) => {
            unsafe {
                *result = c_string.into_raw();
            }
            code as c_int
        }
        Err(e) => {
            eprintln!("[Rust FFI Error] Failed to create CString: {}", e);
            ErrorCode::InternalError as c_int
        }
    }
}

/// Helper to parse a JSON payload argument
pub fn parse_json_input<T: for<'de> Deserialize<'de>>(input: *const c_char) -> FFIResult<T> {
    if input.is_null() {
        return Err(FFIError::invalid_argument("Input JSON is null"));
    }

    let c_str = unsafe { CStr::from_ptr(input) };
    let json_str = c_str.to_str()
        .map_err(|_| FFIError::new(ErrorCode::InvalidUtf8, "Invalid UTF-8 in input JSON"))?;

    serde_json::from_str(json_str)
        .map_err(|e| FFIError::with_details(
            ErrorCode::InvalidArgument,
            "JSON parsing failed",
            &format!("Failed to parse JSON: {}", e)
        ))
}

/// Helper to parse a required C string argument
pub fn parse_string_input(input: *const c_char, field: &str) -> FFIResult<String> {
    if input.is_null() {
        return Err(FFIError::invalid_argument(&format!("Null {} pointer provided", field)));
    }

    let c_str = unsafe { CStr::from_ptr(input) };
    c_str.to_str()
        .map(|s| s.to_string())
        .map_err(|_| FFIError::new(ErrorCode::InvalidUtf8, &format!("Invalid UTF-8 in {}", field)))
}

// Re-export FFIResult for convenience within the ffi module
pub use error::FFIResult;
