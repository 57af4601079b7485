// src/ffi/share.rs
// ============================================================================
// Share sheet handler registration
// ============================================================================

use crate::domains::core::share::{self, ShareAvailabilityFn, SharePresentFn};
use crate::ffi::error::FFIError;
use crate::ffi::handle_status_result;
use std::os::raw::c_int;

/// Register the host callbacks that present the platform share sheet.
///
/// `is_available` reports whether a share sheet can be presented right now
/// (nonzero means available). `present` shows the sheet for a file and blocks
/// until the user finishes: 0 for a completed share, 1 for a dismissal,
/// negative on failure. While no handlers are registered, sharing reports
/// unavailable and exports are rejected before any file is written.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn share_register_handlers(
    is_available: Option<ShareAvailabilityFn>,
    present: Option<SharePresentFn>,
) -> c_int {
    handle_status_result(|| {
        let is_available = is_available
            .ok_or_else(|| FFIError::invalid_argument("Null is_available handler provided"))?;
        let present = present
            .ok_or_else(|| FFIError::invalid_argument("Null present handler provided"))?;

        share::register_handlers(is_available, present)
            .map_err(|e| FFIError::internal(format!("Handler registration failed: {}", e)))
    })
}

/// Remove any registered share handlers; sharing reports unavailable afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn share_unregister_handlers() -> c_int {
    handle_status_result(|| {
        share::unregister_handlers()
            .map_err(|e| FFIError::internal(format!("Handler removal failed: {}", e)))
    })
}
