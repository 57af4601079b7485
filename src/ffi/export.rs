// src/ffi/export.rs
// ============================================================================
// FFI bindings for the `ExportService`.
// All heavy–lifting logic lives in the domain/service layer. These wrappers
// simply (1) decode the JSON payload coming from Swift, (2) forward the
// request to the relevant async service method on the shared Tokio runtime,
// and (3) encode the outcome into JSON written through the `result` pointer.
//
// IMPORTANT – memory ownership rules:
//   •  Any *mut c_char returned from Rust must be freed by Swift by calling
//      the `export_free` function exported below. Internally we create the
//      CString with `into_raw()` which transfers ownership to the caller.
//
// RESULT CONTRACT:
//   •  On success `result` holds the serialized `ExportSummary`.
//   •  On failure it holds the serialized error, whose `details` field
//      carries the message the UI shows the user.
//
// ============================================================================

use crate::domains::export::types::{ExportError, ExportKind};
use crate::domains::inventory::types::InventoryRecord;
use crate::domains::order::types::{DistributorOrderRecord, ShopOrderRecord};
use crate::ffi::error::{ErrorCode, FFIError};
use crate::ffi::{block_on_async, handle_json_result, parse_json_input, FFIResult};
use std::ffi::{c_char, CString};
use std::os::raw::c_int;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Maps an export failure onto the FFI error model. The details field carries
/// the user-facing message, which depends on what was being exported.
fn export_error_to_ffi(kind: ExportKind, err: ExportError) -> FFIError {
    let code = match &err {
        ExportError::EmptyDataset => ErrorCode::EmptyDataset,
        ExportError::SharingUnsupported => ErrorCode::SharingUnsupported,
        ExportError::Serialization(_) => ErrorCode::SerializationFailure,
        ExportError::FileIo(_) => ErrorCode::FileIoFailure,
        ExportError::Share(_) => ErrorCode::ShareFailed,
    };

    FFIError::with_details(
        code,
        &err.to_string(),
        &format!("{{\"userMessage\":\"{}\"}}", err.user_message(kind)),
    )
}

// ============================================================================
// EXPORT FUNCTIONS
// ============================================================================

/// Export product inventory records to a shared spreadsheet
///
/// # Arguments
/// * `records_json` - JSON array of inventory records
///
/// # Returns
/// JSON containing the export summary, or the serialized error
///
/// # Safety
/// This function should only be called with valid, null-terminated C strings
#[unsafe(no_mangle)]
pub unsafe extern "C" fn export_product_inventory(
    records_json: *const c_char,
    result: *mut *mut c_char,
) -> c_int {
    handle_json_result(result, || -> FFIResult<_> {
        let records: Vec<InventoryRecord> = parse_json_input(records_json)?;

        let export_service = crate::globals::get_export_service()?;
        block_on_async(export_service.export_product_inventory(&records))
            .map_err(|e| export_error_to_ffi(ExportKind::ProductInventory, e))
    })
}

/// Export distributor order records to a shared spreadsheet
///
/// # Arguments
/// * `records_json` - JSON array of distributor order records
///
/// # Returns
/// JSON containing the export summary, or the serialized error
///
/// # Safety
/// This function should only be called with valid, null-terminated C strings
#[unsafe(no_mangle)]
pub unsafe extern "C" fn export_distributor_orders(
    records_json: *const c_char,
    result: *mut *mut c_char,
) -> c_int {
    handle_json_result(result, || -> FFIResult<_> {
        let records: Vec<DistributorOrderRecord> = parse_json_input(records_json)?;

        let export_service = crate::globals::get_export_service()?;
        block_on_async(export_service.export_distributor_orders(&records))
            .map_err(|e| export_error_to_ffi(ExportKind::DistributorOrders, e))
    })
}

/// Export shop order records to a shared spreadsheet
///
/// # Arguments
/// * `records_json` - JSON array of shop order records
///
/// # Returns
/// JSON containing the export summary, or the serialized error
///
/// # Safety
/// This function should only be called with valid, null-terminated C strings
#[unsafe(no_mangle)]
pub unsafe extern "C" fn export_shop_orders(
    records_json: *const c_char,
    result: *mut *mut c_char,
) -> c_int {
    handle_json_result(result, || -> FFIResult<_> {
        let records: Vec<ShopOrderRecord> = parse_json_input(records_json)?;

        let export_service = crate::globals::get_export_service()?;
        block_on_async(export_service.export_shop_orders(&records))
            .map_err(|e| export_error_to_ffi(ExportKind::ShopOrders, e))
    })
}

/// Fetch the current shop orders and export them in one step
///
/// # Returns
/// JSON containing the export summary, or the serialized error
///
/// # Safety
/// This function should only be called with a valid result pointer
#[unsafe(no_mangle)]
pub unsafe extern "C" fn export_orders_report(result: *mut *mut c_char) -> c_int {
    handle_json_result(result, || -> FFIResult<_> {
        let order_service = crate::globals::get_order_service()?;
        let records = block_on_async(order_service.fetch_shop_orders())
            .map_err(FFIError::from)?;

        let export_service = crate::globals::get_export_service()?;
        block_on_async(export_service.export_shop_orders(&records))
            .map_err(|e| export_error_to_ffi(ExportKind::ShopOrders, e))
    })
}

// ============================================================================
// MEMORY MANAGEMENT
// ============================================================================

/// Free a string allocated by the export FFI functions
///
/// # Safety
/// This function should only be called with pointers returned from export FFI functions
#[unsafe(no_mangle)]
pub unsafe extern "C" fn export_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset_error_keeps_kind_specific_message() {
        let err = export_error_to_ffi(ExportKind::ProductInventory, ExportError::EmptyDataset);
        assert_eq!(err.code, ErrorCode::EmptyDataset);
        assert_eq!(
            err.details.as_deref(),
            Some("{\"userMessage\":\"No inventory records to export.\"}")
        );

        let err = export_error_to_ffi(ExportKind::ShopOrders, ExportError::EmptyDataset);
        assert_eq!(
            err.details.as_deref(),
            Some("{\"userMessage\":\"No orders to export.\"}")
        );
    }

    #[test]
    fn test_share_failure_maps_to_generic_user_message() {
        let err = export_error_to_ffi(
            ExportKind::DistributorOrders,
            ExportError::Share("Share handler failed with status -2".to_string()),
        );
        assert_eq!(err.code, ErrorCode::ShareFailed);
        assert_eq!(
            err.details.as_deref(),
            Some("{\"userMessage\":\"There was an error exporting the file. Please try again.\"}")
        );
    }
}
