// src/ffi/inventory.rs
// =============================================================================
// INVENTORY DOMAIN – FFI BINDINGS
// =============================================================================
// This module exposes the public surface of `InventoryService` to Swift.
// Returned strings must be freed with `distro_free_string`.
//
// JSON CONTRACTS:
// - create_entry: {"productId": 3, "productName": "Tea", "quantity": 40, "unitPrice": 55.5}
// -----------------------------------------------------------------------------

use crate::domains::inventory::types::NewInventoryEntry;
use crate::ffi::error::FFIError;
use crate::ffi::{block_on_async, handle_json_result, parse_json_input, FFIResult};
use serde_json::json;
use std::ffi::c_char;
use std::os::raw::c_int;

/// Fetch the most recent unit price recorded for a product
/// Output: {"unitPrice": 55.5} or {"unitPrice": null} when there is no history
#[unsafe(no_mangle)]
pub unsafe extern "C" fn inventory_last_unit_price(
    product_id: i64,
    result: *mut *mut c_char,
) -> c_int {
    handle_json_result(result, || -> FFIResult<_> {
        let service = crate::globals::get_inventory_service()?;
        let price = block_on_async(service.last_unit_price(product_id))
            .map_err(FFIError::from)?;

        Ok(json!({ "unitPrice": price }))
    })
}

/// Record a stock entry
/// Output: {"created": true}
#[unsafe(no_mangle)]
pub unsafe extern "C" fn inventory_create_entry(
    entry_json: *const c_char,
    result: *mut *mut c_char,
) -> c_int {
    handle_json_result(result, || -> FFIResult<_> {
        let entry: NewInventoryEntry = parse_json_input(entry_json)?;

        let service = crate::globals::get_inventory_service()?;
        block_on_async(service.create_entry(&entry)).map_err(FFIError::from)?;

        Ok(json!({ "created": true }))
    })
}
