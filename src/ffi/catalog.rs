// src/ffi/catalog.rs
// =============================================================================
// CATALOG DOMAIN – FFI BINDINGS
// =============================================================================
// This module exposes the public surface of `CatalogService` to Swift.
// All functions follow standard FFI conventions: JSON payloads, explicit
// success/error codes, and manual memory management for returned strings.
//
// MEMORY OWNERSHIP:
// - Swift owns input JSON strings (read-only in Rust)
// - Rust owns output strings (Swift must call distro_free_string)
// - All strings are UTF-8, null-terminated
//
// JSON CONTRACTS:
// - update_distributor: changed fields only, e.g. {"phoneNumber": "9876543210"}
// - update_salesperson: changed fields only, e.g. {"email": "rep@example.com"}
// -----------------------------------------------------------------------------

use crate::domains::catalog::types::{DistributorUpdate, SalespersonUpdate};
use crate::ffi::error::FFIError;
use crate::ffi::{
    block_on_async, handle_json_result, parse_json_input, parse_string_input, FFIResult,
};
use serde_json::json;
use std::ffi::c_char;
use std::os::raw::c_int;

/// Fetch the product and distributor reference lists for order forms
/// Output: {"products": [...], "distributors": [...]}
#[unsafe(no_mangle)]
pub unsafe extern "C" fn catalog_reference_data(result: *mut *mut c_char) -> c_int {
    handle_json_result(result, || -> FFIResult<_> {
        let service = crate::globals::get_catalog_service()?;
        block_on_async(service.fetch_reference_data()).map_err(FFIError::from)
    })
}

/// Fetch the full distributor profiles for the admin listing
/// Output: array of Distributor JSON
#[unsafe(no_mangle)]
pub unsafe extern "C" fn catalog_distributors(result: *mut *mut c_char) -> c_int {
    handle_json_result(result, || -> FFIResult<_> {
        let service = crate::globals::get_catalog_service()?;
        block_on_async(service.fetch_distributors()).map_err(FFIError::from)
    })
}

/// Fetch the full salesperson profiles for the admin listing
/// Output: array of Salesperson JSON
#[unsafe(no_mangle)]
pub unsafe extern "C" fn catalog_salespersons(result: *mut *mut c_char) -> c_int {
    handle_json_result(result, || -> FFIResult<_> {
        let service = crate::globals::get_catalog_service()?;
        block_on_async(service.fetch_salespersons()).map_err(FFIError::from)
    })
}

/// Fetch the current stock level for a product
/// Output: {"stock": 120}
#[unsafe(no_mangle)]
pub unsafe extern "C" fn catalog_product_stock(
    product_id: i64,
    result: *mut *mut c_char,
) -> c_int {
    handle_json_result(result, || -> FFIResult<_> {
        let service = crate::globals::get_catalog_service()?;
        let stock = block_on_async(service.product_stock(product_id))
            .map_err(FFIError::from)?;

        Ok(json!({ "stock": stock }))
    })
}

/// Update a distributor with the changed fields only
/// Input: {"name": ..., "address": ..., "phoneNumber": ..., "gstNumber": ..., "pan": ...}
/// Output: {"updated": true}
#[unsafe(no_mangle)]
pub unsafe extern "C" fn catalog_update_distributor(
    id: *const c_char,
    changes_json: *const c_char,
    result: *mut *mut c_char,
) -> c_int {
    handle_json_result(result, || -> FFIResult<_> {
        let id = parse_string_input(id, "distributor id")?;
        let changes: DistributorUpdate = parse_json_input(changes_json)?;

        let service = crate::globals::get_catalog_service()?;
        block_on_async(service.update_distributor(&id, &changes))
            .map_err(FFIError::from)?;

        Ok(json!({ "updated": true }))
    })
}

/// Delete a distributor
/// Output: {"deleted": true}
#[unsafe(no_mangle)]
pub unsafe extern "C" fn catalog_delete_distributor(
    id: *const c_char,
    result: *mut *mut c_char,
) -> c_int {
    handle_json_result(result, || -> FFIResult<_> {
        let id = parse_string_input(id, "distributor id")?;

        let service = crate::globals::get_catalog_service()?;
        block_on_async(service.delete_distributor(&id)).map_err(FFIError::from)?;

        Ok(json!({ "deleted": true }))
    })
}

/// Update a salesperson with the changed fields only
/// Input: {"name": ..., "phoneNumber": ..., "email": ..., "employeeId": ..., "pan": ..., "address": ...}
/// Output: {"updated": true}
#[unsafe(no_mangle)]
pub unsafe extern "C" fn catalog_update_salesperson(
    id: *const c_char,
    changes_json: *const c_char,
    result: *mut *mut c_char,
) -> c_int {
    handle_json_result(result, || -> FFIResult<_> {
        let id = parse_string_input(id, "salesperson id")?;
        let changes: SalespersonUpdate = parse_json_input(changes_json)?;

        let service = crate::globals::get_catalog_service()?;
        block_on_async(service.update_salesperson(&id, &changes))
            .map_err(FFIError::from)?;

        Ok(json!({ "updated": true }))
    })
}
