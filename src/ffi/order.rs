// src/ffi/order.rs
// =============================================================================
// ORDER DOMAIN – FFI BINDINGS
// =============================================================================
// This module exposes the public surface of `OrderService` to Swift.
// Returned strings must be freed with `distro_free_string`.
//
// JSON CONTRACTS:
// - create_distributor_order: NewDistributorOrder (camelCase fields)
// - order_count: {"distributorId": 42, "productId": 3, "startDate": ..., "endDate": ...}
//   A zero productId asks for the overall amount instead of a per-product count.
// -----------------------------------------------------------------------------

use crate::domains::order::types::{NewDistributorOrder, OrderCountQuery};
use crate::ffi::error::FFIError;
use crate::ffi::{block_on_async, handle_json_result, parse_json_input, FFIResult};
use serde_json::json;
use std::ffi::c_char;
use std::os::raw::c_int;

/// Fetch the current shop orders
/// Output: array of ShopOrderRecord JSON
#[unsafe(no_mangle)]
pub unsafe extern "C" fn order_fetch_shop_orders(result: *mut *mut c_char) -> c_int {
    handle_json_result(result, || -> FFIResult<_> {
        let service = crate::globals::get_order_service()?;
        block_on_async(service.fetch_shop_orders()).map_err(FFIError::from)
    })
}

/// Fetch the combined inventory and distributor-order listing for bulk export
/// Output: {"productInventory": [...], "distributorOrders": [...]}
#[unsafe(no_mangle)]
pub unsafe extern "C" fn order_export_snapshot(result: *mut *mut c_char) -> c_int {
    handle_json_result(result, || -> FFIResult<_> {
        let service = crate::globals::get_order_service()?;
        block_on_async(service.export_snapshot()).map_err(FFIError::from)
    })
}

/// Validate and place a distributor order
/// Output: {"created": true}
#[unsafe(no_mangle)]
pub unsafe extern "C" fn order_create_distributor_order(
    order_json: *const c_char,
    result: *mut *mut c_char,
) -> c_int {
    handle_json_result(result, || -> FFIResult<_> {
        let order: NewDistributorOrder = parse_json_input(order_json)?;

        let service = crate::globals::get_order_service()?;
        block_on_async(service.create_distributor_order(&order)).map_err(FFIError::from)?;

        Ok(json!({ "created": true }))
    })
}

/// Fetch order totals for a distributor over a date window
/// Output: OrderTotals JSON
#[unsafe(no_mangle)]
pub unsafe extern "C" fn order_count(
    query_json: *const c_char,
    result: *mut *mut c_char,
) -> c_int {
    handle_json_result(result, || -> FFIResult<_> {
        let query: OrderCountQuery = parse_json_input(query_json)?;

        let service = crate::globals::get_order_service()?;
        block_on_async(service.order_count(&query)).map_err(FFIError::from)
    })
}
