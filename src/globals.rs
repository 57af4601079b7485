use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;

use crate::auth::{FileTokenStore, TokenProvider};
use crate::domains::catalog::service::{CatalogService, CatalogServiceImpl};
use crate::domains::core::api_client::ApiClient;
use crate::domains::core::cache_storage::{CacheStorage, LocalCacheStorage};
use crate::domains::core::share::{CallbackShareService, ShareService};
use crate::domains::export::service::{ExportService, ExportServiceImpl};
use crate::domains::inventory::service::{InventoryService, InventoryServiceImpl};
use crate::domains::order::service::{OrderService, OrderServiceImpl};
use crate::ffi::error::{FFIError, FFIResult};

// Global state definitions
lazy_static! {
    static ref INIT_MUTEX: tokio::sync::Mutex<()> = tokio::sync::Mutex::new(());
    static ref INITIALIZED: AtomicBool = AtomicBool::new(false);

    // Core services
    static ref TOKEN_STORE: Mutex<Option<Arc<FileTokenStore>>> = Mutex::new(None);
    static ref API_CLIENT: Mutex<Option<Arc<ApiClient>>> = Mutex::new(None);
    static ref CACHE_STORAGE: Mutex<Option<Arc<dyn CacheStorage>>> = Mutex::new(None);
    static ref SHARE_SERVICE: Mutex<Option<Arc<dyn ShareService>>> = Mutex::new(None);

    // Domain services
    static ref EXPORT_SERVICE: Mutex<Option<Arc<dyn ExportService>>> = Mutex::new(None);
    static ref CATALOG_SERVICE: Mutex<Option<Arc<dyn CatalogService>>> = Mutex::new(None);
    static ref INVENTORY_SERVICE: Mutex<Option<Arc<dyn InventoryService>>> = Mutex::new(None);
    static ref ORDER_SERVICE: Mutex<Option<Arc<dyn OrderService>>> = Mutex::new(None);
}

// --- Getter Functions ---

pub fn get_token_store() -> FFIResult<Arc<FileTokenStore>> {
    TOKEN_STORE.lock().map_err(|_| FFIError::internal("TOKEN_STORE lock poisoned".to_string()))?.clone().ok_or_else(|| FFIError::internal("Token store not initialized".to_string()))
}

pub fn get_api_client() -> FFIResult<Arc<ApiClient>> {
    API_CLIENT.lock().map_err(|_| FFIError::internal("API_CLIENT lock poisoned".to_string()))?.clone().ok_or_else(|| FFIError::internal("ApiClient not initialized".to_string()))
}

pub fn get_cache_storage() -> FFIResult<Arc<dyn CacheStorage>> {
    CACHE_STORAGE.lock().map_err(|_| FFIError::internal("CACHE_STORAGE lock poisoned".to_string()))?.clone().ok_or_else(|| FFIError::internal("CacheStorage not initialized".to_string()))
}

pub fn get_share_service() -> FFIResult<Arc<dyn ShareService>> {
    SHARE_SERVICE.lock().map_err(|_| FFIError::internal("SHARE_SERVICE lock poisoned".to_string()))?.clone().ok_or_else(|| FFIError::internal("ShareService not initialized".to_string()))
}

pub fn get_export_service() -> FFIResult<Arc<dyn ExportService>> {
    EXPORT_SERVICE.lock().map_err(|_| FFIError::internal("EXPORT_SERVICE lock poisoned".to_string()))?.clone().ok_or_else(|| FFIError::internal("ExportService not initialized".to_string()))
}

pub fn get_catalog_service() -> FFIResult<Arc<dyn CatalogService>> {
    CATALOG_SERVICE.lock().map_err(|_| FFIError::internal("CATALOG_SERVICE lock poisoned".to_string()))?.clone().ok_or_else(|| FFIError::internal("CatalogService not initialized".to_string()))
}

pub fn get_inventory_service() -> FFIResult<Arc<dyn InventoryService>> {
    INVENTORY_SERVICE.lock().map_err(|_| FFIError::internal("INVENTORY_SERVICE lock poisoned".to_string()))?.clone().ok_or_else(|| FFIError::internal("InventoryService not initialized".to_string()))
}

pub fn get_order_service() -> FFIResult<Arc<dyn OrderService>> {
    ORDER_SERVICE.lock().map_err(|_| FFIError::internal("ORDER_SERVICE lock poisoned".to_string()))?.clone().ok_or_else(|| FFIError::internal("OrderService not initialized".to_string()))
}

/// Initialize global services
pub async fn initialize(data_dir: &str, cache_dir: &str, api_url: &str) -> FFIResult<()> {
    // Acquire the async mutex to ensure single initialization
    let _guard = INIT_MUTEX.lock().await;

    if INITIALIZED.load(Ordering::Acquire) {
        return Ok(());
    }

    let result = initialize_internal(data_dir, cache_dir, api_url).await;

    // Mark as initialized only if successful
    if result.is_ok() {
        INITIALIZED.store(true, Ordering::Release);
    }

    result
}

async fn initialize_internal(data_dir: &str, cache_dir: &str, api_url: &str) -> FFIResult<()> {
    // Initialize logging first
    if std::env::var("RUST_LOG").is_err() {
        #[cfg(debug_assertions)]
        std::env::set_var("RUST_LOG", "debug");
        #[cfg(not(debug_assertions))]
        std::env::set_var("RUST_LOG", "info");
    }

    // Initialize env_logger if not already initialized
    let _ = env_logger::try_init();

    log::info!("Starting internal initialization");
    log::debug!("Data directory: {}", data_dir);
    log::debug!("Cache directory: {}", cache_dir);
    log::debug!("API base URL: {}", api_url);

    if data_dir.is_empty() {
        return Err(FFIError::invalid_argument("data_dir must not be empty"));
    }
    if cache_dir.is_empty() {
        return Err(FFIError::invalid_argument("cache_dir must not be empty"));
    }
    if api_url.is_empty() {
        return Err(FFIError::invalid_argument("api_url must not be empty"));
    }

    let token_store = Arc::new(FileTokenStore::new(data_dir));

    let cache_storage: Arc<dyn CacheStorage> = Arc::new(
        LocalCacheStorage::new(cache_dir)
            .map_err(|e| FFIError::internal(format!("Cache storage init failed: {}", e)))?,
    );

    let api_client = Arc::new(ApiClient::new(
        api_url,
        token_store.clone() as Arc<dyn TokenProvider>,
    ));

    let share_service: Arc<dyn ShareService> = Arc::new(CallbackShareService);

    let export_service: Arc<dyn ExportService> = Arc::new(ExportServiceImpl::new(
        cache_storage.clone(),
        share_service.clone(),
    ));
    let catalog_service: Arc<dyn CatalogService> =
        Arc::new(CatalogServiceImpl::new(api_client.clone()));
    let inventory_service: Arc<dyn InventoryService> =
        Arc::new(InventoryServiceImpl::new(api_client.clone()));
    let order_service: Arc<dyn OrderService> = Arc::new(OrderServiceImpl::new(api_client.clone()));

    // Store all components
    *TOKEN_STORE.lock().map_err(|_| FFIError::internal("TOKEN_STORE lock poisoned".to_string()))? = Some(token_store);
    *API_CLIENT.lock().map_err(|_| FFIError::internal("API_CLIENT lock poisoned".to_string()))? = Some(api_client);
    *CACHE_STORAGE.lock().map_err(|_| FFIError::internal("CACHE_STORAGE lock poisoned".to_string()))? = Some(cache_storage);
    *SHARE_SERVICE.lock().map_err(|_| FFIError::internal("SHARE_SERVICE lock poisoned".to_string()))? = Some(share_service);
    *EXPORT_SERVICE.lock().map_err(|_| FFIError::internal("EXPORT_SERVICE lock poisoned".to_string()))? = Some(export_service);
    *CATALOG_SERVICE.lock().map_err(|_| FFIError::internal("CATALOG_SERVICE lock poisoned".to_string()))? = Some(catalog_service);
    *INVENTORY_SERVICE.lock().map_err(|_| FFIError::internal("INVENTORY_SERVICE lock poisoned".to_string()))? = Some(inventory_service);
    *ORDER_SERVICE.lock().map_err(|_| FFIError::internal("ORDER_SERVICE lock poisoned".to_string()))? = Some(order_service);

    log::info!("Global services initialized");
    Ok(())
}
