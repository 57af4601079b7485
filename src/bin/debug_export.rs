use std::env;
use std::path::Path;
use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;

use distro_rust_core::domains::core::cache_storage::LocalCacheStorage;
use distro_rust_core::domains::core::share::StubShareService;
use distro_rust_core::domains::export::{ExportError, ExportService, ExportServiceImpl, ExportSummary};
use distro_rust_core::domains::inventory::types::InventoryRecord;
use distro_rust_core::domains::order::types::{
    DistributorOrderRecord, OrderItem, PartialPayment, ShopOrderRecord,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let _ = env_logger::try_init();

    println!("🔍 Export Debug Tool");
    println!("====================");

    let cache_dir = env::var("EXPORT_CACHE_DIR").unwrap_or_else(|_| {
        env::temp_dir()
            .join("distro_export_debug")
            .to_string_lossy()
            .into_owned()
    });
    println!("📍 Cache directory: {}", cache_dir);

    let cache = Arc::new(LocalCacheStorage::new(&cache_dir)?);
    let share = Arc::new(StubShareService::completing());
    let service = ExportServiceImpl::new(cache, share);

    run_exports(&service).await?;
    run_dismissal_path(&cache_dir).await?;
    run_rejection_paths(&service, &cache_dir).await;
    check_cache_directory(&cache_dir)?;

    println!("\n✅ DEBUG SESSION COMPLETED");
    println!("==========================");

    Ok(())
}

async fn run_exports(service: &ExportServiceImpl) -> Result<(), Box<dyn std::error::Error>> {
    println!("\n📦 PRODUCT INVENTORY EXPORT");
    println!("===========================");
    let summary = service.export_product_inventory(&sample_inventory()).await?;
    print_summary(&summary);

    println!("\n🚚 DISTRIBUTOR ORDERS EXPORT");
    println!("============================");
    let summary = service
        .export_distributor_orders(&sample_distributor_orders())
        .await?;
    print_summary(&summary);

    println!("\n🧾 SHOP ORDERS EXPORT");
    println!("=====================");
    let summary = service.export_shop_orders(&sample_shop_orders()).await?;
    print_summary(&summary);

    Ok(())
}

async fn run_dismissal_path(cache_dir: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("\n🙅 DISMISSED SHARE SHEET");
    println!("========================");

    let cache = Arc::new(LocalCacheStorage::new(cache_dir)?);
    let share = Arc::new(StubShareService::dismissing());
    let service = ExportServiceImpl::new(cache, share);

    // A dismissal is a normal outcome, not an error
    let summary = service.export_product_inventory(&sample_inventory()).await?;
    print_summary(&summary);

    Ok(())
}

async fn run_rejection_paths(service: &ExportServiceImpl, cache_dir: &str) {
    println!("\n🚫 REJECTION PATHS");
    println!("==================");

    match service.export_shop_orders(&[]).await {
        Err(ExportError::EmptyDataset) => println!("   ✅ Empty dataset rejected before any file I/O"),
        other => println!("   ❓ Unexpected empty-dataset outcome: {:?}", other),
    }

    let unavailable = match LocalCacheStorage::new(cache_dir) {
        Ok(cache) => ExportServiceImpl::new(
            Arc::new(cache),
            Arc::new(StubShareService::unavailable()),
        ),
        Err(e) => {
            println!("   ❌ Could not build cache storage: {}", e);
            return;
        }
    };

    match unavailable.export_product_inventory(&sample_inventory()).await {
        Err(ExportError::SharingUnsupported) => {
            println!("   ✅ Missing share support rejected before any file I/O")
        }
        other => println!("   ❓ Unexpected share-support outcome: {:?}", other),
    }
}

fn check_cache_directory(cache_dir: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("\n🧹 CLEANUP CHECK");
    println!("================");

    let dir = Path::new(cache_dir);
    let leftovers: Vec<String> = std::fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();

    if leftovers.is_empty() {
        println!("   ✅ No export files left behind in {}", cache_dir);
    } else {
        println!("   ❌ Leftover files found:");
        for name in leftovers {
            println!("      📄 {}", name);
        }
    }

    Ok(())
}

fn print_summary(summary: &ExportSummary) {
    println!("   📄 File: {}", summary.file_name);
    println!("   📊 Rows: {}", summary.row_count);
    println!("   📏 Size: {} bytes", summary.file_size);
    println!("   🏁 Outcome: {}", summary.outcome);
}

fn sample_inventory() -> Vec<InventoryRecord> {
    let now = Utc::now();
    vec![
        InventoryRecord {
            id: 1,
            product_id: 3,
            product_name: "Almond Biscuits".to_string(),
            quantity: 120,
            unit_price: dec!(24.50),
            created_at: now - Duration::days(30),
            updated_at: now - Duration::days(2),
            reserve1: None,
            reserve2: None,
            reserve3: None,
        },
        InventoryRecord {
            id: 2,
            product_id: 7,
            product_name: "Green Tea".to_string(),
            quantity: 45,
            unit_price: dec!(180),
            created_at: now - Duration::days(12),
            updated_at: now,
            reserve1: Some("batch-7".to_string()),
            reserve2: None,
            reserve3: None,
        },
    ]
}

fn sample_distributor_orders() -> Vec<DistributorOrderRecord> {
    let now = Utc::now();
    vec![DistributorOrderRecord {
        id: 11,
        distributor_id: 9,
        distributor_name: "Acme Distribution".to_string(),
        product_id: 3,
        product_name: "Almond Biscuits".to_string(),
        quantity: 40,
        dispatch_date: Some(now - Duration::days(1)),
        created_at: now - Duration::days(3),
        updated_at: now - Duration::days(1),
    }]
}

fn sample_shop_orders() -> Vec<ShopOrderRecord> {
    let now = Utc::now();
    vec![
        ShopOrderRecord {
            order_id: "ORD-991".to_string(),
            shop_name: "Corner Mart".to_string(),
            employee_name: "Priya".to_string(),
            distributor_name: "Acme Distribution".to_string(),
            order_date: Some(now - Duration::days(4)),
            contact_number: "9876543210".to_string(),
            products: vec![
                OrderItem {
                    product_name: "Almond Biscuits".to_string(),
                    quantity: 3,
                    variant: Some("Family Pack".to_string()),
                    variant_value: Some("500g".to_string()),
                },
                OrderItem {
                    product_name: "Green Tea".to_string(),
                    quantity: 1,
                    variant: None,
                    variant_value: None,
                },
            ],
            total_amount: dec!(1540.50),
            payment_type: "Credit".to_string(),
            delivery_date: Some(now + Duration::days(2)),
            delivery_slot: "Morning".to_string(),
            status: "Pending".to_string(),
            partial_payment: None,
            payment_status: Some("Unpaid".to_string()),
        },
        ShopOrderRecord {
            order_id: "ORD-992".to_string(),
            shop_name: "Corner Mart".to_string(),
            employee_name: "Priya".to_string(),
            distributor_name: "Acme Distribution".to_string(),
            order_date: Some(now - Duration::days(1)),
            contact_number: "9876543210".to_string(),
            products: vec![],
            total_amount: dec!(1000),
            payment_type: "Partial".to_string(),
            delivery_date: None,
            delivery_slot: "Evening".to_string(),
            status: "Confirmed".to_string(),
            partial_payment: Some(PartialPayment {
                id: 4,
                initial_amount: dec!(400),
                remaining_amount: dec!(600),
                due_date: Some(now + Duration::days(20)),
                payment_status: "Due".to_string(),
                created_at: now - Duration::days(1),
                updated_at: now - Duration::days(1),
            }),
            payment_status: Some("Partially Paid".to_string()),
        },
    ]
}
