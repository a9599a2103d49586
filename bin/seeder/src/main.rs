use diesel::pg::PgConnection;
use diesel::prelude::*;
use dotenvy::dotenv;
use std::env;
use uuid::Uuid;

use cashq_core::services::{InventoryService, LedgerService};
use cashq_primitives::models::app_config::AppConfig;
use cashq_primitives::models::dtos::inventory_dto::SeedSpec;
use cashq_primitives::models::dtos::ledger_dto::LedgerRefs;
use cashq_primitives::models::entities::enum_types::TxnCategory;
use cashq_primitives::utility::to_minor_units;

fn establish_connection() -> PgConnection {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    PgConnection::establish(&database_url)
        .unwrap_or_else(|_| panic!("Error connecting to {}", database_url))
}

fn main() {
    dotenv().ok();
    println!("🌱 Provisioning vendor inventory pool...");

    let vendor_id = env::var("SEED_VENDOR_ID")
        .ok()
        .map(|v| Uuid::parse_str(&v).expect("SEED_VENDOR_ID must be a UUID"))
        .unwrap_or_else(Uuid::new_v4);

    let spec = SeedSpec {
        series_code: env::var("SEED_SERIES_CODE").unwrap_or_else(|_| "SR01".into()),
        target_count: env::var("SEED_TARGET_COUNT")
            .unwrap_or_else(|_| "1000".into())
            .parse()
            .expect("SEED_TARGET_COUNT must be a number"),
    };

    let opening_balance: f64 = env::var("SEED_OPENING_BALANCE")
        .unwrap_or_else(|_| "0".into())
        .parse()
        .expect("SEED_OPENING_BALANCE must be a number");

    let mut conn = establish_connection();

    let outcome = InventoryService::seed_vendor_inventory(&mut conn, vendor_id, &spec)
        .expect("Error seeding vendor inventory");
    println!(
        "   vendor {}: {} codes created in series {} ({} duplicates skipped)",
        vendor_id, outcome.created, spec.series_code, outcome.duplicates
    );

    if opening_balance > 0.0 {
        let config = AppConfig::from_env().expect("Invalid configuration");
        let wallet =
            LedgerService::ensure_wallet(&mut conn, vendor_id, config.default_currency)
                .expect("Error creating vendor wallet");
        LedgerService::credit_as(
            &mut conn,
            vendor_id,
            to_minor_units(opening_balance),
            TxnCategory::AdminAdjustment,
            config.default_currency,
            LedgerRefs::with_reference(format!("seed-balance-{}", vendor_id)),
        )
        .expect("Error crediting opening balance");
        println!("   wallet {} credited with {}", wallet.id, opening_balance);
    }

    println!("✅ Vendor provisioned successfully!");
}
