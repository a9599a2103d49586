#![allow(dead_code)]

use diesel::prelude::*;
use diesel::r2d2;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use std::sync::Arc;
use uuid::Uuid;

use cashq_core::app_state::AppState;
use cashq_core::services::{InventoryService, LedgerService};
use cashq_primitives::models::app_config::AppConfig;
use cashq_primitives::models::dtos::inventory_dto::SeedSpec;
use cashq_primitives::models::dtos::ledger_dto::LedgerRefs;
use cashq_primitives::models::entities::enum_types::{CurrencyCode, QrStatus};
use cashq_primitives::schema::qr_codes;

/// Builds shared state against `TEST_DATABASE_URL`, or `None` so DB-bound
/// tests skip on machines without a migrated test database. Tests isolate
/// by vendor id, so no table truncation is needed between runs.
pub fn try_test_state() -> Option<Arc<AppState>> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;

    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder().max_size(5).build(manager).ok()?;

    Some(AppState::new(pool, AppConfig::default()))
}

pub fn conn(state: &AppState) -> r2d2::PooledConnection<ConnectionManager<PgConnection>> {
    state.db.get().expect("test database unavailable")
}

/// Fresh vendor with a funded wallet, in minor units.
pub fn vendor_with_balance(state: &AppState, balance: i64) -> Uuid {
    let vendor_id = Uuid::new_v4();
    let mut conn = conn(state);
    LedgerService::credit(
        &mut conn,
        vendor_id,
        balance,
        CurrencyCode::INR,
        LedgerRefs::with_reference(format!("test-credit-{}", Uuid::new_v4())),
    )
    .expect("credit failed");
    vendor_id
}

/// Fresh vendor with `count` inventory codes in one series.
pub fn vendor_with_inventory(state: &AppState, count: i64, series_code: &str) -> Uuid {
    let vendor_id = Uuid::new_v4();
    let mut conn = conn(state);
    InventoryService::seed_vendor_inventory(
        &mut conn,
        vendor_id,
        &SeedSpec {
            series_code: series_code.to_string(),
            target_count: count,
        },
    )
    .expect("seed failed");
    vendor_id
}

pub fn inventory_count(state: &AppState, vendor_id: Uuid) -> i64 {
    let mut conn = conn(state);
    qr_codes::table
        .filter(qr_codes::vendor_id.eq(vendor_id))
        .filter(qr_codes::status.eq(QrStatus::Inventory))
        .count()
        .get_result(&mut conn)
        .expect("count failed")
}

pub fn codes_with_status(state: &AppState, vendor_id: Uuid, status: QrStatus) -> i64 {
    let mut conn = conn(state);
    qr_codes::table
        .filter(qr_codes::vendor_id.eq(vendor_id))
        .filter(qr_codes::status.eq(status))
        .count()
        .get_result(&mut conn)
        .expect("count failed")
}
