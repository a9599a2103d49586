use diesel::prelude::*;
use cashq_primitives::error::CoreError;
use cashq_primitives::models::dtos::inventory_dto::{ImportOutcome, SeedSpec};
use cashq_primitives::models::entities::enum_types::QrStatus;
use cashq_primitives::models::qr_code::{NewQrCode, QrCode};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::repositories::qr_repository::QrRepository;

/// Per-vendor pool of pre-generated QR codes and its two mutations:
/// atomic allocation into a campaign and bulk import/seeding.
pub struct InventoryService;

impl InventoryService {
    /// Flips `quantity` unallocated codes to `funded`, bound to the given
    /// campaign and budget. Selection is deterministic (series, then series
    /// order, then creation order) and row-locked; if the pool cannot cover
    /// the request the transaction aborts with `InsufficientInventory` and
    /// no code is touched. Returned codes preserve selection order.
    pub fn allocate_inventory_qrs(
        conn: &mut PgConnection,
        vendor_id: Uuid,
        campaign_id: Uuid,
        campaign_budget_id: Uuid,
        quantity: i64,
        cashback_amount: i64,
        series_code: Option<&str>,
    ) -> Result<Vec<QrCode>, CoreError> {
        if quantity <= 0 {
            return Err(CoreError::Validation(format!(
                "allocation quantity must be strictly positive, got {}",
                quantity
            )));
        }
        if cashback_amount <= 0 {
            return Err(CoreError::Validation(format!(
                "cashback amount must be strictly positive, got {}",
                cashback_amount
            )));
        }

        conn.transaction(|conn| {
            let selected = QrRepository::select_available_for_update(
                conn,
                vendor_id,
                series_code,
                quantity,
            )?;

            // The locked selection is the live availability; never trust an
            // earlier count.
            if (selected.len() as i64) < quantity {
                warn!(
                    vendor = %vendor_id,
                    requested = quantity,
                    available = selected.len(),
                    "inventory allocation rejected"
                );
                return Err(CoreError::InsufficientInventory {
                    requested: quantity,
                    available: selected.len() as i64,
                });
            }

            let ids: Vec<Uuid> = selected.iter().map(|qr| qr.id).collect();
            let funded = QrRepository::mark_funded(
                conn,
                &ids,
                campaign_id,
                campaign_budget_id,
                cashback_amount,
            )?;

            if funded.len() != selected.len() {
                return Err(CoreError::Internal(format!(
                    "allocation updated {} of {} selected codes",
                    funded.len(),
                    selected.len()
                )));
            }

            // UPDATE .. RETURNING gives no ordering; restore selection order.
            let mut by_id: std::collections::HashMap<Uuid, QrCode> =
                funded.into_iter().map(|qr| (qr.id, qr)).collect();
            let ordered = ids
                .iter()
                .filter_map(|id| by_id.remove(id))
                .collect::<Vec<_>>();

            info!(
                vendor = %vendor_id,
                campaign = %campaign_id,
                quantity,
                "inventory allocation committed"
            );
            Ok(ordered)
        })
    }

    /// Adds externally generated hashes to the pool under one series.
    /// Hashes already present anywhere are silently skipped, so re-importing
    /// an overlapping batch is safe.
    pub fn import_inventory_series(
        conn: &mut PgConnection,
        vendor_id: Uuid,
        series_code: &str,
        hashes: &[String],
    ) -> Result<ImportOutcome, CoreError> {
        if series_code.trim().is_empty() {
            return Err(CoreError::Validation("series code must not be empty".into()));
        }

        conn.transaction(|conn| {
            // Order assignment reads the committed maximum, so concurrent
            // importers of the same series must queue behind each other; the
            // unique index on (vendor_id, series_code, series_order) is the
            // backstop.
            diesel::sql_query("SELECT pg_advisory_xact_lock(hashtext($1))")
                .bind::<diesel::sql_types::Text, _>(format!("{}:{}", vendor_id, series_code))
                .execute(conn)?;

            let start = QrRepository::max_series_order(conn, vendor_id, series_code)?;

            let batch: Vec<NewQrCode> = hashes
                .iter()
                .enumerate()
                .map(|(i, hash)| NewQrCode {
                    vendor_id,
                    unique_hash: hash,
                    series_code,
                    series_order: start + 1 + i as i32,
                    status: QrStatus::Inventory,
                    cashback_amount: 0,
                })
                .collect();

            let created = QrRepository::insert_batch(conn, batch)?;
            let duplicates = hashes.len() - created;

            info!(
                vendor = %vendor_id,
                series = series_code,
                created,
                duplicates,
                "inventory series imported"
            );
            Ok(ImportOutcome {
                created,
                duplicates,
            })
        })
    }

    /// One-time provisioning of a vendor's pool. Refuses if the vendor owns
    /// any QR row in any status: a partially consumed pool must never
    /// receive an unbounded top-up.
    pub fn seed_vendor_inventory(
        conn: &mut PgConnection,
        vendor_id: Uuid,
        spec: &SeedSpec,
    ) -> Result<ImportOutcome, CoreError> {
        spec.validate()?;

        conn.transaction(|conn| {
            if QrRepository::vendor_has_any(conn, vendor_id)? {
                return Err(CoreError::DuplicateSeedAttempt(format!(
                    "vendor {} already holds QR codes",
                    vendor_id
                )));
            }

            let hashes: Vec<String> = (0..spec.target_count)
                .map(|_| generate_hash(&spec.series_code))
                .collect();

            Self::import_inventory_series(conn, vendor_id, &spec.series_code, &hashes)
        })
    }
}

/// Globally unique, immutable code hash. A v4 uuid carries the uniqueness;
/// the series prefix keeps printed sheets human-attributable.
fn generate_hash(series_code: &str) -> String {
    format!("{}-{}", series_code, Uuid::new_v4().simple())
}
