use chrono::Utc;
use diesel::dsl::max;
use diesel::prelude::*;
use cashq_primitives::error::CoreError;
use cashq_primitives::models::entities::enum_types::QrStatus;
use cashq_primitives::models::qr_code::{NewQrCode, QrCode};
use cashq_primitives::schema::qr_codes;
use uuid::Uuid;

pub struct QrRepository;

impl QrRepository {
    pub fn count_by_status(
        conn: &mut PgConnection,
        vendor_id: Uuid,
        status: QrStatus,
    ) -> Result<i64, CoreError> {
        qr_codes::table
            .filter(qr_codes::vendor_id.eq(vendor_id))
            .filter(qr_codes::status.eq(status))
            .count()
            .get_result::<i64>(conn)
            .map_err(CoreError::from)
    }

    /// Selects up to `limit` unallocated codes under `FOR UPDATE`, ordered
    /// for predictable print-sheet numbering. The row count that comes back
    /// is the live availability for this transaction; a shorter result than
    /// `limit` means the pool cannot satisfy the request.
    pub fn select_available_for_update(
        conn: &mut PgConnection,
        vendor_id: Uuid,
        series_code: Option<&str>,
        limit: i64,
    ) -> Result<Vec<QrCode>, CoreError> {
        // Locking clauses cannot be boxed, so the optional series filter
        // branches into two otherwise identical queries.
        let base = qr_codes::table
            .filter(qr_codes::vendor_id.eq(vendor_id))
            .filter(qr_codes::status.eq(QrStatus::Inventory));
        let ordering = (
            qr_codes::series_code.asc(),
            qr_codes::series_order.asc(),
            qr_codes::created_at.asc(),
        );

        let rows = match series_code {
            Some(series) => base
                .filter(qr_codes::series_code.eq(series))
                .order(ordering)
                .limit(limit)
                .for_update()
                .load::<QrCode>(conn)?,
            None => base
                .order(ordering)
                .limit(limit)
                .for_update()
                .load::<QrCode>(conn)?,
        };
        Ok(rows)
    }

    pub fn mark_funded(
        conn: &mut PgConnection,
        ids: &[Uuid],
        campaign_id: Uuid,
        campaign_budget_id: Uuid,
        cashback_amount: i64,
    ) -> Result<Vec<QrCode>, CoreError> {
        diesel::update(qr_codes::table)
            .filter(qr_codes::id.eq_any(ids))
            .set((
                qr_codes::status.eq(QrStatus::Funded),
                qr_codes::campaign_id.eq(campaign_id),
                qr_codes::campaign_budget_id.eq(campaign_budget_id),
                qr_codes::cashback_amount.eq(cashback_amount),
                qr_codes::updated_at.eq(Utc::now()),
            ))
            .get_results::<QrCode>(conn)
            .map_err(CoreError::from)
    }

    /// Bulk insert skipping hashes that already exist anywhere.
    pub fn insert_batch(
        conn: &mut PgConnection,
        batch: Vec<NewQrCode>,
    ) -> Result<usize, CoreError> {
        diesel::insert_into(qr_codes::table)
            .values(batch)
            .on_conflict(qr_codes::unique_hash)
            .do_nothing()
            .execute(conn)
            .map_err(CoreError::from)
    }

    pub fn max_series_order(
        conn: &mut PgConnection,
        vendor_id: Uuid,
        series_code: &str,
    ) -> Result<i32, CoreError> {
        qr_codes::table
            .filter(qr_codes::vendor_id.eq(vendor_id))
            .filter(qr_codes::series_code.eq(series_code))
            .select(max(qr_codes::series_order))
            .get_result::<Option<i32>>(conn)
            .map(|m| m.unwrap_or(0))
            .map_err(CoreError::from)
    }

    /// Any row at all, regardless of status. Seeding is one-time per vendor:
    /// a partially consumed pool must never receive a top-up.
    pub fn vendor_has_any(conn: &mut PgConnection, vendor_id: Uuid) -> Result<bool, CoreError> {
        let n: i64 = qr_codes::table
            .filter(qr_codes::vendor_id.eq(vendor_id))
            .count()
            .get_result(conn)?;
        Ok(n > 0)
    }

    /// Legacy-shaped rows: bound to a campaign but never linked to a budget.
    /// Only live (voidable) and redeemed codes carry reconcilable value.
    pub fn unlinked_campaign_codes(
        conn: &mut PgConnection,
        vendor_id: Uuid,
    ) -> Result<Vec<QrCode>, CoreError> {
        qr_codes::table
            .filter(qr_codes::vendor_id.eq(vendor_id))
            .filter(qr_codes::campaign_id.is_not_null())
            .filter(qr_codes::campaign_budget_id.is_null())
            .filter(qr_codes::status.eq_any([
                QrStatus::Funded,
                QrStatus::Generated,
                QrStatus::Assigned,
                QrStatus::Active,
                QrStatus::Redeemed,
            ]))
            .order(qr_codes::created_at.asc())
            .for_update()
            .load::<QrCode>(conn)
            .map_err(CoreError::from)
    }

    /// Every vendor holding codes of this campaign, budget-linked or not.
    pub fn campaign_vendor_ids(
        conn: &mut PgConnection,
        campaign_id: Uuid,
    ) -> Result<Vec<Uuid>, CoreError> {
        qr_codes::table
            .filter(qr_codes::campaign_id.eq(campaign_id))
            .select(qr_codes::vendor_id)
            .distinct()
            .load::<Uuid>(conn)
            .map_err(CoreError::from)
    }

    pub fn link_to_budget(
        conn: &mut PgConnection,
        ids: &[Uuid],
        campaign_budget_id: Uuid,
    ) -> Result<usize, CoreError> {
        diesel::update(qr_codes::table)
            .filter(qr_codes::id.eq_any(ids))
            .set((
                qr_codes::campaign_budget_id.eq(campaign_budget_id),
                qr_codes::updated_at.eq(Utc::now()),
            ))
            .execute(conn)
            .map_err(CoreError::from)
    }

    /// Voids every not-yet-redeemed code of a cancelled campaign, detaching
    /// it and zeroing its redemption value. Voided codes are never reused.
    pub fn void_campaign_codes(
        conn: &mut PgConnection,
        campaign_id: Uuid,
    ) -> Result<usize, CoreError> {
        diesel::update(qr_codes::table)
            .filter(qr_codes::campaign_id.eq(campaign_id))
            .filter(qr_codes::status.eq_any([
                QrStatus::Funded,
                QrStatus::Generated,
                QrStatus::Assigned,
                QrStatus::Active,
            ]))
            .set((
                qr_codes::status.eq(QrStatus::Void),
                qr_codes::campaign_id.eq(None::<Uuid>),
                qr_codes::campaign_budget_id.eq(None::<Uuid>),
                qr_codes::cashback_amount.eq(0),
                qr_codes::updated_at.eq(Utc::now()),
            ))
            .execute(conn)
            .map_err(CoreError::from)
    }
}
