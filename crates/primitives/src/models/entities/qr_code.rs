use crate::models::entities::enum_types::QrStatus;
use chrono::{DateTime, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

/// One redeemable code. `unique_hash` is globally unique and immutable;
/// `series_code`/`series_order` fix the print-sheet position.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::qr_codes)]
#[diesel(belongs_to(crate::models::entities::campaign_budget::CampaignBudget))]
pub struct QrCode {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub unique_hash: String,
    pub series_code: String,
    pub series_order: i32,
    pub status: QrStatus,
    pub cashback_amount: i64,
    pub campaign_id: Option<Uuid>,
    pub campaign_budget_id: Option<Uuid>,
    pub order_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::qr_codes)]
pub struct NewQrCode<'a> {
    pub vendor_id: Uuid,
    pub unique_hash: &'a str,
    pub series_code: &'a str,
    pub series_order: i32,
    pub status: QrStatus,
    pub cashback_amount: i64,
}
