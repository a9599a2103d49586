use crate::models::entities::campaign_budget::CampaignBudget;
use crate::models::entities::invoice::Invoice;
use crate::models::entities::qr_code::QrCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FundCampaignRequest {
    pub vendor_id: Uuid,
    pub campaign_id: Uuid,

    #[validate(range(min = 1, max = 50_000))]
    pub quantity: i64,

    /// Redemption value per code, display units (rounded to 2 decimals).
    #[validate(range(min = 0.01, max = 100_000.0))]
    pub cashback_per_code: f64,

    /// Restrict allocation to one print series.
    pub series_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FundCampaignOutcome {
    pub campaign_budget: CampaignBudget,
    pub qr_codes: Vec<QrCode>,
    pub invoices: Vec<Invoice>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CancelOutcome {
    /// Total moved back from locked to available, minor units.
    pub refunded_amount: i64,
    pub voided_count: usize,
}

/// What a reconciliation pass actually did; all zeroes on a re-run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct BackfillReport {
    pub budgets_created: usize,
    pub budgets_augmented: usize,
    pub codes_linked: usize,
    pub locked_amount: i64,
    pub invoices_created: usize,
}
