use crate::models::entities::enum_types::TxnCategory;
use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Immutable receipt issued alongside fee, lock and refund entries.
/// Numbered sequentially per financial year; never mutated post-issue.
#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::invoices)]
pub struct Invoice {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub invoice_number: String,
    pub financial_year: String,
    pub sequence_no: i32,
    pub category: TxnCategory,
    pub amount: i64,
    pub tax_amount: i64,
    pub transaction_id: Option<Uuid>,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::invoices)]
pub struct NewInvoice<'a> {
    pub vendor_id: Uuid,
    pub invoice_number: &'a str,
    pub financial_year: &'a str,
    pub sequence_no: i32,
    pub category: TxnCategory,
    pub amount: i64,
    pub tax_amount: i64,
    pub transaction_id: Option<Uuid>,
    pub metadata: Value,
}
