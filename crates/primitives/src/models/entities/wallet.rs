use crate::models::entities::enum_types::CurrencyCode;
use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

/// One authoritative row per vendor. Mutated only inside transactions that
/// hold the row `FOR UPDATE`; never cached across calls.
#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::wallets)]
pub struct Wallet {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub currency: CurrencyCode,
    pub balance: i64,
    pub locked_balance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// Funds the vendor may spend or lock further.
    pub fn available_balance(&self) -> i64 {
        self.balance - self.locked_balance
    }

    /// `0 <= locked_balance <= balance` must hold at every state.
    pub fn holds_invariant(&self) -> bool {
        0 <= self.locked_balance && self.locked_balance <= self.balance
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::wallets)]
pub struct NewWallet {
    pub vendor_id: Uuid,
    pub currency: CurrencyCode,
}
