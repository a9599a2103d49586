use crate::models::entities::enum_types::{TxnCategory, TxnState, TxnType};
use chrono::{DateTime, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Append-only ledger entry. Immutable once written; every wallet balance
/// mutation produces exactly one entry in the same transaction.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::wallet_transactions)]
#[diesel(belongs_to(crate::models::entities::wallet::Wallet))]
pub struct WalletTransaction {
    pub id: Uuid,
    pub wallet_id: Uuid,
    pub vendor_id: Uuid,
    pub txn_type: TxnType,
    pub category: TxnCategory,
    pub amount: i64,
    pub txn_state: TxnState,
    pub reference_id: String,
    pub campaign_budget_id: Option<Uuid>,
    pub invoice_id: Option<Uuid>,
    pub description: Option<String>,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

impl WalletTransaction {
    /// Signed contribution of this entry to the wallet balance. Lock
    /// movements and unsettled entries contribute nothing.
    pub fn balance_delta(&self) -> i64 {
        if self.txn_state != TxnState::Successful || !self.category.affects_balance() {
            return 0;
        }
        match self.txn_type {
            TxnType::Credit => self.amount,
            TxnType::Debit => -self.amount,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::wallet_transactions)]
pub struct NewWalletTransaction<'a> {
    pub wallet_id: Uuid,
    pub vendor_id: Uuid,
    pub txn_type: TxnType,
    pub category: TxnCategory,
    pub amount: i64,
    pub txn_state: TxnState,
    pub reference_id: &'a str,
    pub campaign_budget_id: Option<Uuid>,
    pub invoice_id: Option<Uuid>,
    pub description: Option<&'a str>,
    pub metadata: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(txn_type: TxnType, category: TxnCategory, state: TxnState) -> WalletTransaction {
        WalletTransaction {
            id: Uuid::new_v4(),
            wallet_id: Uuid::new_v4(),
            vendor_id: Uuid::new_v4(),
            txn_type,
            category,
            amount: 500,
            txn_state: state,
            reference_id: "ref-1".into(),
            campaign_budget_id: None,
            invoice_id: None,
            description: None,
            metadata: json!({}),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn credits_add_and_debits_subtract() {
        let c = entry(TxnType::Credit, TxnCategory::Recharge, TxnState::Successful);
        let d = entry(
            TxnType::Debit,
            TxnCategory::TechFeeCharge,
            TxnState::Successful,
        );
        assert_eq!(c.balance_delta(), 500);
        assert_eq!(d.balance_delta(), -500);
    }

    #[test]
    fn lock_entries_and_failed_entries_are_neutral() {
        let lock = entry(TxnType::Debit, TxnCategory::LockFunds, TxnState::Successful);
        let failed = entry(TxnType::Credit, TxnCategory::Recharge, TxnState::Failed);
        assert_eq!(lock.balance_delta(), 0);
        assert_eq!(failed.balance_delta(), 0);
    }
}
