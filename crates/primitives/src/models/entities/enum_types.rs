use crate::error::CoreError;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString,
)]
#[ExistingTypePath = "crate::schema::sql_types::CurrencyCode"]
#[strum(serialize_all = "UPPERCASE")]
pub enum CurrencyCode {
    INR,
    USD,
    GBP,
    EUR,
    AED,
    SGD,
}

impl CurrencyCode {
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let normalized = input.trim().to_uppercase();

        CurrencyCode::from_str(&normalized)
            .map_err(|_| CoreError::Validation(format!("Unsupported currency: {}", input)))
    }
}

/// Direction of a ledger entry relative to the wallet balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display)]
#[ExistingTypePath = "crate::schema::sql_types::TxnType"]
#[strum(serialize_all = "snake_case")]
pub enum TxnType {
    Credit,
    Debit,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString,
)]
#[ExistingTypePath = "crate::schema::sql_types::TxnCategory"]
#[strum(serialize_all = "snake_case")]
pub enum TxnCategory {
    Recharge,
    LockFunds,
    UnlockRefund,
    TechFeeCharge,
    LockedSpend,
    AdminAdjustment,
    Withdrawal,
    Refund,
    CashbackPayout,
    QrPurchase,
    CampaignPayment,
}

impl TxnCategory {
    /// Whether entries of this category count toward the wallet balance sum.
    ///
    /// Lock movements shift value between available and locked inside the
    /// same balance, so they are excluded when recomputing `balance` from
    /// the ledger.
    pub fn affects_balance(self) -> bool {
        !matches!(self, TxnCategory::LockFunds | TxnCategory::UnlockRefund)
    }

    /// Categories that must carry an invoice once settled.
    pub fn is_billable(self) -> bool {
        matches!(
            self,
            TxnCategory::TechFeeCharge
                | TxnCategory::LockFunds
                | TxnCategory::QrPurchase
                | TxnCategory::CampaignPayment
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display)]
#[ExistingTypePath = "crate::schema::sql_types::TxnState"]
#[strum(serialize_all = "snake_case")]
pub enum TxnState {
    Pending,
    Successful,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display)]
#[ExistingTypePath = "crate::schema::sql_types::BudgetStatus"]
#[strum(serialize_all = "snake_case")]
pub enum BudgetStatus {
    Active,
    Closed,
    Refunded,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString,
)]
#[ExistingTypePath = "crate::schema::sql_types::QrStatus"]
#[strum(serialize_all = "snake_case")]
pub enum QrStatus {
    Inventory,
    Funded,
    Generated,
    Assigned,
    Active,
    Redeemed,
    Expired,
    Blocked,
    Void,
}

impl QrStatus {
    /// Statuses a cancelled campaign may still void. Redeemed value has
    /// already been paid out and is never clawed back.
    pub fn is_voidable(self) -> bool {
        matches!(
            self,
            QrStatus::Funded | QrStatus::Generated | QrStatus::Assigned | QrStatus::Active
        )
    }
}
