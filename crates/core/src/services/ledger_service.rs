use diesel::prelude::*;
use cashq_primitives::error::CoreError;
use cashq_primitives::models::dtos::ledger_dto::{LedgerMutation, LedgerRefs};
use cashq_primitives::models::entities::enum_types::{
    CurrencyCode, TxnCategory, TxnState, TxnType,
};
use cashq_primitives::models::wallet::Wallet;
use cashq_primitives::models::wallet_transaction::NewWalletTransaction;
use tracing::info;
use uuid::Uuid;

use crate::repositories::wallet_repository::WalletRepository;

/// The five atomic balance primitives. Each one reads the wallet row
/// `FOR UPDATE`, validates its precondition against the value read, and
/// writes the new balances plus exactly one ledger entry, or fails leaving
/// the wallet untouched. Every call runs in its own transaction; when the
/// caller already holds one, Diesel nests it as a savepoint, so the
/// primitives compose inside a larger unit of work.
pub struct LedgerService;

impl LedgerService {
    /// Lazily creates the vendor's wallet; a no-op if it already exists.
    pub fn ensure_wallet(
        conn: &mut PgConnection,
        vendor_id: Uuid,
        currency: CurrencyCode,
    ) -> Result<Wallet, CoreError> {
        conn.transaction(|conn| WalletRepository::create_if_not_exists(conn, vendor_id, currency))
    }

    /// `balance += amount`. No precondition. Recorded as a recharge.
    /// `currency` only matters when this is the vendor's first financial
    /// action and the wallet is created lazily.
    pub fn credit(
        conn: &mut PgConnection,
        vendor_id: Uuid,
        amount: i64,
        currency: CurrencyCode,
        refs: LedgerRefs,
    ) -> Result<LedgerMutation, CoreError> {
        Self::credit_as(conn, vendor_id, amount, TxnCategory::Recharge, currency, refs)
    }

    /// Credit under an explicit category (`admin_adjustment`, `refund`, ...).
    pub fn credit_as(
        conn: &mut PgConnection,
        vendor_id: Uuid,
        amount: i64,
        category: TxnCategory,
        currency: CurrencyCode,
        refs: LedgerRefs,
    ) -> Result<LedgerMutation, CoreError> {
        validate_amount(amount)?;

        conn.transaction(|conn| {
            let wallet = WalletRepository::create_if_not_exists(conn, vendor_id, currency)?;

            let mutation = apply(
                conn,
                &wallet,
                wallet.balance + amount,
                wallet.locked_balance,
                TxnType::Credit,
                category,
                amount,
                refs,
            )?;

            info!(vendor = %vendor_id, amount, "ledger.credit committed");
            Ok(mutation)
        })
    }

    /// `locked_balance += amount`. Requires `amount <= available`.
    pub fn lock(
        conn: &mut PgConnection,
        vendor_id: Uuid,
        amount: i64,
        refs: LedgerRefs,
    ) -> Result<LedgerMutation, CoreError> {
        validate_amount(amount)?;

        conn.transaction(|conn| {
            let wallet = WalletRepository::find_by_vendor_for_update(conn, vendor_id)?;

            if amount > wallet.available_balance() {
                return Err(CoreError::InsufficientAvailableBalance {
                    requested: amount,
                    available: wallet.available_balance(),
                });
            }

            let mutation = apply(
                conn,
                &wallet,
                wallet.balance,
                wallet.locked_balance + amount,
                TxnType::Debit,
                TxnCategory::LockFunds,
                amount,
                refs,
            )?;

            info!(vendor = %vendor_id, amount, "ledger.lock committed");
            Ok(mutation)
        })
    }

    /// `balance -= amount`. Requires `amount <= available`; locked funds
    /// are untouched.
    pub fn charge_fee(
        conn: &mut PgConnection,
        vendor_id: Uuid,
        amount: i64,
        refs: LedgerRefs,
    ) -> Result<LedgerMutation, CoreError> {
        validate_amount(amount)?;

        conn.transaction(|conn| {
            let wallet = WalletRepository::find_by_vendor_for_update(conn, vendor_id)?;

            if amount > wallet.available_balance() {
                return Err(CoreError::InsufficientAvailableBalance {
                    requested: amount,
                    available: wallet.available_balance(),
                });
            }

            let mutation = apply(
                conn,
                &wallet,
                wallet.balance - amount,
                wallet.locked_balance,
                TxnType::Debit,
                TxnCategory::TechFeeCharge,
                amount,
                refs,
            )?;

            info!(vendor = %vendor_id, amount, "ledger.charge_fee committed");
            Ok(mutation)
        })
    }

    /// Converts a reservation into a final spend:
    /// `balance -= amount; locked_balance -= amount`.
    pub fn spend_locked(
        conn: &mut PgConnection,
        vendor_id: Uuid,
        amount: i64,
        refs: LedgerRefs,
    ) -> Result<LedgerMutation, CoreError> {
        validate_amount(amount)?;

        conn.transaction(|conn| {
            let wallet = WalletRepository::find_by_vendor_for_update(conn, vendor_id)?;

            if amount > wallet.locked_balance {
                return Err(CoreError::InsufficientLockedBalance {
                    requested: amount,
                    locked: wallet.locked_balance,
                });
            }
            if amount > wallet.balance {
                // Unreachable while locked <= balance holds, kept as a guard.
                return Err(CoreError::InsufficientLockedBalance {
                    requested: amount,
                    locked: wallet.locked_balance,
                });
            }

            let mutation = apply(
                conn,
                &wallet,
                wallet.balance - amount,
                wallet.locked_balance - amount,
                TxnType::Debit,
                TxnCategory::LockedSpend,
                amount,
                refs,
            )?;

            info!(vendor = %vendor_id, amount, "ledger.spend_locked committed");
            Ok(mutation)
        })
    }

    /// Returns a reservation to available funds without touching `balance`:
    /// `locked_balance -= amount`.
    pub fn unlock_refund(
        conn: &mut PgConnection,
        vendor_id: Uuid,
        amount: i64,
        refs: LedgerRefs,
    ) -> Result<LedgerMutation, CoreError> {
        validate_amount(amount)?;

        conn.transaction(|conn| {
            let wallet = WalletRepository::find_by_vendor_for_update(conn, vendor_id)?;

            if amount > wallet.locked_balance {
                return Err(CoreError::InsufficientLockedBalance {
                    requested: amount,
                    locked: wallet.locked_balance,
                });
            }

            let mutation = apply(
                conn,
                &wallet,
                wallet.balance,
                wallet.locked_balance - amount,
                TxnType::Credit,
                TxnCategory::UnlockRefund,
                amount,
                refs,
            )?;

            info!(vendor = %vendor_id, amount, "ledger.unlock_refund committed");
            Ok(mutation)
        })
    }
}

fn validate_amount(amount: i64) -> Result<(), CoreError> {
    if amount <= 0 {
        return Err(CoreError::Validation(format!(
            "ledger amounts must be strictly positive, got {}",
            amount
        )));
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn apply(
    conn: &mut PgConnection,
    wallet: &Wallet,
    new_balance: i64,
    new_locked: i64,
    txn_type: TxnType,
    category: TxnCategory,
    amount: i64,
    refs: LedgerRefs,
) -> Result<LedgerMutation, CoreError> {
    let updated = WalletRepository::update_balances(conn, wallet.id, new_balance, new_locked)?;

    if !updated.holds_invariant() {
        return Err(CoreError::Internal(format!(
            "wallet {} left invariant-violating state: balance {}, locked {}",
            updated.id, updated.balance, updated.locked_balance
        )));
    }

    let transaction = WalletRepository::add_entry(
        conn,
        NewWalletTransaction {
            wallet_id: wallet.id,
            vendor_id: wallet.vendor_id,
            txn_type,
            category,
            amount,
            txn_state: TxnState::Successful,
            reference_id: &refs.reference_id,
            campaign_budget_id: refs.campaign_budget_id,
            invoice_id: refs.invoice_id,
            description: refs.description.as_deref(),
            metadata: refs.metadata_value(),
        },
    )?;

    Ok(LedgerMutation {
        wallet: updated,
        transaction,
    })
}
