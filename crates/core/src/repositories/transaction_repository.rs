use diesel::prelude::*;
use cashq_primitives::error::CoreError;
use cashq_primitives::models::entities::enum_types::{TxnCategory, TxnState};
use cashq_primitives::models::wallet_transaction::WalletTransaction;
use cashq_primitives::schema::wallet_transactions;
use uuid::Uuid;

pub struct TransactionRepository;

impl TransactionRepository {
    pub fn find_by_reference(
        conn: &mut PgConnection,
        reference_id: &str,
    ) -> Result<Option<WalletTransaction>, CoreError> {
        wallet_transactions::table
            .filter(wallet_transactions::reference_id.eq(reference_id))
            .first::<WalletTransaction>(conn)
            .optional()
            .map_err(CoreError::from)
    }

    pub fn find_all_by_wallet(
        conn: &mut PgConnection,
        wallet_id: Uuid,
    ) -> Result<Vec<WalletTransaction>, CoreError> {
        wallet_transactions::table
            .filter(wallet_transactions::wallet_id.eq(wallet_id))
            .order(wallet_transactions::created_at.asc())
            .load::<WalletTransaction>(conn)
            .map_err(CoreError::from)
    }

    /// Settled billable entries with no invoice attached yet; the linked
    /// ones drop out of the scan, which is what makes the invoice backfill
    /// idempotent.
    pub fn billable_without_invoice(
        conn: &mut PgConnection,
        vendor_id: Uuid,
    ) -> Result<Vec<WalletTransaction>, CoreError> {
        wallet_transactions::table
            .filter(wallet_transactions::vendor_id.eq(vendor_id))
            .filter(wallet_transactions::txn_state.eq(TxnState::Successful))
            .filter(wallet_transactions::invoice_id.is_null())
            .filter(wallet_transactions::category.eq_any([
                TxnCategory::TechFeeCharge,
                TxnCategory::LockFunds,
                TxnCategory::QrPurchase,
                TxnCategory::CampaignPayment,
            ]))
            .order(wallet_transactions::created_at.asc())
            .for_update()
            .load::<WalletTransaction>(conn)
            .map_err(CoreError::from)
    }

    pub fn link_invoice(
        conn: &mut PgConnection,
        transaction_id: Uuid,
        invoice_id: Uuid,
    ) -> Result<(), CoreError> {
        diesel::update(wallet_transactions::table)
            .filter(wallet_transactions::id.eq(transaction_id))
            .set(wallet_transactions::invoice_id.eq(invoice_id))
            .execute(conn)?;
        Ok(())
    }
}
