use chrono::Utc;
use diesel::prelude::*;
use cashq_primitives::error::CoreError;
use cashq_primitives::models::entities::enum_types::CurrencyCode;
use cashq_primitives::models::wallet::{NewWallet, Wallet};
use cashq_primitives::models::wallet_transaction::{NewWalletTransaction, WalletTransaction};
use cashq_primitives::schema::{wallet_transactions, wallets};
use uuid::Uuid;

pub struct WalletRepository;

impl WalletRepository {
    pub fn find_by_vendor(
        conn: &mut PgConnection,
        vendor_id: Uuid,
    ) -> Result<Option<Wallet>, CoreError> {
        wallets::table
            .filter(wallets::vendor_id.eq(vendor_id))
            .first::<Wallet>(conn)
            .optional()
            .map_err(CoreError::from)
    }

    /// Reads the vendor's wallet row under `FOR UPDATE`, serializing every
    /// concurrent primitive on the same wallet for the transaction's lifetime.
    pub fn find_by_vendor_for_update(
        conn: &mut PgConnection,
        vendor_id: Uuid,
    ) -> Result<Wallet, CoreError> {
        wallets::table
            .filter(wallets::vendor_id.eq(vendor_id))
            .for_update()
            .first::<Wallet>(conn)
            .map_err(|e| {
                if matches!(e, diesel::result::Error::NotFound) {
                    CoreError::WalletNotFound(format!("no wallet for vendor {}", vendor_id))
                } else {
                    CoreError::from(e)
                }
            })
    }

    /// Lazy creation on first financial action; a concurrent creator wins
    /// silently via `ON CONFLICT DO NOTHING`.
    pub fn create_if_not_exists(
        conn: &mut PgConnection,
        vendor_id: Uuid,
        currency: CurrencyCode,
    ) -> Result<Wallet, CoreError> {
        diesel::insert_into(wallets::table)
            .values(NewWallet {
                vendor_id,
                currency,
            })
            .on_conflict(wallets::vendor_id)
            .do_nothing()
            .execute(conn)?;

        Self::find_by_vendor_for_update(conn, vendor_id)
    }

    pub fn update_balances(
        conn: &mut PgConnection,
        wallet_id: Uuid,
        balance: i64,
        locked_balance: i64,
    ) -> Result<Wallet, CoreError> {
        diesel::update(wallets::table)
            .filter(wallets::id.eq(wallet_id))
            .set((
                wallets::balance.eq(balance),
                wallets::locked_balance.eq(locked_balance),
                wallets::updated_at.eq(Utc::now()),
            ))
            .get_result::<Wallet>(conn)
            .map_err(CoreError::from)
    }

    pub fn add_entry(
        conn: &mut PgConnection,
        entry: NewWalletTransaction,
    ) -> Result<WalletTransaction, CoreError> {
        diesel::insert_into(wallet_transactions::table)
            .values(entry)
            .get_result::<WalletTransaction>(conn)
            .map_err(CoreError::from)
    }
}
