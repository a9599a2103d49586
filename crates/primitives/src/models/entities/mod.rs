pub mod campaign_budget;
pub mod enum_types;
pub mod invoice;
pub mod qr_code;
pub mod wallet;
pub mod wallet_transaction;

pub use campaign_budget::{CampaignBudget, NewCampaignBudget};
pub use enum_types::{BudgetStatus, CurrencyCode, QrStatus, TxnCategory, TxnState, TxnType};
pub use invoice::{Invoice, NewInvoice};
pub use qr_code::{NewQrCode, QrCode};
pub use wallet::{NewWallet, Wallet};
pub use wallet_transaction::{NewWalletTransaction, WalletTransaction};
