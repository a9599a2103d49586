pub mod budget_repository;
pub mod invoice_repository;
pub mod qr_repository;
pub mod transaction_repository;
pub mod wallet_repository;
