pub mod campaign_service;
pub mod inventory_service;
pub mod ledger_service;
pub mod reconciliation_service;

pub use campaign_service::CampaignService;
pub use inventory_service::InventoryService;
pub use ledger_service::LedgerService;
pub use reconciliation_service::ReconciliationService;
