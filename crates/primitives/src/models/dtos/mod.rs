pub mod campaign_dto;
pub mod inventory_dto;
pub mod ledger_dto;

pub use campaign_dto::{BackfillReport, CancelOutcome, FundCampaignOutcome, FundCampaignRequest};
pub use inventory_dto::{ImportOutcome, SeedSpec};
pub use ledger_dto::{LedgerMutation, LedgerRefs};
