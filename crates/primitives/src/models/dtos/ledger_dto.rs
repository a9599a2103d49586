use crate::models::entities::wallet::Wallet;
use crate::models::entities::wallet_transaction::WalletTransaction;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Context a caller attaches to a ledger primitive: the idempotency
/// reference plus optional links and free-form (but typed) metadata.
#[derive(Debug, Clone, Default)]
pub struct LedgerRefs {
    pub reference_id: String,
    pub campaign_budget_id: Option<Uuid>,
    pub invoice_id: Option<Uuid>,
    pub description: Option<String>,
    pub metadata: Option<Map<String, Value>>,
}

impl LedgerRefs {
    pub fn with_reference(reference_id: impl Into<String>) -> Self {
        Self {
            reference_id: reference_id.into(),
            ..Self::default()
        }
    }

    pub fn metadata_value(&self) -> Value {
        match &self.metadata {
            Some(map) => Value::Object(map.clone()),
            None => Value::Object(Map::new()),
        }
    }
}

/// Result of one committed ledger primitive: the wallet as written plus
/// the single entry recorded with it.
#[derive(Debug, Serialize)]
pub struct LedgerMutation {
    pub wallet: Wallet,
    pub transaction: WalletTransaction,
}
