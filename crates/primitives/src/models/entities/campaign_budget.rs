use crate::error::CoreError;
use crate::models::entities::enum_types::BudgetStatus;
use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

/// Ledger-linked record of one funding event.
///
/// `initial_locked_amount = locked_amount + spent_amount + refunded_amount`
/// at every state; every write-back goes through [`check_invariant`].
///
/// [`check_invariant`]: CampaignBudget::check_invariant
#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::campaign_budgets)]
pub struct CampaignBudget {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub vendor_id: Uuid,
    pub initial_locked_amount: i64,
    pub locked_amount: i64,
    pub spent_amount: i64,
    pub refunded_amount: i64,
    pub status: BudgetStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CampaignBudget {
    pub fn check_invariant(&self) -> Result<(), CoreError> {
        if self.locked_amount < 0 || self.spent_amount < 0 || self.refunded_amount < 0 {
            return Err(CoreError::BudgetInvariantViolation(format!(
                "budget {} has a negative component (locked {}, spent {}, refunded {})",
                self.id, self.locked_amount, self.spent_amount, self.refunded_amount
            )));
        }
        let total = self.locked_amount + self.spent_amount + self.refunded_amount;
        if total != self.initial_locked_amount {
            return Err(CoreError::BudgetInvariantViolation(format!(
                "budget {}: initial {} != locked {} + spent {} + refunded {}",
                self.id,
                self.initial_locked_amount,
                self.locked_amount,
                self.spent_amount,
                self.refunded_amount
            )));
        }
        Ok(())
    }

    /// A budget closes once its reservation is fully consumed.
    pub fn is_fully_consumed(&self) -> bool {
        self.locked_amount == 0 && self.spent_amount > 0 && self.refunded_amount == 0
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::campaign_budgets)]
pub struct NewCampaignBudget {
    pub campaign_id: Uuid,
    pub vendor_id: Uuid,
    pub initial_locked_amount: i64,
    pub locked_amount: i64,
    pub spent_amount: i64,
    pub refunded_amount: i64,
    pub status: BudgetStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget(initial: i64, locked: i64, spent: i64, refunded: i64) -> CampaignBudget {
        CampaignBudget {
            id: Uuid::new_v4(),
            campaign_id: Uuid::new_v4(),
            vendor_id: Uuid::new_v4(),
            initial_locked_amount: initial,
            locked_amount: locked,
            spent_amount: spent,
            refunded_amount: refunded,
            status: BudgetStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn sum_invariant_holds_across_transitions() {
        assert!(budget(1000, 1000, 0, 0).check_invariant().is_ok());
        assert!(budget(1000, 400, 600, 0).check_invariant().is_ok());
        assert!(budget(1000, 0, 600, 400).check_invariant().is_ok());
    }

    #[test]
    fn broken_sums_and_negatives_are_rejected() {
        assert!(budget(1000, 500, 0, 0).check_invariant().is_err());
        assert!(budget(1000, -100, 600, 500).check_invariant().is_err());
    }

    #[test]
    fn consumed_budget_detection() {
        assert!(budget(1000, 0, 1000, 0).is_fully_consumed());
        assert!(!budget(1000, 400, 600, 0).is_fully_consumed());
        assert!(!budget(1000, 0, 600, 400).is_fully_consumed());
    }
}
