use chrono::Utc;
use diesel::prelude::*;
use cashq_primitives::error::CoreError;
use cashq_primitives::models::campaign_budget::{CampaignBudget, NewCampaignBudget};
use cashq_primitives::models::entities::enum_types::BudgetStatus;
use cashq_primitives::schema::campaign_budgets;
use uuid::Uuid;

pub struct BudgetRepository;

impl BudgetRepository {
    pub fn create(
        conn: &mut PgConnection,
        budget: NewCampaignBudget,
    ) -> Result<CampaignBudget, CoreError> {
        diesel::insert_into(campaign_budgets::table)
            .values(budget)
            .get_result::<CampaignBudget>(conn)
            .map_err(CoreError::from)
    }

    pub fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<CampaignBudget, CoreError> {
        campaign_budgets::table
            .filter(campaign_budgets::id.eq(id))
            .for_update()
            .first::<CampaignBudget>(conn)
            .map_err(CoreError::from)
    }

    pub fn find_active_by_campaign_for_update(
        conn: &mut PgConnection,
        campaign_id: Uuid,
    ) -> Result<Vec<CampaignBudget>, CoreError> {
        campaign_budgets::table
            .filter(campaign_budgets::campaign_id.eq(campaign_id))
            .filter(campaign_budgets::status.eq(BudgetStatus::Active))
            .order(campaign_budgets::created_at.asc())
            .for_update()
            .load::<CampaignBudget>(conn)
            .map_err(CoreError::from)
    }

    pub fn find_by_campaign_and_vendor_for_update(
        conn: &mut PgConnection,
        campaign_id: Uuid,
        vendor_id: Uuid,
    ) -> Result<Option<CampaignBudget>, CoreError> {
        campaign_budgets::table
            .filter(campaign_budgets::campaign_id.eq(campaign_id))
            .filter(campaign_budgets::vendor_id.eq(vendor_id))
            .for_update()
            .first::<CampaignBudget>(conn)
            .optional()
            .map_err(CoreError::from)
    }

    /// Writes back mutated amounts/status. The sum invariant is checked
    /// before the row is touched; a violation aborts the transaction.
    pub fn save_amounts(
        conn: &mut PgConnection,
        budget: &CampaignBudget,
    ) -> Result<CampaignBudget, CoreError> {
        budget.check_invariant()?;

        diesel::update(campaign_budgets::table)
            .filter(campaign_budgets::id.eq(budget.id))
            .set((
                campaign_budgets::initial_locked_amount.eq(budget.initial_locked_amount),
                campaign_budgets::locked_amount.eq(budget.locked_amount),
                campaign_budgets::spent_amount.eq(budget.spent_amount),
                campaign_budgets::refunded_amount.eq(budget.refunded_amount),
                campaign_budgets::status.eq(budget.status),
                campaign_budgets::updated_at.eq(Utc::now()),
            ))
            .get_result::<CampaignBudget>(conn)
            .map_err(CoreError::from)
    }
}
