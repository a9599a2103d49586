use diesel::prelude::*;
use cashq_primitives::error::CoreError;
use cashq_primitives::models::dtos::campaign_dto::{
    CancelOutcome, FundCampaignOutcome, FundCampaignRequest,
};
use cashq_primitives::models::dtos::ledger_dto::{LedgerMutation, LedgerRefs};
use cashq_primitives::models::entities::enum_types::{BudgetStatus, TxnCategory};
use cashq_primitives::models::invoice::Invoice;
use cashq_primitives::utility::{tax_on, to_minor_units};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::repositories::budget_repository::BudgetRepository;
use crate::repositories::invoice_repository::{InvoiceRepository, IssueInvoice};
use crate::repositories::qr_repository::QrRepository;
use crate::services::inventory_service::InventoryService;
use crate::services::ledger_service::LedgerService;
use crate::services::reconciliation_service::ReconciliationService;

use cashq_primitives::models::campaign_budget::NewCampaignBudget;

/// Orchestrates funding events: fee computation, budget creation, ledger
/// lock/charge, inventory allocation, one all-or-nothing unit of work per
/// operation.
pub struct CampaignService;

impl CampaignService {
    pub fn fund_campaign(
        state: &AppState,
        req: &FundCampaignRequest,
    ) -> Result<FundCampaignOutcome, CoreError> {
        use validator::Validate;
        req.validate()?;

        let cashback_per_code = to_minor_units(req.cashback_per_code);
        if cashback_per_code <= 0 {
            return Err(CoreError::Validation(
                "cashback per code must round to a positive amount".into(),
            ));
        }

        let mut conn = state.db.get().map_err(|e| {
            error!("fund_campaign: failed to acquire db connection");
            CoreError::DatabaseConnection(e.to_string())
        })?;

        let config = &state.config;

        conn.transaction(|conn| {
            // The ledger view must never be stale relative to legacy-shaped
            // data when money starts moving.
            ReconciliationService::reconcile_vendor_in_tx(conn, req.vendor_id, config)?;

            let cashback_total = req.quantity * cashback_per_code;
            let fee_total = req.quantity * config.per_code_fee;
            let fee_tax = tax_on(fee_total, config.fee_tax_bps);

            LedgerService::ensure_wallet(conn, req.vendor_id, config.default_currency)?;

            let budget = BudgetRepository::create(
                conn,
                NewCampaignBudget {
                    campaign_id: req.campaign_id,
                    vendor_id: req.vendor_id,
                    initial_locked_amount: cashback_total,
                    locked_amount: cashback_total,
                    spent_amount: 0,
                    refunded_amount: 0,
                    status: BudgetStatus::Active,
                },
            )?;

            let mut invoices: Vec<Invoice> = Vec::with_capacity(2);

            if fee_total + fee_tax > 0 {
                invoices.push(Self::charge_with_invoice(
                    conn,
                    state,
                    &budget_refs(budget.id, req.campaign_id),
                    req.vendor_id,
                    TxnCategory::TechFeeCharge,
                    fee_total,
                    fee_tax,
                    format!("fee-{}", budget.id),
                )?);
            }

            invoices.push(Self::lock_with_invoice(
                conn,
                state,
                &budget_refs(budget.id, req.campaign_id),
                req.vendor_id,
                cashback_total,
                format!("lock-{}", budget.id),
            )?);

            let qr_codes = InventoryService::allocate_inventory_qrs(
                conn,
                req.vendor_id,
                req.campaign_id,
                budget.id,
                req.quantity,
                cashback_per_code,
                req.series_code.as_deref(),
            )?;

            info!(
                vendor = %req.vendor_id,
                campaign = %req.campaign_id,
                quantity = req.quantity,
                cashback_total,
                fee_total,
                "campaign funded"
            );

            Ok(FundCampaignOutcome {
                campaign_budget: budget,
                qr_codes,
                invoices,
            })
        })
    }

    /// Reverses every active budget of the campaign: unlocks the remaining
    /// reservation, marks the budgets refunded, and voids all codes not yet
    /// redeemed. Paid-out value is never clawed back.
    pub fn cancel_campaign(
        state: &AppState,
        campaign_id: Uuid,
    ) -> Result<CancelOutcome, CoreError> {
        let mut conn = state.db.get().map_err(|e| {
            error!("cancel_campaign: failed to acquire db connection");
            CoreError::DatabaseConnection(e.to_string())
        })?;

        let config = &state.config;

        conn.transaction(|conn| {
            // Reconcile the affected vendors so legacy commitments are
            // represented before they are reversed. Vendors are derived from
            // the campaign's codes as well as its budgets: a legacy-only
            // campaign has codes but no budget row yet.
            let vendors: Vec<Uuid> = {
                let budgets = BudgetRepository::find_active_by_campaign_for_update(
                    conn,
                    campaign_id,
                )?;
                let mut v: Vec<Uuid> = budgets.iter().map(|b| b.vendor_id).collect();
                v.extend(QrRepository::campaign_vendor_ids(conn, campaign_id)?);
                v.sort();
                v.dedup();
                v
            };
            for vendor_id in &vendors {
                ReconciliationService::reconcile_vendor_in_tx(conn, *vendor_id, config)?;
            }

            let budgets =
                BudgetRepository::find_active_by_campaign_for_update(conn, campaign_id)?;

            let mut refunded_total = 0i64;

            for mut budget in budgets {
                let refundable = budget.locked_amount;

                if refundable > 0 {
                    let invoice = InvoiceRepository::issue(
                        conn,
                        IssueInvoice {
                            vendor_id: budget.vendor_id,
                            category: TxnCategory::UnlockRefund,
                            amount: refundable,
                            tax_amount: 0,
                            transaction_id: None,
                            invoice_prefix: &config.invoice_prefix,
                            metadata: json!({
                                "campaign_id": campaign_id.to_string(),
                                "campaign_budget_id": budget.id.to_string(),
                            }),
                        },
                    )?;

                    let mut refs = LedgerRefs::with_reference(format!("cancel-{}", budget.id));
                    refs.campaign_budget_id = Some(budget.id);
                    refs.invoice_id = Some(invoice.id);
                    refs.description = Some("Campaign cancellation refund".into());

                    let mutation =
                        LedgerService::unlock_refund(conn, budget.vendor_id, refundable, refs)?;
                    InvoiceRepository::link_transaction(
                        conn,
                        invoice.id,
                        mutation.transaction.id,
                    )?;
                }

                budget.refunded_amount += budget.locked_amount;
                budget.locked_amount = 0;
                budget.status = BudgetStatus::Refunded;
                BudgetRepository::save_amounts(conn, &budget)?;

                refunded_total += refundable;
            }

            let voided_count = QrRepository::void_campaign_codes(conn, campaign_id)?;

            info!(
                campaign = %campaign_id,
                refunded = refunded_total,
                voided = voided_count,
                "campaign cancelled"
            );

            Ok(CancelOutcome {
                refunded_amount: refunded_total,
                voided_count,
            })
        })
    }

    /// Converts part of a budget's reservation into a final spend, keeping
    /// the budget's own accounting in step with the wallet. Drives the
    /// `active -> closed` transition once the reservation is fully consumed.
    pub fn spend_from_budget(
        state: &AppState,
        campaign_budget_id: Uuid,
        amount: i64,
        reference_id: &str,
    ) -> Result<LedgerMutation, CoreError> {
        let mut conn = state.db.get().map_err(|e| {
            error!("spend_from_budget: failed to acquire db connection");
            CoreError::DatabaseConnection(e.to_string())
        })?;

        conn.transaction(|conn| {
            let mut budget = BudgetRepository::find_by_id_for_update(conn, campaign_budget_id)?;

            if amount > budget.locked_amount {
                return Err(CoreError::InsufficientLockedBalance {
                    requested: amount,
                    locked: budget.locked_amount,
                });
            }

            let mut refs = LedgerRefs::with_reference(reference_id.to_string());
            refs.campaign_budget_id = Some(budget.id);
            refs.description = Some("Cashback payout from locked budget".into());

            let mutation = LedgerService::spend_locked(conn, budget.vendor_id, amount, refs)?;

            budget.locked_amount -= amount;
            budget.spent_amount += amount;
            if budget.is_fully_consumed() {
                budget.status = BudgetStatus::Closed;
            }
            BudgetRepository::save_amounts(conn, &budget)?;

            Ok(mutation)
        })
    }

    fn charge_with_invoice(
        conn: &mut PgConnection,
        state: &AppState,
        meta: &serde_json::Value,
        vendor_id: Uuid,
        category: TxnCategory,
        amount: i64,
        tax_amount: i64,
        reference_id: String,
    ) -> Result<Invoice, CoreError> {
        let invoice = InvoiceRepository::issue(
            conn,
            IssueInvoice {
                vendor_id,
                category,
                amount,
                tax_amount,
                transaction_id: None,
                invoice_prefix: &state.config.invoice_prefix,
                metadata: meta.clone(),
            },
        )?;

        let mut refs = LedgerRefs::with_reference(reference_id);
        refs.campaign_budget_id = meta
            .get("campaign_budget_id")
            .and_then(|v| v.as_str())
            .and_then(|s| Uuid::parse_str(s).ok());
        refs.invoice_id = Some(invoice.id);
        refs.description = Some("Technology fee for QR allocation".into());

        let mutation = LedgerService::charge_fee(conn, vendor_id, amount + tax_amount, refs)?;
        InvoiceRepository::link_transaction(conn, invoice.id, mutation.transaction.id)
    }

    fn lock_with_invoice(
        conn: &mut PgConnection,
        state: &AppState,
        meta: &serde_json::Value,
        vendor_id: Uuid,
        amount: i64,
        reference_id: String,
    ) -> Result<Invoice, CoreError> {
        let invoice = InvoiceRepository::issue(
            conn,
            IssueInvoice {
                vendor_id,
                category: TxnCategory::LockFunds,
                amount,
                tax_amount: 0,
                transaction_id: None,
                invoice_prefix: &state.config.invoice_prefix,
                metadata: meta.clone(),
            },
        )?;

        let mut refs = LedgerRefs::with_reference(reference_id);
        refs.campaign_budget_id = meta
            .get("campaign_budget_id")
            .and_then(|v| v.as_str())
            .and_then(|s| Uuid::parse_str(s).ok());
        refs.invoice_id = Some(invoice.id);
        refs.description = Some("Cashback reservation for campaign".into());

        let mutation = LedgerService::lock(conn, vendor_id, amount, refs)?;
        InvoiceRepository::link_transaction(conn, invoice.id, mutation.transaction.id)
    }
}

fn budget_refs(campaign_budget_id: Uuid, campaign_id: Uuid) -> serde_json::Value {
    json!({
        "campaign_id": campaign_id.to_string(),
        "campaign_budget_id": campaign_budget_id.to_string(),
    })
}
