use diesel::prelude::*;
use cashq_primitives::error::CoreError;
use cashq_primitives::models::app_config::AppConfig;
use cashq_primitives::models::campaign_budget::NewCampaignBudget;
use cashq_primitives::models::dtos::campaign_dto::BackfillReport;
use cashq_primitives::models::dtos::ledger_dto::LedgerRefs;
use cashq_primitives::models::entities::enum_types::BudgetStatus;
use cashq_primitives::models::qr_code::QrCode;
use serde_json::{json, Map};
use std::collections::BTreeMap;
use tracing::info;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::repositories::budget_repository::BudgetRepository;
use crate::repositories::invoice_repository::{InvoiceRepository, IssueInvoice};
use crate::repositories::qr_repository::QrRepository;
use crate::repositories::transaction_repository::TransactionRepository;
use crate::services::ledger_service::LedgerService;

/// Idempotent migration of pre-ledger-model data. Runs opportunistically
/// before wallet-affecting operations so the ledger view is never stale
/// relative to legacy-shaped rows. Every synthesized ledger entry carries a
/// deterministic reference, and linked rows drop out of future scans, so
/// re-running (or racing) a pass past the first is a no-op.
pub struct ReconciliationService;

impl ReconciliationService {
    pub fn reconcile_vendor(
        state: &AppState,
        vendor_id: Uuid,
    ) -> Result<BackfillReport, CoreError> {
        let mut conn = state.db.get().map_err(|e| {
            CoreError::DatabaseConnection(e.to_string())
        })?;
        conn.transaction(|conn| Self::reconcile_vendor_in_tx(conn, vendor_id, &state.config))
    }

    /// Both passes, inside the caller's transaction: budgets first so the
    /// ledger entries they synthesize get invoiced by the second pass.
    pub fn reconcile_vendor_in_tx(
        conn: &mut PgConnection,
        vendor_id: Uuid,
        config: &AppConfig,
    ) -> Result<BackfillReport, CoreError> {
        let mut report = Self::backfill_legacy_locked_budgets(conn, vendor_id, config)?;
        report.invoices_created = Self::backfill_legacy_invoices_for_vendor(conn, vendor_id, config)?;
        Ok(report)
    }

    /// Detects QR codes referencing a campaign but no budget and retroactively
    /// constructs the missing `CampaignBudget` plus matching ledger entries.
    ///
    /// Outstanding (not yet redeemed) value becomes a live lock; redeemed
    /// value is recorded as already spent. Vendors whose prepayment predates
    /// the ledger model get a matching legacy credit first, so the wallet
    /// invariants hold after the lock.
    pub fn backfill_legacy_locked_budgets(
        conn: &mut PgConnection,
        vendor_id: Uuid,
        config: &AppConfig,
    ) -> Result<BackfillReport, CoreError> {
        conn.transaction(|conn| {
            let codes = QrRepository::unlinked_campaign_codes(conn, vendor_id)?;
            let mut report = BackfillReport::default();

            if codes.is_empty() {
                return Ok(report);
            }

            // BTreeMap keeps campaign processing order stable across runs.
            let mut by_campaign: BTreeMap<Uuid, Vec<QrCode>> = BTreeMap::new();
            for code in codes {
                let campaign_id = code
                    .campaign_id
                    .ok_or_else(|| CoreError::Internal("scan returned detached code".into()))?;
                by_campaign.entry(campaign_id).or_default().push(code);
            }

            for (campaign_id, group) in by_campaign {
                let outstanding: i64 = group
                    .iter()
                    .filter(|c| c.status.is_voidable())
                    .map(|c| c.cashback_amount)
                    .sum();
                let spent: i64 = group
                    .iter()
                    .filter(|c| !c.status.is_voidable())
                    .map(|c| c.cashback_amount)
                    .sum();

                let budget_id = match BudgetRepository::find_by_campaign_and_vendor_for_update(
                    conn,
                    campaign_id,
                    vendor_id,
                )? {
                    Some(mut budget) => {
                        budget.initial_locked_amount += outstanding + spent;
                        budget.locked_amount += outstanding;
                        budget.spent_amount += spent;
                        if budget.is_fully_consumed() {
                            budget.status = BudgetStatus::Closed;
                        }
                        BudgetRepository::save_amounts(conn, &budget)?;
                        report.budgets_augmented += 1;
                        budget.id
                    }
                    None => {
                        // A campaign whose reservation was already fully paid
                        // out arrives closed, not active.
                        let status = if outstanding == 0 && spent > 0 {
                            BudgetStatus::Closed
                        } else {
                            BudgetStatus::Active
                        };
                        let budget = BudgetRepository::create(
                            conn,
                            NewCampaignBudget {
                                campaign_id,
                                vendor_id,
                                initial_locked_amount: outstanding + spent,
                                locked_amount: outstanding,
                                spent_amount: spent,
                                refunded_amount: 0,
                                status,
                            },
                        )?;
                        report.budgets_created += 1;
                        budget.id
                    }
                };

                if outstanding > 0 {
                    LedgerService::ensure_wallet(conn, vendor_id, config.default_currency)?;

                    let credit_ref = format!("legacy-credit-{}", campaign_id);
                    if TransactionRepository::find_by_reference(conn, &credit_ref)?.is_none() {
                        LedgerService::credit(
                            conn,
                            vendor_id,
                            outstanding,
                            config.default_currency,
                            legacy_refs(credit_ref, campaign_id, budget_id),
                        )?;
                    }

                    let lock_ref = format!("legacy-lock-{}", campaign_id);
                    if TransactionRepository::find_by_reference(conn, &lock_ref)?.is_none() {
                        LedgerService::lock(
                            conn,
                            vendor_id,
                            outstanding,
                            legacy_refs(lock_ref, campaign_id, budget_id),
                        )?;
                    }
                }

                let ids: Vec<Uuid> = group.iter().map(|c| c.id).collect();
                report.codes_linked += QrRepository::link_to_budget(conn, &ids, budget_id)?;
                report.locked_amount += outstanding;
            }

            info!(
                vendor = %vendor_id,
                created = report.budgets_created,
                augmented = report.budgets_augmented,
                linked = report.codes_linked,
                locked = report.locked_amount,
                "legacy budget backfill completed"
            );
            Ok(report)
        })
    }

    /// Synthesizes invoices for settled billable entries that predate
    /// invoicing and links them back. Linked entries never rescan.
    pub fn backfill_legacy_invoices_for_vendor(
        conn: &mut PgConnection,
        vendor_id: Uuid,
        config: &AppConfig,
    ) -> Result<usize, CoreError> {
        conn.transaction(|conn| {
            let rows = TransactionRepository::billable_without_invoice(conn, vendor_id)?;
            let count = rows.len();

            for row in rows {
                let invoice = InvoiceRepository::issue(
                    conn,
                    IssueInvoice {
                        vendor_id,
                        category: row.category,
                        amount: row.amount,
                        tax_amount: 0,
                        transaction_id: Some(row.id),
                        invoice_prefix: &config.invoice_prefix,
                        metadata: json!({
                            "backfilled": true,
                            "reference_id": row.reference_id,
                        }),
                    },
                )?;
                TransactionRepository::link_invoice(conn, row.id, invoice.id)?;
            }

            if count > 0 {
                info!(vendor = %vendor_id, count, "legacy invoice backfill completed");
            }
            Ok(count)
        })
    }
}

fn legacy_refs(reference_id: String, campaign_id: Uuid, budget_id: Uuid) -> LedgerRefs {
    let mut metadata = Map::new();
    metadata.insert("legacy_backfill".into(), json!(true));
    metadata.insert("campaign_id".into(), json!(campaign_id.to_string()));

    LedgerRefs {
        reference_id,
        campaign_budget_id: Some(budget_id),
        invoice_id: None,
        description: Some("Reconstructed pre-ledger commitment".into()),
        metadata: Some(metadata),
    }
}
