use chrono::Utc;
use diesel::prelude::*;
use cashq_primitives::error::CoreError;
use cashq_primitives::models::entities::enum_types::TxnCategory;
use cashq_primitives::models::invoice::{Invoice, NewInvoice};
use cashq_primitives::schema::invoices;
use cashq_primitives::utility;
use serde_json::Value;
use uuid::Uuid;

pub struct InvoiceRepository;

pub struct IssueInvoice<'a> {
    pub vendor_id: Uuid,
    pub category: TxnCategory,
    pub amount: i64,
    pub tax_amount: i64,
    pub transaction_id: Option<Uuid>,
    pub invoice_prefix: &'a str,
    pub metadata: Value,
}

impl InvoiceRepository {
    /// Issues the next sequentially numbered invoice for the current
    /// financial year. Numbering is serialized with a transaction-scoped
    /// advisory lock on the year, so a concurrent issuer waits and then
    /// reads the committed maximum; the unique index on
    /// `(financial_year, sequence_no)` is the backstop.
    pub fn issue(conn: &mut PgConnection, params: IssueInvoice) -> Result<Invoice, CoreError> {
        let fy = utility::financial_year(Utc::now());

        diesel::sql_query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind::<diesel::sql_types::Text, _>(&fy)
            .execute(conn)?;

        let last_seq: i32 = invoices::table
            .filter(invoices::financial_year.eq(&fy))
            .select(diesel::dsl::max(invoices::sequence_no))
            .get_result::<Option<i32>>(conn)?
            .unwrap_or(0);

        let sequence_no = last_seq + 1;
        let number = utility::invoice_number(params.invoice_prefix, &fy, sequence_no);

        diesel::insert_into(invoices::table)
            .values(NewInvoice {
                vendor_id: params.vendor_id,
                invoice_number: &number,
                financial_year: &fy,
                sequence_no,
                category: params.category,
                amount: params.amount,
                tax_amount: params.tax_amount,
                transaction_id: params.transaction_id,
                metadata: params.metadata,
            })
            .get_result::<Invoice>(conn)
            .map_err(CoreError::from)
    }

    /// Completes issuance by pointing a freshly issued invoice at the ledger
    /// entry recorded after it, inside the same transaction.
    pub fn link_transaction(
        conn: &mut PgConnection,
        invoice_id: Uuid,
        transaction_id: Uuid,
    ) -> Result<Invoice, CoreError> {
        diesel::update(invoices::table)
            .filter(invoices::id.eq(invoice_id))
            .set(invoices::transaction_id.eq(transaction_id))
            .get_result::<Invoice>(conn)
            .map_err(CoreError::from)
    }
}
