use crate::models::entities::enum_types::CurrencyCode;
use eyre::Report;
use std::env;

/// Env-driven knobs for the financial core.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Technology fee charged per allocated QR code, in minor units.
    pub per_code_fee: i64,

    /// Tax applied on the technology fee, in basis points.
    pub fee_tax_bps: i64,

    pub default_currency: CurrencyCode,

    /// Prefix for per-financial-year invoice numbering.
    pub invoice_prefix: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Report> {
        Ok(Self {
            per_code_fee: env::var("PER_CODE_FEE_CENTS")
                .unwrap_or_else(|_| "200".into())
                .parse()?,

            fee_tax_bps: env::var("FEE_TAX_BPS")
                .unwrap_or_else(|_| "1800".into())
                .parse()?,

            default_currency: CurrencyCode::parse(
                &env::var("DEFAULT_CURRENCY").unwrap_or_else(|_| "INR".into()),
            )
            .map_err(|e| Report::msg(e.to_string()))?,

            invoice_prefix: env::var("INVOICE_PREFIX").unwrap_or_else(|_| "CSHQ".into()),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            per_code_fee: 200,
            fee_tax_bps: 1800,
            default_currency: CurrencyCode::INR,
            invoice_prefix: "CSHQ".into(),
        }
    }
}
