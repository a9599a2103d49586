use chrono::{DateTime, Datelike, Utc};

/// Converts a display amount to 2-decimal fixed-point minor units,
/// rounding half away from zero. All arithmetic and persistence happen
/// in minor units.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

pub fn to_display_amount(minor_units: i64) -> f64 {
    minor_units as f64 / 100.0
}

/// Tax on a fee, in minor units. `bps` is basis points (1/100th of a
/// percent), rounded half-up.
pub fn tax_on(fee_minor_units: i64, bps: i64) -> i64 {
    (fee_minor_units * bps + 5_000) / 10_000
}

/// April–March financial year label, e.g. "2025-26" for any date from
/// 2025-04-01 through 2026-03-31.
pub fn financial_year(at: DateTime<Utc>) -> String {
    let start_year = if at.month() >= 4 {
        at.year()
    } else {
        at.year() - 1
    };
    format!("{}-{:02}", start_year, (start_year + 1) % 100)
}

/// Invoice numbers are `{prefix}/{fy}/{seq}` with a zero-padded sequence.
pub fn invoice_number(prefix: &str, financial_year: &str, sequence_no: i32) -> String {
    format!("{}/{}/{:06}", prefix, financial_year, sequence_no)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn minor_units_round_to_two_decimals() {
        assert_eq!(to_minor_units(10.0), 1000);
        assert_eq!(to_minor_units(10.56), 1056);
        assert_eq!(to_minor_units(10.554), 1055);
        assert_eq!(to_minor_units(0.005), 1);
        assert_eq!(to_display_amount(1056), 10.56);
    }

    #[test]
    fn tax_rounds_half_up() {
        // 18% of 5000 = 900
        assert_eq!(tax_on(5_000, 1_800), 900);
        // 18% of 33 = 5.94 -> 6
        assert_eq!(tax_on(33, 1_800), 6);
        assert_eq!(tax_on(5_000, 0), 0);
    }

    #[test]
    fn financial_year_cuts_over_in_april() {
        let march = Utc.with_ymd_and_hms(2026, 3, 31, 23, 59, 59).unwrap();
        let april = Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap();
        assert_eq!(financial_year(march), "2025-26");
        assert_eq!(financial_year(april), "2026-27");
    }

    #[test]
    fn invoice_numbers_are_zero_padded() {
        assert_eq!(invoice_number("CSHQ", "2025-26", 42), "CSHQ/2025-26/000042");
    }
}
