//! Won amounts: display formatting and VAT splitting.

use serde::{Deserialize, Serialize};

/// Standard VAT rate applied to supply values.
pub const VAT_RATE: f64 = 0.1;

/// Format a won amount with comma grouping, e.g. `1234567` -> `"1,234,567원"`.
pub fn format_krw(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{grouped}원")
    } else {
        format!("{grouped}원")
    }
}

/// Round a computed won value to a whole amount.
pub fn round_won(value: f64) -> i64 {
    value.round() as i64
}

/// Supply value and VAT portion of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatSplit {
    pub supply: i64,
    pub vat: i64,
}

impl VatSplit {
    pub fn total(&self) -> i64 {
        self.supply + self.vat
    }
}

/// Split a payment into supply value and VAT.
///
/// When `vat_included` the amount is the gross total and the VAT is whatever
/// remains after rounding the supply value, so the parts always sum back to
/// the input. Otherwise the amount is the supply value and VAT is added on top.
pub fn split_vat(amount: i64, vat_included: bool) -> VatSplit {
    if vat_included {
        let supply = round_won(amount as f64 / (1.0 + VAT_RATE));
        VatSplit {
            supply,
            vat: amount - supply,
        }
    } else {
        VatSplit {
            supply: amount,
            vat: round_won(amount as f64 * VAT_RATE),
        }
    }
}
