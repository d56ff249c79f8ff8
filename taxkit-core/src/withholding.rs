//! Monthly wage withholding (원천징수) from a simplified 간이세액표.

use serde::Serialize;

use crate::money::{format_krw, round_won};

/// (monthly salary, income tax for one dependent), ascending by salary.
pub const WITHHOLDING_TABLE: [(i64, i64); 14] = [
    (1_500_000, 0),
    (2_000_000, 19_520),
    (2_500_000, 39_960),
    (3_000_000, 66_360),
    (3_500_000, 99_960),
    (4_000_000, 140_790),
    (4_500_000, 182_790),
    (5_000_000, 225_990),
    (5_500_000, 277_990),
    (6_000_000, 330_570),
    (7_000_000, 449_340),
    (8_000_000, 582_170),
    (9_000_000, 725_170),
    (10_000_000, 882_170),
];

/// Discount against the single-dependent figure, indexed by dependents - 1.
const DEPENDENT_DISCOUNTS: [f64; 5] = [0.0, 0.30, 0.50, 0.65, 0.75];

pub const MIN_DEPENDENTS: u32 = 1;
pub const MAX_DEPENDENTS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithholdingResult {
    #[serde(rename = "급여")]
    pub salary_label: String,
    #[serde(rename = "공제대상가족수")]
    pub dependents_label: u32,
    #[serde(rename = "소득세")]
    pub income_tax_label: String,
    #[serde(rename = "지방소득세")]
    pub local_tax_label: String,
    #[serde(rename = "원천징수합계")]
    pub total_label: String,
    pub salary: i64,
    pub dependents: u32,
    #[serde(rename = "incomeTax")]
    pub income_tax: i64,
    #[serde(rename = "localTax")]
    pub local_tax: i64,
    #[serde(rename = "totalWithholding")]
    pub total_withholding: i64,
}

/// Income tax for one dependent, interpolated between table rows.
///
/// Salaries past the last row are extrapolated with the slope of the last
/// two rows.
pub fn single_dependent_tax(salary: i64) -> i64 {
    let (floor_salary, _) = WITHHOLDING_TABLE[0];
    if salary <= floor_salary {
        return 0;
    }

    let (top_salary, top_tax) = WITHHOLDING_TABLE[WITHHOLDING_TABLE.len() - 1];
    if salary >= top_salary {
        let (prev_salary, prev_tax) = WITHHOLDING_TABLE[WITHHOLDING_TABLE.len() - 2];
        let per_won = (top_tax - prev_tax) as f64 / (top_salary - prev_salary) as f64;
        return round_won(top_tax as f64 + (salary - top_salary) as f64 * per_won);
    }

    for pair in WITHHOLDING_TABLE.windows(2) {
        let (lo_salary, lo_tax) = pair[0];
        let (hi_salary, hi_tax) = pair[1];
        if salary <= hi_salary {
            let ratio = (salary - lo_salary) as f64 / (hi_salary - lo_salary) as f64;
            return round_won(lo_tax as f64 + ratio * (hi_tax - lo_tax) as f64);
        }
    }

    0
}

/// Monthly withholding. `dependents` is reported as given but clamped to
/// 1..=5 for the discount lookup.
pub fn calculate_withholding(salary: i64, dependents: u32) -> WithholdingResult {
    let base_tax = single_dependent_tax(salary);

    let clamped = dependents.clamp(MIN_DEPENDENTS, MAX_DEPENDENTS);
    let discount = DEPENDENT_DISCOUNTS[(clamped - 1) as usize];
    let income_tax = round_won(base_tax as f64 * (1.0 - discount)).max(0);

    let local_tax = round_won(income_tax as f64 * 0.1);
    let total_withholding = income_tax + local_tax;

    WithholdingResult {
        salary_label: format_krw(salary),
        dependents_label: dependents,
        income_tax_label: format_krw(income_tax),
        local_tax_label: format_krw(local_tax),
        total_label: format_krw(total_withholding),
        salary,
        dependents,
        income_tax,
        local_tax,
        total_withholding,
    }
}
