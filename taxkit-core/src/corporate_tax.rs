//! Corporate income tax (법인세) on a taxable base, 2026 rate table.

use serde::Serialize;

use crate::money::{format_krw, round_won};

/// One progressive bracket. `base_tax` is the tax owed on everything below
/// the previous bracket's ceiling.
#[derive(Debug, Clone, Copy)]
pub struct Bracket {
    pub upper: Option<i64>,
    pub rate: f64,
    pub base_tax: f64,
}

pub const CORPORATE_BRACKETS: [Bracket; 4] = [
    // 2억 이하
    Bracket { upper: Some(200_000_000), rate: 0.10, base_tax: 0.0 },
    // 200억 이하
    Bracket { upper: Some(20_000_000_000), rate: 0.20, base_tax: 20_000_000.0 },
    // 3,000억 이하
    Bracket { upper: Some(300_000_000_000), rate: 0.22, base_tax: 3_980_000_000.0 },
    Bracket { upper: None, rate: 0.25, base_tax: 65_580_000_000.0 },
];

/// Local income tax is levied at 10% of the national tax.
pub const LOCAL_TAX_RATE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmeRelief {
    #[default]
    None,
    /// 중소기업 세액감면 (50%)
    Standard,
    /// 청년창업 중소기업 (100%)
    YouthStartup,
}

impl SmeRelief {
    pub fn from_flags(sme: bool, youth: bool) -> Self {
        match (sme, youth) {
            (false, _) => SmeRelief::None,
            (true, false) => SmeRelief::Standard,
            (true, true) => SmeRelief::YouthStartup,
        }
    }

    fn rate(self) -> Option<f64> {
        match self {
            SmeRelief::None => None,
            SmeRelief::Standard => Some(0.5),
            SmeRelief::YouthStartup => Some(1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorporateTaxResult {
    #[serde(rename = "과세표준")]
    pub taxable_income_label: String,
    #[serde(rename = "법인세")]
    pub corporate_tax_label: String,
    #[serde(rename = "지방소득세")]
    pub local_tax_label: String,
    #[serde(rename = "총세금")]
    pub total_tax_label: String,
    #[serde(rename = "실효세율")]
    pub effective_rate_label: String,
    #[serde(rename = "중소기업감면", skip_serializing_if = "Option::is_none")]
    pub sme_deduction_label: Option<String>,
    #[serde(rename = "taxableIncome")]
    pub taxable_income: i64,
    #[serde(rename = "corporateTax")]
    pub corporate_tax: i64,
    #[serde(rename = "localTax")]
    pub local_tax: i64,
    #[serde(rename = "totalTax")]
    pub total_tax: i64,
    #[serde(rename = "effectiveRate")]
    pub effective_rate: String,
    #[serde(rename = "smeDeduction", skip_serializing_if = "Option::is_none")]
    pub sme_deduction: Option<i64>,
}

/// Progressive tax before any relief, unrounded.
fn progressive_tax(taxable_income: i64) -> f64 {
    let income = taxable_income as f64;
    let mut prev_upper = 0.0;
    for bracket in CORPORATE_BRACKETS {
        match bracket.upper {
            Some(upper) if taxable_income > upper => prev_upper = upper as f64,
            _ => return bracket.base_tax + (income - prev_upper) * bracket.rate,
        }
    }
    0.0
}

pub fn calculate_corporate_tax(taxable_income: i64, relief: SmeRelief) -> CorporateTaxResult {
    if taxable_income <= 0 {
        return build(0, 0, 0, None);
    }

    let mut corporate_tax = round_won(progressive_tax(taxable_income));

    let sme_deduction = relief.rate().map(|rate| {
        let deduction = round_won(corporate_tax as f64 * rate);
        corporate_tax -= deduction;
        deduction
    });

    let local_tax = round_won(corporate_tax as f64 * LOCAL_TAX_RATE);
    build(taxable_income, corporate_tax, local_tax, sme_deduction)
}

fn build(
    taxable_income: i64,
    corporate_tax: i64,
    local_tax: i64,
    sme_deduction: Option<i64>,
) -> CorporateTaxResult {
    let total_tax = corporate_tax + local_tax;
    let effective_rate = if taxable_income > 0 {
        format!("{:.2}%", total_tax as f64 / taxable_income as f64 * 100.0)
    } else {
        "0%".to_string()
    };

    CorporateTaxResult {
        taxable_income_label: format_krw(taxable_income),
        corporate_tax_label: format_krw(corporate_tax),
        local_tax_label: format_krw(local_tax),
        total_tax_label: format_krw(total_tax),
        effective_rate_label: effective_rate.clone(),
        sme_deduction_label: sme_deduction.map(format_krw),
        taxable_income,
        corporate_tax,
        local_tax,
        total_tax,
        effective_rate,
        sme_deduction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_bracket() {
        let r = calculate_corporate_tax(100_000_000, SmeRelief::None);
        assert_eq!(r.corporate_tax, 10_000_000);
        assert_eq!(r.local_tax, 1_000_000);
        assert_eq!(r.total_tax, 11_000_000);
        assert_eq!(r.effective_rate, "11.00%");
        assert_eq!(r.sme_deduction, None);
    }

    #[test]
    fn test_bracket_boundaries() {
        assert_eq!(calculate_corporate_tax(200_000_000, SmeRelief::None).corporate_tax, 20_000_000);
        // 20,000,000 + 300,000,000 * 20%
        assert_eq!(calculate_corporate_tax(500_000_000, SmeRelief::None).corporate_tax, 80_000_000);
        assert_eq!(
            calculate_corporate_tax(20_000_000_000, SmeRelief::None).corporate_tax,
            3_980_000_000
        );
        assert_eq!(
            calculate_corporate_tax(50_000_000_000, SmeRelief::None).corporate_tax,
            10_580_000_000
        );
        assert_eq!(
            calculate_corporate_tax(300_000_000_000, SmeRelief::None).corporate_tax,
            65_580_000_000
        );
        // top bracket: 65,580,000,000 + 100,000,000,000 * 25%
        assert_eq!(
            calculate_corporate_tax(400_000_000_000, SmeRelief::None).corporate_tax,
            90_580_000_000
        );
    }

    #[test]
    fn test_sme_relief() {
        let r = calculate_corporate_tax(500_000_000, SmeRelief::Standard);
        assert_eq!(r.sme_deduction, Some(40_000_000));
        assert_eq!(r.corporate_tax, 40_000_000);
        assert_eq!(r.local_tax, 4_000_000);
        assert_eq!(r.sme_deduction_label.as_deref(), Some("40,000,000원"));

        let youth = calculate_corporate_tax(200_000_000, SmeRelief::YouthStartup);
        assert_eq!(youth.sme_deduction, Some(20_000_000));
        assert_eq!(youth.corporate_tax, 0);
        assert_eq!(youth.total_tax, 0);
        assert_eq!(youth.effective_rate, "0.00%");
    }

    #[test]
    fn test_youth_flag_requires_sme() {
        assert_eq!(SmeRelief::from_flags(false, true), SmeRelief::None);
        assert_eq!(SmeRelief::from_flags(true, true), SmeRelief::YouthStartup);
    }

    #[test]
    fn test_non_positive_income() {
        let r = calculate_corporate_tax(0, SmeRelief::Standard);
        assert_eq!(r.total_tax, 0);
        assert_eq!(r.effective_rate, "0%");
        assert_eq!(r.sme_deduction, None);
    }

    #[test]
    fn test_serialized_labels() {
        let r = calculate_corporate_tax(100_000_000, SmeRelief::None);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["과세표준"], "100,000,000원");
        assert_eq!(json["법인세"], "10,000,000원");
        assert_eq!(json["totalTax"], 11_000_000);
        assert!(json.get("smeDeduction").is_none());
    }
}
