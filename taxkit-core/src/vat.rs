//! Quarterly VAT (부가가치세) return: output tax, input tax and credits.

use serde::Serialize;

use crate::money::{format_krw, round_won, VAT_RATE};

/// Card-sales credit rate (신용카드매출전표 발행 세액공제).
pub const CARD_SALES_CREDIT_RATE: f64 = 0.013;
/// Annual cap on the card-sales credit.
pub const CARD_SALES_CREDIT_CAP: i64 = 10_000_000;
/// Businesses above this annual turnover get no card-sales credit.
pub const CARD_SALES_TURNOVER_LIMIT: i64 = 1_000_000_000;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VatInput {
    pub sales_amount: i64,
    pub purchase_amount: i64,
    /// 영세율: sales are taxed at 0%.
    pub zero_rate: bool,
    /// 면세: neither side carries VAT.
    pub exempt: bool,
    pub card_sales: bool,
    /// Defaults to four times the quarter's sales.
    pub annual_sales: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deduction {
    #[serde(rename = "항목")]
    pub item: String,
    #[serde(rename = "금액")]
    pub amount_label: String,
    pub amount: i64,
}

impl Deduction {
    fn new(item: &str, amount: i64) -> Self {
        Self {
            item: item.to_string(),
            amount_label: format_krw(amount),
            amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VatResult {
    #[serde(rename = "매출액")]
    pub sales_label: String,
    #[serde(rename = "매입액")]
    pub purchase_label: String,
    #[serde(rename = "매출세액")]
    pub output_tax_label: String,
    #[serde(rename = "매입세액")]
    pub input_tax_label: String,
    #[serde(rename = "납부세액")]
    pub payable_label: String,
    #[serde(rename = "공제내역")]
    pub deductions_label: Vec<Deduction>,
    #[serde(rename = "공제합계")]
    pub total_deduction_label: String,
    #[serde(rename = "최종납부세액")]
    pub final_tax_label: String,
    #[serde(rename = "salesAmount")]
    pub sales_amount: i64,
    #[serde(rename = "purchaseAmount")]
    pub purchase_amount: i64,
    #[serde(rename = "outputTax")]
    pub output_tax: i64,
    #[serde(rename = "inputTax")]
    pub input_tax: i64,
    #[serde(rename = "payableTax")]
    pub payable_tax: i64,
    pub deductions: Vec<Deduction>,
    #[serde(rename = "finalTax")]
    pub final_tax: i64,
}

pub fn calculate_vat(input: &VatInput) -> VatResult {
    let output_rate = if input.zero_rate || input.exempt { 0.0 } else { VAT_RATE };
    let input_rate = if input.exempt { 0.0 } else { VAT_RATE };

    let output_tax = round_won(input.sales_amount as f64 * output_rate);
    let input_tax = round_won(input.purchase_amount as f64 * input_rate);
    // Negative when input tax exceeds output tax (환급).
    let payable_tax = output_tax - input_tax;

    let mut deductions = Vec::new();
    if input.card_sales {
        let annual_sales = input.annual_sales.unwrap_or(input.sales_amount.saturating_mul(4));
        if annual_sales <= CARD_SALES_TURNOVER_LIMIT {
            let credit = round_won(input.sales_amount as f64 * CARD_SALES_CREDIT_RATE)
                .min(CARD_SALES_CREDIT_CAP);
            deductions.push(Deduction::new("신용카드매출전표 발행 세액공제 (1.3%)", credit));
        }
    }

    let total_deduction: i64 = deductions.iter().map(|d| d.amount).sum();
    let final_tax = payable_tax.saturating_sub(total_deduction).max(0);

    VatResult {
        sales_label: format_krw(input.sales_amount),
        purchase_label: format_krw(input.purchase_amount),
        output_tax_label: format_krw(output_tax),
        input_tax_label: format_krw(input_tax),
        payable_label: format_krw(payable_tax),
        deductions_label: deductions.clone(),
        total_deduction_label: format_krw(total_deduction),
        final_tax_label: format_krw(final_tax),
        sales_amount: input.sales_amount,
        purchase_amount: input.purchase_amount,
        output_tax,
        input_tax,
        payable_tax,
        deductions,
        final_tax,
    }
}
