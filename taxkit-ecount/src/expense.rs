//! Registering a card expense as an Ecount purchase slip.

use chrono::NaiveDate;
use serde::Serialize;
use taxkit_core::money::{format_krw, split_vat};
use tracing::info;

use crate::client::{EcountClient, PurchaseItem, PurchaseSlipRequest};
use crate::error::EcountError;
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseArgs {
    pub date: NaiveDate,
    /// Paid amount; VAT included unless `vat_included` is false.
    pub amount: i64,
    pub vendor: String,
    pub description: String,
    /// Who used the card (대표, 직원명); prefixed to the slip description.
    pub user: Option<String>,
    pub card_company: Option<String>,
    pub card_number: Option<String>,
    pub approval_number: Option<String>,
    /// Account title such as 접대비 or 복리후생비.
    pub account_code: Option<String>,
    pub vat_included: bool,
}

impl ExpenseArgs {
    /// Card user, ignoring a blank one.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    /// Description as written on the slip: `[user] description`.
    pub fn slip_description(&self) -> String {
        match self.user() {
            Some(user) => format!("[{user}] {}", self.description),
            None => self.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResult {
    pub success: bool,
    pub date: NaiveDate,
    pub vendor: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub supply_amount: i64,
    pub vat_amount: i64,
    pub total_amount: i64,
    pub supply_amount_formatted: String,
    pub vat_amount_formatted: String,
    pub total_amount_formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_number: Option<String>,
}

/// Split VAT, log in and save a one-line purchase slip.
pub async fn register_expense<T: Transport>(
    client: &EcountClient<T>,
    args: &ExpenseArgs,
) -> Result<ExpenseResult, EcountError> {
    let split = split_vat(args.amount, args.vat_included);
    let total_amount = split.total();

    let session = client.login().await?;

    let request = PurchaseSlipRequest {
        slip_date: args.date,
        vendor_name: args.vendor.clone(),
        items: vec![PurchaseItem {
            description: args.slip_description(),
            amount: split.supply,
            vat_amount: split.vat,
            account_code: args.account_code.clone(),
        }],
        card_company_code: args.card_company.clone(),
        card_number: args.card_number.clone(),
        approval_number: args.approval_number.clone(),
        approval_date: Some(args.date),
    };
    client.create_purchase_slip(&session, &request).await?;
    info!(date = %args.date, total_amount, "expense registered");

    Ok(ExpenseResult {
        success: true,
        date: args.date,
        vendor: args.vendor.clone(),
        description: args.description.clone(),
        user: args.user().map(str::to_string),
        supply_amount: split.supply,
        vat_amount: split.vat,
        total_amount,
        supply_amount_formatted: format_krw(split.supply),
        vat_amount_formatted: format_krw(split.vat),
        total_amount_formatted: format_krw(total_amount),
        card_company: args.card_company.clone(),
        approval_number: args.approval_number.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(user: Option<&str>) -> ExpenseArgs {
        ExpenseArgs {
            date: NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
            amount: 45_000,
            vendor: "스타벅스".into(),
            description: "회의 커피".into(),
            user: user.map(str::to_string),
            card_company: None,
            card_number: None,
            approval_number: None,
            account_code: None,
            vat_included: true,
        }
    }

    #[test]
    fn test_slip_description() {
        assert_eq!(args(Some("대표")).slip_description(), "[대표] 회의 커피");
        assert_eq!(args(None).slip_description(), "회의 커피");
        assert_eq!(args(Some(" 대표 ")).slip_description(), "[대표] 회의 커피");
    }

    #[test]
    fn test_blank_user_is_dropped() {
        for blank in ["", "   "] {
            let a = args(Some(blank));
            assert_eq!(a.user(), None);
            assert_eq!(a.slip_description(), "회의 커피");
        }
    }
}
