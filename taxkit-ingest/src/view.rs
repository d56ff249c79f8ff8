//! JSON shape printed for a parsed notification: Korean labels for people,
//! canonical keys for scripts.

use serde::Serialize;
use taxkit_core::money::format_krw;

use crate::types::{CardCompany, NotificationRecord, TransactionType};

pub const PARSE_FAILURE_MESSAGE: &str = "카드 승인 문자를 파싱할 수 없습니다.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationView {
    #[serde(rename = "카드사")]
    pub card_company_label: CardCompany,
    #[serde(rename = "유형")]
    pub type_label: TransactionType,
    #[serde(rename = "금액")]
    pub amount_label: String,
    #[serde(rename = "가맹점")]
    pub vendor_label: String,
    #[serde(rename = "날짜")]
    pub date_label: String,
    #[serde(rename = "시간")]
    pub time_label: String,
    #[serde(rename = "카드소유자", skip_serializing_if = "Option::is_none")]
    pub card_holder: Option<String>,
    #[serde(rename = "승인번호", skip_serializing_if = "Option::is_none")]
    pub approval_number: Option<String>,
    #[serde(rename = "할부", skip_serializing_if = "Option::is_none")]
    pub installment: Option<String>,
    #[serde(rename = "누적사용액", skip_serializing_if = "Option::is_none")]
    pub cumulative: Option<String>,
    #[serde(rename = "잔액", skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
    pub amount: i64,
    pub vendor: String,
    pub date: String,
    pub time: String,
    #[serde(rename = "cardCompany")]
    pub card_company: CardCompany,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

fn installment_label(months: u32) -> String {
    if months == 0 {
        "일시불".to_string()
    } else {
        format!("{months}개월")
    }
}

impl From<&NotificationRecord> for NotificationView {
    fn from(r: &NotificationRecord) -> Self {
        let date = r.date_string();
        let time = r.time_string();
        Self {
            card_company_label: r.card_company,
            type_label: r.transaction_type,
            amount_label: format_krw(r.amount),
            vendor_label: r.vendor.clone(),
            date_label: date.clone(),
            time_label: time.clone(),
            card_holder: r.card_holder.clone(),
            approval_number: r.approval_number.clone(),
            installment: r.installment.map(installment_label),
            cumulative: r.cumulative.map(format_krw),
            balance: r.balance.map(format_krw),
            amount: r.amount,
            vendor: r.vendor.clone(),
            date,
            time,
            card_company: r.card_company,
            transaction_type: r.transaction_type,
        }
    }
}

/// Printed to stderr when a notification cannot be parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseFailure {
    pub error: bool,
    pub message: &'static str,
    pub raw: String,
}

impl ParseFailure {
    pub fn new(raw: &str) -> Self {
        Self {
            error: true,
            message: PARSE_FAILURE_MESSAGE,
            raw: raw.to_string(),
        }
    }
}
