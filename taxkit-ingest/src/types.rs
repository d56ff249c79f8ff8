use chrono::{NaiveDate, NaiveTime};
use serde::{Serialize, Serializer};
use std::fmt;

/// Card issuers recognized in notification text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardCompany {
    Samsung,
    Shinhan,
    Kookmin,
    Hyundai,
    Lotte,
    Hana,
    Bc,
    Nonghyup,
    Woori,
    Citi,
    Unknown,
}

impl CardCompany {
    /// Canonical Korean name, or `"unknown"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            CardCompany::Samsung => "삼성카드",
            CardCompany::Shinhan => "신한카드",
            CardCompany::Kookmin => "KB국민카드",
            CardCompany::Hyundai => "현대카드",
            CardCompany::Lotte => "롯데카드",
            CardCompany::Hana => "하나카드",
            CardCompany::Bc => "BC카드",
            CardCompany::Nonghyup => "NH농협카드",
            CardCompany::Woori => "우리카드",
            CardCompany::Citi => "씨티카드",
            CardCompany::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CardCompany {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CardCompany {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransactionType {
    #[serde(rename = "승인")]
    Approval,
    #[serde(rename = "취소")]
    Cancellation,
    #[serde(rename = "unknown")]
    Unknown,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Approval => "승인",
            TransactionType::Cancellation => "취소",
            TransactionType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Month/day/hour/minute as written in the notification; the year is
/// inferred later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeParts {
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

/// Normalized card transaction extracted from one notification.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    pub card_company: CardCompany,
    pub transaction_type: TransactionType,
    /// Always non-zero.
    pub amount: i64,
    /// Merchant text, or `"unknown"`.
    pub vendor: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Masked holder name such as `홍*동`.
    pub card_holder: Option<String>,
    pub approval_number: Option<String>,
    /// Installment months; 0 means lump sum (일시불).
    pub installment: Option<u32>,
    pub cumulative: Option<i64>,
    pub balance: Option<i64>,
    pub raw: String,
}

impl NotificationRecord {
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn time_string(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}
