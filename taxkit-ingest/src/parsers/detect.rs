//! Card issuer and transaction type detection by keyword.

use crate::types::{CardCompany, TransactionType};

/// Issuers in priority order. Aliases can overlap, so the first issuer with
/// any matching keyword wins.
pub const COMPANY_KEYWORDS: [(CardCompany, &[&str]); 10] = [
    (CardCompany::Samsung, &["삼성카드", "삼성체크", "삼성법인", "삼성가족카드"]),
    (CardCompany::Shinhan, &["신한카드", "신한체크"]),
    (CardCompany::Kookmin, &["KB국민카드", "국민카드", "KB카드", "KB*카드", "[KB]"]),
    (CardCompany::Hyundai, &["현대카드"]),
    (CardCompany::Lotte, &["롯데카드"]),
    (CardCompany::Hana, &["하나카드", "하나SK", "KEB하나", "하나("]),
    (CardCompany::Bc, &["BC카드", "비씨카드", "BC("]),
    (CardCompany::Nonghyup, &["NH카드", "농협카드", "NH농협", "농협BC"]),
    (CardCompany::Woori, &["우리카드"]),
    (CardCompany::Citi, &["씨티카드", "씨티BC"]),
];

pub fn detect_card_company(text: &str) -> CardCompany {
    COMPANY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| text.contains(kw)))
        .map(|(company, _)| *company)
        .unwrap_or(CardCompany::Unknown)
}

/// `취소` anywhere wins over the approval keywords.
pub fn detect_transaction_type(text: &str) -> TransactionType {
    if text.contains("취소") {
        TransactionType::Cancellation
    } else if ["승인", "출금", "사용"].iter().any(|kw| text.contains(kw)) {
        TransactionType::Approval
    } else {
        TransactionType::Unknown
    }
}
