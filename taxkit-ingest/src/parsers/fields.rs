//! Optional metadata: card holder, running totals, installment, approval number.

use once_cell::sync::Lazy;
use regex::Regex;

use super::amount::parse_grouped;

static CARD_HOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([가-힣*]{2,4})님").unwrap());
static CUMULATIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"누적[\s:\-]?([0-9,]+)\s*원?").unwrap());
static BALANCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"잔액\s*([0-9,]+)\s*원?").unwrap());
static INSTALLMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]{1,2})\s*개월").unwrap());
static APPROVAL_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"승인번호?\s*:?\s*([0-9]{6,10})").unwrap());

fn first_capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)?.get(1).map(|m| m.as_str())
}

/// Masked holder name in front of `님`, e.g. `홍*동`.
pub fn extract_card_holder(text: &str) -> Option<String> {
    first_capture(&CARD_HOLDER_RE, text).map(str::to_string)
}

/// Issuer-reported running total of spend (누적).
pub fn extract_cumulative(text: &str) -> Option<i64> {
    first_capture(&CUMULATIVE_RE, text).and_then(parse_grouped)
}

/// Remaining balance (잔액), usually on check cards.
pub fn extract_balance(text: &str) -> Option<i64> {
    first_capture(&BALANCE_RE, text).and_then(parse_grouped)
}

/// Installment months; `일시불` anywhere means 0.
pub fn extract_installment(text: &str) -> Option<u32> {
    if text.contains("일시불") {
        return Some(0);
    }
    first_capture(&INSTALLMENT_RE, text).and_then(|m| m.parse().ok())
}

pub fn extract_approval_number(text: &str) -> Option<String> {
    first_capture(&APPROVAL_NUMBER_RE, text).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_holder() {
        assert_eq!(extract_card_holder("[삼성카드]\n홍*동님\n"), Some("홍*동".to_string()));
        assert_eq!(extract_card_holder("김**님 승인"), Some("김**".to_string()));
        assert_eq!(extract_card_holder("no holder"), None);
    }

    #[test]
    fn test_running_totals() {
        assert_eq!(extract_cumulative("누적 1,234,567원"), Some(1_234_567));
        assert_eq!(extract_cumulative("누적:2,500,000원"), Some(2_500_000));
        assert_eq!(extract_cumulative("누적-300원"), Some(300));
        assert_eq!(extract_balance("잔액 500,000원"), Some(500_000));
        assert_eq!(extract_balance("잔액500원"), Some(500));
        assert_eq!(extract_balance("45,000원"), None);
    }

    #[test]
    fn test_installment() {
        assert_eq!(extract_installment("45,000원 일시불"), Some(0));
        assert_eq!(extract_installment("450,000원 03개월"), Some(3));
        assert_eq!(extract_installment("12 개월"), Some(12));
        assert_eq!(extract_installment("45,000원"), None);
    }

    #[test]
    fn test_approval_number() {
        assert_eq!(extract_approval_number("승인번호 123456"), Some("123456".to_string()));
        assert_eq!(extract_approval_number("승인번호:98765432"), Some("98765432".to_string()));
        assert_eq!(extract_approval_number("승인 12345"), None);
    }
}
