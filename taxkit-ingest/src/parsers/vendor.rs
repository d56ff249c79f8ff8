//! Merchant name extraction.
//!
//! Multi-line notifications put the merchant on its own line, so every line
//! that looks like a known field (issuer tag, holder, date, amount, totals) is
//! skipped and the first remaining line is taken. Single-line notifications
//! fall back to the text right after the amount.

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};

pub const UNKNOWN_VENDOR: &str = "unknown";

static KNOWN_FIELD_LINES: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"^\[Web발신\]$",
        r"^\(Web발신\)$",
        r"^\[.*카드\]",
        r"카드",
        r"은행",
        r"님\s*(승인|취소|사용|출금)?$",
        r"^[0-9]{1,2}/[0-9]{1,2}\s+[0-9]{2}:[0-9]{2}$",
        r"^[0-9]{1,2}/[0-9]{1,2}$",
        r"^[0-9,]+\s*원",
        r"^일시불",
        r"^\(일시불\)",
        r"^누적",
        r"^잔액",
        r"^승인$",
        r"^취소$",
        r"^체크카드",
        r"^[0-9]{6,}",
        r"^[*0-9]{4,}$",
    ])
    .unwrap()
});

static TRAILING_TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*(취소|사용|승인)\s*$").unwrap());

static ONE_LINE_VENDOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9,]+\s*원\s+([가-힣a-zA-Z0-9()\s]{2,20}?)(?:\s+누적|\s*$)").unwrap()
});

fn long_enough(s: &str) -> bool {
    s.chars().count() >= 2
}

pub fn extract_vendor(text: &str) -> String {
    let candidate = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !KNOWN_FIELD_LINES.is_match(line))
        .filter(|line| long_enough(line))
        .map(|line| TRAILING_TYPE_RE.replace(line, "").trim().to_string())
        .find(|cleaned| long_enough(cleaned));
    if let Some(vendor) = candidate {
        return vendor;
    }

    let one_line = text.replace('\n', " ");
    ONE_LINE_VENDOR_RE
        .captures(&one_line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| UNKNOWN_VENDOR.to_string())
}
