//! Transaction amount extraction.
//!
//! Notifications often carry a running total (누적) or remaining balance
//! (잔액) next to the charged amount; both are excluded.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Which strategy produced an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountRule {
    /// `45,000원` at the start of a line
    LineStart,
    /// `(일시불)45,000원`
    BracketedLumpSum,
    /// `일시불 45,000원`
    LumpSumPrefix,
    /// `45,000원 스타벅스` anywhere in a line
    MidLine,
    /// first won amount in the whole text once 누적/잔액 figures are removed
    Fallback,
}

static LINE_START_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9,]+)\s*원").unwrap());
static BRACKETED_LUMP_SUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(일시불\)\s*([0-9,]+)\s*원").unwrap());
static LUMP_SUM_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"일시불\s*([0-9,]+)\s*원").unwrap());
static MID_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9,]+)\s*원[\s(]").unwrap());

static CUMULATIVE_FIGURE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"누적[\s:\-]?[0-9,]+원?").unwrap());
static BALANCE_FIGURE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"잔액[0-9,\s]+원?").unwrap());
static ANY_WON_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9,]+)\s*원").unwrap());

/// Per-line strategies, tried in order on every line.
static LINE_RULES: Lazy<[(AmountRule, &'static Regex); 4]> = Lazy::new(|| {
    [
        (AmountRule::LineStart, &*LINE_START_RE),
        (AmountRule::BracketedLumpSum, &*BRACKETED_LUMP_SUM_RE),
        (AmountRule::LumpSumPrefix, &*LUMP_SUM_PREFIX_RE),
        (AmountRule::MidLine, &*MID_LINE_RE),
    ]
});

/// Parse a digit run with thousands separators, e.g. `"1,234,567"`.
///
/// Returns `None` when nothing but separators was captured or the value does
/// not fit in an `i64`.
pub fn parse_grouped(digits: &str) -> Option<i64> {
    let cleaned: String = digits.chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

fn capture_amount(re: &Regex, haystack: &str) -> Option<i64> {
    re.captures(haystack)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_grouped(m.as_str()))
}

fn is_running_total_line(line: &str) -> bool {
    line.starts_with("누적") || line.starts_with("잔액") || line.contains("누적")
}

/// Amount and the strategy that found it; first success wins.
pub fn extract_amount_with_rule(text: &str) -> Option<(i64, AmountRule)> {
    for line in text.lines().map(str::trim) {
        if is_running_total_line(line) {
            continue;
        }
        for (rule, re) in LINE_RULES.iter() {
            if let Some(amount) = capture_amount(re, line) {
                return Some((amount, *rule));
            }
        }
    }

    let without_cumulative = CUMULATIVE_FIGURE_RE.replace_all(text, "");
    let cleaned = BALANCE_FIGURE_RE.replace_all(&without_cumulative, "");
    capture_amount(&ANY_WON_RE, &cleaned).map(|amount| (amount, AmountRule::Fallback))
}

/// Charged amount in won, or 0 when the text names none.
pub fn extract_amount(text: &str) -> i64 {
    match extract_amount_with_rule(text) {
        Some((amount, rule)) => {
            debug!(amount, ?rule, "amount matched");
            amount
        }
        None => 0,
    }
}
