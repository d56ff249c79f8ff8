//! Whole-notification parsing.

use chrono::NaiveDateTime;
use tracing::debug;

use super::amount::extract_amount;
use super::datetime::{extract_date_time, resolve_date_time};
use super::detect::{detect_card_company, detect_transaction_type};
use super::fields::{
    extract_approval_number, extract_balance, extract_card_holder, extract_cumulative,
    extract_installment,
};
use super::vendor::extract_vendor;
use crate::types::NotificationRecord;

/// Parse one card notification.
///
/// `now` is the processing time: it decides the year of the transaction and
/// stands in for the date/time when the text has none. Returns `None` for
/// blank text or when no non-zero amount can be found; every other missing
/// field degrades to `"unknown"` or `None`.
pub fn parse(text: &str, now: NaiveDateTime) -> Option<NotificationRecord> {
    if text.trim().is_empty() {
        return None;
    }

    let amount = extract_amount(text);
    if amount == 0 {
        debug!("no transaction amount in notification");
        return None;
    }

    let (date, time) = resolve_date_time(extract_date_time(text), now);

    Some(NotificationRecord {
        card_company: detect_card_company(text),
        transaction_type: detect_transaction_type(text),
        amount,
        vendor: extract_vendor(text),
        date,
        time,
        card_holder: extract_card_holder(text),
        approval_number: extract_approval_number(text),
        installment: extract_installment(text),
        cumulative: extract_cumulative(text),
        balance: extract_balance(text),
        raw: text.to_string(),
    })
}

/// [`parse`] against the current Seoul wall clock.
pub fn parse_now(text: &str) -> Option<NotificationRecord> {
    parse(text, taxkit_core::time::seoul_now())
}
