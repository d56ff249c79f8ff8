//! Transaction date/time extraction and year inference.
//!
//! Notifications never carry a year, so it is inferred from the processing
//! clock.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::types::DateTimeParts;

static SLASH_DATE_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{1,2})/([0-9]{1,2})\s+([0-9]{2}):([0-9]{2})").unwrap());
static KOREAN_DATE_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{1,2})월\s*([0-9]{1,2})일\s*([0-9]{2}):([0-9]{2})").unwrap()
});
static SLASH_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{1,2})/([0-9]{1,2})").unwrap());

fn group(caps: &Captures<'_>, i: usize) -> Option<u32> {
    caps.get(i)?.as_str().parse().ok()
}

fn full_parts(caps: Captures<'_>) -> Option<DateTimeParts> {
    Some(DateTimeParts {
        month: group(&caps, 1)?,
        day: group(&caps, 2)?,
        hour: group(&caps, 3)?,
        minute: group(&caps, 4)?,
    })
}

/// First of `MM/DD HH:MM`, `M월D일 HH:MM`, then `MM/DD` at midnight.
///
/// Numbers are passed through as written; range checks happen in
/// [`resolve_date_time`].
pub fn extract_date_time(text: &str) -> Option<DateTimeParts> {
    if let Some(caps) = SLASH_DATE_TIME_RE.captures(text) {
        return full_parts(caps);
    }
    if let Some(caps) = KOREAN_DATE_TIME_RE.captures(text) {
        return full_parts(caps);
    }
    let caps = SLASH_DATE_RE.captures(text)?;
    Some(DateTimeParts {
        month: group(&caps, 1)?,
        day: group(&caps, 2)?,
        hour: 0,
        minute: 0,
    })
}

/// A December transaction seen in January or February belongs to last year.
pub fn infer_year(month: u32, today: NaiveDate) -> i32 {
    if month == 12 && today.month() <= 2 {
        today.year() - 1
    } else {
        today.year()
    }
}

/// `now` truncated to the minute.
fn now_parts(now: NaiveDateTime) -> (NaiveDate, NaiveTime) {
    let time = NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now.time());
    (now.date(), time)
}

/// Calendar date and clock time for the extracted parts, or `now` when the
/// text had no date or named an impossible one (e.g. `13/40`).
pub fn resolve_date_time(
    parts: Option<DateTimeParts>,
    now: NaiveDateTime,
) -> (NaiveDate, NaiveTime) {
    let Some(p) = parts else {
        debug!(%now, "no date in notification; using current time");
        return now_parts(now);
    };

    let year = infer_year(p.month, now.date());
    let date = NaiveDate::from_ymd_opt(year, p.month, p.day);
    let time = NaiveTime::from_hms_opt(p.hour, p.minute, 0);
    match (date, time) {
        (Some(date), Some(time)) => (date, time),
        _ => {
            warn!(
                month = p.month,
                day = p.day,
                hour = p.hour,
                minute = p.minute,
                "notification date out of range; using current time"
            );
            now_parts(now)
        }
    }
}
