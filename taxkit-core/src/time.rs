//! Time utilities: the processing clock in a configured IANA timezone.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Timezone every "now" is read in unless configured otherwise.
pub const DEFAULT_TIMEZONE: &str = "Asia/Seoul";

/// Parse an IANA timezone name like "Asia/Seoul".
pub fn parse_timezone(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// Current wall-clock time in `tz`, without offset.
pub fn local_now(tz: Tz) -> NaiveDateTime {
    Utc::now().with_timezone(&tz).naive_local()
}

/// Current wall-clock time in Seoul.
pub fn seoul_now() -> NaiveDateTime {
    local_now(chrono_tz::Asia::Seoul)
}

/// Whole days from `today` to `target`; negative once `target` has passed.
pub fn days_until(today: NaiveDate, target: NaiveDate) -> i64 {
    (target - today).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Asia/Seoul").unwrap(), chrono_tz::Asia::Seoul);
        assert!(parse_timezone("Mars/Olympus").is_err());
    }

    #[test]
    fn test_days_until() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
        let march = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(days_until(today, march), 2);
        assert_eq!(days_until(march, today), -2);
        assert_eq!(days_until(today, today), 0);
    }
}
