//! 2026 tax deadline calendar with D-day countdowns and ICS export.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::time::days_until;

pub const CALENDAR_YEAR: i32 = 2026;

/// Shown when `--next` finds nothing left in the year.
pub const NO_REMAINING_MESSAGE: &str = "2026년 남은 세무 일정이 없습니다.";

/// Default number of deadlines returned by [`upcoming`].
pub const DEFAULT_UPCOMING_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxEventType {
    Vat,
    Withholding,
    Corporate,
    Insurance,
    Reporting,
}

impl TaxEventType {
    pub const ALL: [TaxEventType; 5] = [
        TaxEventType::Vat,
        TaxEventType::Withholding,
        TaxEventType::Corporate,
        TaxEventType::Insurance,
        TaxEventType::Reporting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaxEventType::Vat => "vat",
            TaxEventType::Withholding => "withholding",
            TaxEventType::Corporate => "corporate",
            TaxEventType::Insurance => "insurance",
            TaxEventType::Reporting => "reporting",
        }
    }
}

impl fmt::Display for TaxEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxEventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaxEventType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                format!("unknown event type '{s}' (expected vat|withholding|corporate|insurance|reporting)")
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxDeadline {
    #[serde(rename = "type")]
    pub kind: TaxEventType,
    pub name: &'static str,
    pub deadline: NaiveDate,
    #[serde(rename = "dDay")]
    pub d_day: i64,
    pub description: &'static str,
    pub preparation: &'static str,
}

struct Entry {
    kind: TaxEventType,
    name: &'static str,
    month: u32,
    day: u32,
    description: &'static str,
    preparation: &'static str,
}

const WITHHOLDING_DESC: &str = "전월 원천징수한 소득세, 지방소득세 신고납부";
const WITHHOLDING_PREP: &str = "원천징수이행상황신고서, 급여대장";
const INSURANCE_DESC: &str = "국민연금, 건강보험, 고용보험, 산재보험 납부";
const INSURANCE_PREP: &str = "4대보험 고지서 확인";
const VAT_PREP: &str = "매출·매입세금계산서, 신용카드매출전표, 현금영수증";

const fn withholding(name: &'static str, month: u32, day: u32) -> Entry {
    Entry {
        kind: TaxEventType::Withholding,
        name,
        month,
        day,
        description: WITHHOLDING_DESC,
        preparation: WITHHOLDING_PREP,
    }
}

const fn insurance(name: &'static str, month: u32, day: u32) -> Entry {
    Entry {
        kind: TaxEventType::Insurance,
        name,
        month,
        day,
        description: INSURANCE_DESC,
        preparation: INSURANCE_PREP,
    }
}

const fn vat(name: &'static str, month: u32, day: u32, description: &'static str) -> Entry {
    Entry {
        kind: TaxEventType::Vat,
        name,
        month,
        day,
        description,
        preparation: VAT_PREP,
    }
}

const fn other(
    kind: TaxEventType,
    name: &'static str,
    month: u32,
    day: u32,
    description: &'static str,
    preparation: &'static str,
) -> Entry {
    Entry { kind, name, month, day, description, preparation }
}

// Deadlines already shifted past weekends and holidays.
const ENTRIES: [Entry; 31] = [
    other(
        TaxEventType::Withholding,
        "원천세 신고납부 (12월분)",
        1,
        12,
        WITHHOLDING_DESC,
        "원천징수이행상황신고서, 급여대장, 원천징수영수증",
    ),
    vat("부가가치세 확정신고 (2기)", 1, 25, "7~12월 부가가치세 확정신고 및 납부"),
    withholding("원천세 신고납부 (1월분)", 2, 10),
    insurance("4대보험 납부 (1월분)", 2, 10),
    other(
        TaxEventType::Reporting,
        "지급명세서 제출 (근로·퇴직소득)",
        3,
        2,
        "전년도 근로소득, 퇴직소득 지급명세서 제출",
        "근로소득원천징수영수증, 퇴직소득원천징수영수증",
    ),
    withholding("원천세 신고납부 (2월분)", 3, 10),
    other(
        TaxEventType::Reporting,
        "지급명세서 제출 (사업·기타소득)",
        3,
        10,
        "전년도 사업소득, 기타소득 지급명세서 제출",
        "사업소득원천징수영수증, 기타소득원천징수영수증",
    ),
    insurance("4대보험 납부 (2월분)", 3, 10),
    other(
        TaxEventType::Corporate,
        "법인세 신고납부 (12월 결산)",
        3,
        31,
        "12월 결산법인 법인세 확정신고 및 납부",
        "재무제표, 세무조정계산서, 법인세 신고서",
    ),
    withholding("원천세 신고납부 (3월분)", 4, 10),
    insurance("4대보험 납부 (3월분)", 4, 10),
    vat("부가가치세 예정신고 (1기)", 4, 25, "1~3월 부가가치세 예정신고 및 납부"),
    withholding("원천세 신고납부 (4월분)", 5, 11),
    insurance("4대보험 납부 (4월분)", 5, 11),
    withholding("원천세 신고납부 (5월분)", 6, 10),
    insurance("4대보험 납부 (5월분)", 6, 10),
    withholding("원천세 신고납부 (6월분)", 7, 10),
    insurance("4대보험 납부 (6월분)", 7, 10),
    vat("부가가치세 확정신고 (1기)", 7, 25, "1~6월 부가가치세 확정신고 및 납부"),
    withholding("원천세 신고납부 (7월분)", 8, 10),
    insurance("4대보험 납부 (7월분)", 8, 10),
    other(
        TaxEventType::Corporate,
        "법인세 중간예납",
        8,
        31,
        "12월 결산법인 법인세 중간예납 신고납부",
        "중간예납세액 계산서, 가결산 재무제표 (선택)",
    ),
    withholding("원천세 신고납부 (8월분)", 9, 10),
    insurance("4대보험 납부 (8월분)", 9, 10),
    withholding("원천세 신고납부 (9월분)", 10, 12),
    insurance("4대보험 납부 (9월분)", 10, 12),
    vat("부가가치세 예정신고 (2기)", 10, 25, "7~9월 부가가치세 예정신고 및 납부"),
    withholding("원천세 신고납부 (10월분)", 11, 10),
    insurance("4대보험 납부 (10월분)", 11, 10),
    withholding("원천세 신고납부 (11월분)", 12, 10),
    insurance("4대보험 납부 (11월분)", 12, 10),
];

/// Every 2026 deadline in calendar order, with `d_day` counted from `today`.
pub fn calendar_2026(today: NaiveDate) -> Vec<TaxDeadline> {
    ENTRIES
        .iter()
        .filter_map(|e| {
            let deadline = NaiveDate::from_ymd_opt(CALENDAR_YEAR, e.month, e.day)?;
            Some(TaxDeadline {
                kind: e.kind,
                name: e.name,
                deadline,
                d_day: days_until(today, deadline),
                description: e.description,
                preparation: e.preparation,
            })
        })
        .collect()
}

/// Type and month filters. `month` is matched as a prefix of `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarFilter {
    pub kind: Option<TaxEventType>,
    pub month: Option<String>,
}

impl CalendarFilter {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.month.is_none()
    }

    pub fn apply(&self, deadlines: Vec<TaxDeadline>) -> Vec<TaxDeadline> {
        deadlines
            .into_iter()
            .filter(|d| self.kind.is_none_or(|k| d.kind == k))
            .filter(|d| {
                self.month
                    .as_deref()
                    .is_none_or(|m| d.deadline.format("%Y-%m-%d").to_string().starts_with(m))
            })
            .collect()
    }
}

/// Deadlines from today on, nearest first, at most `count` of them.
pub fn upcoming(deadlines: Vec<TaxDeadline>, count: usize) -> Vec<TaxDeadline> {
    let mut remaining: Vec<TaxDeadline> = deadlines.into_iter().filter(|d| d.d_day >= 0).collect();
    remaining.sort_by_key(|d| d.d_day);
    remaining.truncate(count);
    remaining
}

/// Render deadlines as an iCalendar document of all-day events.
pub fn deadlines_to_ics(deadlines: &[TaxDeadline]) -> String {
    let mut s = String::new();
    s.push_str("BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:-//taxkit//KO\n");

    for d in deadlines {
        let start = d.deadline.format("%Y%m%d");
        let end = (d.deadline + Duration::days(1)).format("%Y%m%d");

        s.push_str("BEGIN:VEVENT\n");
        s.push_str(&format!("UID:taxkit-{}-{}@taxkit\n", start, d.kind));
        s.push_str(&format!("DTSTART;VALUE=DATE:{}\n", start));
        s.push_str(&format!("DTEND;VALUE=DATE:{}\n", end));
        s.push_str(&format!("SUMMARY:{}\n", escape_ics(d.name)));
        s.push_str(&format!(
            "DESCRIPTION:{}\n",
            escape_ics(&format!("{}\n준비: {}", d.description, d.preparation))
        ));
        s.push_str(&format!("CATEGORIES:{}\n", d.kind));
        s.push_str("END:VEVENT\n");
    }

    s.push_str("END:VCALENDAR\n");
    s
}

fn escape_ics(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(';', "\\;")
}
