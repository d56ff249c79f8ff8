use chrono::{NaiveDate, NaiveDateTime};
use taxkit_ingest::{parse, CardCompany, NotificationRecord, TransactionType};

fn processed_at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(11, 45, 0)
        .unwrap()
}

fn parse_march(text: &str) -> NotificationRecord {
    parse(text, processed_at(2026, 3, 2)).expect("notification should parse")
}

#[test]
fn test_shinhan_bracketed_lump_sum() {
    let r = parse_march("[Web발신]\n[신한카드]승인\n홍*동님\n02/28 15:30\n(일시불)45,000원\n스타벅스강남점");
    assert_eq!(r.card_company, CardCompany::Shinhan);
    assert_eq!(r.transaction_type, TransactionType::Approval);
    assert_eq!(r.amount, 45_000);
    assert_eq!(r.vendor, "스타벅스강남점");
    assert_eq!(r.installment, Some(0));
}

#[test]
fn test_shinhan_lump_sum_prefix() {
    let r = parse_march("[Web발신]\n[신한카드]승인\n홍*동님\n02/28 15:30\n일시불 45,000원\n스타벅스강남점");
    assert_eq!(r.amount, 45_000);
    assert_eq!(r.installment, Some(0));
    assert_eq!(r.vendor, "스타벅스강남점");
}

#[test]
fn test_kb_holder_line_with_type() {
    let r = parse_march("[Web발신]\n[KB국민카드]\n홍*동님 승인\n02/28 15:30\n45,000원\n스타벅스강남점\n일시불");
    assert_eq!(r.card_company, CardCompany::Kookmin);
    assert_eq!(r.transaction_type, TransactionType::Approval);
    assert_eq!(r.amount, 45_000);
    assert_eq!(r.vendor, "스타벅스강남점");
}

#[test]
fn test_hyundai_with_cumulative() {
    let r = parse_march("[Web발신]\n[현대카드]\n홍*동님 승인\n02/28 15:30\n120,000원\n교보문고광화문점\n일시불\n누적 2,500,000원");
    assert_eq!(r.card_company, CardCompany::Hyundai);
    assert_eq!(r.amount, 120_000);
    assert_eq!(r.vendor, "교보문고광화문점");
    assert_eq!(r.cumulative, Some(2_500_000));
}

#[test]
fn test_other_issuers() {
    let lotte = parse_march("[Web발신]\n[롯데카드]승인\n홍*동님\n03/15 12:00\n33,000원\n맥도날드강남점\n일시불");
    assert_eq!(lotte.card_company, CardCompany::Lotte);
    assert_eq!(lotte.amount, 33_000);
    assert_eq!(lotte.vendor, "맥도날드강남점");

    let hana = parse_march("[Web발신]\n[하나카드]\n홍*동님 승인\n02/28 15:30\n88,000원\n올리브영명동점\n일시불");
    assert_eq!(hana.card_company, CardCompany::Hana);
    assert_eq!(hana.amount, 88_000);

    let nh = parse_march("[Web발신]\n[NH농협]\n홍*동님 승인\n02/28 15:30\n15,500원\nCU편의점역삼역점\n일시불");
    assert_eq!(nh.card_company, CardCompany::Nonghyup);
    assert_eq!(nh.amount, 15_500);
    assert_eq!(nh.vendor, "CU편의점역삼역점");

    let bc = parse_march("[Web발신]\n[BC카드]\n홍*동님\n02/28 15:30 승인\n55,000원\n다이소강남점\n일시불");
    assert_eq!(bc.card_company, CardCompany::Bc);
    assert_eq!(bc.amount, 55_000);
}

#[test]
fn test_approval_number_and_large_amount() {
    let r = parse_march("[Web발신]\n[신한카드]승인\n홍*동님\n02/28 15:30\n45,000원\n스타벅스강남점\n승인번호 123456");
    assert_eq!(r.approval_number.as_deref(), Some("123456"));
    assert_eq!(r.vendor, "스타벅스강남점");

    let big = parse_march("[Web발신]\n[삼성카드]\n홍*동님\n02/28 15:30\n1,234,567원\n전자랜드마포점\n일시불");
    assert_eq!(big.amount, 1_234_567);
}

#[test]
fn test_unknown_type_for_ambiguous_text() {
    let r = parse_march("[Web발신]\n[삼성카드]\n홍*동님\n02/28 15:30\n10,000원\n알수없는가맹점");
    assert_eq!(r.transaction_type, TransactionType::Unknown);
    assert_eq!(r.vendor, "알수없는가맹점");
}

#[test]
fn test_check_card_balance() {
    let r = parse_march("[Web발신]\n[KB국민카드]\n홍*동님 사용\n02/28 15:30\n30,000원\n편의점\n일시불\n잔액 500,000원");
    assert_eq!(r.amount, 30_000);
    assert_eq!(r.balance, Some(500_000));
    assert_eq!(r.vendor, "편의점");
}

#[test]
fn test_cancel_and_approve_differ_only_in_type() {
    let base = "[Web발신]\n[삼성카드]\n홍*동님\n02/28 16:00\n45,000원\n스타벅스강남점\n";
    let approved = parse_march(&format!("{base}승인"));
    let cancelled = parse_march(&format!("{base}취소"));

    assert_eq!(approved.transaction_type, TransactionType::Approval);
    assert_eq!(cancelled.transaction_type, TransactionType::Cancellation);
    assert_eq!(
        NotificationRecord {
            transaction_type: TransactionType::Approval,
            raw: approved.raw.clone(),
            ..cancelled
        },
        approved
    );
}

#[test]
fn test_cancellation_wins_over_approval_keywords() {
    let r = parse_march("[삼성카드]승인취소\n02/28 16:00\n45,000원\n스타벅스강남점");
    assert_eq!(r.transaction_type, TransactionType::Cancellation);
}

#[test]
fn test_december_notification_read_in_january() {
    let r = parse(
        "[신한카드]승인 홍*동님 12/31 23:59 (일시불)8,800원 GS25",
        processed_at(2026, 1, 3),
    )
    .unwrap();
    assert_eq!(r.date, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    assert_eq!(r.time_string(), "23:59");

    let same_year = parse(
        "[신한카드]승인 홍*동님 12/31 23:59 (일시불)8,800원 GS25",
        processed_at(2026, 3, 3),
    )
    .unwrap();
    assert_eq!(same_year.date_string(), "2026-12-31");
}

#[test]
fn test_date_without_time_is_midnight() {
    let r = parse_march("[우리카드]\n02/14\n12,000원\n꽃집");
    assert_eq!(r.date_string(), "2026-02-14");
    assert_eq!(r.time_string(), "00:00");
}

#[test]
fn test_reparsing_raw_is_idempotent() {
    let texts = [
        "[Web발신]\n[삼성카드]\n홍*동님\n02/28 15:30\n45,000원\n스타벅스강남점\n일시불\n누적 1,234,567원",
        "[삼성카드] 홍*동님 승인 50,000원 스타벅스",
    ];
    let now = processed_at(2026, 3, 2);
    for text in texts {
        let first = parse(text, now).unwrap();
        let again = parse(&first.raw, now).unwrap();
        assert_eq!(first, again);
    }
}

#[test]
fn test_unparseable_inputs() {
    let now = processed_at(2026, 3, 2);
    assert!(parse("", now).is_none());
    assert!(parse("   ", now).is_none());
    assert!(parse("그냥 아무 텍스트", now).is_none());
    assert!(parse("파싱불가능한텍스트", now).is_none());
    assert!(parse("[삼성카드]\n누적 1,234,567원", now).is_none());
}
