use super::common::*;
use crate::vouchers::{
    ReportRange, ReportRangeError, VoucherReport, VoucherStatus, VoucherStore,
    EMPTY_REPORT_MESSAGE,
};

#[test]
fn parse_accepts_calendar_dates_with_whitespace() {
    let range = ReportRange::parse(" 2024-01-01", "2024-01-31 ").expect("valid range");
    assert_eq!(range, january());
}

#[test]
fn parse_rejects_blank_bounds() {
    assert_eq!(
        ReportRange::parse("", "2024-01-31"),
        Err(ReportRangeError::MissingStart)
    );
    assert_eq!(
        ReportRange::parse("2024-01-01", "  "),
        Err(ReportRangeError::MissingEnd)
    );
}

#[test]
fn parse_rejects_malformed_bounds_instead_of_guessing() {
    match ReportRange::parse("01/01/2024", "2024-01-31") {
        Err(ReportRangeError::InvalidStart { value }) => assert_eq!(value, "01/01/2024"),
        other => panic!("expected invalid start, got {other:?}"),
    }
    match ReportRange::parse("2024-01-01", "2024-13-01") {
        Err(ReportRangeError::InvalidEnd { value }) => assert_eq!(value, "2024-13-01"),
        other => panic!("expected invalid end, got {other:?}"),
    }
}

#[test]
fn inverted_range_matches_nothing() {
    let range = ReportRange::parse("2024-01-31", "2024-01-01").expect("inverted is accepted");
    assert!(range.is_inverted());
    assert!(seeded_store().filter_by_date_range(&range).is_empty());
}

#[test]
fn single_day_range_includes_that_day() {
    let day = date(2024, 1, 10);
    let range = ReportRange::new(day, day);
    let selected = seeded_store().filter_by_date_range(&range);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].description, "Taxi");
}

#[test]
fn report_summarises_rows_and_statuses() {
    let mut store = seeded_store();
    let taxi_id = store.vouchers()[0].id;
    store.approve_voucher(taxi_id);

    let report = VoucherReport::generate(&store, january());

    assert!(!report.is_empty());
    assert!(report.message.is_none());
    assert_eq!(report.summary.total, 2);
    assert_eq!(report.summary.approved, 1);
    assert_eq!(report.summary.pending, 1);
    assert!((report.summary.total_amount - 340.5).abs() < f64::EPSILON);

    assert_eq!(report.rows[0].status, VoucherStatus::Approved);
    assert_eq!(report.rows[0].status_label, "Approved");
    assert_eq!(report.rows[0].line, "Taxi - $100 on 2024-01-10 (Approved)");
    assert_eq!(report.rows[1].status_label, "Pending");
}

#[test]
fn empty_report_carries_message() {
    let report = VoucherReport::generate(&VoucherStore::new(), january());

    assert!(report.is_empty());
    assert_eq!(report.message, Some(EMPTY_REPORT_MESSAGE));
    assert_eq!(report.summary.total, 0);

    let json = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(json["message"], "No vouchers found.");
    assert_eq!(json["range"]["start"], "2024-01-01");
}

#[test]
fn report_rows_flatten_voucher_fields() {
    let report = VoucherReport::generate(&seeded_store(), february());
    let json = serde_json::to_value(&report.rows[0]).expect("row serializes");

    assert_eq!(json["description"], "Conference pass");
    assert_eq!(json["date"], "2024-02-03");
    assert_eq!(json["approved"], false);
    assert_eq!(json["status"], "pending");
}
