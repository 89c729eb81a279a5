use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::vouchers::{
    voucher_router, CsvReportExporter, ReportRange, VoucherDesk, VoucherDraft, VoucherStore,
};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn january() -> ReportRange {
    ReportRange::new(date(2024, 1, 1), date(2024, 1, 31))
}

pub(super) fn february() -> ReportRange {
    ReportRange::new(date(2024, 2, 1), date(2024, 2, 28))
}

pub(super) fn taxi() -> VoucherDraft {
    VoucherDraft::new("100", "Taxi", "2024-01-10")
}

pub(super) fn hotel() -> VoucherDraft {
    VoucherDraft::new("240.5", "Hotel, two nights", "2024-01-31")
}

pub(super) fn conference() -> VoucherDraft {
    VoucherDraft::new("75", "Conference pass", "2024-02-03")
}

/// Store holding taxi, hotel, and conference vouchers, in that order.
pub(super) fn seeded_store() -> VoucherStore {
    let mut store = VoucherStore::new();
    for draft in [taxi(), hotel(), conference()] {
        store.add_voucher(&draft).expect("seed voucher accepted");
    }
    store
}

pub(super) fn seeded_desk() -> Arc<VoucherDesk> {
    Arc::new(VoucherDesk::with_store(seeded_store(), CsvReportExporter))
}

pub(super) fn router_with(desk: Arc<VoucherDesk>) -> axum::Router {
    voucher_router(desk)
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_unprocessable(response: &Response) {
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
