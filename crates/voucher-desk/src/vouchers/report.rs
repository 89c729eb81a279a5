use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{parse_calendar_date, Voucher, VoucherStatus};
use super::store::VoucherStore;

/// Shown in place of rows when a report selects nothing.
pub const EMPTY_REPORT_MESSAGE: &str = "No vouchers found.";

/// Inclusive calendar-date window used to select vouchers for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parses both bounds as `YYYY-MM-DD`.
    ///
    /// A blank or malformed bound is rejected outright so a report is never built
    /// against a half-understood window. An inverted window is accepted and simply
    /// matches nothing.
    pub fn parse(start: &str, end: &str) -> Result<Self, ReportRangeError> {
        let start = parse_bound(start, ReportRangeError::MissingStart, |value| {
            ReportRangeError::InvalidStart { value }
        })?;
        let end = parse_bound(end, ReportRangeError::MissingEnd, |value| {
            ReportRangeError::InvalidEnd { value }
        })?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

fn parse_bound(
    raw: &str,
    missing: ReportRangeError,
    invalid: impl FnOnce(String) -> ReportRangeError,
) -> Result<NaiveDate, ReportRangeError> {
    if raw.trim().is_empty() {
        return Err(missing);
    }
    parse_calendar_date(raw).ok_or_else(|| invalid(raw.trim().to_string()))
}

/// Why a report window was refused before any filtering ran.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportRangeError {
    #[error("report start date is required")]
    MissingStart,
    #[error("report end date is required")]
    MissingEnd,
    #[error("report start date '{value}' is not a YYYY-MM-DD calendar date")]
    InvalidStart { value: String },
    #[error("report end date '{value}' is not a YYYY-MM-DD calendar date")]
    InvalidEnd { value: String },
}

/// One voucher in a report, with its status label and display line.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    #[serde(flatten)]
    pub voucher: Voucher,
    pub status: VoucherStatus,
    pub status_label: &'static str,
    pub line: String,
}

impl From<Voucher> for ReportRow {
    fn from(voucher: Voucher) -> Self {
        let status = voucher.status();
        let line = voucher.report_line();
        Self {
            voucher,
            status,
            status_label: status.label(),
            line,
        }
    }
}

/// Counts and amount total across the rows of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub total_amount: f64,
}

/// Vouchers selected by a [`ReportRange`], in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct VoucherReport {
    pub range: ReportRange,
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl VoucherReport {
    pub fn generate(store: &VoucherStore, range: ReportRange) -> Self {
        let rows: Vec<ReportRow> = store
            .filter_by_date_range(&range)
            .into_iter()
            .map(ReportRow::from)
            .collect();

        let summary = rows.iter().fold(ReportSummary::default(), |mut acc, row| {
            acc.total += 1;
            match row.status {
                VoucherStatus::Approved => acc.approved += 1,
                VoucherStatus::Pending => acc.pending += 1,
            }
            acc.total_amount += row.voucher.amount;
            acc
        });

        let message = rows.is_empty().then_some(EMPTY_REPORT_MESSAGE);

        Self {
            range,
            rows,
            summary,
            message,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn vouchers(&self) -> Vec<Voucher> {
        self.rows.iter().map(|row| row.voucher.clone()).collect()
    }
}
