//! Voucher intake, approval, and date-range reporting.
//!
//! [`VoucherStore`] is the single owner of voucher state. [`VoucherDesk`] wraps one
//! store for a running service session, and [`voucher_router`] exposes it over HTTP.

pub mod domain;
pub mod export;
pub mod panels;
pub mod report;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{DraftError, DraftField, Role, Voucher, VoucherDraft, VoucherId, VoucherStatus};
pub use export::{CsvReportExporter, ExportArtifact, ExportError, ReportExporter, REPORT_FILE_NAME};
pub use panels::{PendingEntry, RolePanel};
pub use report::{
    ReportRange, ReportRangeError, ReportRow, ReportSummary, VoucherReport, EMPTY_REPORT_MESSAGE,
};
pub use router::voucher_router;
pub use service::VoucherDesk;
pub use store::{ApprovalOutcome, VoucherStore};
