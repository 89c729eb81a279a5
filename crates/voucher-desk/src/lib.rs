//! Expense voucher intake, approval, and date-range reporting.
//!
//! All state is held by an explicitly owned [`vouchers::VoucherStore`]; a
//! session constructs one and threads it through whatever surface drives it.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod vouchers;
