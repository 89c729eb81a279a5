use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use super::domain::{DraftError, Role, Voucher, VoucherDraft, VoucherId};
use super::export::{CsvReportExporter, ExportArtifact, ExportError, ReportExporter};
use super::panels::RolePanel;
use super::report::{ReportRange, VoucherReport};
use super::store::{ApprovalOutcome, VoucherStore};

/// Session-scoped service sharing one [`VoucherStore`] between request handlers.
///
/// Every operation takes the lock for its own duration only, so each one
/// observes and leaves the store in a consistent state.
pub struct VoucherDesk<E = CsvReportExporter> {
    store: Mutex<VoucherStore>,
    exporter: E,
}

impl Default for VoucherDesk<CsvReportExporter> {
    fn default() -> Self {
        Self::new(CsvReportExporter)
    }
}

impl<E> VoucherDesk<E>
where
    E: ReportExporter + 'static,
{
    pub fn new(exporter: E) -> Self {
        Self::with_store(VoucherStore::new(), exporter)
    }

    pub fn with_store(store: VoucherStore, exporter: E) -> Self {
        Self {
            store: Mutex::new(store),
            exporter,
        }
    }

    // Store operations never panic halfway through a mutation, so a poisoned
    // lock still guards consistent data.
    fn store(&self) -> MutexGuard<'_, VoucherStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn submit(&self, draft: &VoucherDraft) -> Result<Voucher, DraftError> {
        match self.store().add_voucher(draft) {
            Ok(voucher) => {
                info!(voucher_id = %voucher.id, date = %voucher.date, "voucher submitted");
                Ok(voucher)
            }
            Err(err) => {
                warn!(field = %err.field(), error = %err, "voucher draft refused");
                Err(err)
            }
        }
    }

    pub fn approve(&self, id: VoucherId) -> ApprovalOutcome {
        let outcome = self.store().approve_voucher(id);
        match &outcome {
            ApprovalOutcome::Approved(_) => info!(voucher_id = %id, "voucher approved"),
            ApprovalOutcome::AlreadyApproved(_) => {
                debug!(voucher_id = %id, "voucher was already approved")
            }
            ApprovalOutcome::NotFound(_) => {
                debug!(voucher_id = %id, "approval for unknown voucher ignored")
            }
        }
        outcome
    }

    pub fn vouchers(&self) -> Vec<Voucher> {
        self.store().vouchers().to_vec()
    }

    pub fn pending(&self) -> Vec<Voucher> {
        self.store().pending_vouchers()
    }

    pub fn panel(&self, role: Role) -> RolePanel {
        role.panel(&self.store())
    }

    pub fn report(&self, range: ReportRange) -> VoucherReport {
        let report = VoucherReport::generate(&self.store(), range);
        debug!(
            start = %range.start,
            end = %range.end,
            rows = report.rows.len(),
            "voucher report generated"
        );
        report
    }

    pub fn export(&self, range: &ReportRange) -> Result<ExportArtifact, ExportError> {
        let vouchers = self.store().filter_by_date_range(range);
        let bytes = self.exporter.to_bytes(&vouchers)?;
        info!(
            rows = vouchers.len(),
            file = self.exporter.file_name(),
            "voucher report exported"
        );

        Ok(ExportArtifact {
            file_name: self.exporter.file_name(),
            content_type: self.exporter.content_type(),
            rows: vouchers.len(),
            bytes,
        })
    }

    pub fn export_to_dir(
        &self,
        range: &ReportRange,
        directory: &Path,
    ) -> Result<PathBuf, ExportError> {
        let vouchers = self.store().filter_by_date_range(range);
        let path = self.exporter.write_file(&vouchers, directory)?;
        info!(rows = vouchers.len(), path = %path.display(), "voucher report written");
        Ok(path)
    }
}
