use super::domain::{DraftError, Voucher, VoucherDraft, VoucherId};
use super::report::ReportRange;

/// Ordered, in-memory voucher ledger for one session.
///
/// Vouchers are kept in insertion order and are never removed. The only mutation
/// after creation is the one-way flip of `approved` to `true`.
#[derive(Debug, Clone, Default)]
pub struct VoucherStore {
    vouchers: Vec<Voucher>,
    last_id: u64,
}

/// Result of an approval request. None of the variants is an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ApprovalOutcome {
    Approved(Voucher),
    AlreadyApproved(Voucher),
    NotFound(VoucherId),
}

impl ApprovalOutcome {
    pub fn voucher(&self) -> Option<&Voucher> {
        match self {
            Self::Approved(voucher) | Self::AlreadyApproved(voucher) => Some(voucher),
            Self::NotFound(_) => None,
        }
    }

    pub fn voucher_id(&self) -> VoucherId {
        match self {
            Self::Approved(voucher) | Self::AlreadyApproved(voucher) => voucher.id,
            Self::NotFound(id) => *id,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Approved(_) => "approved",
            Self::AlreadyApproved(_) => "already_approved",
            Self::NotFound(_) => "not_found",
        }
    }
}

impl VoucherStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pending voucher built from `draft`, or refuses it without
    /// touching the store.
    pub fn add_voucher(&mut self, draft: &VoucherDraft) -> Result<Voucher, DraftError> {
        let validated = draft.validate()?;

        self.last_id += 1;
        let voucher = Voucher {
            id: VoucherId(self.last_id),
            amount: validated.amount,
            description: validated.description,
            date: validated.date,
            approved: false,
        };
        self.vouchers.push(voucher.clone());
        Ok(voucher)
    }

    pub fn approve_voucher(&mut self, id: VoucherId) -> ApprovalOutcome {
        match self.vouchers.iter_mut().find(|voucher| voucher.id == id) {
            Some(voucher) if voucher.approved => ApprovalOutcome::AlreadyApproved(voucher.clone()),
            Some(voucher) => {
                voucher.approved = true;
                ApprovalOutcome::Approved(voucher.clone())
            }
            None => ApprovalOutcome::NotFound(id),
        }
    }

    pub fn pending_vouchers(&self) -> Vec<Voucher> {
        self.vouchers
            .iter()
            .filter(|voucher| !voucher.approved)
            .cloned()
            .collect()
    }

    /// Vouchers dated within `range`, both ends inclusive, in insertion order.
    pub fn filter_by_date_range(&self, range: &ReportRange) -> Vec<Voucher> {
        self.vouchers
            .iter()
            .filter(|voucher| range.contains(voucher.date))
            .cloned()
            .collect()
    }

    pub fn vouchers(&self) -> &[Voucher] {
        &self.vouchers
    }

    pub fn get(&self, id: VoucherId) -> Option<&Voucher> {
        self.vouchers.iter().find(|voucher| voucher.id == id)
    }

    pub fn len(&self) -> usize {
        self.vouchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vouchers.is_empty()
    }

    pub fn approved_count(&self) -> usize {
        self.vouchers.iter().filter(|voucher| voucher.approved).count()
    }
}
