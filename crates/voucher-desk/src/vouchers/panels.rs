use serde::Serialize;

use super::domain::{Role, VoucherId};
use super::store::VoucherStore;

/// What a display mode renders. Selecting a panel is not an authorization check.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum RolePanel {
    EntryForm {
        role: Role,
        role_label: &'static str,
        fields: [&'static str; 3],
    },
    PendingApprovals {
        role: Role,
        role_label: &'static str,
        pending: Vec<PendingEntry>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingEntry {
    pub id: VoucherId,
    pub line: String,
}

impl Role {
    pub fn panel(self, store: &VoucherStore) -> RolePanel {
        match self {
            Role::Submitter => RolePanel::EntryForm {
                role: self,
                role_label: self.label(),
                fields: ["amount", "description", "date"],
            },
            Role::Approver => RolePanel::PendingApprovals {
                role: self,
                role_label: self.label(),
                pending: store
                    .pending_vouchers()
                    .into_iter()
                    .map(|voucher| PendingEntry {
                        id: voucher.id,
                        line: voucher.summary_line(),
                    })
                    .collect(),
            },
        }
    }
}
