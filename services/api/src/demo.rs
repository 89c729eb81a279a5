use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;
use tracing::warn;
use voucher_desk::config::AppConfig;
use voucher_desk::error::AppError;
use voucher_desk::vouchers::{
    CsvReportExporter, ReportExporter, ReportRange, Role, RolePanel, VoucherDraft, VoucherReport,
    VoucherStore,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// First day of the report window (YYYY-MM-DD). Defaults to 2024-01-01.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) start: Option<NaiveDate>,
    /// Last day of the report window (YYYY-MM-DD). Defaults to 2024-01-31.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) end: Option<NaiveDate>,
    /// Write the filtered report as voucher_report.csv.
    #[arg(long)]
    pub(crate) export: bool,
    /// Directory for the exported report (defaults to APP_EXPORT_DIR).
    #[arg(long, requires = "export")]
    pub(crate) export_dir: Option<PathBuf>,
}

fn sample_drafts() -> Vec<VoucherDraft> {
    vec![
        VoucherDraft::new("100", "Taxi", "2024-01-10"),
        VoucherDraft::new("240.5", "Hotel, two nights", "2024-01-12"),
        VoucherDraft::new("", "Lunch with client", "2024-01-15"),
        VoucherDraft::new("75", "Conference pass", "2024-02-03"),
    ]
}

fn default_range() -> ReportRange {
    ReportRange::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap_or_default(),
    )
}

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let DemoArgs {
        start,
        end,
        export,
        export_dir,
    } = args;

    let defaults = default_range();
    let range = ReportRange::new(
        start.unwrap_or(defaults.start),
        end.unwrap_or(defaults.end),
    );

    let mut store = VoucherStore::new();
    let report = run_session(&mut store, range);

    if export {
        let directory = export_dir.unwrap_or_else(|| config.export.directory.clone());
        let path = CsvReportExporter.write_file(&report.vouchers(), &directory)?;
        println!("\nExported {} rows to {}", report.rows.len(), path.display());
    }

    Ok(())
}

/// Drives one submitter/approver session against `store` and prints each panel.
fn run_session(store: &mut VoucherStore, range: ReportRange) -> VoucherReport {
    println!("Voucher desk demo");

    println!("\n[{}] entering vouchers", Role::Submitter.label());
    for draft in sample_drafts() {
        match store.add_voucher(&draft) {
            Ok(voucher) => println!("- added #{}: {}", voucher.id, voucher.summary_line()),
            Err(err) => {
                warn!(error = %err, "demo draft refused");
                println!("- refused '{}': {}", draft.description, err);
            }
        }
    }

    println!("\n[{}] pending vouchers", Role::Approver.label());
    render_panel(&Role::Approver.panel(store));

    let next = store.pending_vouchers().first().map(|voucher| voucher.id);
    if let Some(id) = next {
        store.approve_voucher(id);
        println!("- approved #{id}");
    }

    let report = VoucherReport::generate(store, range);
    render_report(&report);
    report
}

fn render_panel(panel: &RolePanel) {
    match panel {
        RolePanel::EntryForm { fields, .. } => println!("- form fields: {}", fields.join(", ")),
        RolePanel::PendingApprovals { pending, .. } if pending.is_empty() => {
            println!("- nothing to approve")
        }
        RolePanel::PendingApprovals { pending, .. } => {
            for entry in pending {
                println!("- #{} {}", entry.id, entry.line);
            }
        }
    }
}

fn render_report(report: &VoucherReport) {
    println!(
        "\nReport results {} -> {}",
        report.range.start, report.range.end
    );

    if let Some(message) = report.message {
        println!("{message}");
        return;
    }

    for row in &report.rows {
        println!("- {}", row.line);
    }
    println!(
        "Total {:.2} across {} vouchers ({} approved, {} pending)",
        report.summary.total_amount,
        report.summary.total,
        report.summary.approved,
        report.summary.pending
    );
}
