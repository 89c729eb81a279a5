use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use super::domain::Voucher;

/// Fixed name of the downloadable report.
pub const REPORT_FILE_NAME: &str = "voucher_report.csv";

const HEADER: [&str; 4] = ["Date", "Amount", "Description", "Status"];

/// Serializes a filtered voucher sequence into a spreadsheet file, one row per voucher.
pub trait ReportExporter: Send + Sync {
    fn file_name(&self) -> &'static str;

    fn content_type(&self) -> mime::Mime;

    fn write_report(&self, vouchers: &[Voucher], out: &mut dyn Write) -> Result<(), ExportError>;

    fn to_bytes(&self, vouchers: &[Voucher]) -> Result<Vec<u8>, ExportError> {
        let mut buffer = Vec::new();
        self.write_report(vouchers, &mut buffer)?;
        Ok(buffer)
    }

    /// Writes the report into `directory` under [`ReportExporter::file_name`],
    /// replacing any previous export.
    fn write_file(&self, vouchers: &[Voucher], directory: &Path) -> Result<PathBuf, ExportError> {
        let path = directory.join(self.file_name());
        let mut writer = BufWriter::new(File::create(&path)?);
        self.write_report(vouchers, &mut writer)?;
        writer.flush()?;
        Ok(path)
    }
}

/// Writes reports as CSV with a `Date,Amount,Description,Status` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvReportExporter;

#[derive(Serialize)]
struct ExportRow<'a> {
    date: NaiveDate,
    amount: String,
    description: &'a str,
    status: &'static str,
}

impl<'a> From<&'a Voucher> for ExportRow<'a> {
    fn from(voucher: &'a Voucher) -> Self {
        Self {
            date: voucher.date,
            amount: voucher.amount.to_string(),
            description: &voucher.description,
            status: voucher.status().label(),
        }
    }
}

impl ReportExporter for CsvReportExporter {
    fn file_name(&self) -> &'static str {
        REPORT_FILE_NAME
    }

    fn content_type(&self) -> mime::Mime {
        mime::TEXT_CSV_UTF_8
    }

    fn write_report(&self, vouchers: &[Voucher], out: &mut dyn Write) -> Result<(), ExportError> {
        // Header is written by hand so an empty report still carries it.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(out);

        writer.write_record(HEADER)?;
        for voucher in vouchers {
            writer.serialize(ExportRow::from(voucher))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// In-memory export ready to hand to a download response.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub content_type: mime::Mime,
    pub rows: usize,
    pub bytes: Vec<u8>,
}

/// Failure while encoding or writing an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to encode report rows: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
