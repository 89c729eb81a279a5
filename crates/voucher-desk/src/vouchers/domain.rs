use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Calendar date format accepted from forms and query strings.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Store-assigned identifier. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoucherId(pub u64);

impl fmt::Display for VoucherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single expense claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    pub id: VoucherId,
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
    pub approved: bool,
}

impl Voucher {
    pub fn status(&self) -> VoucherStatus {
        VoucherStatus::from_approved(self.approved)
    }

    /// `Taxi - $100 on 2024-01-10`
    pub fn summary_line(&self) -> String {
        format!("{} - ${} on {}", self.description, self.amount, self.date)
    }

    /// Summary line followed by the status label, as shown in reports.
    pub fn report_line(&self) -> String {
        format!("{} ({})", self.summary_line(), self.status().label())
    }
}

/// Approval state as shown in reports and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherStatus {
    Pending,
    Approved,
}

impl VoucherStatus {
    pub const fn from_approved(approved: bool) -> Self {
        if approved {
            Self::Approved
        } else {
            Self::Pending
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
        }
    }
}

/// Display mode selector. It only decides which panel is rendered and grants
/// nothing: any caller can act in either mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Submitter,
    Approver,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Submitter => "Submitter",
            Self::Approver => "Approver",
        }
    }
}

/// Raw entry form contents. Absent and `null` fields deserialize as empty
/// strings; the amount may also arrive as a JSON number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherDraft {
    #[serde(default, deserialize_with = "amount_as_text")]
    pub amount: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountInput {
    Text(String),
    Integer(i64),
    Decimal(f64),
}

fn amount_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<AmountInput>::deserialize(deserializer)? {
        None => String::new(),
        Some(AmountInput::Text(text)) => text,
        Some(AmountInput::Integer(value)) => value.to_string(),
        Some(AmountInput::Decimal(value)) => value.to_string(),
    };
    Ok(text)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl VoucherDraft {
    pub fn new(
        amount: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            description: description.into(),
            date: date.into(),
        }
    }

    pub(crate) fn validate(&self) -> Result<ValidatedDraft, DraftError> {
        let amount = required(&self.amount, DraftField::Amount)?;
        let description = required(&self.description, DraftField::Description)?;
        let date = required(&self.date, DraftField::Date)?;

        let amount = amount
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| DraftError::InvalidAmount {
                value: amount.to_string(),
            })?;
        let date = parse_calendar_date(date).ok_or_else(|| DraftError::InvalidDate {
            value: date.to_string(),
        })?;

        Ok(ValidatedDraft {
            amount,
            description: description.to_string(),
            date,
        })
    }
}

fn required(value: &str, field: DraftField) -> Result<&str, DraftError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DraftError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

#[derive(Debug)]
pub(crate) struct ValidatedDraft {
    pub(crate) amount: f64,
    pub(crate) description: String,
    pub(crate) date: NaiveDate,
}

/// Entry form field named by a refused draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Amount,
    Description,
    Date,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Amount => "amount",
            Self::Description => "description",
            Self::Date => "date",
        };
        f.write_str(name)
    }
}

/// Reasons a draft was refused. The store is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(DraftField),
    #[error("amount '{value}' is not a number")]
    InvalidAmount { value: String },
    #[error("date '{value}' is not a YYYY-MM-DD calendar date")]
    InvalidDate { value: String },
}

impl DraftError {
    pub fn field(&self) -> DraftField {
        match self {
            Self::MissingField(field) => *field,
            Self::InvalidAmount { .. } => DraftField::Amount,
            Self::InvalidDate { .. } => DraftField::Date,
        }
    }
}
