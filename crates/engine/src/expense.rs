//! Expense records and their attachments.
use std::sync::Arc;

use chrono::NaiveDate;

use crate::{EngineError, ResultEngine};

/// Wire and storage format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Content type stored when the upload declares none.
pub const GENERIC_CONTENT_TYPE: &str = "application/octet-stream";

pub(crate) fn parse_date(raw: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        EngineError::InvalidInput("Invalid date format. Please use YYYY-MM-DD format.".to_string())
    })
}

pub(crate) fn check_amount(amount: f64) -> ResultEngine<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(EngineError::InvalidInput("Invalid amount".to_string()));
    }

    Ok(amount)
}

/// How often a recurring expense repeats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl TryFrom<&str> for Frequency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(EngineError::InvalidInput(
                "Invalid frequency. Please use daily, weekly, monthly or yearly.".to_string(),
            )),
        }
    }
}

/// A binary document tied to one expense.
///
/// Bytes sit behind an [`Arc`] so snapshots and clones share the payload
/// instead of copying it; the blob is freed with its last referencing
/// expense.
#[derive(Clone, Debug)]
pub struct Attachment {
    pub filename: Option<String>,
    pub content_type: String,
    pub bytes: Arc<[u8]>,
}

impl Attachment {
    /// Checks the declared content type and takes ownership of the bytes.
    ///
    /// A missing or empty declared type is stored as
    /// `application/octet-stream`. Anything else must be an `image/*`
    /// type or `application/pdf`.
    pub fn new(
        filename: Option<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> ResultEngine<Self> {
        let content_type = match content_type.as_deref().map(str::trim) {
            None | Some("") => GENERIC_CONTENT_TYPE.to_string(),
            Some(declared) if declared.starts_with("image/") || declared == "application/pdf" => {
                declared.to_string()
            }
            Some(declared) => return Err(EngineError::UnsupportedAttachment(declared.to_string())),
        };

        Ok(Self {
            filename,
            content_type,
            bytes: bytes.into(),
        })
    }
}

/// One dated entry of a tenant ledger.
#[derive(Clone, Debug)]
pub struct Expense {
    pub id: u64,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub amount: f64,
    pub is_recurring: bool,
    pub frequency: Option<Frequency>,
    pub attachment: Option<Attachment>,
}

/// Raw fields of an expense to add, before any validation.
#[derive(Clone, Debug, Default)]
pub struct NewExpense {
    pub date: String,
    pub amount: f64,
    pub description: Option<String>,
    pub is_recurring: bool,
    pub frequency: Option<String>,
    pub attachment: Option<NewAttachment>,
}

/// Raw attachment parts as read from the upload.
#[derive(Clone, Debug)]
pub struct NewAttachment {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Expense {
    /// Validates `new` and builds the record stored under `id`.
    ///
    /// A recurring expense must name one of the four frequencies; a
    /// one-off expense has any supplied frequency dropped, so `frequency`
    /// is `Some` exactly when `is_recurring` holds.
    pub fn new(id: u64, new: NewExpense) -> ResultEngine<Self> {
        let date = parse_date(&new.date)?;
        let amount = check_amount(new.amount)?;

        let frequency = if new.is_recurring {
            Some(Frequency::try_from(new.frequency.as_deref().unwrap_or(""))?)
        } else {
            None
        };

        let attachment = match new.attachment {
            Some(raw) => Some(Attachment::new(raw.filename, raw.content_type, raw.bytes)?),
            None => None,
        };

        Ok(Self {
            id,
            date,
            description: new.description,
            amount,
            is_recurring: new.is_recurring,
            frequency,
            attachment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_round_trips_through_str() {
        for raw in ["daily", "weekly", "monthly", "yearly"] {
            let frequency = Frequency::try_from(raw).unwrap();
            assert_eq!(frequency.as_str(), raw);
        }
    }

    #[test]
    fn unknown_frequency_is_rejected() {
        let result = Frequency::try_from("fortnightly");
        assert_eq!(
            result,
            Err(EngineError::InvalidInput(
                "Invalid frequency. Please use daily, weekly, monthly or yearly.".to_string()
            ))
        );
    }

    #[test]
    fn missing_content_type_becomes_generic() {
        let attachment = Attachment::new(Some("scan".to_string()), None, vec![0]).unwrap();
        assert_eq!(attachment.content_type, GENERIC_CONTENT_TYPE);

        let attachment = Attachment::new(None, Some("  ".to_string()), vec![0]).unwrap();
        assert_eq!(attachment.content_type, GENERIC_CONTENT_TYPE);
    }

    #[test]
    fn non_document_content_type_is_rejected() {
        let result = Attachment::new(None, Some("text/html".to_string()), vec![0]);
        assert_eq!(
            result.map(|a| a.content_type),
            Err(EngineError::UnsupportedAttachment("text/html".to_string()))
        );
    }

    #[test]
    fn one_off_expense_drops_supplied_frequency() {
        let expense = Expense::new(
            1,
            NewExpense {
                date: "2024-03-15".to_string(),
                amount: 9.99,
                frequency: Some("monthly".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert!(!expense.is_recurring);
        assert_eq!(expense.frequency, None);
    }

    #[test]
    fn recurring_expense_requires_a_frequency() {
        let result = Expense::new(
            1,
            NewExpense {
                date: "2024-03-15".to_string(),
                amount: 9.99,
                is_recurring: true,
                ..Default::default()
            },
        );

        assert_eq!(
            result.map(|e| e.id),
            Err(EngineError::InvalidInput(
                "Invalid frequency. Please use daily, weekly, monthly or yearly.".to_string()
            ))
        );
    }
}
