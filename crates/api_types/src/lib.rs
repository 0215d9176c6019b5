use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How often a recurring expense repeats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

pub mod expense {
    use super::*;

    /// One ledger expense as served to clients.
    ///
    /// Attachment bytes never travel with the record; only the stored
    /// filename and content type do. The bytes have their own endpoint.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: u64,
        /// Calendar date in `YYYY-MM-DD` form.
        pub date: NaiveDate,
        pub description: Option<String>,
        pub amount: f64,
        pub is_recurring: bool,
        pub frequency: Option<Frequency>,
        pub attachment_filename: Option<String>,
        pub attachment_content_type: Option<String>,
    }
}

pub mod recurring {
    use super::*;

    /// One recurring-expense definition as served to clients.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecurringView {
        pub id: u64,
        /// Calendar date in `YYYY-MM-DD` form.
        pub start_date: NaiveDate,
        pub description: Option<String>,
        pub amount: f64,
        pub frequency: Frequency,
    }
}

pub mod share {
    use super::*;

    /// Response body for a newly minted share link.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShareCreated {
        pub token: String,
    }
}
