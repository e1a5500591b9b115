//! Ledger entry domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A posted ledger line as returned by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// The account affected by this entry.
    pub account: String,
    /// Posting date.
    pub date: NaiveDate,
    /// Debit amount (missing values count as zero).
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount (missing values count as zero).
    #[serde(default)]
    pub credit: Decimal,
    /// Customer or supplier, if any.
    #[serde(default)]
    pub party: Option<String>,
    /// Source document type (e.g. "SalesInvoice").
    #[serde(default)]
    pub reference_type: Option<String>,
    /// Source document name.
    #[serde(default)]
    pub reference_name: Option<String>,
    /// Whether the posting has been reverted.
    #[serde(default)]
    pub reverted: bool,
}

impl LedgerEntry {
    /// Creates an entry with no party or reference metadata.
    #[must_use]
    pub fn new(account: impl Into<String>, date: NaiveDate, debit: Decimal, credit: Decimal) -> Self {
        Self {
            account: account.into(),
            date,
            debit,
            credit,
            party: None,
            reference_type: None,
            reference_name: None,
            reverted: false,
        }
    }
}

/// Filter for the bulk ledger query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerQuery {
    /// Inclusive lower bound.
    pub from_date: NaiveDate,
    /// Exclusive upper bound.
    pub to_date: NaiveDate,
    /// Whether reverted entries are returned.
    pub include_reverted: bool,
}

impl LedgerQuery {
    /// Creates a query for non-reverted entries in `[from_date, to_date)`.
    #[must_use]
    pub const fn between(from_date: NaiveDate, to_date: NaiveDate) -> Self {
        Self {
            from_date,
            to_date,
            include_reverted: false,
        }
    }

    /// Returns true if the entry satisfies this query.
    #[must_use]
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        entry.date >= self.from_date
            && entry.date < self.to_date
            && (self.include_reverted || !entry.reverted)
    }
}
