//! Registered statement reports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ledger::RootType;

use super::error::ReportError;

/// A periodic statement the engine can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// Income and expense sections followed by net profit.
    ProfitAndLoss,
    /// Equity section only.
    #[serde(rename = "changes-equity")]
    ChangesInEquity,
}

impl ReportKind {
    /// Every registered report.
    pub const ALL: [Self; 2] = [Self::ProfitAndLoss, Self::ChangesInEquity];

    /// Stable identifier.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::ProfitAndLoss => "profit-and-loss",
            Self::ChangesInEquity => "changes-equity",
        }
    }

    /// Display title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ProfitAndLoss => "Profit And Loss",
            Self::ChangesInEquity => "Statement of Changes in Equity",
        }
    }

    /// Sections of the report, in display order.
    #[must_use]
    pub const fn root_types(self) -> &'static [RootType] {
        match self {
            Self::ProfitAndLoss => &[RootType::Income, RootType::Expense],
            Self::ChangesInEquity => &[RootType::Equity],
        }
    }

    /// Label of the total row closing a section.
    #[must_use]
    pub const fn total_name(self, root_type: RootType) -> &'static str {
        match root_type {
            RootType::Income => "Total Income (Credit)",
            RootType::Expense => "Total Expense (Debit)",
            RootType::Equity => "Total Equity (Credit)",
            RootType::Asset => "Total Asset (Debit)",
            RootType::Liability => "Total Liability (Credit)",
        }
    }

    /// Looks a report up by slug or title, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::UnknownReport` if nothing matches.
    pub fn lookup(name: &str) -> Result<Self, ReportError> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.slug().eq_ignore_ascii_case(name) || kind.title().eq_ignore_ascii_case(name)
            })
            .ok_or_else(|| ReportError::UnknownReport(name.to_string()))
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s)
    }
}
