//! Reporting period vocabulary shared by configuration and report logic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Length of a single report column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Periodicity {
    /// One month per column.
    #[default]
    #[serde(alias = "monthly")]
    Monthly,
    /// Three months per column.
    #[serde(alias = "quarterly")]
    Quarterly,
    /// Six months per column.
    #[serde(rename = "Half Yearly", alias = "half_yearly")]
    HalfYearly,
    /// Twelve months per column.
    #[serde(alias = "yearly")]
    Yearly,
}

impl Periodicity {
    /// Number of months covered by one period.
    #[must_use]
    pub const fn months(self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::HalfYearly => 6,
            Self::Yearly => 12,
        }
    }

    /// Plural noun used in filter labels ("Number of Months").
    #[must_use]
    pub const fn plural_label(self) -> &'static str {
        match self {
            Self::Monthly => "Months",
            Self::Quarterly => "Quarters",
            Self::HalfYearly => "Half Years",
            Self::Yearly => "Years",
        }
    }
}

impl std::fmt::Display for Periodicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monthly => write!(f, "Monthly"),
            Self::Quarterly => write!(f, "Quarterly"),
            Self::HalfYearly => write!(f, "Half Yearly"),
            Self::Yearly => write!(f, "Yearly"),
        }
    }
}

impl std::str::FromStr for Periodicity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], " ").as_str() {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "half yearly" => Ok(Self::HalfYearly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(format!("Unknown periodicity: {s}")),
        }
    }
}

/// What the report window is anchored on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasedOn {
    /// Window spans whole fiscal years between `from_year` and `to_year`.
    #[serde(rename = "Fiscal Year", alias = "fiscal_year")]
    FiscalYear,
    /// Window ends at `to_date` and reaches back `count` periods.
    #[default]
    #[serde(rename = "Until Date", alias = "until_date")]
    UntilDate,
}

impl std::fmt::Display for BasedOn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FiscalYear => write!(f, "Fiscal Year"),
            Self::UntilDate => write!(f, "Until Date"),
        }
    }
}

impl std::str::FromStr for BasedOn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], " ").as_str() {
            "fiscal year" => Ok(Self::FiscalYear),
            "until date" => Ok(Self::UntilDate),
            _ => Err(format!("Unknown basis: {s}")),
        }
    }
}

/// A year-independent calendar day, e.g. the start of a fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthDay {
    /// Month (1-12).
    pub month: u32,
    /// Day of month (1-31).
    pub day: u32,
}

impl MonthDay {
    /// Creates a new month-day pair.
    #[must_use]
    pub const fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    /// Combines this month-day with a year.
    ///
    /// Returns `None` when the day does not exist in that year (Feb 29 in a
    /// non-leap year, or an out-of-range month/day).
    #[must_use]
    pub fn in_year(self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

impl std::fmt::Display for MonthDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}
