//! Fiscal year boundaries.

use chrono::NaiveDate;
use folio_shared::config::FiscalYearConfig;
use folio_shared::types::MonthDay;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors resolving fiscal boundaries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FiscalError {
    /// The configured month-day does not exist in the requested year.
    #[error("Fiscal boundary {month_day} does not exist in {year}")]
    InvalidBoundary {
        /// Configured month-day.
        month_day: MonthDay,
        /// Requested year.
        year: i32,
    },
}

/// Year-independent fiscal year settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalSettings {
    /// First day of each fiscal year.
    pub year_start: MonthDay,
    /// Last day of each fiscal year.
    pub year_end: MonthDay,
}

impl Default for FiscalSettings {
    fn default() -> Self {
        Self::from_config(&FiscalYearConfig::default())
    }
}

/// Concrete fiscal window for a span of years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiscalEndpoints {
    /// First day of the window.
    pub from_date: NaiveDate,
    /// Last day of the window (inclusive).
    pub to_date: NaiveDate,
}

impl FiscalSettings {
    /// Creates settings from configuration.
    #[must_use]
    pub const fn from_config(config: &FiscalYearConfig) -> Self {
        Self {
            year_start: config.start(),
            year_end: config.end(),
        }
    }

    /// Combines the settings with the requested years.
    ///
    /// The start month-day is placed in `from_year`, the end month-day in
    /// `to_year`.
    pub fn endpoints(&self, from_year: i32, to_year: i32) -> Result<FiscalEndpoints, FiscalError> {
        let from_date = self
            .year_start
            .in_year(from_year)
            .ok_or(FiscalError::InvalidBoundary {
                month_day: self.year_start,
                year: from_year,
            })?;
        let to_date = self
            .year_end
            .in_year(to_year)
            .ok_or(FiscalError::InvalidBoundary {
                month_day: self.year_end,
                year: to_year,
            })?;

        Ok(FiscalEndpoints { from_date, to_date })
    }
}
