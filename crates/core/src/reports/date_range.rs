//! Report column periods.
//!
//! Periods are generated newest first by walking back from the end of the
//! report window in steps of the configured periodicity. Every period is
//! half-open: `from_date` is included, `to_date` is not.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use folio_shared::types::BasedOn;

use super::error::ReportError;
use super::filters::ReportFilters;
use crate::fiscal::FiscalSettings;

/// A half-open period `[from_date, to_date)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the period.
    pub from_date: NaiveDate,
    /// First day after the period.
    pub to_date: NaiveDate,
}

impl DateRange {
    /// Creates a new range.
    #[must_use]
    pub const fn new(from_date: NaiveDate, to_date: NaiveDate) -> Self {
        Self { from_date, to_date }
    }

    /// Returns true if `date` falls within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from_date && date < self.to_date
    }

    /// Returns true if the two ranges share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.from_date < other.to_date && other.from_date < self.to_date
    }
}

/// Whether this is the first report run of a session.
///
/// The first run shows a fixed comparison layout regardless of the filters;
/// every later run follows the filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    /// Current month, same month last year, and year to date.
    Startup,
    /// Periods derived from the report filters.
    #[default]
    Configured,
}

/// The full span of dates a report needs from the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    /// Inclusive start.
    pub from_date: NaiveDate,
    /// Exclusive end.
    pub to_date: NaiveDate,
}

/// Generates the report periods, newest first.
///
/// # Errors
///
/// Returns `ReportError::Configuration` if the filters lack the inputs the
/// selected basis needs.
pub fn generate_date_ranges(
    filters: &ReportFilters,
    fiscal: &FiscalSettings,
    mode: RunMode,
    today: NaiveDate,
) -> Result<Vec<DateRange>, ReportError> {
    if mode == RunMode::Startup {
        let ranges = startup_ranges(today)?;
        debug!(?ranges, "generated startup date ranges");
        return Ok(ranges);
    }

    let window = query_window(filters, fiscal, mode, today)?;
    if filters.consolidate_columns {
        return Ok(vec![DateRange::new(window.from_date, window.to_date)]);
    }

    let months = filters.periodicity.months();
    let count = period_count(filters)?;
    let anchor = window.to_date;

    let mut ranges = Vec::with_capacity(count);
    let mut to_date = anchor;
    for _ in 0..count {
        let from_date = step_back(anchor, to_date, months)?;
        ranges.push(DateRange::new(from_date, to_date));
        to_date = from_date;
    }

    ranges.sort_by(|a, b| b.to_date.cmp(&a.to_date));
    debug!(?ranges, periodicity = %filters.periodicity, "generated date ranges");
    Ok(ranges)
}

/// Computes the ledger query window for a run.
///
/// # Errors
///
/// Returns `ReportError::Configuration` if the filters lack the inputs the
/// selected basis needs.
pub fn query_window(
    filters: &ReportFilters,
    fiscal: &FiscalSettings,
    mode: RunMode,
    today: NaiveDate,
) -> Result<QueryWindow, ReportError> {
    if mode == RunMode::Startup {
        let month_start = first_of_month(today)?;
        return Ok(QueryWindow {
            from_date: sub_months(month_start, 12)?,
            to_date: next_day(today)?,
        });
    }

    match filters.based_on {
        BasedOn::UntilDate => {
            let to_date = filters.to_date.ok_or_else(|| {
                ReportError::Configuration("to_date is required for until-date reports".into())
            })?;
            let months = window_months(filters)?;
            Ok(QueryWindow {
                from_date: sub_months(to_date, months)?,
                to_date: next_day(to_date)?,
            })
        }
        BasedOn::FiscalYear => {
            let (from_year, to_year) = fiscal_years(filters)?;
            let endpoints = fiscal.endpoints(from_year, to_year)?;
            Ok(QueryWindow {
                from_date: endpoints.from_date,
                to_date: next_day(endpoints.to_date)?,
            })
        }
    }
}

/// Column heading for the range at `index`.
#[must_use]
pub fn column_label(range: &DateRange, index: usize, mode: RunMode) -> String {
    if mode == RunMode::Startup && index == 2 {
        range.from_date.format("%Y").to_string()
    } else {
        range.from_date.format("%B %Y").to_string()
    }
}

/// The three fixed comparison periods shown on the first run.
fn startup_ranges(today: NaiveDate) -> Result<Vec<DateRange>, ReportError> {
    let month_start = first_of_month(today)?;
    let last_year_start = sub_months(month_start, 12)?;
    let year_start = NaiveDate::from_ymd_opt(today.year(), 1, 1)
        .ok_or_else(|| invalid_date("start of year", today))?;

    Ok(vec![
        DateRange::new(month_start, add_months(month_start, 1)?),
        DateRange::new(last_year_start, add_months(last_year_start, 1)?),
        DateRange::new(year_start, next_day(today)?),
    ])
}

fn period_count(filters: &ReportFilters) -> Result<usize, ReportError> {
    let months = filters.periodicity.months();
    let count = match filters.based_on {
        BasedOn::UntilDate => filters.count.max(1),
        BasedOn::FiscalYear => {
            let (from_year, to_year) = fiscal_years(filters)?;
            let span = to_year
                .checked_sub(from_year)
                .and_then(|years| u32::try_from(years).ok())
                .and_then(|years| years.checked_mul(12))
                .ok_or_else(|| {
                    ReportError::Configuration(format!(
                        "fiscal years {from_year}..{to_year} exceed the supported date range"
                    ))
                })?;
            span.div_ceil(months).max(1)
        }
    };
    Ok(count as usize)
}

/// Months covered by an until-date report.
fn window_months(filters: &ReportFilters) -> Result<u32, ReportError> {
    let count = filters.count.max(1);
    filters
        .periodicity
        .months()
        .checked_mul(count)
        .ok_or_else(|| {
            ReportError::Configuration(format!(
                "{count} {} periods exceed the supported date range",
                filters.periodicity
            ))
        })
}

fn fiscal_years(filters: &ReportFilters) -> Result<(i32, i32), ReportError> {
    let (Some(from_year), Some(to_year)) = (filters.from_year, filters.to_year) else {
        return Err(ReportError::Configuration(
            "from_year and to_year are required for fiscal-year reports".into(),
        ));
    };
    if to_year < from_year {
        return Err(ReportError::Configuration(format!(
            "to_year {to_year} precedes from_year {from_year}"
        )));
    }
    Ok((from_year, to_year))
}

/// Moves `date` back by `months`, keeping month-end alignment with `anchor`.
pub(crate) fn step_back(
    anchor: NaiveDate,
    date: NaiveDate,
    months: u32,
) -> Result<NaiveDate, ReportError> {
    Ok(fix_month_jump(anchor, sub_months(date, months)?))
}

/// If `anchor` is the last day of its month, forces `date` to the last day
/// of its own month.
#[must_use]
pub fn fix_month_jump(anchor: NaiveDate, date: NaiveDate) -> NaiveDate {
    if is_month_end(anchor) && !is_month_end(date) {
        last_of_month(date).unwrap_or(date)
    } else {
        date
    }
}

fn is_month_end(date: NaiveDate) -> bool {
    date.succ_opt().is_none_or(|next| next.month() != date.month())
}

fn last_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

fn first_of_month(date: NaiveDate) -> Result<NaiveDate, ReportError> {
    date.with_day(1)
        .ok_or_else(|| invalid_date("start of month", date))
}

fn sub_months(date: NaiveDate, months: u32) -> Result<NaiveDate, ReportError> {
    date.checked_sub_months(Months::new(months))
        .ok_or_else(|| invalid_date("month arithmetic", date))
}

fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate, ReportError> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| invalid_date("month arithmetic", date))
}

fn next_day(date: NaiveDate) -> Result<NaiveDate, ReportError> {
    date.checked_add_days(Days::new(1))
        .ok_or_else(|| invalid_date("day arithmetic", date))
}

fn invalid_date(what: &str, date: NaiveDate) -> ReportError {
    ReportError::Configuration(format!("{what} out of range for {date}"))
}
