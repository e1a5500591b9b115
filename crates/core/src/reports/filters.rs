//! User-editable report filters.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use folio_shared::config::ReportDefaults;
use folio_shared::types::{BasedOn, Periodicity};

/// Filters controlling the report window and presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilters {
    /// Window basis.
    pub based_on: BasedOn,
    /// Column length.
    pub periodicity: Periodicity,
    /// Last day of an until-date report.
    pub to_date: Option<NaiveDate>,
    /// Number of periods of an until-date report.
    pub count: u32,
    /// First fiscal year of a fiscal-year report.
    pub from_year: Option<i32>,
    /// Last fiscal year of a fiscal-year report.
    pub to_year: Option<i32>,
    /// Collapse all periods into one column.
    pub consolidate_columns: bool,
    /// Blank out amounts on group accounts.
    pub hide_group_amounts: bool,
}

impl Default for ReportFilters {
    fn default() -> Self {
        Self::from_defaults(&ReportDefaults::default())
    }
}

impl ReportFilters {
    /// Creates filters from configured defaults, with no dates set.
    #[must_use]
    pub fn from_defaults(defaults: &ReportDefaults) -> Self {
        Self {
            based_on: defaults.based_on,
            periodicity: defaults.periodicity,
            to_date: None,
            count: defaults.count,
            from_year: None,
            to_year: None,
            consolidate_columns: defaults.consolidate_columns,
            hide_group_amounts: defaults.hide_group_amounts,
        }
    }

    /// Fills in the date inputs the selected basis needs, if absent.
    ///
    /// Until-date reports end tomorrow; fiscal-year reports span the
    /// current year and the next.
    pub fn apply_defaults(&mut self, today: NaiveDate) {
        match self.based_on {
            BasedOn::UntilDate if self.to_date.is_none() => {
                self.to_date = today.checked_add_days(Days::new(1));
            }
            BasedOn::FiscalYear if self.to_year.is_none() => {
                let from_year = today.year();
                self.from_year = Some(from_year);
                self.to_year = Some(from_year + 1);
            }
            _ => {}
        }
    }

    /// Applies a single filter change and returns the field it touched.
    pub fn update(&mut self, update: FilterUpdate) -> FilterField {
        match update {
            FilterUpdate::BasedOn(v) => self.based_on = v,
            FilterUpdate::Periodicity(v) => self.periodicity = v,
            FilterUpdate::ToDate(v) => self.to_date = Some(v),
            FilterUpdate::Count(v) => self.count = v,
            FilterUpdate::FromYear(v) => self.from_year = Some(v),
            FilterUpdate::ToYear(v) => self.to_year = Some(v),
            FilterUpdate::ConsolidateColumns(v) => self.consolidate_columns = v,
            FilterUpdate::HideGroupAmounts(v) => self.hide_group_amounts = v,
        }
        update.field()
    }

    /// Describes the filters a user can edit for the current basis.
    #[must_use]
    pub fn descriptors(&self) -> Vec<FilterDescriptor> {
        let mut filters = vec![
            FilterDescriptor::select(
                FilterField::BasedOn,
                "Based On",
                &[BasedOn::FiscalYear.to_string(), BasedOn::UntilDate.to_string()],
            ),
            FilterDescriptor::select(
                FilterField::Periodicity,
                "Periodicity",
                &[
                    Periodicity::Monthly.to_string(),
                    Periodicity::Quarterly.to_string(),
                    Periodicity::HalfYearly.to_string(),
                    Periodicity::Yearly.to_string(),
                ],
            ),
        ];

        match self.based_on {
            BasedOn::UntilDate => {
                let periods = format!("Number of {}", self.periodicity.plural_label());
                filters.push(FilterDescriptor::required(
                    FilterField::ToDate,
                    FilterFieldType::Date,
                    "To Date",
                    None,
                ));
                filters.push(FilterDescriptor::required(
                    FilterField::Count,
                    FilterFieldType::Int,
                    &periods,
                    Some(1),
                ));
            }
            BasedOn::FiscalYear => {
                filters.push(FilterDescriptor::required(
                    FilterField::FromYear,
                    FilterFieldType::Int,
                    "From Year",
                    Some(2000),
                ));
                filters.push(FilterDescriptor::required(
                    FilterField::ToYear,
                    FilterFieldType::Int,
                    "To Year",
                    Some(2000),
                ));
            }
        }

        filters.push(FilterDescriptor::check(
            FilterField::ConsolidateColumns,
            "Consolidate Columns",
        ));
        filters.push(FilterDescriptor::check(
            FilterField::HideGroupAmounts,
            "Hide Group Amounts",
        ));
        filters
    }
}

/// Identifies one filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterField {
    /// Window basis.
    BasedOn,
    /// Column length.
    Periodicity,
    /// Until-date end.
    ToDate,
    /// Until-date period count.
    Count,
    /// Fiscal-year start year.
    FromYear,
    /// Fiscal-year end year.
    ToYear,
    /// Single-column toggle.
    ConsolidateColumns,
    /// Group amount visibility.
    HideGroupAmounts,
}

impl FilterField {
    /// Stable field name used by front ends.
    #[must_use]
    pub const fn fieldname(self) -> &'static str {
        match self {
            Self::BasedOn => "basedOn",
            Self::Periodicity => "periodicity",
            Self::ToDate => "toDate",
            Self::Count => "count",
            Self::FromYear => "fromYear",
            Self::ToYear => "toYear",
            Self::ConsolidateColumns => "consolidateColumns",
            Self::HideGroupAmounts => "hideGroupAmounts",
        }
    }

    /// Returns true if changing this filter requires refetching ledger data.
    #[must_use]
    pub const fn requires_refetch(self) -> bool {
        !matches!(self, Self::HideGroupAmounts)
    }
}

/// A new value for one filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterUpdate {
    /// Set the window basis.
    BasedOn(BasedOn),
    /// Set the column length.
    Periodicity(Periodicity),
    /// Set the until-date end.
    ToDate(NaiveDate),
    /// Set the until-date period count.
    Count(u32),
    /// Set the fiscal-year start year.
    FromYear(i32),
    /// Set the fiscal-year end year.
    ToYear(i32),
    /// Toggle single-column output.
    ConsolidateColumns(bool),
    /// Toggle group amount visibility.
    HideGroupAmounts(bool),
}

impl FilterUpdate {
    /// The field this update touches.
    #[must_use]
    pub const fn field(self) -> FilterField {
        match self {
            Self::BasedOn(_) => FilterField::BasedOn,
            Self::Periodicity(_) => FilterField::Periodicity,
            Self::ToDate(_) => FilterField::ToDate,
            Self::Count(_) => FilterField::Count,
            Self::FromYear(_) => FilterField::FromYear,
            Self::ToYear(_) => FilterField::ToYear,
            Self::ConsolidateColumns(_) => FilterField::ConsolidateColumns,
            Self::HideGroupAmounts(_) => FilterField::HideGroupAmounts,
        }
    }
}

/// Input widget type of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterFieldType {
    /// Choice from fixed options.
    Select,
    /// Whole number.
    Int,
    /// Calendar date.
    Date,
    /// Boolean toggle.
    Check,
}

/// Describes one editable filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    /// Which filter this is.
    pub field: FilterField,
    /// Input widget type.
    pub field_type: FilterFieldType,
    /// Display label (also used as placeholder).
    pub label: String,
    /// Allowed values for selects.
    pub options: Vec<String>,
    /// Whether a value must be present.
    pub required: bool,
    /// Lower bound for numeric inputs.
    pub min_value: Option<i64>,
}

impl FilterDescriptor {
    fn select(field: FilterField, label: &str, options: &[String]) -> Self {
        Self {
            field,
            field_type: FilterFieldType::Select,
            label: label.to_string(),
            options: options.to_vec(),
            required: false,
            min_value: None,
        }
    }

    fn required(
        field: FilterField,
        field_type: FilterFieldType,
        label: &str,
        min_value: Option<i64>,
    ) -> Self {
        Self {
            field,
            field_type,
            label: label.to_string(),
            options: Vec::new(),
            required: true,
            min_value,
        }
    }

    fn check(field: FilterField, label: &str) -> Self {
        Self {
            field,
            field_type: FilterFieldType::Check,
            label: label.to_string(),
            options: Vec::new(),
            required: false,
            min_value: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_filters() {
        let filters = ReportFilters::default();
        assert_eq!(filters.based_on, BasedOn::UntilDate);
        assert_eq!(filters.periodicity, Periodicity::Monthly);
        assert_eq!(filters.count, 3);
        assert!(filters.to_date.is_none());
    }

    #[test]
    fn test_apply_defaults_until_date() {
        let mut filters = ReportFilters::default();
        filters.apply_defaults(date(2024, 5, 20));
        assert_eq!(filters.to_date, Some(date(2024, 5, 21)));

        // An explicit date is kept.
        filters.to_date = Some(date(2024, 1, 1));
        filters.apply_defaults(date(2024, 5, 20));
        assert_eq!(filters.to_date, Some(date(2024, 1, 1)));
    }

    #[test]
    fn test_apply_defaults_fiscal_year() {
        let mut filters = ReportFilters {
            based_on: BasedOn::FiscalYear,
            ..ReportFilters::default()
        };
        filters.apply_defaults(date(2024, 5, 20));
        assert_eq!(filters.from_year, Some(2024));
        assert_eq!(filters.to_year, Some(2025));
    }

    #[test]
    fn test_update_returns_field() {
        let mut filters = ReportFilters::default();
        let field = filters.update(FilterUpdate::HideGroupAmounts(true));
        assert_eq!(field, FilterField::HideGroupAmounts);
        assert!(filters.hide_group_amounts);
        assert!(!field.requires_refetch());

        let field = filters.update(FilterUpdate::Periodicity(Periodicity::Yearly));
        assert_eq!(filters.periodicity, Periodicity::Yearly);
        assert!(field.requires_refetch());
    }

    #[test]
    fn test_descriptors_depend_on_basis() {
        let filters = ReportFilters::default();
        let fields: Vec<_> = filters.descriptors().iter().map(|d| d.field).collect();
        assert_eq!(
            fields,
            vec![
                FilterField::BasedOn,
                FilterField::Periodicity,
                FilterField::ToDate,
                FilterField::Count,
                FilterField::ConsolidateColumns,
                FilterField::HideGroupAmounts,
            ]
        );

        let filters = ReportFilters {
            based_on: BasedOn::FiscalYear,
            ..ReportFilters::default()
        };
        let descriptors = filters.descriptors();
        assert_eq!(descriptors[2].field, FilterField::FromYear);
        assert_eq!(descriptors[3].field, FilterField::ToYear);
        assert_eq!(descriptors[3].min_value, Some(2000));
    }

    #[test]
    fn test_count_label_follows_periodicity() {
        let filters = ReportFilters {
            periodicity: Periodicity::Quarterly,
            ..ReportFilters::default()
        };
        let count = filters
            .descriptors()
            .into_iter()
            .find(|d| d.field == FilterField::Count)
            .unwrap();
        assert_eq!(count.label, "Number of Quarters");
        assert!(count.required);
    }

    #[test]
    fn test_fieldname() {
        assert_eq!(FilterField::HideGroupAmounts.fieldname(), "hideGroupAmounts");
    }
}
