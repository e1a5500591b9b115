//! Periodic statement engine.
//!
//! A [`PeriodicReport`] owns the filters and the data fetched for them.
//! Each run regenerates the periods, refetches ledger entries when the
//! change requires it, rebuilds the account tree and renders the rows.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::fiscal::FiscalSettings;
use crate::ledger::{Account, AccountMap, LedgerQuery, RangeBalance, RootType, account_map};

use super::date_range::{DateRange, RunMode, generate_date_ranges, query_window};
use super::error::ReportError;
use super::filters::{FilterDescriptor, FilterField, FilterUpdate, ReportFilters};
use super::format::{CurrencyFormatter, ValueFormatter};
use super::grouping::{GroupedEntries, group_by_account, group_by_date_ranges, unknown_accounts};
use super::registry::ReportKind;
use super::render::{RowRenderer, empty_row, flatten, period_columns, synthetic_node, total_node};
use super::source::{FiscalSettingsSource, LedgerSource};
use super::tree::build_account_tree;
use super::types::{AccountListNode, ColumnField, ReportData, ReportRow};

/// Label of the net profit row closing a profit and loss statement.
pub const TOTAL_PROFIT: &str = "Total Profit";

/// A statement report bound to a data source.
pub struct PeriodicReport<S> {
    kind: ReportKind,
    source: S,
    filters: ReportFilters,
    today: NaiveDate,
    formatter: Box<dyn ValueFormatter>,
    fiscal: Option<FiscalSettings>,
    accounts: Option<Vec<Account>>,
    account_map: AccountMap,
    grouped: GroupedEntries,
    date_ranges: Vec<DateRange>,
    mode: RunMode,
    fetched: bool,
    report_data: ReportData,
}

impl<S> PeriodicReport<S>
where
    S: LedgerSource + FiscalSettingsSource,
{
    /// Creates a report with the default currency formatter.
    #[must_use]
    pub fn new(kind: ReportKind, source: S, filters: ReportFilters, today: NaiveDate) -> Self {
        Self {
            kind,
            source,
            filters,
            today,
            formatter: Box::new(CurrencyFormatter::default()),
            fiscal: None,
            accounts: None,
            account_map: AccountMap::new(),
            grouped: GroupedEntries::new(),
            date_ranges: Vec::new(),
            mode: RunMode::Configured,
            fetched: false,
            report_data: ReportData::default(),
        }
    }

    /// Replaces the value formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl ValueFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Which statement this is.
    #[must_use]
    pub const fn kind(&self) -> ReportKind {
        self.kind
    }

    /// Display title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.kind.title()
    }

    /// Stable report name.
    #[must_use]
    pub const fn report_name(&self) -> &'static str {
        self.kind.slug()
    }

    /// Current filter values.
    #[must_use]
    pub const fn filters(&self) -> &ReportFilters {
        &self.filters
    }

    /// Editable filters for the current basis.
    #[must_use]
    pub fn filter_descriptors(&self) -> Vec<FilterDescriptor> {
        self.filters.descriptors()
    }

    /// Periods of the last run, newest first.
    #[must_use]
    pub fn date_ranges(&self) -> &[DateRange] {
        &self.date_ranges
    }

    /// Columns of the last run.
    #[must_use]
    pub fn columns(&self) -> &[ColumnField] {
        &self.report_data.columns
    }

    /// Rows of the last run.
    #[must_use]
    pub fn rows(&self) -> &[ReportRow] {
        &self.report_data.rows
    }

    /// Output of the last run.
    #[must_use]
    pub const fn report_data(&self) -> &ReportData {
        &self.report_data
    }

    /// Runs the report from scratch.
    ///
    /// # Errors
    ///
    /// See [`Self::set_report_data`].
    pub async fn run(&mut self, mode: RunMode) -> Result<&ReportData, ReportError> {
        self.set_report_data(mode, None, true).await?;
        Ok(&self.report_data)
    }

    /// Applies one filter change and reruns the report.
    ///
    /// # Errors
    ///
    /// See [`Self::set_report_data`].
    pub async fn apply_filter(&mut self, update: FilterUpdate) -> Result<(), ReportError> {
        let field = self.filters.update(update);
        debug!(report = self.kind.slug(), filter = field.fieldname(), "filter changed");
        self.set_report_data(RunMode::Configured, Some(field), false).await
    }

    /// Recomputes the report data.
    ///
    /// Ledger entries are refetched unless the only change is one that
    /// does not affect the data (`changed` names it) and neither `force`
    /// nor a change of run mode demands a refetch.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Configuration` for missing or invalid filter
    /// inputs, `ReportError::DataIntegrity` for an inconsistent chart of
    /// accounts, and `ReportError::Source` if a collaborator fails.
    pub async fn set_report_data(
        &mut self,
        mode: RunMode,
        changed: Option<FilterField>,
        force: bool,
    ) -> Result<(), ReportError> {
        let refetch = force
            || !self.fetched
            || self.mode != mode
            || changed.is_none_or(FilterField::requires_refetch);

        if refetch {
            self.fetch_raw_data(mode).await?;
        }

        self.report_data = self.build_report_data()?;
        debug!(
            report = self.kind.slug(),
            refetched = refetch,
            rows = self.report_data.rows.len(),
            "report data set"
        );
        Ok(())
    }

    /// Fetches entries for the current filters.
    ///
    /// The periods and grouped entries are replaced only once every
    /// collaborator call has succeeded. Until then the report counts as
    /// unfetched, so a failure forces the next run to refetch.
    async fn fetch_raw_data(&mut self, mode: RunMode) -> Result<(), ReportError> {
        self.fetched = false;
        self.filters.apply_defaults(self.today);
        let fiscal = self.fiscal_settings().await?;

        let date_ranges = generate_date_ranges(&self.filters, &fiscal, mode, self.today)?;
        let window = query_window(&self.filters, &fiscal, mode, self.today)?;

        let query = LedgerQuery::between(window.from_date, window.to_date);
        let entries = self.source.ledger_entries(&query).await?;
        info!(
            report = self.kind.slug(),
            entries = entries.len(),
            from_date = %window.from_date,
            to_date = %window.to_date,
            "fetched ledger entries"
        );

        let grouped = group_by_account(&entries);
        self.ensure_accounts(&grouped).await?;

        self.date_ranges = date_ranges;
        self.grouped = grouped;
        self.mode = mode;
        self.fetched = true;
        Ok(())
    }

    async fn fiscal_settings(&mut self) -> Result<FiscalSettings, ReportError> {
        if let Some(fiscal) = self.fiscal {
            return Ok(fiscal);
        }
        let fiscal = self.source.fiscal_settings().await?;
        self.fiscal = Some(fiscal);
        Ok(fiscal)
    }

    /// Loads the chart once, and again if the entries mention accounts the
    /// cached chart lacks.
    async fn ensure_accounts(&mut self, grouped: &GroupedEntries) -> Result<(), ReportError> {
        if self.accounts.is_none() {
            self.load_accounts().await?;
        } else if !unknown_accounts(grouped, &self.account_map).is_empty() {
            info!(report = self.kind.slug(), "ledger references uncached accounts, reloading chart");
            self.load_accounts().await?;
        }

        let unknown = unknown_accounts(grouped, &self.account_map);
        if !unknown.is_empty() {
            warn!(accounts = ?unknown, "ledger entries reference accounts missing from chart");
        }
        Ok(())
    }

    async fn load_accounts(&mut self) -> Result<(), ReportError> {
        let accounts = self.source.accounts().await?;
        debug!(accounts = accounts.len(), "loaded chart of accounts");
        self.account_map = account_map(&accounts);
        self.accounts = Some(accounts);
        Ok(())
    }

    fn build_report_data(&self) -> Result<ReportData, ReportError> {
        let value_maps = group_by_date_ranges(&self.grouped, &self.date_ranges, &self.account_map);
        let accounts = self.accounts.as_deref().unwrap_or_default();
        let mut forest = build_account_tree(accounts, &value_maps)?;
        forest.retain_root_types(self.kind.root_types());

        let columns = period_columns(&self.date_ranges, self.mode);
        let renderer = RowRenderer::new(
            &self.date_ranges,
            self.formatter.as_ref(),
            self.filters.hide_group_amounts,
        );

        let mut rows = Vec::new();
        let mut totals: HashMap<RootType, AccountListNode> = HashMap::new();
        for &root_type in self.kind.root_types() {
            let roots = forest.roots_of(root_type);
            if roots.is_empty() {
                continue;
            }

            rows.extend(renderer.rows(&flatten(&roots)));
            let total = total_node(&roots, self.kind.total_name(root_type), &self.date_ranges);
            rows.push(renderer.row(&total));
            rows.push(empty_row(&columns));
            totals.insert(root_type, total);
        }

        if self.kind == ReportKind::ProfitAndLoss && !totals.is_empty() {
            let profit = net_profit(
                &self.date_ranges,
                totals.get(&RootType::Income),
                totals.get(&RootType::Expense),
            );
            rows.push(renderer.row(&profit));
        }

        if rows.last().is_some_and(|row| row.is_empty) {
            rows.pop();
        }

        Ok(ReportData { columns, rows })
    }
}

/// Income total minus expense total, per period.
fn net_profit(
    ranges: &[DateRange],
    income: Option<&AccountListNode>,
    expense: Option<&AccountListNode>,
) -> AccountListNode {
    let amount = |node: Option<&AccountListNode>, range: &DateRange| {
        node.and_then(|n| n.value_map.get(range))
            .map_or(Decimal::ZERO, |balance| balance.balance)
    };

    let value_map = ranges
        .iter()
        .map(|range| {
            let profit = amount(income, range) - amount(expense, range);
            (*range, RangeBalance::from_balance(profit))
        })
        .collect();

    synthetic_node(TOTAL_PROFIT, value_map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerEntry;
    use crate::reports::source::InMemoryLedger;
    use crate::reports::types::RawValue;
    use async_trait::async_trait;
    use folio_shared::types::{BasedOn, Periodicity};
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn chart() -> Vec<Account> {
        vec![
            Account::root("Income", RootType::Income),
            Account::group("Direct Income", RootType::Income, "Income"),
            Account::leaf("Sales", RootType::Income, "Direct Income"),
            Account::leaf("Service", RootType::Income, "Direct Income"),
            Account::root("Expenses", RootType::Expense),
            Account::leaf("Rent", RootType::Expense, "Expenses"),
            Account::leaf("Salaries", RootType::Expense, "Expenses"),
            Account::root("Equity", RootType::Equity),
            Account::leaf("Capital", RootType::Equity, "Equity"),
            Account::leaf("Retained Earnings", RootType::Equity, "Equity"),
        ]
    }

    fn entries() -> Vec<LedgerEntry> {
        let mut reverted = LedgerEntry::new("Sales", date(2024, 3, 11), dec!(0), dec!(999));
        reverted.reverted = true;
        vec![
            LedgerEntry::new("Sales", date(2024, 1, 15), dec!(0), dec!(100)),
            LedgerEntry::new("Sales", date(2024, 3, 10), dec!(0), dec!(300)),
            LedgerEntry::new("Service", date(2024, 2, 5), dec!(0), dec!(50)),
            LedgerEntry::new("Rent", date(2024, 1, 31), dec!(80), dec!(0)),
            LedgerEntry::new("Rent", date(2024, 2, 29), dec!(80), dec!(0)),
            LedgerEntry::new("Capital", date(2024, 1, 2), dec!(0), dec!(1000)),
            LedgerEntry::new("Sales", date(2023, 12, 31), dec!(0), dec!(7)),
            reverted,
        ]
    }

    fn q1_filters() -> ReportFilters {
        ReportFilters {
            to_date: Some(date(2024, 3, 31)),
            ..ReportFilters::default()
        }
    }

    fn report(kind: ReportKind, filters: ReportFilters) -> PeriodicReport<InMemoryLedger> {
        let ledger = InMemoryLedger::new(chart(), entries());
        PeriodicReport::new(kind, ledger, filters, date(2024, 5, 20))
    }

    fn names(rows: &[ReportRow]) -> Vec<&str> {
        rows.iter().map(|r| r.cells[0].value.as_str()).collect()
    }

    fn values(row: &ReportRow) -> Vec<&str> {
        row.cells[1..].iter().map(|c| c.value.as_str()).collect()
    }

    #[derive(Clone)]
    struct CountingLedger {
        inner: InMemoryLedger,
        entry_calls: Arc<AtomicUsize>,
        account_calls: Arc<AtomicUsize>,
    }

    impl CountingLedger {
        fn new(inner: InMemoryLedger) -> Self {
            Self {
                inner,
                entry_calls: Arc::new(AtomicUsize::new(0)),
                account_calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl LedgerSource for CountingLedger {
        async fn ledger_entries(
            &self,
            query: &LedgerQuery,
        ) -> Result<Vec<LedgerEntry>, ReportError> {
            self.entry_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.ledger_entries(query).await
        }

        async fn accounts(&self) -> Result<Vec<Account>, ReportError> {
            self.account_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.accounts().await
        }
    }

    #[async_trait]
    impl FiscalSettingsSource for CountingLedger {
        async fn fiscal_settings(&self) -> Result<FiscalSettings, ReportError> {
            self.inner.fiscal_settings().await
        }
    }

    struct FailingLedger;

    #[async_trait]
    impl LedgerSource for FailingLedger {
        async fn ledger_entries(&self, _: &LedgerQuery) -> Result<Vec<LedgerEntry>, ReportError> {
            Err(ReportError::Source("connection refused".into()))
        }

        async fn accounts(&self) -> Result<Vec<Account>, ReportError> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl FiscalSettingsSource for FailingLedger {
        async fn fiscal_settings(&self) -> Result<FiscalSettings, ReportError> {
            Ok(FiscalSettings::default())
        }
    }

    /// Fails entry queries while `down` is set.
    struct FlakyLedger {
        inner: InMemoryLedger,
        down: Arc<AtomicBool>,
    }

    #[async_trait]
    impl LedgerSource for FlakyLedger {
        async fn ledger_entries(
            &self,
            query: &LedgerQuery,
        ) -> Result<Vec<LedgerEntry>, ReportError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(ReportError::Source("down".into()));
            }
            self.inner.ledger_entries(query).await
        }

        async fn accounts(&self) -> Result<Vec<Account>, ReportError> {
            self.inner.accounts().await
        }
    }

    #[async_trait]
    impl FiscalSettingsSource for FlakyLedger {
        async fn fiscal_settings(&self) -> Result<FiscalSettings, ReportError> {
            self.inner.fiscal_settings().await
        }
    }

    #[tokio::test]
    async fn test_profit_and_loss_layout() {
        let mut report = report(ReportKind::ProfitAndLoss, q1_filters());
        let data = report.run(RunMode::Configured).await.unwrap();

        let labels: Vec<_> = data.columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Account", "March 2024", "February 2024", "January 2024"]);

        assert_eq!(
            names(&data.rows),
            vec![
                "Income",
                "Direct Income",
                "Sales",
                "Service",
                "Total Income (Credit)",
                "",
                "Expenses",
                "Rent",
                "Total Expense (Debit)",
                "",
                "Total Profit",
            ]
        );

        assert_eq!(values(&data.rows[0]), vec!["$300.00", "$50.00", "$100.00"]);
        assert_eq!(values(&data.rows[3]), vec!["$0.00", "$50.00", "$0.00"]);
        assert_eq!(values(&data.rows[4]), vec!["$300.00", "$50.00", "$100.00"]);
        assert_eq!(values(&data.rows[8]), vec!["$0.00", "$80.00", "$80.00"]);
        assert_eq!(values(&data.rows[10]), vec!["$300.00", "-$30.00", "$20.00"]);

        assert!(data.rows[4].cells[0].bold);
        assert!(data.rows[5].is_empty);
        assert_eq!(data.rows[2].level, 2);
        assert!(data.rows[1].is_group);
    }

    #[tokio::test]
    async fn test_changes_in_equity_drops_trailing_blank_row() {
        let mut report = report(ReportKind::ChangesInEquity, q1_filters());
        let data = report.run(RunMode::Configured).await.unwrap();

        assert_eq!(names(&data.rows), vec!["Equity", "Capital", "Total Equity (Credit)"]);
        assert_eq!(values(&data.rows[2]), vec!["$0.00", "$0.00", "$1,000.00"]);
        assert!(!data.rows.last().unwrap().is_empty);
    }

    #[tokio::test]
    async fn test_no_activity_yields_no_rows() {
        let ledger = InMemoryLedger::new(chart(), Vec::new());
        let mut report =
            PeriodicReport::new(ReportKind::ProfitAndLoss, ledger, q1_filters(), date(2024, 5, 20));
        let data = report.run(RunMode::Configured).await.unwrap();

        assert!(data.rows.is_empty());
        assert_eq!(data.columns.len(), 4);
    }

    #[tokio::test]
    async fn test_startup_layout() {
        let ledger = InMemoryLedger::new(
            chart(),
            vec![
                LedgerEntry::new("Sales", date(2024, 5, 3), dec!(0), dec!(10)),
                LedgerEntry::new("Sales", date(2023, 5, 15), dec!(0), dec!(20)),
                LedgerEntry::new("Sales", date(2024, 2, 1), dec!(0), dec!(5)),
            ],
        );
        let mut report = PeriodicReport::new(
            ReportKind::ProfitAndLoss,
            ledger,
            ReportFilters::default(),
            date(2024, 5, 20),
        );
        let data = report.run(RunMode::Startup).await.unwrap();

        let labels: Vec<_> = data.columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Account", "May 2024", "May 2023", "2024"]);
        assert_eq!(values(&data.rows[0]), vec!["$10.00", "$20.00", "$5.00"]);
    }

    #[tokio::test]
    async fn test_fiscal_year_basis() {
        let filters = ReportFilters {
            based_on: BasedOn::FiscalYear,
            periodicity: Periodicity::Yearly,
            from_year: Some(2023),
            to_year: Some(2024),
            ..ReportFilters::default()
        };
        let mut report = report(ReportKind::ProfitAndLoss, filters);
        report.run(RunMode::Configured).await.unwrap();

        assert_eq!(
            report.date_ranges(),
            &[DateRange::new(date(2023, 4, 1), date(2024, 4, 1))]
        );
        assert_eq!(report.columns()[1].label, "April 2023");
        assert_eq!(values(&report.rows()[0]), vec!["$457.00"]);
    }

    #[tokio::test]
    async fn test_consolidated_columns() {
        let filters = ReportFilters {
            consolidate_columns: true,
            ..q1_filters()
        };
        let mut report = report(ReportKind::ProfitAndLoss, filters);
        report.run(RunMode::Configured).await.unwrap();

        assert_eq!(
            report.date_ranges(),
            &[DateRange::new(date(2023, 12, 31), date(2024, 4, 1))]
        );
        assert_eq!(values(&report.rows()[0]), vec!["$457.00"]);
    }

    #[tokio::test]
    async fn test_inverted_fiscal_years_are_rejected() {
        let filters = ReportFilters {
            based_on: BasedOn::FiscalYear,
            from_year: Some(2025),
            to_year: Some(2024),
            ..ReportFilters::default()
        };
        let mut report = report(ReportKind::ProfitAndLoss, filters);
        let err = report.run(RunMode::Configured).await.unwrap_err();
        assert!(matches!(err, ReportError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_missing_to_date_uses_tomorrow() {
        let mut report = report(ReportKind::ProfitAndLoss, ReportFilters::default());
        report.run(RunMode::Configured).await.unwrap();

        assert_eq!(report.filters().to_date, Some(date(2024, 5, 21)));
        assert_eq!(report.date_ranges()[0].to_date, date(2024, 5, 22));
    }

    #[tokio::test]
    async fn test_hide_group_amounts_skips_refetch() {
        let source = CountingLedger::new(InMemoryLedger::new(chart(), entries()));
        let entry_calls = Arc::clone(&source.entry_calls);
        let mut report =
            PeriodicReport::new(ReportKind::ProfitAndLoss, source, q1_filters(), date(2024, 5, 20));

        report
            .set_report_data(RunMode::Configured, None, false)
            .await
            .unwrap();
        assert_eq!(entry_calls.load(Ordering::SeqCst), 1);

        report
            .apply_filter(FilterUpdate::HideGroupAmounts(true))
            .await
            .unwrap();
        assert_eq!(entry_calls.load(Ordering::SeqCst), 1);

        let rows = report.rows();
        assert_eq!(values(&rows[0]), vec!["", "", ""]);
        assert_eq!(rows[0].cells[1].raw_value, RawValue::Amount(dec!(300)));
        assert_eq!(values(&rows[2]), vec!["$300.00", "$0.00", "$100.00"]);
        assert_eq!(values(&rows[4]), vec!["$300.00", "$50.00", "$100.00"]);

        report
            .apply_filter(FilterUpdate::Periodicity(Periodicity::Quarterly))
            .await
            .unwrap();
        assert_eq!(entry_calls.load(Ordering::SeqCst), 2);
        assert_eq!(report.columns()[1].label, "January 2024");

        report
            .set_report_data(RunMode::Configured, Some(FilterField::HideGroupAmounts), true)
            .await
            .unwrap();
        assert_eq!(entry_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_chart_cached_until_unknown_account_appears() {
        let source = CountingLedger::new(InMemoryLedger::new(chart(), entries()));
        let account_calls = Arc::clone(&source.account_calls);
        let mut report =
            PeriodicReport::new(ReportKind::ProfitAndLoss, source, q1_filters(), date(2024, 5, 20));

        report.run(RunMode::Configured).await.unwrap();
        report.run(RunMode::Configured).await.unwrap();
        assert_eq!(account_calls.load(Ordering::SeqCst), 1);

        let mut with_ghost = entries();
        with_ghost.push(LedgerEntry::new("Ghost", date(2024, 1, 5), dec!(9), dec!(0)));
        let source = CountingLedger::new(InMemoryLedger::new(chart(), with_ghost));
        let account_calls = Arc::clone(&source.account_calls);
        let mut report =
            PeriodicReport::new(ReportKind::ProfitAndLoss, source, q1_filters(), date(2024, 5, 20));

        report.run(RunMode::Configured).await.unwrap();
        assert_eq!(account_calls.load(Ordering::SeqCst), 1);
        report.run(RunMode::Configured).await.unwrap();
        assert_eq!(account_calls.load(Ordering::SeqCst), 2);

        // The unknown account never reaches the rows.
        assert!(!names(report.rows()).contains(&"Ghost"));
    }

    #[tokio::test]
    async fn test_source_failure_propagates() {
        let mut report = PeriodicReport::new(
            ReportKind::ProfitAndLoss,
            FailingLedger,
            q1_filters(),
            date(2024, 5, 20),
        );
        let err = report.run(RunMode::Configured).await.unwrap_err();
        assert!(matches!(err, ReportError::Source(_)));
        assert_eq!(err.error_code(), "DATA_SOURCE_ERROR");
    }

    #[tokio::test]
    async fn test_failed_refetch_forces_next_run_to_refetch() {
        let down = Arc::new(AtomicBool::new(false));
        let source = FlakyLedger {
            inner: InMemoryLedger::new(
                chart(),
                vec![
                    LedgerEntry::new("Sales", date(2024, 3, 10), dec!(0), dec!(100)),
                    LedgerEntry::new("Sales", date(2023, 11, 10), dec!(0), dec!(900)),
                ],
            ),
            down: Arc::clone(&down),
        };
        let filters = ReportFilters {
            count: 1,
            ..q1_filters()
        };
        let mut report =
            PeriodicReport::new(ReportKind::ProfitAndLoss, source, filters, date(2024, 5, 20));
        report.run(RunMode::Configured).await.unwrap();
        assert_eq!(values(&report.rows()[2]), vec!["$100.00"]);

        down.store(true, Ordering::SeqCst);
        let err = report
            .apply_filter(FilterUpdate::Periodicity(Periodicity::Yearly))
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Source(_)));
        assert_eq!(
            report.date_ranges(),
            &[DateRange::new(date(2024, 3, 1), date(2024, 4, 1))]
        );

        down.store(false, Ordering::SeqCst);
        report
            .apply_filter(FilterUpdate::HideGroupAmounts(false))
            .await
            .unwrap();
        assert_eq!(
            report.date_ranges(),
            &[DateRange::new(date(2023, 4, 1), date(2024, 4, 1))]
        );
        assert_eq!(names(report.rows())[2], "Sales");
        assert_eq!(values(&report.rows()[2]), vec!["$1,000.00"]);
    }

    #[tokio::test]
    async fn test_broken_chart_is_data_integrity_error() {
        let accounts = vec![
            Account::root("Income", RootType::Income),
            Account::leaf("Sales", RootType::Income, "Revenue"),
        ];
        let ledger = InMemoryLedger::new(accounts, entries());
        let mut report =
            PeriodicReport::new(ReportKind::ProfitAndLoss, ledger, q1_filters(), date(2024, 5, 20));
        let err = report.run(RunMode::Configured).await.unwrap_err();
        assert!(matches!(err, ReportError::DataIntegrity(_)));
    }

    #[tokio::test]
    async fn test_report_identity() {
        let report = report(ReportKind::ChangesInEquity, q1_filters());
        assert_eq!(report.title(), "Statement of Changes in Equity");
        assert_eq!(report.report_name(), "changes-equity");
        assert_eq!(report.kind(), ReportKind::ChangesInEquity);
        assert_eq!(report.filter_descriptors().len(), 6);
    }

    #[test]
    fn test_net_profit_without_expenses() {
        let jan = DateRange::new(date(2024, 1, 1), date(2024, 2, 1));
        let income = synthetic_node(
            "Total Income (Credit)",
            HashMap::from([(jan, RangeBalance::from_balance(dec!(70)))]),
        );
        let profit = net_profit(&[jan], Some(&income), None);
        assert_eq!(profit.name, TOTAL_PROFIT);
        assert_eq!(profit.value_map[&jan].balance, dec!(70));
    }
}
