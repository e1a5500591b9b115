//! Application configuration management.

use serde::Deserialize;

use crate::types::{BasedOn, MonthDay, Periodicity};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Fiscal year boundaries.
    #[serde(default)]
    pub fiscal_year: FiscalYearConfig,
    /// Default report filters.
    #[serde(default)]
    pub report: ReportDefaults,
    /// Number formatting.
    #[serde(default)]
    pub format: FormatConfig,
    /// Data file locations.
    #[serde(default)]
    pub data: DataConfig,
}

/// Fiscal year boundaries as year-independent month-day pairs.
#[derive(Debug, Clone, Deserialize)]
pub struct FiscalYearConfig {
    /// Month the fiscal year starts in.
    #[serde(default = "default_start_month")]
    pub start_month: u32,
    /// Day the fiscal year starts on.
    #[serde(default = "default_start_day")]
    pub start_day: u32,
    /// Month the fiscal year ends in.
    #[serde(default = "default_end_month")]
    pub end_month: u32,
    /// Day the fiscal year ends on.
    #[serde(default = "default_end_day")]
    pub end_day: u32,
}

fn default_start_month() -> u32 {
    4
}

fn default_start_day() -> u32 {
    1
}

fn default_end_month() -> u32 {
    3
}

fn default_end_day() -> u32 {
    31
}

impl Default for FiscalYearConfig {
    fn default() -> Self {
        Self {
            start_month: default_start_month(),
            start_day: default_start_day(),
            end_month: default_end_month(),
            end_day: default_end_day(),
        }
    }
}

impl FiscalYearConfig {
    /// First day of the fiscal year.
    #[must_use]
    pub const fn start(&self) -> MonthDay {
        MonthDay::new(self.start_month, self.start_day)
    }

    /// Last day of the fiscal year.
    #[must_use]
    pub const fn end(&self) -> MonthDay {
        MonthDay::new(self.end_month, self.end_day)
    }
}

/// Filters applied when a report is opened without user input.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportDefaults {
    /// Column length.
    #[serde(default)]
    pub periodicity: Periodicity,
    /// Window basis.
    #[serde(default)]
    pub based_on: BasedOn,
    /// Number of periods for until-date reports.
    #[serde(default = "default_count")]
    pub count: u32,
    /// Collapse all periods into one column.
    #[serde(default)]
    pub consolidate_columns: bool,
    /// Blank out amounts on group accounts.
    #[serde(default)]
    pub hide_group_amounts: bool,
}

fn default_count() -> u32 {
    3
}

impl Default for ReportDefaults {
    fn default() -> Self {
        Self {
            periodicity: Periodicity::default(),
            based_on: BasedOn::default(),
            count: default_count(),
            consolidate_columns: false,
            hide_group_amounts: false,
        }
    }
}

/// Number formatting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatConfig {
    /// Symbol prefixed to currency amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Decimal places for currency amounts.
    #[serde(default = "default_precision")]
    pub precision: u32,
    /// Digit group separator.
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_precision() -> u32 {
    2
}

fn default_thousands_separator() -> String {
    ",".to_string()
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            precision: default_precision(),
            thousands_separator: default_thousands_separator(),
        }
    }
}

/// Data file locations.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// JSON file holding accounts and ledger entries.
    #[serde(default = "default_ledger_path")]
    pub ledger_path: String,
}

fn default_ledger_path() -> String {
    "data/ledger.json".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            ledger_path: default_ledger_path(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
