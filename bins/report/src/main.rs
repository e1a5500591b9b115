//! Folio statement reports.
//!
//! Runs a periodic statement against a JSON ledger and prints it as a
//! text table or as JSON.
//!
//! ```bash
//! folio-report --ledger data/ledger.json --report profit-and-loss --count 6
//! folio-report --report changes-equity --based-on "Fiscal Year" --from-year 2023 --to-year 2024
//! ```

mod table;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_core::fiscal::FiscalSettings;
use folio_core::reports::{
    CurrencyFormatter, InMemoryLedger, PeriodicReport, ReportFilters, ReportKind, RunMode,
};
use folio_shared::types::{BasedOn, Periodicity};
use folio_shared::{AppConfig, AppError};

/// Render a periodic financial statement from a JSON ledger.
#[derive(Parser, Debug)]
#[command(name = "folio-report")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Report slug or title
    #[arg(short, long, default_value = "profit-and-loss")]
    report: ReportKind,

    /// Ledger file (defaults to `data.ledger_path` from configuration)
    #[arg(short, long, value_name = "FILE")]
    ledger: Option<PathBuf>,

    /// Column length: Monthly, Quarterly, Half Yearly or Yearly
    #[arg(long)]
    periodicity: Option<Periodicity>,

    /// Window basis: "Fiscal Year" or "Until Date"
    #[arg(long)]
    based_on: Option<BasedOn>,

    /// Last day of an until-date report (YYYY-MM-DD)
    #[arg(long)]
    to_date: Option<NaiveDate>,

    /// Number of periods of an until-date report
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    count: Option<u32>,

    /// First fiscal year
    #[arg(long)]
    from_year: Option<i32>,

    /// Last fiscal year
    #[arg(long)]
    to_year: Option<i32>,

    /// Collapse all periods into one column
    #[arg(long)]
    consolidate: bool,

    /// Blank out amounts on group accounts
    #[arg(long)]
    hide_group_amounts: bool,

    /// Show the current month, the same month last year and the year to date
    #[arg(long)]
    startup: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl Args {
    fn filters(&self, config: &AppConfig) -> ReportFilters {
        let mut filters = ReportFilters::from_defaults(&config.report);
        if let Some(periodicity) = self.periodicity {
            filters.periodicity = periodicity;
        }
        if let Some(based_on) = self.based_on {
            filters.based_on = based_on;
        }
        if let Some(count) = self.count {
            filters.count = count;
        }
        filters.to_date = self.to_date;
        filters.from_year = self.from_year;
        filters.to_year = self.to_year;
        filters.consolidate_columns |= self.consolidate;
        filters.hide_group_amounts |= self.hide_group_amounts;
        filters
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
            eprintln!("error: {err:#}");
            ExitCode::from(code)
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<()> {
    let config = AppConfig::load().map_err(AppError::from)?;

    let path = args
        .ledger
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.data.ledger_path));
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read ledger {}", path.display()))?;
    let ledger = InMemoryLedger::from_json(&json)
        .map_err(AppError::from)?
        .with_default_fiscal(FiscalSettings::from_config(&config.fiscal_year));
    info!(
        path = %path.display(),
        accounts = ledger.accounts.len(),
        entries = ledger.entries.len(),
        "loaded ledger"
    );

    let today = Local::now().date_naive();
    let mode = if args.startup {
        RunMode::Startup
    } else {
        RunMode::Configured
    };

    let mut report = PeriodicReport::new(args.report, ledger, args.filters(&config), today)
        .with_formatter(CurrencyFormatter::from_config(&config.format));
    let data = report.run(mode).await.map_err(AppError::from)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(data)?);
    } else {
        println!("{}\n", args.report.title());
        print!("{}", table::render(data)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_override_configured_defaults() {
        let args = Args::parse_from([
            "folio-report",
            "--report",
            "changes-equity",
            "--periodicity",
            "quarterly",
            "--based-on",
            "Fiscal Year",
            "--from-year",
            "2023",
            "--to-year",
            "2024",
            "--hide-group-amounts",
        ]);
        assert_eq!(args.report, ReportKind::ChangesInEquity);

        let filters = args.filters(&AppConfig::default());
        assert_eq!(filters.periodicity, Periodicity::Quarterly);
        assert_eq!(filters.based_on, BasedOn::FiscalYear);
        assert_eq!(filters.from_year, Some(2023));
        assert_eq!(filters.to_year, Some(2024));
        assert_eq!(filters.count, 3);
        assert!(filters.hide_group_amounts);
        assert!(!filters.consolidate_columns);
    }

    #[test]
    fn test_unknown_report_is_rejected() {
        assert!(Args::try_parse_from(["folio-report", "--report", "balance-sheet"]).is_err());
        assert!(Args::try_parse_from(["folio-report", "--count", "0"]).is_err());
    }
}
