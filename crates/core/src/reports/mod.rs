//! Periodic financial statements.
//!
//! Pipeline of a report run:
//! - Date ranges: the column periods, from filters or the startup layout
//! - Grouping: ledger entries bucketed per account and period
//! - Tree: chart of accounts with balances rolled up and inactive branches pruned
//! - Render: depth-first rows, section totals and blank separators
//!
//! [`PeriodicReport`] drives the pipeline against a [`LedgerSource`].

pub mod date_range;
pub mod error;
pub mod filters;
pub mod format;
pub mod grouping;
pub mod registry;
pub mod render;
pub mod service;
pub mod source;
pub mod tree;
pub mod types;


pub use date_range::{DateRange, QueryWindow, RunMode, generate_date_ranges, query_window};
pub use error::ReportError;
pub use filters::{FilterDescriptor, FilterField, FilterFieldType, FilterUpdate, ReportFilters};
pub use format::{CurrencyFormatter, ValueFormatter};
pub use grouping::{AccountValueMaps, GroupedEntries, ValueMap};
pub use registry::ReportKind;
pub use service::{PeriodicReport, TOTAL_PROFIT};
pub use source::{FiscalSettingsSource, InMemoryLedger, LedgerSource};
pub use tree::{AccountForest, AccountTreeNode, build_account_tree};
pub use types::*;
