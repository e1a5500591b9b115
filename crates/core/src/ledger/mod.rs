//! Ledger vocabulary consumed by the reports.
//!
//! - Chart of accounts (root types, group accounts, parent links)
//! - Posted ledger entries and the bulk query filter
//! - Signed balance calculations per account root type

pub mod account;
pub mod balance;
pub mod entry;

pub use account::{Account, AccountMap, RootType, account_map};
pub use balance::{NormalBalance, RangeBalance};
pub use entry::{LedgerEntry, LedgerQuery};
