//! Core report logic for Folio.
//!
//! This crate contains pure business logic with no storage or UI
//! dependencies. Data comes in through the [`reports::LedgerSource`] and
//! [`reports::FiscalSettingsSource`] traits.
//!
//! # Modules
//!
//! - `ledger` - Chart of accounts, ledger entries and signed balances
//! - `fiscal` - Fiscal year boundaries
//! - `reports` - Periodic statements (profit and loss, changes in equity)

pub mod fiscal;
pub mod ledger;
pub mod reports;
