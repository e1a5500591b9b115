//! Fiscal year settings.

pub mod period;

pub use period::{FiscalEndpoints, FiscalError, FiscalSettings};
