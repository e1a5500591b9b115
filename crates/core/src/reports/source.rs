//! Data source collaborators for report runs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::fiscal::FiscalSettings;
use crate::ledger::{Account, LedgerEntry, LedgerQuery};

use super::error::ReportError;

/// Supplies ledger entries and the chart of accounts.
#[async_trait]
pub trait LedgerSource: Send + Sync {
    /// Returns the entries matching `query`.
    async fn ledger_entries(&self, query: &LedgerQuery) -> Result<Vec<LedgerEntry>, ReportError>;

    /// Returns the full chart of accounts.
    async fn accounts(&self) -> Result<Vec<Account>, ReportError>;
}

/// Supplies the fiscal year boundaries.
#[async_trait]
pub trait FiscalSettingsSource: Send + Sync {
    /// Returns the configured fiscal year start and end.
    async fn fiscal_settings(&self) -> Result<FiscalSettings, ReportError>;
}

/// Ledger held in memory, typically loaded from a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryLedger {
    /// Chart of accounts.
    #[serde(default)]
    pub accounts: Vec<Account>,
    /// Posted entries, in any order.
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,
    /// Fiscal year boundaries, if the document carries them.
    #[serde(default)]
    pub fiscal: Option<FiscalSettings>,
}

impl InMemoryLedger {
    /// Creates a ledger without fiscal settings of its own.
    #[must_use]
    pub fn new(accounts: Vec<Account>, entries: Vec<LedgerEntry>) -> Self {
        Self {
            accounts,
            entries,
            fiscal: None,
        }
    }

    /// Uses `fiscal` unless the ledger already carries fiscal settings.
    #[must_use]
    pub fn with_default_fiscal(mut self, fiscal: FiscalSettings) -> Self {
        self.fiscal.get_or_insert(fiscal);
        self
    }

    /// Parses a ledger from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Source` if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        serde_json::from_str(json).map_err(|e| ReportError::Source(e.to_string()))
    }
}

#[async_trait]
impl LedgerSource for InMemoryLedger {
    async fn ledger_entries(&self, query: &LedgerQuery) -> Result<Vec<LedgerEntry>, ReportError> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| query.matches(entry))
            .cloned()
            .collect())
    }

    async fn accounts(&self) -> Result<Vec<Account>, ReportError> {
        Ok(self.accounts.clone())
    }
}

#[async_trait]
impl FiscalSettingsSource for InMemoryLedger {
    async fn fiscal_settings(&self) -> Result<FiscalSettings, ReportError> {
        Ok(self.fiscal.unwrap_or_default())
    }
}
