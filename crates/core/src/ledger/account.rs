//! Chart of accounts types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Top-level classification of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RootType {
    /// Resources owned.
    Asset,
    /// Obligations owed.
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Revenue earned.
    Income,
    /// Costs incurred.
    Expense,
}

impl RootType {
    /// Returns true for root types whose natural increase is a credit.
    #[must_use]
    pub const fn is_credit(self) -> bool {
        matches!(self, Self::Liability | Self::Equity | Self::Income)
    }
}

impl std::fmt::Display for RootType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asset => write!(f, "Asset"),
            Self::Liability => write!(f, "Liability"),
            Self::Equity => write!(f, "Equity"),
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// An entry in the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account name, unique within the chart.
    pub name: String,
    /// Top-level classification.
    pub root_type: RootType,
    /// Whether this account only aggregates other accounts.
    #[serde(default)]
    pub is_group: bool,
    /// Name of the parent account, `None` for roots.
    #[serde(default)]
    pub parent_account: Option<String>,
}

impl Account {
    /// Creates a root-level account.
    #[must_use]
    pub fn root(name: impl Into<String>, root_type: RootType) -> Self {
        Self {
            name: name.into(),
            root_type,
            is_group: true,
            parent_account: None,
        }
    }

    /// Creates a group account under `parent`.
    #[must_use]
    pub fn group(name: impl Into<String>, root_type: RootType, parent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root_type,
            is_group: true,
            parent_account: Some(parent.into()),
        }
    }

    /// Creates a posting (non-group) account under `parent`.
    #[must_use]
    pub fn leaf(name: impl Into<String>, root_type: RootType, parent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root_type,
            is_group: false,
            parent_account: Some(parent.into()),
        }
    }
}

/// Accounts keyed by name.
pub type AccountMap = HashMap<String, Account>;

/// Builds a name-keyed map from an account list.
///
/// Later duplicates replace earlier ones.
#[must_use]
pub fn account_map(accounts: &[Account]) -> AccountMap {
    accounts
        .iter()
        .map(|account| (account.name.clone(), account.clone()))
        .collect()
}
