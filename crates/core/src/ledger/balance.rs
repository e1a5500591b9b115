//! Signed balance calculations.
//!
//! - Asset/Expense: balance += debit - credit (debit-normal)
//! - Liability/Equity/Income: balance += credit - debit (credit-normal)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::account::RootType;

/// Side on which an account's balance naturally increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalBalance {
    /// Debit-normal accounts (Asset, Expense).
    Debit,
    /// Credit-normal accounts (Liability, Equity, Income).
    Credit,
}

impl NormalBalance {
    /// Determines the normal side of a root type.
    ///
    /// Accounts whose root type is unknown are treated as debit-normal.
    #[must_use]
    pub fn from_root_type(root_type: Option<RootType>) -> Self {
        match root_type {
            Some(rt) if rt.is_credit() => Self::Credit,
            _ => Self::Debit,
        }
    }

    /// Calculates the balance change for a debit/credit pair.
    #[must_use]
    pub fn balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        let raw = debit - credit;
        match self {
            Self::Debit => raw,
            Self::Credit => -raw,
        }
    }
}

/// Aggregated amounts for one account in one date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeBalance {
    /// Sum of debits.
    pub debit: Decimal,
    /// Sum of credits.
    pub credit: Decimal,
    /// Signed balance in the account's natural-increase direction.
    pub balance: Decimal,
}

impl RangeBalance {
    /// Creates a balance holding only a signed amount.
    #[must_use]
    pub const fn from_balance(balance: Decimal) -> Self {
        Self {
            debit: Decimal::ZERO,
            credit: Decimal::ZERO,
            balance,
        }
    }

    /// Adds a posting to this balance.
    pub fn post(&mut self, debit: Decimal, credit: Decimal, side: NormalBalance) {
        self.debit += debit;
        self.credit += credit;
        self.balance += side.balance_change(debit, credit);
    }

    /// Adds every component of `other` to this balance.
    pub fn merge(&mut self, other: &Self) {
        self.debit += other.debit;
        self.credit += other.credit;
        self.balance += other.balance;
    }
}
