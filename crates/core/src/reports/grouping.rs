//! Ledger grouping by account and period.

use std::collections::{BTreeMap, HashMap};

use crate::ledger::{AccountMap, LedgerEntry, NormalBalance, RangeBalance};

use super::date_range::DateRange;

/// Per-period balances of one account.
pub type ValueMap = HashMap<DateRange, RangeBalance>;

/// Value maps keyed by account name.
pub type AccountValueMaps = BTreeMap<String, ValueMap>;

/// Ledger entries keyed by account name.
pub type GroupedEntries = BTreeMap<String, Vec<LedgerEntry>>;

/// Groups entries by account, keeping their original order within each account.
#[must_use]
pub fn group_by_account(entries: &[LedgerEntry]) -> GroupedEntries {
    let mut grouped = GroupedEntries::new();
    for entry in entries {
        grouped
            .entry(entry.account.clone())
            .or_default()
            .push(entry.clone());
    }
    grouped
}

/// Returns the names of grouped accounts missing from `accounts`.
#[must_use]
pub fn unknown_accounts<'a>(grouped: &'a GroupedEntries, accounts: &AccountMap) -> Vec<&'a str> {
    grouped
        .keys()
        .filter(|name| !accounts.contains_key(*name))
        .map(String::as_str)
        .collect()
}

/// Buckets each account's entries into the period that contains them.
///
/// An entry lands in the first period of `ranges` containing its date, so
/// overlapping periods never count it twice. Balances are signed by the
/// account's root type so every figure reads in its natural-increase
/// direction. Entries outside every period are dropped; accounts left with
/// no balances are omitted.
#[must_use]
pub fn group_by_date_ranges(
    grouped: &GroupedEntries,
    ranges: &[DateRange],
    accounts: &AccountMap,
) -> AccountValueMaps {
    let mut value_maps = AccountValueMaps::new();

    for (account, entries) in grouped {
        let side = NormalBalance::from_root_type(accounts.get(account).map(|a| a.root_type));
        let mut value_map = ValueMap::new();

        for entry in entries {
            if let Some(range) = ranges.iter().find(|r| r.contains(entry.date)) {
                value_map
                    .entry(*range)
                    .or_default()
                    .post(entry.debit, entry.credit, side);
            }
        }

        if !value_map.is_empty() {
            value_maps.insert(account.clone(), value_map);
        }
    }

    value_maps
}
