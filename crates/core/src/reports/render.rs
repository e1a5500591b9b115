//! Flattening account trees into report rows.

use std::collections::VecDeque;

use rust_decimal::Decimal;

use super::date_range::{DateRange, RunMode, column_label};
use super::format::ValueFormatter;
use super::grouping::ValueMap;
use super::tree::AccountTreeNode;
use super::types::{
    ACC_BAL_WIDTH, ACC_NAME_WIDTH, AccountListNode, Align, ColumnField, FieldType, RawValue,
    ReportCell, ReportRow,
};
use crate::ledger::RangeBalance;

/// Flattens trees depth-first, pre-order; roots get level 0.
#[must_use]
pub fn flatten(roots: &[&AccountTreeNode]) -> Vec<AccountListNode> {
    let mut list = Vec::new();
    for root in roots {
        push_to_list(root, &mut list, 0);
    }
    list
}

fn push_to_list(node: &AccountTreeNode, list: &mut Vec<AccountListNode>, level: usize) {
    list.push(AccountListNode {
        name: node.account.name.clone(),
        root_type: Some(node.account.root_type),
        is_group: node.account.is_group,
        parent_account: node.account.parent_account.clone(),
        value_map: node.value_map.clone(),
        level,
    });
    for child in &node.children {
        push_to_list(child, list, level + 1);
    }
}

/// Collects the childless nodes under `roots`, in pre-order.
///
/// Each group is replaced in place by its children until only leaves
/// remain. A root with no children counts as its own leaf.
#[must_use]
pub fn leaf_nodes<'a>(roots: &[&'a AccountTreeNode]) -> Vec<&'a AccountTreeNode> {
    let mut pending: VecDeque<&AccountTreeNode> = roots.iter().copied().collect();
    let mut leaves = Vec::new();

    while let Some(node) = pending.pop_front() {
        if node.is_leaf() {
            leaves.push(node);
            continue;
        }
        for child in node.children.iter().rev() {
            pending.push_front(child);
        }
    }

    leaves
}

/// Builds a total row node summing the leaf balances under `roots`.
#[must_use]
pub fn total_node(roots: &[&AccountTreeNode], name: &str, ranges: &[DateRange]) -> AccountListNode {
    let leaves = leaf_nodes(roots);
    let value_map = ranges
        .iter()
        .map(|range| {
            let total: Decimal = leaves
                .iter()
                .filter_map(|leaf| leaf.value_map.get(range))
                .map(|balance| balance.balance)
                .sum();
            (*range, RangeBalance::from_balance(total))
        })
        .collect();

    synthetic_node(name, value_map)
}

/// Builds a synthetic level-0 node (totals, net figures).
#[must_use]
pub fn synthetic_node(name: &str, value_map: ValueMap) -> AccountListNode {
    AccountListNode {
        name: name.to_string(),
        root_type: None,
        is_group: false,
        parent_account: None,
        value_map,
        level: 0,
    }
}

/// Account column followed by one balance column per period.
#[must_use]
pub fn period_columns(ranges: &[DateRange], mode: RunMode) -> Vec<ColumnField> {
    let mut columns = vec![ColumnField {
        label: "Account".to_string(),
        fieldtype: FieldType::Link,
        fieldname: "account".to_string(),
        align: Align::Left,
        width: ACC_NAME_WIDTH,
    }];

    columns.extend(ranges.iter().enumerate().map(|(index, range)| ColumnField {
        label: column_label(range, index, mode),
        fieldtype: FieldType::Data,
        fieldname: format!("date_{index}"),
        align: Align::Right,
        width: ACC_BAL_WIDTH,
    }));

    columns
}

/// Blank separator row matching the column layout.
#[must_use]
pub fn empty_row(columns: &[ColumnField]) -> ReportRow {
    ReportRow {
        cells: columns
            .iter()
            .map(|column| ReportCell {
                value: String::new(),
                raw_value: RawValue::Empty,
                align: Align::Left,
                width: column.width,
                bold: false,
                indent: 0,
            })
            .collect(),
        level: 0,
        is_group: false,
        is_empty: true,
        folded: false,
        folded_below: false,
    }
}

/// Renders account list nodes into rows.
pub struct RowRenderer<'a> {
    ranges: &'a [DateRange],
    formatter: &'a dyn ValueFormatter,
    hide_group_amounts: bool,
}

impl<'a> RowRenderer<'a> {
    /// Creates a renderer for the given periods.
    #[must_use]
    pub fn new(
        ranges: &'a [DateRange],
        formatter: &'a dyn ValueFormatter,
        hide_group_amounts: bool,
    ) -> Self {
        Self {
            ranges,
            formatter,
            hide_group_amounts,
        }
    }

    /// Renders every node in order.
    #[must_use]
    pub fn rows(&self, nodes: &[AccountListNode]) -> Vec<ReportRow> {
        nodes.iter().map(|node| self.row(node)).collect()
    }

    /// Renders one node: a name cell, then one balance cell per period.
    #[must_use]
    pub fn row(&self, node: &AccountListNode) -> ReportRow {
        let mut cells = Vec::with_capacity(self.ranges.len() + 1);
        cells.push(ReportCell {
            value: node.name.clone(),
            raw_value: RawValue::Text(node.name.clone()),
            align: Align::Left,
            width: ACC_NAME_WIDTH,
            bold: node.level == 0,
            indent: node.level,
        });

        for range in self.ranges {
            let raw = node
                .value_map
                .get(range)
                .map_or(Decimal::ZERO, |balance| balance.balance);
            let value = if self.hide_group_amounts && node.is_group {
                String::new()
            } else {
                self.formatter.format(raw, FieldType::Currency)
            };
            cells.push(ReportCell {
                value,
                raw_value: RawValue::Amount(raw),
                align: Align::Right,
                width: ACC_BAL_WIDTH,
                bold: false,
                indent: 0,
            });
        }

        ReportRow {
            cells,
            level: node.level,
            is_group: node.is_group,
            is_empty: false,
            folded: false,
            folded_below: false,
        }
    }
}
