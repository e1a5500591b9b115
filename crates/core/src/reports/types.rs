//! Report output contract.
//!
//! A report produces a column list and a row list; these types are the only
//! surface a rendering layer consumes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::RootType;

use super::grouping::ValueMap;

/// Relative width of the account name column.
pub const ACC_NAME_WIDTH: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Relative width of each balance column.
pub const ACC_BAL_WIDTH: Decimal = Decimal::from_parts(125, 0, 0, false, 2);

/// Horizontal alignment of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Left aligned.
    Left,
    /// Right aligned.
    Right,
    /// Centered.
    Center,
}

/// Semantic type of a column, used to pick a display format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Reference to another record (an account name).
    Link,
    /// Free text.
    Data,
    /// Monetary amount.
    Currency,
    /// Whole number.
    Int,
    /// Decimal number.
    Float,
    /// Calendar date.
    Date,
    /// Boolean flag.
    Check,
}

/// Describes one report column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnField {
    /// Heading text.
    pub label: String,
    /// Semantic type.
    pub fieldtype: FieldType,
    /// Stable key of the column.
    pub fieldname: String,
    /// Alignment of the column's cells.
    pub align: Align,
    /// Relative width.
    pub width: Decimal,
}

/// The unformatted value behind a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// An amount.
    Amount(Decimal),
    /// Text such as an account name.
    Text(String),
    /// No value (blank rows).
    Empty,
}

/// One rendered cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCell {
    /// Display text.
    pub value: String,
    /// Unformatted value.
    pub raw_value: RawValue,
    /// Alignment.
    pub align: Align,
    /// Relative width.
    pub width: Decimal,
    /// Bold text.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    /// Indentation level.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub indent: usize,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &usize) -> bool {
    *value == 0
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    /// Cells, one per column.
    pub cells: Vec<ReportCell>,
    /// Depth of the account in its tree.
    pub level: usize,
    /// Whether the row is a group account.
    pub is_group: bool,
    /// Whether this is a blank separator row.
    pub is_empty: bool,
    /// Whether the row is folded in the UI.
    pub folded: bool,
    /// Whether the rows below are folded in the UI.
    pub folded_below: bool,
}

/// An account (or a synthetic total) flattened for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountListNode {
    /// Display name.
    pub name: String,
    /// Root type, `None` for synthetic totals.
    pub root_type: Option<RootType>,
    /// Whether this is a group account.
    pub is_group: bool,
    /// Parent account name.
    pub parent_account: Option<String>,
    /// Balances per period.
    pub value_map: ValueMap,
    /// Depth from the supplied roots (roots are 0).
    pub level: usize,
}

/// Rendered report: columns plus rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportData {
    /// Column descriptors.
    pub columns: Vec<ColumnField>,
    /// Rows in display order.
    pub rows: Vec<ReportRow>,
}
