//! Display formatting of report values.

use rust_decimal::{Decimal, RoundingStrategy};

use folio_shared::config::FormatConfig;

use super::types::FieldType;

/// Converts a number into display text for a column type.
pub trait ValueFormatter: Send + Sync {
    /// Formats `value` for a column of type `field_type`.
    fn format(&self, value: Decimal, field_type: FieldType) -> String;
}

/// Formatter with a currency symbol, fixed precision and digit grouping.
#[derive(Debug, Clone)]
pub struct CurrencyFormatter {
    symbol: String,
    precision: u32,
    thousands_separator: String,
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::from_config(&FormatConfig::default())
    }
}

impl CurrencyFormatter {
    /// Creates a formatter from configuration.
    #[must_use]
    pub fn from_config(config: &FormatConfig) -> Self {
        Self {
            symbol: config.currency_symbol.clone(),
            precision: config.precision,
            thousands_separator: config.thousands_separator.clone(),
        }
    }

    fn fixed(&self, value: Decimal, precision: u32, symbol: &str) -> String {
        let rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = format!("{:.*}", precision as usize, rounded.abs());
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (digits.as_str(), None),
        };

        let mut out = format!("{sign}{symbol}{}", self.group_digits(int_part));
        if let Some(frac) = frac_part {
            out.push('.');
            out.push_str(frac);
        }
        out
    }

    fn group_digits(&self, digits: &str) -> String {
        let len = digits.len();
        let mut out = String::with_capacity(len + len / 3 * self.thousands_separator.len());
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push_str(&self.thousands_separator);
            }
            out.push(ch);
        }
        out
    }
}

impl ValueFormatter for CurrencyFormatter {
    fn format(&self, value: Decimal, field_type: FieldType) -> String {
        match field_type {
            FieldType::Currency => self.fixed(value, self.precision, &self.symbol),
            FieldType::Float => self.fixed(value, self.precision, ""),
            FieldType::Int => self.fixed(value, 0, ""),
            _ => value.normalize().to_string(),
        }
    }
}
