//! Plain-text rendering of report data.

use std::fmt::{self, Write};

use folio_core::reports::{Align, ReportCell, ReportData};

const INDENT: usize = 2;

fn cell_text(cell: &ReportCell) -> String {
    format!("{}{}", " ".repeat(cell.indent * INDENT), cell.value)
}

fn pad(text: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{text:<width$}"),
        Align::Right => format!("{text:>width$}"),
        Align::Center => format!("{text:^width$}"),
    }
}

/// Renders columns and rows as an aligned table.
///
/// Group rows are indented by their level; blank separator rows become
/// empty lines.
///
/// # Errors
///
/// Returns `fmt::Error` if writing to the buffer fails.
pub fn render(data: &ReportData) -> Result<String, fmt::Error> {
    let mut widths: Vec<usize> = data
        .columns
        .iter()
        .map(|column| column.label.chars().count())
        .collect();
    for row in &data.rows {
        for (i, cell) in row.cells.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell_text(cell).chars().count());
            }
        }
    }

    let mut out = String::new();
    let header: Vec<String> = data
        .columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| pad(&column.label, *width, column.align))
        .collect();
    writeln!(out, "{}", header.join("  ").trim_end())?;
    let rule: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    writeln!(out, "{}", "-".repeat(rule))?;

    for row in &data.rows {
        if row.is_empty {
            out.push('\n');
            continue;
        }
        let cells: Vec<String> = row
            .cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(&cell_text(cell), *width, cell.align))
            .collect();
        writeln!(out, "{}", cells.join("  ").trim_end())?;
    }

    Ok(out)
}
