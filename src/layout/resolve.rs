//! Per-cell style resolution for tables.
//!
//! Every effective style is one cascade in a fixed precedence order:
//!
//! - header cell: [builtin header defaults]? → sheet → component →
//!   header style (global or this column's entry)
//! - body cell:   [builtin body defaults]? → sheet → component → body →
//!   column style → row style → per-cell override
//!
//! The builtin layers participate only when the table's `default_style`
//! toggle is on. Per-cell overrides outrank row styles, which outrank
//! column styles (most specific selector wins; see DESIGN.md).

use crate::types::{CellValue, HAlign, Sheet, Style, Table, ValueClass};

/// Built-in header look applied under `Table::default_style`:
/// bold, centered, grey banner with a medium bottom rule.
#[must_use]
pub fn builtin_header_defaults() -> Style {
    Style {
        bold: Some(true),
        align_h: Some(HAlign::Center),
        background: Some("#D9D9D9".to_string()),
        border_bottom: Some(2),
        border_color: Some("#808080".to_string()),
        ..Style::default()
    }
}

/// Built-in body look applied under `Table::default_style`: a hairline
/// bottom rule separating data rows.
#[must_use]
pub fn builtin_body_defaults() -> Style {
    Style {
        border_bottom: Some(1),
        border_color: Some("#D9D9D9".to_string()),
        ..Style::default()
    }
}

/// Header style shared by every column: everything below the per-column
/// layer. Used for the backend table definition's header format.
#[must_use]
pub fn header_base_style(table: &Table, sheet: &Sheet) -> Style {
    let mut layers: Vec<Style> = Vec::with_capacity(4);
    if table.default_style {
        layers.push(builtin_header_defaults());
    }
    layers.push(sheet.style.clone());
    layers.push(table.style.clone());
    if let crate::types::HeaderStyle::Global(s) = &table.header_style {
        layers.push(s.clone());
    }
    Style::cascade(layers.iter())
}

/// Effective style for one header cell.
#[must_use]
pub fn header_cell_style(table: &Table, sheet: &Sheet, column: &str) -> Style {
    let mut layers: Vec<Style> = Vec::with_capacity(4);
    if table.default_style {
        layers.push(builtin_header_defaults());
    }
    layers.push(sheet.style.clone());
    layers.push(table.style.clone());
    layers.push(table.header_style.for_column(column));
    Style::cascade(layers.iter())
}

/// Body style shared by every cell of one column: everything below the
/// row and per-cell layers. This is also the cascade column auto-sizing
/// measures under.
#[must_use]
pub fn body_column_style(table: &Table, sheet: &Sheet, column: &str) -> Style {
    let mut layers: Vec<Style> = Vec::with_capacity(5);
    if table.default_style {
        layers.push(builtin_body_defaults());
    }
    layers.push(sheet.style.clone());
    layers.push(table.style.clone());
    layers.push(table.body_style.clone());
    layers.push(table.column_style_for(column));
    Style::cascade(layers.iter())
}

/// Effective style for one body cell at (body row index, column index).
#[must_use]
pub fn body_cell_style(table: &Table, sheet: &Sheet, row: usize, col: usize) -> Style {
    let column = table.columns.get(col).map(String::as_str).unwrap_or("");
    let base = body_column_style(table, sheet, column);
    let row_layer = table.row_style.get(&row).cloned().unwrap_or_default();
    let cell_layer = table.cell_style_for(row, col);
    Style::cascade([&base, &row_layer, &cell_layer])
}

/// Apply the resolved style's NaN/∞/zero display substitutions.
///
/// Each fill attribute acts independently; an unset fill leaves the raw
/// value untouched (NaN and infinity pass through to the backend).
#[must_use]
pub fn substitute_value(value: &CellValue, style: &Style) -> CellValue {
    let fill = match value.classify() {
        ValueClass::Missing => style.fill_na.as_ref(),
        ValueClass::Infinite => style.fill_inf.as_ref(),
        ValueClass::Zero => style.fill_zero.as_ref(),
        ValueClass::Text | ValueClass::Finite => None,
    };
    match fill {
        Some(text) => CellValue::Text(text.clone()),
        None => value.clone(),
    }
}

/// One run of identical adjacent headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSpan {
    pub text: String,
    /// Column offset of the first cell in the run.
    pub start: usize,
    /// Number of columns covered (≥ 1).
    pub span: usize,
}

/// Collapse strictly-adjacent equal header texts into spans. Non-adjacent
/// duplicates stay separate.
#[must_use]
pub fn merge_adjacent_headers(columns: &[String]) -> Vec<HeaderSpan> {
    let mut spans: Vec<HeaderSpan> = Vec::new();
    for (idx, text) in columns.iter().enumerate() {
        match spans.last_mut() {
            Some(last) if last.text == *text && last.start + last.span == idx => {
                last.span += 1;
            }
            _ => spans.push(HeaderSpan {
                text: text.clone(),
                start: idx,
                span: 1,
            }),
        }
    }
    spans
}
