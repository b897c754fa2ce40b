//! Common test utilities and assertion helpers.
//!
//! Builders for small documents plus lookups over the recorded
//! [`WriteOp`] placement stream.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use sheetwright::{
    render_document, CellValue, Component, Document, FormatSpec, MemoryBackend, Sheet, Table,
    WriteOp,
};

// ============================================================================
// Builders
// ============================================================================

/// Table with the given headers and rows, builtin defaults left on.
#[must_use]
pub fn table(columns: &[&str], rows: Vec<Vec<CellValue>>) -> Table {
    Table::new(columns.iter().map(|s| (*s).to_string()).collect(), rows)
}

/// Render a one-sheet document and hand back the recorded op stream.
#[must_use]
pub fn render_sheet(sheet: Sheet) -> MemoryBackend {
    let document = Document::new("out.xlsx", vec![sheet]);
    let mut backend = MemoryBackend::new();
    render_document(&document, &mut backend).expect("layout failed");
    backend
}

/// Render a one-sheet document holding exactly these components.
#[must_use]
pub fn render_components(components: Vec<Component>) -> MemoryBackend {
    render_sheet(Sheet::new("Sheet1").with_components(components))
}

// ============================================================================
// Op-stream lookups
// ============================================================================

/// The value and format written to (row, col), if any single-cell write
/// targeted it.
#[must_use]
pub fn cell_at(ops: &[WriteOp], row: u32, col: u32) -> Option<(&CellValue, &FormatSpec)> {
    ops.iter().find_map(|op| match op {
        WriteOp::WriteCell {
            row: r,
            col: c,
            value,
            format,
        } if *r == row && *c == col => Some((value, format)),
        _ => None,
    })
}

/// The value written to (row, col) by a single-cell write; panics when the
/// cell was never written.
#[must_use]
pub fn value_at(ops: &[WriteOp], row: u32, col: u32) -> &CellValue {
    cell_at(ops, row, col)
        .unwrap_or_else(|| panic!("no cell written at ({row}, {col})"))
        .0
}

/// All recorded merge ranges as (r0, c0, r1, c1).
#[must_use]
pub fn merge_ranges(ops: &[WriteOp]) -> Vec<(u32, u32, u32, u32)> {
    ops.iter()
        .filter_map(|op| match op {
            WriteOp::MergeRange { r0, c0, r1, c1, .. } => Some((*r0, *c0, *r1, *c1)),
            _ => None,
        })
        .collect()
}

/// The last width set for an absolute column, if any.
#[must_use]
pub fn column_width(ops: &[WriteOp], col: u32) -> Option<f64> {
    ops.iter()
        .filter_map(|op| match op {
            WriteOp::SetColumnWidth { col: c, width } if *c == col => Some(*width),
            _ => None,
        })
        .last()
}

/// All widths set for an absolute column, in emission order.
#[must_use]
pub fn column_widths_all(ops: &[WriteOp], col: u32) -> Vec<f64> {
    ops.iter()
        .filter_map(|op| match op {
            WriteOp::SetColumnWidth { col: c, width } if *c == col => Some(*width),
            _ => None,
        })
        .collect()
}

/// The recorded table definitions as (r0, c0, r1, c1, spec).
#[must_use]
pub fn table_defs(ops: &[WriteOp]) -> Vec<(u32, u32, u32, u32, &sheetwright::TableSpec)> {
    ops.iter()
        .filter_map(|op| match op {
            WriteOp::DefineTable {
                r0,
                c0,
                r1,
                c1,
                spec,
            } => Some((*r0, *c0, *r1, *c1, spec)),
            _ => None,
        })
        .collect()
}

/// Shorthand for a text cell value.
#[must_use]
pub fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}
