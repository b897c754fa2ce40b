//! sheetwright - declarative spreadsheet layout engine
//!
//! Turns a declarative description of a spreadsheet document — sheets of
//! styled components (text, fills, tables, images) — into cell placements
//! and resolved formats for a writer backend:
//! - Cascading partial styles (per-field, associative merge)
//! - Single-column top-to-bottom component stacking with padding/margin
//! - Table column auto-sizing from estimated text extents, monotonic
//!   per-sheet width reconciliation
//! - Header/body/row/column/cell style resolution, NaN/∞/zero display
//!   substitution, duplicate-header merging, header filters
//!
//! The engine never opens a file itself; it drives a
//! [`backend::WorkbookBackend`] adapter and is a pure, sequential
//! computation from the document model to a stream of backend calls.
//!
//! # Usage
//!
//! ```
//! use sheetwright::{render_document, Component, Document, MemoryBackend, Sheet, Style, Text};
//!
//! let sheet = Sheet::new("Report").with_components(vec![Component::Text(Text {
//!     style: Style { bold: Some(true), ..Style::default() },
//!     ..Text::new("Quarterly totals")
//! })]);
//! let document = Document::new("report.xlsx", vec![sheet]);
//!
//! let mut backend = MemoryBackend::new();
//! render_document(&document, &mut backend).unwrap();
//! assert_eq!(backend.sheet_ops(0).len(), 4); // begin, gridlines, cell, end
//! ```

pub mod backend;
pub mod error;
pub mod layout;
pub mod metrics;
pub mod types;

pub use backend::{FormatSpec, MemoryBackend, TableSpec, WorkbookBackend, WriteOp};
pub use error::{Result, SheetwrightError};
pub use layout::{render_document, render_document_with, Footprint, MAX_GRID_COLS, MAX_GRID_ROWS};
pub use metrics::{CharTableMetrics, FontResolution, Measurement, TextMetrics};
pub use types::*;

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
