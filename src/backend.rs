//! Boundary with the spreadsheet-writing backend.
//!
//! The engine never touches a workbook file itself. It drives a
//! [`WorkbookBackend`] — the adapter over whatever writer library actually
//! produces the file — with flattened, fully resolved formats. Backend
//! failures propagate to the caller unchanged; the engine neither retries
//! nor suppresses them.
//!
//! [`MemoryBackend`] records the call stream as [`WriteOp`] placement
//! records, for tests and dry runs.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::{CellValue, HAlign, Style, VAlign};

/// A fully resolved cell format: the flattening of one cascaded [`Style`].
///
/// Layout-only attributes (padding, margin) and display substitutions are
/// consumed by the engine and never reach the backend; directional border
/// fields arrive already resolved per side.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormatSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    /// Border weight per side; 0 = no border.
    pub border_left: u8,
    pub border_right: u8,
    pub border_top: u8,
    pub border_bottom: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_h: Option<HAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_v: Option<VAlign>,
    /// Numeric format code, verbatim from the resolved style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_format: Option<String>,
}

impl FormatSpec {
    /// Flatten a resolved style into backend terms.
    #[must_use]
    pub fn from_style(style: &Style) -> FormatSpec {
        FormatSpec {
            font_family: style.font_family.clone(),
            font_size: style.font_size,
            font_color: style.font_color.clone(),
            bold: style.bold,
            border_left: style.border_left(),
            border_right: style.border_right(),
            border_top: style.border_top(),
            border_bottom: style.border_bottom(),
            border_color: style.border_color.clone(),
            background: style.background.clone(),
            align_h: style.align_h,
            align_v: style.align_v,
            num_format: style.num_format.clone(),
        }
    }

    /// True if the format carries nothing the backend needs to apply.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == FormatSpec::default()
    }
}

/// Table definition handed to the backend's table primitive.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableSpec {
    /// Ordered column headers.
    pub columns: Vec<String>,
    /// Resolved format for the header row (global; per-column header
    /// formats are written cell by cell before the table is defined).
    pub header_format: FormatSpec,
    /// Resolved default body format per column, parallel to `columns`.
    pub body_formats: Vec<FormatSpec>,
    /// Backend predefined visual style name, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predefined_style: Option<String>,
    /// Attach a filter control across the header row.
    pub autofilter: bool,
}

/// Writer-backend surface the layout engine drives.
///
/// One sheet is open at a time: the engine brackets each sheet's calls with
/// `begin_sheet`/`end_sheet`, in document tab order. All coordinates are
/// zero-based (row, col).
pub trait WorkbookBackend {
    fn begin_sheet(&mut self, name: &str) -> Result<()>;

    fn set_gridlines(&mut self, show: bool) -> Result<()>;

    fn write_cell(&mut self, row: u32, col: u32, value: &CellValue, format: &FormatSpec)
        -> Result<()>;

    /// Write `value` once into the merged range `(r0, c0)..=(r1, c1)`.
    fn merge_range(
        &mut self,
        r0: u32,
        c0: u32,
        r1: u32,
        c1: u32,
        value: &CellValue,
        format: &FormatSpec,
    ) -> Result<()>;

    /// Define a table over `(r0, c0)..=(r1, c1)` (header row included).
    fn define_table(&mut self, r0: u32, c0: u32, r1: u32, c1: u32, spec: &TableSpec)
        -> Result<()>;

    /// Set the width of one absolute column, in backend width units.
    fn set_column_width(&mut self, col: u32, width: f64) -> Result<()>;

    fn insert_image(&mut self, row: u32, col: u32, path: &Path, scale: f64) -> Result<()>;

    fn end_sheet(&mut self) -> Result<()>;
}

/// One recorded backend call — the placement-record stream of a dry run.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum WriteOp {
    BeginSheet {
        name: String,
    },
    SetGridlines {
        show: bool,
    },
    WriteCell {
        row: u32,
        col: u32,
        value: CellValue,
        format: FormatSpec,
    },
    MergeRange {
        r0: u32,
        c0: u32,
        r1: u32,
        c1: u32,
        value: CellValue,
        format: FormatSpec,
    },
    DefineTable {
        r0: u32,
        c0: u32,
        r1: u32,
        c1: u32,
        spec: TableSpec,
    },
    SetColumnWidth {
        col: u32,
        width: f64,
    },
    InsertImage {
        row: u32,
        col: u32,
        path: PathBuf,
        scale: f64,
    },
    EndSheet,
}

/// Backend that records every call instead of writing a file.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    pub ops: Vec<WriteOp>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        MemoryBackend::default()
    }

    /// Recorded ops for one sheet, by `begin_sheet` order.
    #[must_use]
    pub fn sheet_ops(&self, index: usize) -> &[WriteOp] {
        let mut starts = Vec::new();
        for (i, op) in self.ops.iter().enumerate() {
            if matches!(op, WriteOp::BeginSheet { .. }) {
                starts.push(i);
            }
        }
        let Some(&start) = starts.get(index) else {
            return &[];
        };
        let end = starts.get(index + 1).copied().unwrap_or(self.ops.len());
        self.ops.get(start..end).unwrap_or(&[])
    }
}

impl WorkbookBackend for MemoryBackend {
    fn begin_sheet(&mut self, name: &str) -> Result<()> {
        self.ops.push(WriteOp::BeginSheet {
            name: name.to_string(),
        });
        Ok(())
    }

    fn set_gridlines(&mut self, show: bool) -> Result<()> {
        self.ops.push(WriteOp::SetGridlines { show });
        Ok(())
    }

    fn write_cell(
        &mut self,
        row: u32,
        col: u32,
        value: &CellValue,
        format: &FormatSpec,
    ) -> Result<()> {
        self.ops.push(WriteOp::WriteCell {
            row,
            col,
            value: value.clone(),
            format: format.clone(),
        });
        Ok(())
    }

    fn merge_range(
        &mut self,
        r0: u32,
        c0: u32,
        r1: u32,
        c1: u32,
        value: &CellValue,
        format: &FormatSpec,
    ) -> Result<()> {
        self.ops.push(WriteOp::MergeRange {
            r0,
            c0,
            r1,
            c1,
            value: value.clone(),
            format: format.clone(),
        });
        Ok(())
    }

    fn define_table(
        &mut self,
        r0: u32,
        c0: u32,
        r1: u32,
        c1: u32,
        spec: &TableSpec,
    ) -> Result<()> {
        self.ops.push(WriteOp::DefineTable {
            r0,
            c0,
            r1,
            c1,
            spec: spec.clone(),
        });
        Ok(())
    }

    fn set_column_width(&mut self, col: u32, width: f64) -> Result<()> {
        self.ops.push(WriteOp::SetColumnWidth { col, width });
        Ok(())
    }

    fn insert_image(&mut self, row: u32, col: u32, path: &Path, scale: f64) -> Result<()> {
        self.ops.push(WriteOp::InsertImage {
            row,
            col,
            path: path.to_path_buf(),
            scale,
        });
        Ok(())
    }

    fn end_sheet(&mut self) -> Result<()> {
        self.ops.push(WriteOp::EndSheet);
        Ok(())
    }
}
