//! The layout engine: walks a document sheet by sheet, places each
//! component, and drives the writer backend.
//!
//! Layout is single-column, top-to-bottom stacking. Per sheet, a cursor
//! starts at the sheet's padded origin; each component draws at
//! `cursor + its own padding`, reports the footprint it consumed, and the
//! cursor advances vertically by that footprint plus the component's
//! margins. The horizontal cursor never advances — every component
//! restarts at the sheet's left padding.

pub mod resolve;
pub mod widths;

use crate::backend::{FormatSpec, TableSpec, WorkbookBackend};
use crate::error::{Result, SheetwrightError};
use crate::metrics::{CharTableMetrics, TextMetrics};
use crate::types::{CellValue, Component, Document, Fill, Image, Sheet, Style, Table, Text};
use widths::WidthCache;

/// The (width, height) in cells a placed component consumed, padding
/// included. Drives cursor advancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    const ZERO: Footprint = Footprint {
        width: 0,
        height: 0,
    };
}

/// Worksheet grid bounds (XLSX limits). Declared block footprints are
/// clamped to stay inside them, which also keeps cell arithmetic bounded.
pub const MAX_GRID_ROWS: u32 = 1_048_576;
pub const MAX_GRID_COLS: u32 = 16_384;

fn clamp_footprint(width: u32, height: u32) -> (u32, u32) {
    if width > MAX_GRID_COLS || height > MAX_GRID_ROWS {
        log::warn!("declared footprint {width}x{height} exceeds the grid, clamping");
    }
    (width.min(MAX_GRID_COLS), height.min(MAX_GRID_ROWS))
}

/// Lay out `document` against the built-in character-table metrics.
pub fn render_document(document: &Document, backend: &mut dyn WorkbookBackend) -> Result<()> {
    render_document_with(document, &CharTableMetrics::new(), backend)
}

/// Lay out `document` with a caller-supplied [`TextMetrics`].
///
/// Sheets are processed in tab order; each sheet's layout owns a fresh
/// [`WidthCache`], so nothing leaks across sheets or across concurrent
/// documents. Backend failures propagate unchanged.
pub fn render_document_with(
    document: &Document,
    metrics: &dyn TextMetrics,
    backend: &mut dyn WorkbookBackend,
) -> Result<()> {
    for sheet in &document.sheets {
        render_sheet(sheet, metrics, backend)?;
    }
    Ok(())
}

fn render_sheet(
    sheet: &Sheet,
    metrics: &dyn TextMetrics,
    backend: &mut dyn WorkbookBackend,
) -> Result<()> {
    backend.begin_sheet(&sheet.name)?;
    backend.set_gridlines(sheet.gridlines)?;

    let mut cache = WidthCache::new();
    let left = sheet.style.padding_left();
    let mut row = sheet.style.padding_top();

    for component in &sheet.components {
        let style = component.style();
        let origin = (
            row.saturating_add(style.padding_top()),
            left.saturating_add(style.padding_left()),
        );

        let footprint = match component {
            Component::Text(text) => render_text(text, sheet, origin, backend)?,
            Component::Fill(fill) => render_fill(fill, sheet, origin, backend)?,
            Component::Table(table) => {
                render_table(table, sheet, origin, metrics, &mut cache, backend)?
            }
            Component::Image(image) => render_image(image, sheet, origin, backend)?,
        };
        log::debug!(
            "placed component at {origin:?}, consumed {}x{}",
            footprint.width,
            footprint.height
        );

        row = row
            .saturating_add(style.padding_top())
            .saturating_add(footprint.height)
            .saturating_add(style.padding_bottom())
            .saturating_add(style.margin_top())
            .saturating_add(style.margin_bottom());
    }

    backend.end_sheet()
}

/// Write one value over a `width` × `height` block anchored at `origin`:
/// a single merged cell when `merged`, else the same value and format
/// repeated per constituent cell.
fn write_block(
    origin: (u32, u32),
    width: u32,
    height: u32,
    merged: bool,
    value: &CellValue,
    format: &FormatSpec,
    backend: &mut dyn WorkbookBackend,
) -> Result<()> {
    let (row, col) = origin;
    if merged && u64::from(width) * u64::from(height) > 1 {
        backend.merge_range(
            row,
            col,
            row.saturating_add(height - 1),
            col.saturating_add(width - 1),
            value,
            format,
        )
    } else {
        for r in row..row.saturating_add(height) {
            for c in col..col.saturating_add(width) {
                backend.write_cell(r, c, value, format)?;
            }
        }
        Ok(())
    }
}

fn render_text(
    text: &Text,
    sheet: &Sheet,
    origin: (u32, u32),
    backend: &mut dyn WorkbookBackend,
) -> Result<Footprint> {
    if text.width == 0 || text.height == 0 {
        log::warn!("text component with zero footprint at {origin:?}, skipping");
        return Ok(Footprint::ZERO);
    }
    let (width, height) = clamp_footprint(text.width, text.height);
    let resolved = Style::cascade([&sheet.style, &text.style]);
    let format = FormatSpec::from_style(&resolved);
    let value = CellValue::Text(text.text.clone());
    write_block(origin, width, height, text.merged, &value, &format, backend)?;
    Ok(Footprint { width, height })
}

fn render_fill(
    fill: &Fill,
    sheet: &Sheet,
    origin: (u32, u32),
    backend: &mut dyn WorkbookBackend,
) -> Result<Footprint> {
    if fill.width == 0 || fill.height == 0 {
        log::warn!("fill component with zero footprint at {origin:?}, skipping");
        return Ok(Footprint::ZERO);
    }
    let (width, height) = clamp_footprint(fill.width, fill.height);
    let resolved = Style::cascade([&sheet.style, &fill.style]);
    let format = FormatSpec::from_style(&resolved);
    write_block(
        origin,
        width,
        height,
        fill.merged,
        &CellValue::Missing,
        &format,
        backend,
    )?;
    Ok(Footprint { width, height })
}

#[allow(clippy::cast_possible_truncation)] // row/column counts fit u32
fn render_table(
    table: &Table,
    sheet: &Sheet,
    origin: (u32, u32),
    metrics: &dyn TextMetrics,
    cache: &mut WidthCache,
    backend: &mut dyn WorkbookBackend,
) -> Result<Footprint> {
    let n_cols = table.columns.len() as u32;
    if n_cols == 0 {
        log::warn!("table with no columns at {origin:?}, skipping");
        return Ok(Footprint::ZERO);
    }
    let n_rows = table.rows.len() as u32;
    let (origin_row, origin_col) = origin;

    // Column widths first, reconciled against earlier tables in this sheet.
    let col_widths = widths::resolve_column_widths(table, sheet, origin_col, metrics, cache);
    for (idx, width) in col_widths.iter().enumerate() {
        backend.set_column_width(origin_col.saturating_add(idx as u32), *width)?;
    }

    // Header row.
    let spans = if table.merge_headers {
        resolve::merge_adjacent_headers(&table.columns)
    } else {
        table
            .columns
            .iter()
            .enumerate()
            .map(|(idx, text)| resolve::HeaderSpan {
                text: text.clone(),
                start: idx,
                span: 1,
            })
            .collect()
    };
    for span in &spans {
        let style = resolve::header_cell_style(table, sheet, &span.text);
        let format = FormatSpec::from_style(&style);
        let value = CellValue::Text(span.text.clone());
        let col = origin_col.saturating_add(span.start as u32);
        if span.span > 1 {
            backend.merge_range(
                origin_row,
                col,
                origin_row,
                col.saturating_add(span.span as u32 - 1),
                &value,
                &format,
            )?;
        } else {
            backend.write_cell(origin_row, col, &value, &format)?;
        }
    }

    // Body cells, with display substitution under the resolved style.
    for (row_idx, row) in table.rows.iter().enumerate() {
        for col_idx in 0..table.columns.len() {
            let style = resolve::body_cell_style(table, sheet, row_idx, col_idx);
            let format = FormatSpec::from_style(&style);
            let raw = row.get(col_idx).cloned().unwrap_or(CellValue::Missing);
            let value = resolve::substitute_value(&raw, &style);
            backend.write_cell(
                origin_row.saturating_add(1 + row_idx as u32),
                origin_col.saturating_add(col_idx as u32),
                &value,
                &format,
            )?;
        }
    }

    // Table definition over the full range, header row included.
    let spec = TableSpec {
        columns: table.columns.clone(),
        header_format: FormatSpec::from_style(&resolve::header_base_style(table, sheet)),
        body_formats: table
            .columns
            .iter()
            .map(|column| FormatSpec::from_style(&resolve::body_column_style(table, sheet, column)))
            .collect(),
        predefined_style: table.predefined_style.clone(),
        autofilter: table.header_filter,
    };
    backend.define_table(
        origin_row,
        origin_col,
        origin_row.saturating_add(n_rows),
        origin_col.saturating_add(n_cols - 1),
        &spec,
    )?;

    Ok(Footprint {
        width: n_cols,
        height: n_rows + 1,
    })
}

fn render_image(
    image: &Image,
    sheet: &Sheet,
    origin: (u32, u32),
    backend: &mut dyn WorkbookBackend,
) -> Result<Footprint> {
    if image.width == 0 || image.height == 0 {
        log::warn!("image component with zero footprint at {origin:?}, skipping");
        return Ok(Footprint::ZERO);
    }
    if image.path.as_os_str().is_empty() {
        return Err(SheetwrightError::Image(
            "image component has an empty path".to_string(),
        ));
    }
    let (width, height) = clamp_footprint(image.width, image.height);
    let (row, col) = origin;

    // Only border attributes apply to an image block.
    let resolved = Style::cascade([&sheet.style, &image.style]);
    let format = FormatSpec {
        border_left: resolved.border_left(),
        border_right: resolved.border_right(),
        border_top: resolved.border_top(),
        border_bottom: resolved.border_bottom(),
        border_color: resolved.border_color.clone(),
        ..FormatSpec::default()
    };
    if u64::from(width) * u64::from(height) > 1 {
        backend.merge_range(
            row,
            col,
            row.saturating_add(height - 1),
            col.saturating_add(width - 1),
            &CellValue::Missing,
            &format,
        )?;
    } else if !format.is_default() {
        backend.write_cell(row, col, &CellValue::Missing, &format)?;
    }
    backend.insert_image(row, col, &image.path, image.scale)?;
    Ok(Footprint { width, height })
}
