//! Column auto-sizing and the per-sheet width cache.
//!
//! A column's width comes from the widest rendered extent of its header and
//! body text under the styles that actually apply to them, scaled into
//! backend width units. Explicit overrides skip measurement entirely.
//!
//! The cache is owned by one sheet's layout pass — never process-global —
//! and reconciles widths by absolute column position so that stacked tables
//! sharing a column position only ever widen it.

use std::collections::BTreeMap;

use crate::layout::resolve;
use crate::metrics::{TextMetrics, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE};
use crate::types::{Sheet, Style, Table};

/// Divisor converting measured points into backend width units.
/// One width unit ≈ one '0' digit at 11 pt Calibri ≈ 6 pt.
pub const DEFAULT_WIDTH_TUNING: f64 = 6.0;

/// Width units of breathing room added after scaling.
pub const DEFAULT_WIDTH_PADDING: f64 = 1.5;

/// Narrowest a column is ever set, in width units.
pub const MIN_COL_WIDTH: f64 = 1.0;

/// Per-sheet width reconciliation, keyed by absolute column index.
///
/// Widths only grow: reconciling stores and returns the max of the cached
/// and the newly computed value, so a later, narrower table never shrinks a
/// column an earlier table already widened.
#[derive(Debug, Default)]
pub struct WidthCache {
    widths: BTreeMap<u32, f64>,
}

impl WidthCache {
    #[must_use]
    pub fn new() -> Self {
        WidthCache::default()
    }

    /// Store and return `max(cached, width)` for `col`.
    pub fn reconcile(&mut self, col: u32, width: f64) -> f64 {
        let entry = self.widths.entry(col).or_insert(width);
        if width > *entry {
            *entry = width;
        }
        *entry
    }

    /// Currently cached width for `col`, if any table has sized it yet.
    #[must_use]
    pub fn get(&self, col: u32) -> Option<f64> {
        self.widths.get(&col).copied()
    }
}

fn effective_font(style: &Style) -> (&str, f64) {
    (
        style.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY),
        style.font_size.unwrap_or(DEFAULT_FONT_SIZE),
    )
}

/// Effective widths for every column of `table`, in column order, already
/// reconciled through `cache` at the table's absolute column positions.
#[allow(clippy::cast_possible_truncation)] // column counts fit u32
pub fn resolve_column_widths(
    table: &Table,
    sheet: &Sheet,
    origin_col: u32,
    metrics: &dyn TextMetrics,
    cache: &mut WidthCache,
) -> Vec<f64> {
    let tuning = table.width_tuning.unwrap_or(DEFAULT_WIDTH_TUNING);
    let padding = table.width_padding.unwrap_or(DEFAULT_WIDTH_PADDING);

    table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let abs_col = origin_col + idx as u32;
            let width = match table.column_width.get(column) {
                Some(&explicit) => {
                    if explicit < MIN_COL_WIDTH {
                        log::warn!(
                            "column {column:?}: explicit width {explicit} clamped to {MIN_COL_WIDTH}"
                        );
                        MIN_COL_WIDTH
                    } else {
                        explicit
                    }
                }
                None => auto_width(table, sheet, column, idx, metrics, tuning, padding),
            };
            cache.reconcile(abs_col, width)
        })
        .collect()
}

/// Auto-size one column: max of header and body extents, scaled and
/// padded, then capped by the table's `max_width` if set. A column with
/// zero rows sizes from its header alone.
fn auto_width(
    table: &Table,
    sheet: &Sheet,
    column: &str,
    idx: usize,
    metrics: &dyn TextMetrics,
    tuning: f64,
    padding: f64,
) -> f64 {
    let header_style = resolve::header_cell_style(table, sheet, column);
    let (family, size) = effective_font(&header_style);
    let header_pts = metrics.measure(column, family, size).width;

    let body_style = resolve::body_column_style(table, sheet, column);
    let (family, size) = effective_font(&body_style);
    let body_pts = table
        .rows
        .iter()
        .filter_map(|row| row.get(idx))
        .map(|cell| metrics.measure(&cell.to_display_string(), family, size).width)
        .fold(0.0_f64, f64::max);

    let mut width = header_pts.max(body_pts) / tuning + padding;
    if let Some(cap) = table.max_width {
        width = width.min(cap);
    }
    width.max(MIN_COL_WIDTH)
}
