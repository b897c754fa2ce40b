use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::Style;

/// A single table-cell value.
///
/// `Number` may carry NaN or ±∞ when the caller's data came from a numeric
/// column; the engine normalizes those through [`CellValue::classify`]
/// rather than trusting the variant alone.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum CellValue {
    Text(String),
    Number(f64),
    /// Missing/NA value (NaN in the source data).
    Missing,
    /// Positive or negative infinity.
    Infinite,
}

/// Numeric class of a cell value after NaN/∞ normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueClass {
    Text,
    Finite,
    Zero,
    Missing,
    Infinite,
}

impl CellValue {
    /// Classify a value for display substitution. A `Number` holding NaN
    /// counts as missing, a non-finite one as infinite, exact 0.0 as zero.
    #[must_use]
    #[allow(clippy::float_cmp)] // exact-zero check
    pub fn classify(&self) -> ValueClass {
        match self {
            CellValue::Text(_) => ValueClass::Text,
            CellValue::Missing => ValueClass::Missing,
            CellValue::Infinite => ValueClass::Infinite,
            CellValue::Number(n) => {
                if n.is_nan() {
                    ValueClass::Missing
                } else if n.is_infinite() {
                    ValueClass::Infinite
                } else if *n == 0.0 {
                    ValueClass::Zero
                } else {
                    ValueClass::Finite
                }
            }
        }
    }

    /// Stringified form used for width estimation and for backends that
    /// only take text.
    #[must_use]
    #[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.is_nan() {
                    "NaN".to_string()
                } else if *n == n.trunc() && n.is_finite() && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            CellValue::Missing => String::new(),
            CellValue::Infinite => "inf".to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

/// One component in a sheet's vertical stack.
///
/// Closed set: the layout engine dispatches with an exhaustive `match`, so
/// adding a variant is a compile-enforced change everywhere it matters.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Component {
    Text(Text),
    Fill(Fill),
    Table(Table),
    Image(Image),
}

impl Component {
    /// The component's own declared style.
    #[must_use]
    pub fn style(&self) -> &Style {
        match self {
            Component::Text(c) => &c.style,
            Component::Fill(c) => &c.style,
            Component::Table(c) => &c.style,
            Component::Image(c) => &c.style,
        }
    }
}

/// A block of text spanning `width` × `height` cells.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub text: String,
    /// Footprint in cells; defaults to 1 × 1.
    pub width: u32,
    pub height: u32,
    /// When true (the default) a multi-cell footprint becomes one merged
    /// cell; when false the text repeats in every constituent cell.
    pub merged: bool,
    pub style: Style,
}

impl Text {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Text {
            text: text.into(),
            width: 1,
            height: 1,
            merged: true,
            style: Style::default(),
        }
    }
}

/// A background-only block of `width` × `height` cells.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    pub width: u32,
    pub height: u32,
    /// Same merge semantics as [`Text::merged`].
    pub merged: bool,
    pub style: Style,
}

impl Fill {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Fill {
            width,
            height,
            merged: true,
            style: Style::default(),
        }
    }
}

impl Default for Fill {
    fn default() -> Self {
        Fill::new(1, 1)
    }
}

/// Header styling: one style for every header cell, or one per column name.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum HeaderStyle {
    Global(Style),
    PerColumn(BTreeMap<String, Style>),
}

impl Default for HeaderStyle {
    fn default() -> Self {
        HeaderStyle::Global(Style::default())
    }
}

impl HeaderStyle {
    /// The style contribution for one header column (empty when a
    /// per-column map has no entry for it).
    #[must_use]
    pub fn for_column(&self, column: &str) -> Style {
        match self {
            HeaderStyle::Global(s) => s.clone(),
            HeaderStyle::PerColumn(map) => map.get(column).cloned().unwrap_or_default(),
        }
    }
}

/// A tabular component: ordered named columns over rows of [`CellValue`]s.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Table {
    /// Ordered column headers.
    pub columns: Vec<String>,
    /// Body rows; each row is indexed positionally against `columns`.
    pub rows: Vec<Vec<CellValue>>,
    pub style: Style,
    pub header_style: HeaderStyle,
    pub body_style: Style,
    /// Per-column body style, keyed by column name.
    pub column_style: BTreeMap<String, Style>,
    /// Per-row body style, keyed by body row index (0 = first data row).
    pub row_style: BTreeMap<usize, Style>,
    /// Per-cell overrides addressed by body row and column index.
    pub cell_style: Vec<CellStyleOverride>,
    /// Apply the built-in header/body visual defaults at the bottom of the
    /// cascade. On by default.
    pub default_style: bool,
    /// Backend predefined table style name (e.g. "Table Style Light 11").
    pub predefined_style: Option<String>,
    /// Attach a dropdown filter across the header row.
    pub header_filter: bool,
    /// Collapse strictly-adjacent header cells with identical text into one
    /// merged header spanning their combined width.
    pub merge_headers: bool,
    /// Explicit column widths, keyed by column name; bypasses auto-sizing.
    pub column_width: BTreeMap<String, f64>,
    /// Upper bound on auto-sized column widths, in width units. Applies
    /// after the tuning/padding step; explicit `column_width` entries are
    /// never capped.
    pub max_width: Option<f64>,
    /// Auto-width divisor; see `layout::widths::DEFAULT_WIDTH_TUNING`.
    pub width_tuning: Option<f64>,
    /// Auto-width additive padding; see
    /// `layout::widths::DEFAULT_WIDTH_PADDING`.
    pub width_padding: Option<f64>,
}

impl Default for Table {
    fn default() -> Self {
        Table {
            columns: Vec::new(),
            rows: Vec::new(),
            style: Style::default(),
            header_style: HeaderStyle::default(),
            body_style: Style::default(),
            column_style: BTreeMap::new(),
            row_style: BTreeMap::new(),
            cell_style: Vec::new(),
            default_style: true,
            predefined_style: None,
            header_filter: false,
            merge_headers: false,
            column_width: BTreeMap::new(),
            max_width: None,
            width_tuning: None,
            width_padding: None,
        }
    }
}

impl Table {
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Table {
            columns,
            rows,
            ..Table::default()
        }
    }

    /// Effective body style for one column name (empty when absent).
    #[must_use]
    pub fn column_style_for(&self, column: &str) -> Style {
        self.column_style.get(column).cloned().unwrap_or_default()
    }

    /// Per-cell override for (body row, column index), empty when absent.
    /// Later entries for the same cell win.
    #[must_use]
    pub fn cell_style_for(&self, row: usize, col: usize) -> Style {
        self.cell_style
            .iter()
            .rev()
            .find(|o| o.row == row && o.col == col)
            .map(|o| o.style.clone())
            .unwrap_or_default()
    }
}

/// A style override pinned to one body cell.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CellStyleOverride {
    /// Body row index (0 = first data row).
    pub row: usize,
    /// Column index into [`Table::columns`].
    pub col: usize,
    pub style: Style,
}

/// A picture anchored at the component origin.
///
/// Only border attributes of `style` apply; fonts and fills are meaningless
/// for an image block.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub path: PathBuf,
    /// Footprint in cells reserved beneath the picture.
    pub width: u32,
    pub height: u32,
    /// Backend scale factor applied to the picture itself.
    pub scale: f64,
    pub style: Style,
}

impl Image {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Image {
            path: path.into(),
            width: 1,
            height: 1,
            scale: 1.0,
            style: Style::default(),
        }
    }
}
