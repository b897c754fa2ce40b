use serde::{Deserialize, Serialize};

/// A partial cell/component style.
///
/// Every field is independently optional; unset means "inherit from the
/// cascade". Styles are value objects — construct once, never mutate — and
/// combine with [`Style::merge`], where each field is resolved on its own
/// (no cross-field coupling), so cascades compose associatively.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    // Padding (cells between the layout cursor and the content)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<u32>,

    // Margin (cells after the content, before the next component)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_right: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<u32>,

    // Font
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    // Borders (weight 0 = none; interpretation of weights is the backend's)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_left: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_right: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_top: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,

    // Fill
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    // Alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_h: Option<HAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_v: Option<VAlign>,

    // Numeric format code, passed through verbatim to the backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_format: Option<String>,

    // Display substitutions for awkward numeric values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_na: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_inf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_zero: Option<String>,
}

/// Horizontal cell alignment
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum HAlign {
    Left,
    Center,
    Right,
    Fill,
    Justify,
}

/// Vertical cell alignment
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

impl Style {
    /// Combine two partial styles: for every field, `over`'s value wins when
    /// set, otherwise `self`'s survives.
    #[must_use]
    pub fn merge(&self, over: &Style) -> Style {
        Style {
            padding: over.padding.or(self.padding),
            padding_left: over.padding_left.or(self.padding_left),
            padding_right: over.padding_right.or(self.padding_right),
            padding_top: over.padding_top.or(self.padding_top),
            padding_bottom: over.padding_bottom.or(self.padding_bottom),
            margin: over.margin.or(self.margin),
            margin_left: over.margin_left.or(self.margin_left),
            margin_right: over.margin_right.or(self.margin_right),
            margin_top: over.margin_top.or(self.margin_top),
            margin_bottom: over.margin_bottom.or(self.margin_bottom),
            font_size: over.font_size.or(self.font_size),
            font_color: over.font_color.clone().or_else(|| self.font_color.clone()),
            font_family: over
                .font_family
                .clone()
                .or_else(|| self.font_family.clone()),
            bold: over.bold.or(self.bold),
            border: over.border.or(self.border),
            border_left: over.border_left.or(self.border_left),
            border_right: over.border_right.or(self.border_right),
            border_top: over.border_top.or(self.border_top),
            border_bottom: over.border_bottom.or(self.border_bottom),
            border_color: over
                .border_color
                .clone()
                .or_else(|| self.border_color.clone()),
            background: over.background.clone().or_else(|| self.background.clone()),
            align_h: over.align_h.or(self.align_h),
            align_v: over.align_v.or(self.align_v),
            num_format: over.num_format.clone().or_else(|| self.num_format.clone()),
            fill_na: over.fill_na.clone().or_else(|| self.fill_na.clone()),
            fill_inf: over.fill_inf.clone().or_else(|| self.fill_inf.clone()),
            fill_zero: over.fill_zero.clone().or_else(|| self.fill_zero.clone()),
        }
    }

    /// Left fold of [`Style::merge`] over an ordered cascade; the first style
    /// is the weakest default, the last has highest precedence.
    #[must_use]
    pub fn cascade<'a, I>(styles: I) -> Style
    where
        I: IntoIterator<Item = &'a Style>,
    {
        styles
            .into_iter()
            .fold(Style::default(), |acc, s| acc.merge(s))
    }

    /// True if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }

    // Directional accessors resolve `specific ?? uniform ?? 0`.

    #[must_use]
    pub fn padding_left(&self) -> u32 {
        self.padding_left.or(self.padding).unwrap_or(0)
    }

    #[must_use]
    pub fn padding_right(&self) -> u32 {
        self.padding_right.or(self.padding).unwrap_or(0)
    }

    #[must_use]
    pub fn padding_top(&self) -> u32 {
        self.padding_top.or(self.padding).unwrap_or(0)
    }

    #[must_use]
    pub fn padding_bottom(&self) -> u32 {
        self.padding_bottom.or(self.padding).unwrap_or(0)
    }

    #[must_use]
    pub fn margin_left(&self) -> u32 {
        self.margin_left.or(self.margin).unwrap_or(0)
    }

    #[must_use]
    pub fn margin_right(&self) -> u32 {
        self.margin_right.or(self.margin).unwrap_or(0)
    }

    #[must_use]
    pub fn margin_top(&self) -> u32 {
        self.margin_top.or(self.margin).unwrap_or(0)
    }

    #[must_use]
    pub fn margin_bottom(&self) -> u32 {
        self.margin_bottom.or(self.margin).unwrap_or(0)
    }

    #[must_use]
    pub fn border_left(&self) -> u8 {
        self.border_left.or(self.border).unwrap_or(0)
    }

    #[must_use]
    pub fn border_right(&self) -> u8 {
        self.border_right.or(self.border).unwrap_or(0)
    }

    #[must_use]
    pub fn border_top(&self) -> u8 {
        self.border_top.or(self.border).unwrap_or(0)
    }

    #[must_use]
    pub fn border_bottom(&self) -> u8 {
        self.border_bottom.or(self.border).unwrap_or(0)
    }
}
