//! Text-extent estimation for column auto-sizing.
//!
//! Width estimation uses static per-family character advance tables in em
//! units (index = ASCII code − 32, covering 0x20..=0x7E). This is an
//! intentional approximation: it tracks real column-width needs closely
//! enough for auto-sizing while staying deterministic and free of font-file
//! loading. Non-ASCII characters use the family's average advance.
//!
//! An unknown family is never an error: measurement falls back to the
//! default family's table, tags the result [`FontResolution::Fallback`],
//! and emits one diagnostic.

/// Capability interface consumed by the column-width resolver.
///
/// Implementations must be deterministic for a given (text, family, size)
/// triple.
pub trait TextMetrics {
    /// Estimated rendered width of `text` in points at `size`.
    fn measure(&self, text: &str, family: &str, size: f64) -> Measurement;
}

/// Result of one width measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Estimated rendered width in points.
    pub width: f64,
    /// Whether the requested family resolved or the default stood in.
    pub resolution: FontResolution,
}

/// Whether a measurement used the requested font or the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontResolution {
    /// The requested family had a metric table.
    Resolved,
    /// The requested family was unknown; the default family's table was
    /// used instead.
    Fallback,
}

/// Font family assumed when a style names none.
pub const DEFAULT_FONT_FAMILY: &str = "Calibri";

/// Font size in points assumed when a style names none.
pub const DEFAULT_FONT_SIZE: f64 = 11.0;

/// Static advance table for one font family.
///
/// `widths[i]` = em advance of ASCII character `(i + 32)`.
struct AdvanceTable {
    family: &'static str,
    widths: [f64; 95],
    /// Advance for codepoints outside 0x20..=0x7E.
    average: f64,
}

impl AdvanceTable {
    /// Sum of em advances over `text`, scaled by nothing (caller applies
    /// the font size).
    #[allow(clippy::cast_possible_truncation)] // ASCII codes fit usize
    fn measure_str(&self, text: &str) -> f64 {
        text.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths.get(code - 32).copied().unwrap_or(self.average)
                } else {
                    self.average
                }
            })
            .sum()
    }
}

/// Calibri — the default sheet font of every mainstream spreadsheet app.
static CALIBRI_TABLE: AdvanceTable = AdvanceTable {
    family: "Calibri",
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.23, 0.27, 0.40, 0.53, 0.53, 0.82, 0.73, 0.22, 0.31, 0.31, 0.42, 0.53, 0.27, 0.31, 0.27, 0.39,
        // 0     1     2     3     4     5     6     7     8     9
        0.53, 0.53, 0.53, 0.53, 0.53, 0.53, 0.53, 0.53, 0.53, 0.53,
        // :     ;     <     =     >     ?     @
        0.27, 0.27, 0.53, 0.53, 0.53, 0.46, 0.98,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.63, 0.59, 0.57, 0.62, 0.53, 0.50, 0.64, 0.63, 0.25, 0.30, 0.57, 0.47, 0.93,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.65, 0.67, 0.57, 0.68, 0.58, 0.49, 0.53, 0.64, 0.60, 0.90, 0.56, 0.54, 0.51,
        // [     \     ]     ^     _     `
        0.31, 0.39, 0.31, 0.53, 0.53, 0.32,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.51, 0.54, 0.44, 0.54, 0.52, 0.31, 0.52, 0.53, 0.23, 0.24, 0.48, 0.23, 0.80,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.53, 0.54, 0.54, 0.54, 0.35, 0.42, 0.33, 0.53, 0.47, 0.72, 0.46, 0.47, 0.43,
        // {     |     }     ~
        0.32, 0.26, 0.32, 0.53,
    ],
    average: 0.50,
};

/// Arial — slightly wider metrics than Calibri across the board.
static ARIAL_TABLE: AdvanceTable = AdvanceTable {
    family: "Arial",
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.28, 0.28, 0.35, 0.56, 0.56, 0.89, 0.67, 0.19, 0.33, 0.33, 0.39, 0.58, 0.28, 0.33, 0.28, 0.28,
        // 0     1     2     3     4     5     6     7     8     9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.58, 0.58, 0.58, 0.56, 1.02,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.67, 0.67, 0.72, 0.72, 0.67, 0.61, 0.78, 0.72, 0.28, 0.50, 0.67, 0.56, 0.83,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.72, 0.78, 0.67, 0.78, 0.72, 0.67, 0.61, 0.72, 0.67, 0.94, 0.67, 0.67, 0.61,
        // [     \     ]     ^     _     `
        0.28, 0.28, 0.28, 0.47, 0.56, 0.33,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.56, 0.50, 0.56, 0.56, 0.28, 0.56, 0.56, 0.22, 0.22, 0.50, 0.22, 0.83,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.56, 0.56, 0.56, 0.33, 0.50, 0.28, 0.56, 0.50, 0.72, 0.50, 0.50, 0.50,
        // {     |     }     ~
        0.33, 0.26, 0.33, 0.58,
    ],
    average: 0.53,
};

/// Courier New — fixed pitch, every glyph 0.60 em.
static COURIER_TABLE: AdvanceTable = AdvanceTable {
    family: "Courier New",
    widths: [0.60; 95],
    average: 0.60,
};

static TABLES: [&AdvanceTable; 3] = [&CALIBRI_TABLE, &ARIAL_TABLE, &COURIER_TABLE];

/// Built-in [`TextMetrics`] backed by the static advance tables above.
///
/// Family lookup is case-insensitive. Unknown families measure against
/// [`DEFAULT_FONT_FAMILY`] and are tagged [`FontResolution::Fallback`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CharTableMetrics;

impl CharTableMetrics {
    #[must_use]
    pub fn new() -> Self {
        CharTableMetrics
    }

    fn lookup(family: &str) -> Option<&'static AdvanceTable> {
        TABLES
            .iter()
            .copied()
            .find(|t| t.family.eq_ignore_ascii_case(family))
    }
}

impl TextMetrics for CharTableMetrics {
    fn measure(&self, text: &str, family: &str, size: f64) -> Measurement {
        let (table, resolution) = match Self::lookup(family) {
            Some(table) => (table, FontResolution::Resolved),
            None => {
                log::warn!("no metrics for font family {family:?}, falling back to {DEFAULT_FONT_FAMILY}");
                (&CALIBRI_TABLE, FontResolution::Fallback)
            }
        };
        Measurement {
            width: table.measure_str(text) * size,
            resolution,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_is_deterministic() {
        let m = CharTableMetrics::new();
        let a = m.measure("hello", "Calibri", 11.0);
        let b = m.measure("hello", "Calibri", 11.0);
        assert_eq!(a, b);
        assert_eq!(a.resolution, FontResolution::Resolved);
        assert!(a.width > 0.0);
    }

    #[test]
    fn test_family_lookup_is_case_insensitive() {
        let m = CharTableMetrics::new();
        let lower = m.measure("abc", "arial", 10.0);
        let upper = m.measure("abc", "ARIAL", 10.0);
        assert_eq!(lower, upper);
        assert_eq!(lower.resolution, FontResolution::Resolved);
    }

    #[test]
    fn test_unknown_family_falls_back_to_default() {
        let m = CharTableMetrics::new();
        let fallback = m.measure("abc", "Wingdings 4", 11.0);
        let default = m.measure("abc", DEFAULT_FONT_FAMILY, 11.0);
        assert_eq!(fallback.resolution, FontResolution::Fallback);
        assert_eq!(fallback.width, default.width);
    }

    #[test]
    fn test_width_scales_with_font_size() {
        let m = CharTableMetrics::new();
        let small = m.measure("0000", "Courier New", 10.0);
        let large = m.measure("0000", "Courier New", 20.0);
        assert_eq!(large.width, small.width * 2.0);
    }

    #[test]
    fn test_non_ascii_uses_average_advance() {
        let m = CharTableMetrics::new();
        let w = m.measure("é", "Calibri", 10.0);
        assert_eq!(w.width, 0.50 * 10.0);
    }
}
