//! Column auto-sizing and width-cache reconciliation tests.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::*;
use sheetwright::{
    render_document_with, CellValue, Component, Document, Measurement, MemoryBackend, Sheet,
    Style, TextMetrics,
};

/// Metrics stub: every character is exactly 6 pt wide regardless of font,
/// so with default tuning (6.0) a string of n chars measures n width units
/// before padding.
struct SixPointMetrics;

impl TextMetrics for SixPointMetrics {
    fn measure(&self, text: &str, _family: &str, _size: f64) -> Measurement {
        Measurement {
            width: text.chars().count() as f64 * 6.0,
            resolution: sheetwright::FontResolution::Resolved,
        }
    }
}

fn render_with_stub(components: Vec<Component>) -> MemoryBackend {
    let sheet = Sheet::new("Sheet1").with_components(components);
    let document = Document::new("out.xlsx", vec![sheet]);
    let mut backend = MemoryBackend::new();
    render_document_with(&document, &SixPointMetrics, &mut backend).expect("layout failed");
    backend
}

// ============================================================================
// Auto-sizing
// ============================================================================

mod auto_sizing {
    use super::*;

    #[test]
    fn test_body_content_drives_width() {
        // header "ab" (2 chars) vs body "abcdefgh" (8 chars): body wins.
        let t = table(&["ab"], vec![vec![text("abcdefgh")]]);
        let backend = render_with_stub(vec![Component::Table(t)]);
        assert_eq!(column_width(&backend.ops, 0), Some(8.0 + 1.5));
    }

    #[test]
    fn test_header_drives_width_when_wider() {
        let t = table(&["long header"], vec![vec![text("x")]]);
        let backend = render_with_stub(vec![Component::Table(t)]);
        assert_eq!(column_width(&backend.ops, 0), Some(11.0 + 1.5));
    }

    #[test]
    fn test_zero_rows_uses_header_width_only() {
        let t = table(&["abc"], vec![]);
        let backend = render_with_stub(vec![Component::Table(t)]);
        assert_eq!(column_width(&backend.ops, 0), Some(3.0 + 1.5));
    }

    #[test]
    fn test_numbers_measure_by_display_string() {
        // 1234 stringifies to 4 chars, wider than header "a".
        let t = table(&["a"], vec![vec![CellValue::Number(1234.0)]]);
        let backend = render_with_stub(vec![Component::Table(t)]);
        assert_eq!(column_width(&backend.ops, 0), Some(4.0 + 1.5));
    }

    #[test]
    fn test_tuning_and_padding_coefficients() {
        let mut t = table(&["ab"], vec![]);
        t.width_tuning = Some(3.0);
        t.width_padding = Some(2.0);
        let backend = render_with_stub(vec![Component::Table(t)]);
        // 2 chars * 6pt / 3.0 + 2.0
        assert_eq!(column_width(&backend.ops, 0), Some(6.0));
    }

    #[test]
    fn test_width_clamped_to_minimum() {
        let mut t = table(&[""], vec![]);
        t.width_padding = Some(0.0);
        let backend = render_with_stub(vec![Component::Table(t)]);
        assert_eq!(column_width(&backend.ops, 0), Some(1.0));
    }

    #[test]
    fn test_max_width_caps_auto_sized_columns() {
        let mut t = table(&["a"], vec![vec![text("body content far too wide")]]);
        t.max_width = Some(5.0);
        let backend = render_with_stub(vec![Component::Table(t)]);
        assert_eq!(column_width(&backend.ops, 0), Some(5.0));
    }

    #[test]
    fn test_max_width_leaves_narrow_columns_alone() {
        let mut t = table(&["ab"], vec![]);
        t.max_width = Some(10.0);
        let backend = render_with_stub(vec![Component::Table(t)]);
        assert_eq!(column_width(&backend.ops, 0), Some(2.0 + 1.5));
    }

    #[test]
    fn test_max_width_below_minimum_still_clamps_to_minimum() {
        let mut t = table(&["a"], vec![vec![text("wide wide wide")]]);
        t.max_width = Some(0.25);
        let backend = render_with_stub(vec![Component::Table(t)]);
        assert_eq!(column_width(&backend.ops, 0), Some(1.0));
    }

    #[test]
    fn test_each_column_sized_independently() {
        let t = table(
            &["a", "widest one"],
            vec![vec![text("xx"), text("y")]],
        );
        let backend = render_with_stub(vec![Component::Table(t)]);
        assert_eq!(column_width(&backend.ops, 0), Some(2.0 + 1.5));
        assert_eq!(column_width(&backend.ops, 1), Some(10.0 + 1.5));
    }
}

// ============================================================================
// Explicit overrides
// ============================================================================

mod overrides {
    use super::*;

    #[test]
    fn test_explicit_width_bypasses_auto_sizing() {
        let mut t = table(&["a"], vec![vec![text("very long body content")]]);
        t.column_width.insert("a".to_string(), 4.0);
        let backend = render_with_stub(vec![Component::Table(t)]);
        assert_eq!(column_width(&backend.ops, 0), Some(4.0));
    }

    #[test]
    fn test_max_width_does_not_cap_explicit_widths() {
        let mut t = table(&["a"], vec![]);
        t.column_width.insert("a".to_string(), 9.0);
        t.max_width = Some(4.0);
        let backend = render_with_stub(vec![Component::Table(t)]);
        assert_eq!(column_width(&backend.ops, 0), Some(9.0));
    }

    #[test]
    fn test_non_positive_override_clamps_to_one() {
        let mut t = table(&["a"], vec![]);
        t.column_width.insert("a".to_string(), -3.0);
        let backend = render_with_stub(vec![Component::Table(t)]);
        assert_eq!(column_width(&backend.ops, 0), Some(1.0));
    }
}

// ============================================================================
// Per-sheet monotonic reconciliation
// ============================================================================

mod reconciliation {
    use super::*;

    #[test]
    fn test_later_narrower_table_cannot_shrink_column() {
        let mut wide = table(&["a"], vec![]);
        wide.column_width.insert("a".to_string(), 8.0);
        let mut narrow = table(&["a"], vec![]);
        narrow.column_width.insert("a".to_string(), 5.0);

        let backend = render_with_stub(vec![Component::Table(wide), Component::Table(narrow)]);
        // Both tables share absolute column 0; the second resolves to
        // max(8, 5) = 8, not 5.
        assert_eq!(column_widths_all(&backend.ops, 0), vec![8.0, 8.0]);
    }

    #[test]
    fn test_later_wider_table_grows_column() {
        let narrow = table(&["a"], vec![]);
        let wide = table(&["a"], vec![vec![text("wider than header")]]);

        let backend = render_with_stub(vec![Component::Table(narrow), Component::Table(wide)]);
        let widths = column_widths_all(&backend.ops, 0);
        assert_eq!(widths.len(), 2);
        assert!(widths[1] > widths[0]);
    }

    #[test]
    fn test_cache_does_not_leak_across_sheets() {
        let mut wide = table(&["a"], vec![]);
        wide.column_width.insert("a".to_string(), 8.0);
        let mut narrow = table(&["a"], vec![]);
        narrow.column_width.insert("a".to_string(), 5.0);

        let document = Document::new(
            "out.xlsx",
            vec![
                Sheet::new("first").with_components(vec![Component::Table(wide)]),
                Sheet::new("second").with_components(vec![Component::Table(narrow)]),
            ],
        );
        let mut backend = MemoryBackend::new();
        render_document_with(&document, &SixPointMetrics, &mut backend).unwrap();

        assert_eq!(column_width(backend.sheet_ops(0), 0), Some(8.0));
        assert_eq!(column_width(backend.sheet_ops(1), 0), Some(5.0));
    }

    #[test]
    fn test_offset_tables_reconcile_by_absolute_position() {
        // Second table is shifted right by one cell of padding, so its
        // column "a" lands on absolute position 1, not 0.
        let mut first = table(&["a", "b"], vec![]);
        first.column_width.insert("a".to_string(), 3.0);
        first.column_width.insert("b".to_string(), 9.0);
        let mut second = table(&["a"], vec![]);
        second.column_width.insert("a".to_string(), 4.0);
        second.style = Style {
            padding_left: Some(1),
            ..Style::default()
        };

        let backend = render_with_stub(vec![Component::Table(first), Component::Table(second)]);
        assert_eq!(column_widths_all(&backend.ops, 0), vec![3.0]);
        // Position 1: first table's "b" (9.0) already widened it.
        assert_eq!(column_widths_all(&backend.ops, 1), vec![9.0, 9.0]);
    }
}
