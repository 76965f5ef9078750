//! Address codec and grid reconciliation working together

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sheetwire_core::address::{a1_to_rowcol, rowcol_to_a1, wid_to_gid, A1Range};
use sheetwire_core::grid::{bounded_rect, cells_to_rect, fill_gaps};
use sheetwire_core::records::{records_from_grid, RecordOptions};
use sheetwire_core::value::{numericise_all, CellValue, NumericiseOptions};
use sheetwire_core::Cell;

#[test]
fn test_labels_survive_grid_layout() {
    // Cells addressed by label land where the label says
    let labelled = [("C1", "c1"), ("A2", "a2"), ("B3", "b3")];
    let triples = labelled.iter().map(|(label, value)| {
        let (row, col) = a1_to_rowcol(label).unwrap();
        (row, col, value.to_string())
    });

    let grid = cells_to_rect(triples);
    assert_eq!(
        grid,
        vec![
            vec!["", "", "c1"],
            vec!["a2", "", ""],
            vec!["", "b3", ""],
        ]
    );

    for (r, row) in grid.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                let label = rowcol_to_a1(r as u32 + 1, c as u32 + 1).unwrap();
                assert_eq!(label.to_lowercase(), *value);
            }
        }
    }
}

#[test]
fn test_bounded_rect_matches_range_shape() {
    let cells = vec![
        Cell::new(10, 4, "x"),
        Cell::new(12, 2, "y"),
        Cell::new(11, 3, "z"),
    ];
    let (range, grid) = bounded_rect(cells.iter().map(Cell::to_triple)).unwrap();

    assert_eq!(range.to_string(), "B10:D12");
    assert_eq!(grid.len(), range.row_count() as usize);
    assert!(grid.iter().all(|row| row.len() == range.col_count() as usize));
    assert_eq!(grid[0][2], "x");
    assert_eq!(grid[2][0], "y");
}

#[test]
fn test_ragged_values_to_records() {
    // Shape of a values response: trailing empties omitted
    let ragged = vec![
        vec!["id".to_string(), "label".to_string(), "amount".to_string()],
        vec!["1".to_string(), "first".to_string()],
        vec!["2".to_string(), "".to_string(), "1_000".to_string()],
    ];
    let grid = fill_gaps(ragged, None, None, String::new());

    let options = RecordOptions {
        numericise: NumericiseOptions::default()
            .empty_to_zero(true)
            .allow_underscores(true),
        ..RecordOptions::default()
    };
    let records = records_from_grid(&grid, &options).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("amount"), Some(&Some(CellValue::Integer(0))));
    assert_eq!(records[1].get("label"), Some(&Some(CellValue::Integer(0))));
    assert_eq!(records[1].get("amount"), Some(&Some(CellValue::Integer(1000))));
}

#[test]
fn test_numericise_all_row() {
    let row = ["3", "3.5", "", "abc"];
    let values = numericise_all(&row, &NumericiseOptions::default().default_blank(None));
    assert_eq!(
        values,
        vec![
            Some(CellValue::Integer(3)),
            Some(CellValue::Float(3.5)),
            None,
            Some(CellValue::text("abc")),
        ]
    );
}

#[test]
fn test_legacy_gid_vectors() {
    assert_eq!(wid_to_gid("od6").unwrap(), "0");
    assert_eq!(wid_to_gid("osyqnsz").unwrap(), "1751403737");
    assert_eq!(wid_to_gid("ogsrar0").unwrap(), "1015761654");
}

proptest! {
    #[test]
    fn prop_range_display_parses_back(
        r1 in 1u32..5000, c1 in 1u32..800,
        r2 in 1u32..5000, c2 in 1u32..800,
    ) {
        let range = A1Range::new((r1, c1), (r2, c2)).unwrap();
        let parsed = A1Range::parse(&range.to_string()).unwrap();
        prop_assert_eq!(parsed, range);
        prop_assert!(parsed.contains(r1, c1));
        prop_assert!(parsed.contains(r2, c2));
    }

    #[test]
    fn prop_fill_gaps_is_rectangular(
        rows in prop::collection::vec(prop::collection::vec(0u8..10, 0..6), 0..6),
        target_rows in prop::option::of(0usize..8),
        target_cols in prop::option::of(0usize..8),
    ) {
        let original = rows.clone();
        let grid = fill_gaps(rows, target_rows, target_cols, 0u8);

        prop_assert!(grid.len() >= original.len());
        prop_assert!(grid.len() >= target_rows.unwrap_or(0));
        if let Some(width) = grid.first().map(Vec::len) {
            prop_assert!(grid.iter().all(|row| row.len() == width));
            prop_assert!(width >= target_cols.unwrap_or(0));
        }
        // Existing values are kept in place
        for (r, row) in original.iter().enumerate() {
            prop_assert_eq!(&grid[r][..row.len()], &row[..]);
        }
    }
}
