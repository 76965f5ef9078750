//! Reconciling ragged and sparse cell data into rectangular grids
//!
//! The values API omits trailing empty cells and trailing empty rows, and the
//! legacy cell feed only lists cells that hold something. Everything handed to
//! callers goes through one of these functions so that every row of a grid has
//! the same length.

use crate::address::A1Range;

/// Pad a ragged list of rows into a rectangle.
///
/// The result has `max(rows.len(), target_rows)` rows and
/// `max(longest row, target_cols)` columns. Missing cells are set to `fill`.
/// Nothing is ever truncated.
///
/// # Examples
/// ```
/// use sheetwire_core::grid::fill_gaps;
///
/// let grid = fill_gaps(vec![vec!["a"], vec!["b", "c"]], None, None, "");
/// assert_eq!(grid, vec![vec!["a", ""], vec!["b", "c"]]);
/// ```
pub fn fill_gaps<T: Clone>(
    mut rows: Vec<Vec<T>>,
    target_rows: Option<usize>,
    target_cols: Option<usize>,
    fill: T,
) -> Vec<Vec<T>> {
    let longest = rows.iter().map(Vec::len).max().unwrap_or(0);
    let cols = longest.max(target_cols.unwrap_or(0));
    let row_count = rows.len().max(target_rows.unwrap_or(0));

    for row in &mut rows {
        row.resize(cols, fill.clone());
    }
    rows.resize(row_count, vec![fill; cols]);
    rows
}

/// Build a dense grid from sparse `(row, col, value)` triples.
///
/// The grid spans from `A1` to the largest row and column observed. Rows come
/// out in ascending order and cells within a row in ascending column order.
/// Positions with no triple hold `T::default()`. Triples with a zero coordinate
/// are skipped; if a position repeats, the last value wins.
pub fn cells_to_rect<T, I>(cells: I) -> Vec<Vec<T>>
where
    T: Clone + Default,
    I: IntoIterator<Item = (u32, u32, T)>,
{
    let cells: Vec<(u32, u32, T)> = cells
        .into_iter()
        .filter(|(row, col, _)| *row >= 1 && *col >= 1)
        .collect();

    let rows = cells.iter().map(|(r, _, _)| *r).max().unwrap_or(0) as usize;
    let cols = cells.iter().map(|(_, c, _)| *c).max().unwrap_or(0) as usize;

    let mut grid = vec![vec![T::default(); cols]; rows];
    for (row, col, value) in cells {
        grid[row as usize - 1][col as usize - 1] = value;
    }
    grid
}

/// Build a dense grid over the bounding box of the given cells.
///
/// Returns `None` when no cell has valid coordinates. The returned range says
/// where the grid's top-left cell sits.
pub fn bounded_rect<T, I>(cells: I) -> Option<(A1Range, Vec<Vec<T>>)>
where
    T: Clone + Default,
    I: IntoIterator<Item = (u32, u32, T)>,
{
    let cells: Vec<(u32, u32, T)> = cells
        .into_iter()
        .filter(|(row, col, _)| *row >= 1 && *col >= 1)
        .collect();

    let min_row = cells.iter().map(|(r, _, _)| *r).min()?;
    let min_col = cells.iter().map(|(_, c, _)| *c).min()?;
    let max_row = cells.iter().map(|(r, _, _)| *r).max()?;
    let max_col = cells.iter().map(|(_, c, _)| *c).max()?;
    let range = A1Range::new((min_row, min_col), (max_row, max_col)).ok()?;

    let shifted = cells
        .into_iter()
        .map(|(r, c, v)| (r - min_row + 1, c - min_col + 1, v));
    Some((range, cells_to_rect(shifted)))
}
