//! Row limiting, projection and normalization.

use crate::model::{Grid, Row};

/// Keep at most `limit` rows from the front of `rows`.
pub fn limit_rows(rows: &[Row], limit: Option<usize>) -> &[Row] {
    match limit {
        Some(n) if n < rows.len() => {
            log::debug!("Truncating {} rows to {}", rows.len(), n);
            &rows[..n]
        }
        _ => rows,
    }
}

/// Extract the given source columns from every row.
///
/// Indices past the end of a row yield empty cells, so projecting a ragged
/// table never fails.
pub fn project(rows: &[Row], indices: &[usize]) -> Grid {
    let rows = rows
        .iter()
        .map(|row| {
            indices
                .iter()
                .map(|&idx| row.get(idx).map(|c| c.to_string()).unwrap_or_default())
                .collect()
        })
        .collect();
    Grid::new(rows)
}

/// Pad every row with empty cells up to the widest row.
pub fn normalize(mut grid: Grid) -> Grid {
    let width = grid.max_width();
    for row in &mut grid.rows {
        row.resize(width, String::new());
    }
    grid
}
