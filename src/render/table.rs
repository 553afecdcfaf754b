//! Markdown pipe-table rendering.

use std::collections::BTreeMap;

use crate::model::Grid;

use super::ColumnAlignment;

/// Renders rectangular grids as Markdown pipe tables.
pub struct MarkdownTableRenderer<'a> {
    include_header: bool,
    alignments: &'a BTreeMap<usize, ColumnAlignment>,
    eol: &'a str,
}

impl<'a> MarkdownTableRenderer<'a> {
    /// Create a renderer.
    pub fn new(include_header: bool, alignments: &'a BTreeMap<usize, ColumnAlignment>) -> Self {
        Self {
            include_header,
            alignments,
            eol: "\n",
        }
    }

    /// Set the line terminator.
    pub fn with_eol(mut self, eol: &'a str) -> Self {
        self.eol = eol;
        self
    }

    /// Render a grid. An empty grid renders as an empty string.
    ///
    /// The grid must already be normalized; the column count is taken from
    /// the first row.
    pub fn render(&self, grid: &Grid) -> String {
        if grid.is_empty() {
            return String::new();
        }

        let col_count = grid.column_count();
        let mut lines = Vec::with_capacity(grid.row_count() + 1);

        for (i, row) in grid.rows.iter().enumerate() {
            lines.push(render_row(row));

            if i == 0 && self.include_header {
                lines.push(self.separator(col_count));
            }
        }

        lines.join(self.eol)
    }

    fn separator(&self, col_count: usize) -> String {
        let markers: Vec<&str> = (0..col_count)
            .map(|col| {
                self.alignments
                    .get(&col)
                    .copied()
                    .unwrap_or_default()
                    .marker()
            })
            .collect();
        format!("| {} |", markers.join(" | "))
    }
}

fn render_row(cells: &[String]) -> String {
    let cells: Vec<String> = cells.iter().map(|c| escape_cell(c)).collect();
    format!("| {} |", cells.join(" | "))
}

/// Escape a cell for use inside a pipe table.
///
/// Backslashes and pipes are backslash-escaped and line breaks become single
/// spaces so the cell stays on one line.
pub fn escape_cell(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => result.push_str("\\\\"),
            '|' => result.push_str("\\|"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                result.push(' ');
            }
            '\n' => result.push(' '),
            _ => result.push(c),
        }
    }
    result.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid(rows: &[&[&str]]) -> Grid {
        Grid::new(
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
        // An escaped pipe in the source must not close the cell
        assert_eq!(escape_cell("x\\|y"), "x\\\\\\|y");
        assert_eq!(escape_cell("C:\\temp"), "C:\\\\temp");
        assert_eq!(escape_cell("line1\nline2"), "line1 line2");
        assert_eq!(escape_cell("line1\r\nline2\rline3"), "line1 line2 line3");
    }

    #[test]
    fn test_render_with_header() {
        let alignments = BTreeMap::new();
        let md = MarkdownTableRenderer::new(true, &alignments)
            .render(&grid(&[&["Name", "Age"], &["Alice", "30"]]));

        assert_eq!(md, "| Name | Age |\n| --- | --- |\n| Alice | 30 |");
    }

    #[test]
    fn test_render_without_header() {
        let alignments = BTreeMap::new();
        let md = MarkdownTableRenderer::new(false, &alignments)
            .render(&grid(&[&["Name", "Age"], &["Alice", "30"]]));

        assert_eq!(md, "| Name | Age |\n| Alice | 30 |");
    }

    #[test]
    fn test_alignment_markers() {
        let mut alignments = BTreeMap::new();
        alignments.insert(0, ColumnAlignment::Left);
        alignments.insert(2, ColumnAlignment::Right);
        alignments.insert(9, ColumnAlignment::Center);

        let md = MarkdownTableRenderer::new(true, &alignments).render(&grid(&[&["a", "b", "c"]]));
        let separator = md.lines().nth(1).unwrap();

        assert_eq!(separator, "| :--- | --- | ---: |");
    }

    #[test]
    fn test_empty_grid() {
        let alignments = BTreeMap::new();
        let md = MarkdownTableRenderer::new(true, &alignments).render(&Grid::default());
        assert!(md.is_empty());
    }

    #[test]
    fn test_crlf_eol() {
        let alignments = BTreeMap::new();
        let md = MarkdownTableRenderer::new(true, &alignments)
            .with_eol("\r\n")
            .render(&grid(&[&["x"], &["1"]]));

        assert_eq!(md, "| x |\r\n| --- |\r\n| 1 |");
    }
}
