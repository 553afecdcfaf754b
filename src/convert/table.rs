//! Table and workbook conversion.

use rayon::prelude::*;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{Grid, Row, Sheet, Table};
use crate::render::{
    limit_rows, normalize, project, ColumnResolver, ConversionOptions, MarkdownTableRenderer,
    RenderResult, ResolvedColumns,
};

/// Workbooks with at least this many sheets are rendered on the rayon pool.
const PARALLEL_THRESHOLD: usize = 4;

/// Render a table as a Markdown pipe table.
///
/// Rows are limited first, then columns are resolved, projected and padded.
/// Metadata: `type`, `rows`, `columns` and, when names are known,
/// `columnsSelected`.
pub fn render_table(table: &Table, options: &ConversionOptions) -> Result<RenderResult> {
    let rows = limit_rows(&table.rows, options.row_limit());
    if rows.is_empty() {
        return Err(Error::EmptyInput("Sheet is empty".to_string()));
    }

    let resolved = ColumnResolver::new(options).resolve(rows);
    if resolved.is_empty() {
        return Err(Error::EmptyInput("Sheet is empty".to_string()));
    }

    let grid = build_grid(rows, &resolved, options);
    let content = MarkdownTableRenderer::new(options.include_headers, &options.column_alignments)
        .with_eol(options.line_ending())
        .render(&grid);

    let mut result = RenderResult::new(content, Default::default())
        .with_meta("type", "table")
        .with_meta("rows", grid.row_count())
        .with_meta("columns", grid.column_count());
    if let Some(names) = resolved.names {
        result = result.with_meta("columnsSelected", names);
    }
    Ok(result)
}

/// Project, relabel and normalize the rows into a renderable grid.
fn build_grid(rows: &[Row], resolved: &ResolvedColumns, options: &ConversionOptions) -> Grid {
    let mut grid = project(rows, &resolved.indices);

    if options.include_headers {
        if let (Some(names), Some(header)) = (&resolved.names, grid.rows.first_mut()) {
            *header = names.clone();
        }
    }

    normalize(grid)
}

/// Render every sheet of a workbook (or the one named by `sheet_name`).
///
/// Each sheet runs through [`render_table`] independently. Empty sheets are
/// skipped; when nothing is left the result is [`Error::EmptyInput`].
pub fn render_workbook(sheets: &[Sheet], options: &ConversionOptions) -> Result<RenderResult> {
    if sheets.is_empty() {
        return Err(Error::EmptyInput("Workbook contains no sheets".to_string()));
    }

    let selected: Vec<&Sheet> = match &options.sheet_name {
        Some(name) => {
            let sheet = sheets
                .iter()
                .find(|s| &s.name == name)
                .ok_or_else(|| Error::SheetNotFound {
                    name: name.clone(),
                    available: sheets.iter().map(|s| s.name.clone()).collect(),
                })?;
            vec![sheet]
        }
        None => sheets.iter().collect(),
    };

    let rendered: Vec<Result<RenderResult>> = if selected.len() >= PARALLEL_THRESHOLD {
        selected
            .par_iter()
            .map(|sheet| render_table(&sheet.table, options))
            .collect()
    } else {
        selected
            .iter()
            .map(|sheet| render_table(&sheet.table, options))
            .collect()
    };

    let eol = options.line_ending();
    let mut sections = Vec::new();
    let mut names = Vec::new();
    let mut total_rows = 0u64;
    let mut max_columns = 0u64;
    let mut last_empty = None;

    for (sheet, result) in selected.iter().zip(rendered) {
        let result = match result {
            Ok(result) => result,
            Err(Error::EmptyInput(msg)) => {
                log::warn!("Skipping sheet '{}': {}", sheet.name, msg);
                last_empty = Some(msg);
                continue;
            }
            Err(e) => return Err(e),
        };

        total_rows += result.metadata.get("rows").and_then(Value::as_u64).unwrap_or(0);
        max_columns = max_columns.max(
            result
                .metadata
                .get("columns")
                .and_then(Value::as_u64)
                .unwrap_or(0),
        );

        let section = if options.include_sheet_headings {
            format!(
                "{}{}{eol}{eol}{}",
                options.sheet_heading_prefix,
                sheet.name,
                result.content,
                eol = eol
            )
        } else {
            result.content
        };
        sections.push(section);
        names.push(sheet.name.clone());
    }

    if sections.is_empty() {
        let msg = match (selected.len(), last_empty) {
            (1, Some(msg)) => msg,
            _ => "All sheets are empty".to_string(),
        };
        return Err(Error::EmptyInput(msg));
    }

    let separator = format!("{eol}{eol}", eol = eol);
    Ok(RenderResult::new(sections.join(&separator), Default::default())
        .with_meta("type", "workbook")
        .with_meta("sheets", names)
        .with_meta("rows", total_rows)
        .with_meta("columns", max_columns))
}
