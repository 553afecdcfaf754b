//! # tablemark
//!
//! Render tabular data and extracted text to Markdown.
//!
//! Source adapters (CSV readers, spreadsheet decoders, PDF text extractors,
//! OCR engines) hand over rows of cells or lines of text; this crate turns
//! them into Markdown plus a metadata record.
//!
//! ## Quick Start
//!
//! ```
//! use tablemark::{table_to_markdown, ColumnAlignment, ConversionOptions, Table};
//!
//! let table = Table::from_rows(vec![
//!     vec!["Item", "Qty"],
//!     vec!["Apples", "3"],
//!     vec!["Pears", "12"],
//! ]);
//! let options = ConversionOptions::new().with_alignment(1, ColumnAlignment::Right);
//!
//! let result = table_to_markdown(&table, &options);
//! assert!(result.success);
//! assert_eq!(
//!     result.markdown,
//!     "| Item | Qty |\n| --- | ---: |\n| Apples | 3 |\n| Pears | 12 |"
//! );
//! ```
//!
//! ## Features
//!
//! - **Column selection**: by position or header name, in any order
//! - **Ragged input**: short rows are padded, never rejected
//! - **Workbooks**: one table per sheet, with optional sheet headings
//! - **Heading detection**: two heuristic tiers for flat extracted text
//! - **OCR styles**: plain paragraphs, bulleted lists, or fenced code
//! - **Tagged results**: failures are reported, never panicked

pub mod convert;
pub mod error;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use convert::{
    render_ocr, render_source, render_table, render_text, render_workbook, ConverterRegistry,
    Source, SourceAdapter,
};
pub use error::{Error, Result};
pub use model::{Cell, Grid, Row, Sheet, Table};
pub use render::{
    ColumnAlignment, ColumnSelector, ConversionOptions, ConversionResult, Metadata, OcrStyle,
    RenderResult,
};

/// Convert a single table to Markdown.
///
/// # Example
///
/// ```
/// use tablemark::{table_to_markdown, ConversionOptions, Table};
///
/// let result = table_to_markdown(&Table::new(), &ConversionOptions::default());
/// assert!(!result.success);
/// assert_eq!(result.error.as_deref(), Some("Sheet is empty"));
/// ```
pub fn table_to_markdown(table: &Table, options: &ConversionOptions) -> ConversionResult {
    render_table(table, options).into()
}

/// Convert the sheets of a workbook to Markdown.
pub fn workbook_to_markdown(sheets: &[Sheet], options: &ConversionOptions) -> ConversionResult {
    render_workbook(sheets, options).into()
}

/// Convert extracted text pages to Markdown with heading detection.
///
/// # Example
///
/// ```
/// use tablemark::{text_to_markdown, ConversionOptions};
///
/// let options = ConversionOptions::new().with_preserve_formatting(true);
/// let result = text_to_markdown(&["INTRODUCTION\nSome text follows."], &options);
/// assert_eq!(result.markdown, "## INTRODUCTION\n\nSome text follows.");
/// ```
pub fn text_to_markdown<S: AsRef<str>>(pages: &[S], options: &ConversionOptions) -> ConversionResult {
    render_text(pages, options).into()
}

/// Convert recognized OCR blocks to Markdown.
///
/// # Example
///
/// ```
/// use tablemark::{ocr_to_markdown, ConversionOptions, OcrStyle};
///
/// let blocks = vec![vec!["Hello", "World"], vec!["Bye"]];
/// let options = ConversionOptions::new().with_ocr_style(OcrStyle::Code);
/// let result = ocr_to_markdown(&blocks, &options);
/// assert_eq!(result.markdown, "```\nHello\nWorld\n\nBye\n```");
/// ```
pub fn ocr_to_markdown<B, S>(blocks: &[B], options: &ConversionOptions) -> ConversionResult
where
    B: AsRef<[S]>,
    S: AsRef<str>,
{
    render_ocr(blocks, options).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_to_markdown_metadata() {
        let table = Table::from_rows(vec![vec!["a", "b"], vec!["1", "2"]]);
        let result = table_to_markdown(&table, &ConversionOptions::default());

        assert!(result.success);
        assert_eq!(result.meta("rows"), Some(&serde_json::json!(2)));
        assert_eq!(result.meta("columns"), Some(&serde_json::json!(2)));
    }

    #[test]
    fn test_workbook_missing_sheet_reports_alternatives() {
        let sheets = vec![Sheet::new("Summary", Table::from_rows(vec![vec!["x"]]))];
        let options = ConversionOptions::new().with_sheet("Detail");
        let result = workbook_to_markdown(&sheets, &options);

        assert!(!result.success);
        assert!(result.markdown.is_empty());
        assert_eq!(result.error_kind.as_deref(), Some("sheet_not_found"));
        assert!(result.error.unwrap().contains("Summary"));
    }

    #[test]
    fn test_ocr_empty_is_reported() {
        let blocks: Vec<Vec<&str>> = vec![vec![]];
        let result = ocr_to_markdown(&blocks, &ConversionOptions::default());
        assert!(!result.success);
        assert_eq!(result.error_kind.as_deref(), Some("empty_input"));
    }

    #[test]
    fn test_text_to_markdown_empty() {
        let result = text_to_markdown::<&str>(&[], &ConversionOptions::default());
        assert!(!result.success);
    }
}
