//! Extracted-text and OCR conversion.

use crate::error::{Error, Result};
use crate::render::{
    CleanupPipeline, ConversionOptions, LineRole, OcrStyleFormatter, RenderResult,
    TextStructureFormatter,
};

/// Render extracted text pages with heading detection.
///
/// Pages beyond `max_pages` are dropped, the rest are joined with a blank
/// line, cleaned up, and passed through the heading rules selected by
/// `preserve_formatting` / `detect_headings`.
pub fn render_text<S: AsRef<str>>(pages: &[S], options: &ConversionOptions) -> Result<RenderResult> {
    let pages = match options.page_limit() {
        Some(limit) if limit < pages.len() => {
            log::debug!("Truncating {} pages to {}", pages.len(), limit);
            &pages[..limit]
        }
        _ => pages,
    };

    let joined = pages
        .iter()
        .map(|page| page.as_ref())
        .collect::<Vec<&str>>()
        .join("\n\n");
    let lines = CleanupPipeline::default().lines(&joined);
    if lines.is_empty() {
        return Err(Error::EmptyInput("No text content found".to_string()));
    }

    let formatter = TextStructureFormatter::from_options(options);
    let classified = formatter.classify(&lines);
    let headings = classified.iter().filter(|l| l.role.is_heading()).count();
    let text_lines = classified
        .iter()
        .filter(|l| l.role != LineRole::Blank)
        .count();
    log::debug!("Detected {} headings in {} lines", headings, text_lines);

    Ok(RenderResult::new(formatter.render(&classified), Default::default())
        .with_meta("type", "text")
        .with_meta("pages", pages.len())
        .with_meta("lines", text_lines)
        .with_meta("headings", headings))
}

/// Render recognized OCR blocks in the configured [`OcrStyle`](crate::OcrStyle).
pub fn render_ocr<B, S>(blocks: &[B], options: &ConversionOptions) -> Result<RenderResult>
where
    B: AsRef<[S]>,
    S: AsRef<str>,
{
    let content = OcrStyleFormatter::new(options.ocr_style)
        .with_eol(options.line_ending())
        .format(blocks)
        .ok_or_else(|| Error::EmptyInput("No text recognized".to_string()))?;

    Ok(RenderResult::new(content, Default::default())
        .with_meta("type", "ocr")
        .with_meta("style", options.ocr_style.as_str())
        .with_meta("blocks", blocks.len())
        .with_meta("lines", OcrStyleFormatter::line_count(blocks)))
}
