//! Source adapters for the file formats the CLI reads.

use std::sync::Arc;

use tablemark::convert::{ConverterRegistry, Source, SourceAdapter};
use tablemark::error::{Error, Result};
use tablemark::{Cell, ConversionOptions, Row, Table};

/// Form feed, the page separator in `pdftotext`-style dumps.
const PAGE_BREAK: char = '\x0c';

/// Build a registry with every adapter the CLI ships.
pub fn registry() -> ConverterRegistry {
    let mut registry = ConverterRegistry::new();
    registry.register(Arc::new(CsvAdapter::comma_separated()));
    registry.register(Arc::new(CsvAdapter::tab_separated()));
    registry.register(Arc::new(TextAdapter));
    registry.register(Arc::new(OcrAdapter));
    registry
}

/// Delimited text reader.
///
/// The comma-separated flavor honors `ConversionOptions::delimiter`; the
/// tab-separated flavor always splits on tabs.
pub struct CsvAdapter {
    name: &'static str,
    extensions: &'static [&'static str],
    fixed_delimiter: Option<u8>,
}

impl CsvAdapter {
    pub fn comma_separated() -> Self {
        Self {
            name: "csv",
            extensions: &["csv"],
            fixed_delimiter: None,
        }
    }

    pub fn tab_separated() -> Self {
        Self {
            name: "tsv",
            extensions: &["tsv", "tab"],
            fixed_delimiter: Some(b'\t'),
        }
    }

    fn delimiter(&self, options: &ConversionOptions) -> Result<u8> {
        if let Some(delimiter) = self.fixed_delimiter {
            return Ok(delimiter);
        }
        u8::try_from(options.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                Error::Source(format!(
                    "delimiter must be a single ASCII character, got {:?}",
                    options.delimiter
                ))
            })
    }
}

impl SourceAdapter for CsvAdapter {
    fn supported_extensions(&self) -> &[&str] {
        self.extensions
    }

    fn name(&self) -> &str {
        self.name
    }

    fn read(&self, bytes: &[u8], options: &ConversionOptions) -> Result<Source> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter(options)?)
            // The header row is ordinary data to the renderer.
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);

        let mut table = Table::new();
        for (line, record) in reader.records().enumerate() {
            let record =
                record.map_err(|e| Error::Source(format!("record {}: {}", line + 1, e)))?;
            table.add_row(record.iter().map(Cell::from).collect::<Row>());
        }

        log::debug!(
            "Read {} records ({} columns max)",
            table.row_count(),
            table.max_width()
        );
        Ok(Source::Table(table))
    }
}

/// Plain UTF-8 text, split into pages on form feeds.
pub struct TextAdapter;

impl SourceAdapter for TextAdapter {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn read(&self, bytes: &[u8], _options: &ConversionOptions) -> Result<Source> {
        let text = decode_utf8(bytes)?;
        let pages: Vec<String> = text.split(PAGE_BREAK).map(str::to_string).collect();
        log::debug!("Read {} pages", pages.len());
        Ok(Source::Text(pages))
    }
}

/// Recognized text dumps: blocks separated by blank lines.
///
/// No extension maps here; the adapter is looked up by name.
pub struct OcrAdapter;

impl SourceAdapter for OcrAdapter {
    fn supported_extensions(&self) -> &[&str] {
        &[]
    }

    fn name(&self) -> &str {
        "ocr"
    }

    fn read(&self, bytes: &[u8], _options: &ConversionOptions) -> Result<Source> {
        let text = decode_utf8(bytes)?;
        Ok(Source::Ocr(split_blocks(text)))
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| Error::Source(format!("input is not UTF-8: {}", e)))
}

/// Group lines into blocks at blank-line boundaries.
fn split_blocks(text: &str) -> Vec<Vec<String>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.to_string());
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}
