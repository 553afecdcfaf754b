//! Conversion pipelines and the source adapter registry.
//!
//! Format decoding lives outside this crate. A [`SourceAdapter`] turns raw
//! bytes into one of the [`Source`] shapes; the functions in this module turn
//! those shapes into Markdown.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tablemark::convert::{ConverterRegistry, Source, SourceAdapter};
//! use tablemark::{ConversionOptions, Result};
//!
//! struct LinesAdapter;
//!
//! impl SourceAdapter for LinesAdapter {
//!     fn supported_extensions(&self) -> &[&str] {
//!         &["txt"]
//!     }
//!
//!     fn name(&self) -> &str {
//!         "lines"
//!     }
//!
//!     fn read(&self, bytes: &[u8], _options: &ConversionOptions) -> Result<Source> {
//!         Ok(Source::Text(vec![String::from_utf8_lossy(bytes).into_owned()]))
//!     }
//! }
//!
//! let mut registry = ConverterRegistry::new();
//! registry.register(Arc::new(LinesAdapter));
//!
//! let result = registry.convert_bytes(b"Intro\nA longer line of body text.", "txt", &ConversionOptions::default());
//! assert!(result.success);
//! assert!(result.markdown.starts_with("## Intro"));
//! ```

mod table;
mod text;

pub use table::{render_table, render_workbook};
pub use text::{render_ocr, render_text};

use crate::error::{Error, Result};
use crate::model::{Sheet, Table};
use crate::render::{ConversionOptions, ConversionResult, RenderResult};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Normalized content produced by a source adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A single table (e.g., a CSV file)
    Table(Table),

    /// Tabular data, one or more worksheets
    Workbook(Vec<Sheet>),

    /// Extracted text, one string per page
    Text(Vec<String>),

    /// Recognized text blocks, each a sequence of lines
    Ocr(Vec<Vec<String>>),
}

/// Render any source shape with the matching pipeline.
pub fn render_source(source: &Source, options: &ConversionOptions) -> Result<RenderResult> {
    match source {
        Source::Table(table) => render_table(table, options),
        Source::Workbook(sheets) => render_workbook(sheets, options),
        Source::Text(pages) => render_text(pages, options),
        Source::Ocr(blocks) => render_ocr(blocks, options),
    }
}

/// Trait for source adapters.
///
/// Implement this trait to feed a new file format into the renderers.
pub trait SourceAdapter: Send + Sync {
    /// Get the supported file extensions for this adapter.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["csv"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this adapter.
    fn name(&self) -> &str;

    /// Decode raw bytes into a source shape.
    fn read(&self, bytes: &[u8], options: &ConversionOptions) -> Result<Source>;

    /// Check if this adapter supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for source adapters.
///
/// The registry maps file extensions to adapters and runs the full
/// read-then-render conversion, reporting failures as a
/// [`ConversionResult`] instead of an error.
pub struct ConverterRegistry {
    adapters: HashMap<String, Arc<dyn SourceAdapter>>,
    by_name: HashMap<String, Arc<dyn SourceAdapter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Register an adapter.
    ///
    /// The adapter will be registered for all its supported extensions.
    pub fn register(&mut self, adapter: Arc<dyn SourceAdapter>) {
        for ext in adapter.supported_extensions() {
            self.adapters.insert(ext.to_lowercase(), adapter.clone());
        }
        self.by_name.insert(adapter.name().to_lowercase(), adapter);
    }

    /// Get an adapter by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn SourceAdapter>> {
        self.adapters.get(&ext.to_lowercase()).cloned()
    }

    /// Get an adapter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn SourceAdapter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.adapters.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.adapters.keys().map(|s| s.as_str()).collect();
        extensions.sort_unstable();
        extensions
    }

    /// Convert bytes using the adapter registered for `ext`.
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        ext: &str,
        options: &ConversionOptions,
    ) -> ConversionResult {
        self.try_convert_bytes(bytes, ext, options).into()
    }

    /// Convert a file, choosing the adapter from its extension.
    pub fn convert_file(&self, path: &Path, options: &ConversionOptions) -> ConversionResult {
        self.try_convert_file(path, options).into()
    }

    fn try_convert_bytes(
        &self,
        bytes: &[u8],
        ext: &str,
        options: &ConversionOptions,
    ) -> Result<RenderResult> {
        let adapter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(format!("no adapter for extension: {}", ext)))?;

        log::debug!("Reading {} bytes with adapter '{}'", bytes.len(), adapter.name());
        let source = adapter.read(bytes, options)?;
        render_source(&source, options)
    }

    fn try_convert_file(&self, path: &Path, options: &ConversionOptions) -> Result<RenderResult> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedFormat("file has no extension".into()))?;

        let adapter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(format!("no adapter for extension: {}", ext)))?;

        let bytes = std::fs::read(path)?;
        log::debug!("Reading {} with adapter '{}'", path.display(), adapter.name());
        let source = adapter.read(&bytes, options)?;
        render_source(&source, options)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
