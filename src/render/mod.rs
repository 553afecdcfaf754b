//! Rendering module: the table pipeline and the text formatters.

mod cleanup;
mod columns;
mod ocr;
mod options;
mod project;
mod result;
pub mod structure;
mod table;

pub use cleanup::{normalize_spacing, CleanupOptions, CleanupPipeline};
pub use columns::{ColumnResolver, ResolvedColumns};
pub use ocr::OcrStyleFormatter;
pub use options::{ColumnAlignment, ColumnSelector, ConversionOptions, OcrStyle};
pub use project::{limit_rows, normalize, project};
pub use result::{ConversionResult, Metadata, RenderResult};
pub use structure::{FormattedLine, HeadingTier, LineRole, TextStructureFormatter};
pub use table::{escape_cell, MarkdownTableRenderer};
