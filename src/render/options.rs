//! Conversion options and configuration.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Options controlling table and text conversion.
///
/// Every field has a default, and out-of-range values are normalized rather
/// than rejected: a non-positive `max_rows` means "no limit", an unknown
/// alignment means [`ColumnAlignment::Default`], and so on. Field names
/// serialize in camelCase so a JSON config file reads like
/// `{"maxRows": 10, "columnsToInclude": ["Name", 2]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionOptions {
    /// Maximum number of source rows to process, header included (<= 0 = unlimited)
    pub max_rows: Option<i64>,

    /// Maximum number of text pages to process (<= 0 = unlimited)
    pub max_pages: Option<i64>,

    /// Treat the first row as the header row
    pub include_headers: bool,

    /// Columns to keep, in output order (empty = all columns)
    pub columns_to_include: Vec<ColumnSelector>,

    /// Worksheet to convert (None = every sheet)
    pub sheet_name: Option<String>,

    /// Field delimiter used by delimited-text sources
    pub delimiter: char,

    /// Line terminator for emitted Markdown
    pub eol: String,

    /// Alignment per output column index
    #[serde(deserialize_with = "lenient_alignments")]
    pub column_alignments: BTreeMap<usize, ColumnAlignment>,

    /// Keep the source line structure and use the advanced heading rules
    pub preserve_formatting: bool,

    /// Promote heading-like lines when preserving formatting
    pub detect_headings: bool,

    /// Emit a heading with the sheet name before each sheet's table
    pub include_sheet_headings: bool,

    /// Prefix of sheet headings
    pub sheet_heading_prefix: String,

    /// Presentation of OCR output
    pub ocr_style: OcrStyle,
}

impl ConversionOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of rows.
    pub fn with_max_rows(mut self, max_rows: i64) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    /// Set the maximum number of pages.
    pub fn with_max_pages(mut self, max_pages: i64) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Enable or disable the header row.
    pub fn with_headers(mut self, include: bool) -> Self {
        self.include_headers = include;
        self
    }

    /// Set the columns to include.
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = ColumnSelector>) -> Self {
        self.columns_to_include = columns.into_iter().collect();
        self
    }

    /// Select a single worksheet by name.
    pub fn with_sheet(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = Some(name.into());
        self
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the line terminator.
    pub fn with_eol(mut self, eol: impl Into<String>) -> Self {
        self.eol = eol.into();
        self
    }

    /// Set the alignment of one output column.
    pub fn with_alignment(mut self, column: usize, alignment: ColumnAlignment) -> Self {
        self.column_alignments.insert(column, alignment);
        self
    }

    /// Enable or disable formatting preservation.
    pub fn with_preserve_formatting(mut self, preserve: bool) -> Self {
        self.preserve_formatting = preserve;
        self
    }

    /// Enable or disable heading detection.
    pub fn with_heading_detection(mut self, detect: bool) -> Self {
        self.detect_headings = detect;
        self
    }

    /// Enable or disable sheet headings.
    pub fn with_sheet_headings(mut self, include: bool) -> Self {
        self.include_sheet_headings = include;
        self
    }

    /// Set the sheet heading prefix.
    pub fn with_sheet_heading_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.sheet_heading_prefix = prefix.into();
        self
    }

    /// Set the OCR presentation style.
    pub fn with_ocr_style(mut self, style: OcrStyle) -> Self {
        self.ocr_style = style;
        self
    }

    /// Effective row limit, or `None` when unlimited.
    pub fn row_limit(&self) -> Option<usize> {
        positive_limit(self.max_rows)
    }

    /// Effective page limit, or `None` when unlimited.
    pub fn page_limit(&self) -> Option<usize> {
        positive_limit(self.max_pages)
    }

    /// Line terminator, falling back to `\n` when unset.
    pub fn line_ending(&self) -> &str {
        if self.eol.is_empty() {
            "\n"
        } else {
            &self.eol
        }
    }
}

fn positive_limit(limit: Option<i64>) -> Option<usize> {
    match limit {
        Some(n) if n > 0 => Some(usize::try_from(n).unwrap_or(usize::MAX)),
        _ => None,
    }
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            max_rows: None,
            max_pages: None,
            include_headers: true,
            columns_to_include: Vec::new(),
            sheet_name: None,
            delimiter: ',',
            eol: "\n".to_string(),
            column_alignments: BTreeMap::new(),
            preserve_formatting: false,
            detect_headings: true,
            include_sheet_headings: true,
            sheet_heading_prefix: "## ".to_string(),
            ocr_style: OcrStyle::Plain,
        }
    }
}

/// Keep only alignment keys that are column indices.
fn lenient_alignments<'de, D>(deserializer: D) -> Result<BTreeMap<usize, ColumnAlignment>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, ColumnAlignment>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, alignment)| match key.trim().parse::<usize>() {
            Ok(index) => Some((index, alignment)),
            Err(_) => {
                log::debug!("Ignoring alignment for non-index column key {:?}", key);
                None
            }
        })
        .collect())
}

/// A user-supplied token identifying a column by position or by header name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ColumnSelector {
    /// Zero-based column position
    ByIndex(usize),
    /// Exact header text
    ByName(String),
}

/// Wire shape of a selector: any JSON number or string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSelector {
    Index(usize),
    Number(serde_json::Number),
    Name(String),
}

impl<'de> Deserialize<'de> for ColumnSelector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawSelector::deserialize(deserializer)? {
            RawSelector::Index(index) => ColumnSelector::ByIndex(index),
            // Negative or fractional numbers are not positions
            RawSelector::Number(number) => ColumnSelector::ByName(number.to_string()),
            RawSelector::Name(name) => ColumnSelector::ByName(name),
        })
    }
}

impl ColumnSelector {
    /// Parse a free-form token: non-negative integers select by position,
    /// anything else selects by name.
    ///
    /// Surrounding whitespace is ignored for the integer test only; names
    /// are kept verbatim for exact header matching.
    pub fn parse(token: &str) -> Self {
        match token.trim().parse::<usize>() {
            Ok(index) => ColumnSelector::ByIndex(index),
            Err(_) => ColumnSelector::ByName(token.to_string()),
        }
    }

    /// Parse a comma-separated selector list (e.g., "Name, 2, Total").
    ///
    /// Spaces around the commas belong to the list syntax and are dropped.
    pub fn parse_list(s: &str) -> Vec<Self> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Self::parse)
            .collect()
    }
}

impl From<usize> for ColumnSelector {
    fn from(index: usize) -> Self {
        ColumnSelector::ByIndex(index)
    }
}

impl From<&str> for ColumnSelector {
    fn from(name: &str) -> Self {
        ColumnSelector::ByName(name.to_string())
    }
}

impl From<String> for ColumnSelector {
    fn from(name: String) -> Self {
        ColumnSelector::ByName(name)
    }
}

/// Horizontal alignment of a rendered table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnAlignment {
    /// `:---`
    Left,
    /// `:---:`
    Center,
    /// `---:`
    Right,
    /// `---`
    #[default]
    Default,
}

impl ColumnAlignment {
    /// Separator-line marker for this alignment.
    pub fn marker(self) -> &'static str {
        match self {
            ColumnAlignment::Left => ":---",
            ColumnAlignment::Center => ":---:",
            ColumnAlignment::Right => "---:",
            ColumnAlignment::Default => "---",
        }
    }

    /// Lower-case name of the alignment.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnAlignment::Left => "left",
            ColumnAlignment::Center => "center",
            ColumnAlignment::Right => "right",
            ColumnAlignment::Default => "default",
        }
    }

    /// Parse an alignment name, falling back to `Default` for anything unknown.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => ColumnAlignment::Left,
            "center" | "centre" => ColumnAlignment::Center,
            "right" => ColumnAlignment::Right,
            _ => ColumnAlignment::Default,
        }
    }
}

impl FromStr for ColumnAlignment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for ColumnAlignment {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<ColumnAlignment> for String {
    fn from(alignment: ColumnAlignment) -> Self {
        alignment.as_str().to_string()
    }
}

impl fmt::Display for ColumnAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation style for recognized OCR text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OcrStyle {
    /// Lines as paragraphs
    #[default]
    Plain,
    /// Lines as a bulleted list
    List,
    /// Lines inside a fenced code block
    Code,
}

impl OcrStyle {
    /// Lower-case name of the style.
    pub fn as_str(self) -> &'static str {
        match self {
            OcrStyle::Plain => "plain",
            OcrStyle::List => "list",
            OcrStyle::Code => "code",
        }
    }

    /// Parse a style name, falling back to `Plain` for anything unknown.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" => OcrStyle::List,
            "code" => OcrStyle::Code,
            _ => OcrStyle::Plain,
        }
    }
}

impl FromStr for OcrStyle {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for OcrStyle {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<OcrStyle> for String {
    fn from(style: OcrStyle) -> Self {
        style.as_str().to_string()
    }
}

impl fmt::Display for OcrStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
