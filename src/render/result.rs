//! Conversion results with metadata.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Metadata describing rendered content (`rows`, `columns`, `type`, ...).
pub type Metadata = Map<String, Value>;

/// Markdown produced by a successful conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered Markdown
    pub content: String,

    /// What was rendered
    pub metadata: Metadata,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata) -> Self {
        Self { content, metadata }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            metadata: Metadata::new(),
        }
    }

    /// Add a metadata entry.
    pub fn with_meta(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Tagged outcome handed to callers: success with Markdown, or failure with
/// a message. Conversions never panic on bad data; they land here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Whether the conversion succeeded
    pub success: bool,

    /// Rendered Markdown (empty on failure)
    pub markdown: String,

    /// Error message on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Error kind on failure (see [`Error::kind`])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,

    /// Metadata describing the rendered content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl ConversionResult {
    /// Create a successful result.
    pub fn success(rendered: RenderResult) -> Self {
        Self {
            success: true,
            markdown: rendered.content,
            error: None,
            error_kind: None,
            metadata: Some(rendered.metadata),
        }
    }

    /// Create a failed result.
    pub fn failure(err: &Error) -> Self {
        Self {
            success: false,
            markdown: String::new(),
            error: Some(err.to_string()),
            error_kind: Some(err.kind().to_string()),
            metadata: None,
        }
    }

    /// Look up a metadata value.
    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.metadata.as_ref().and_then(|m| m.get(key))
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<Result<RenderResult>> for ConversionResult {
    fn from(result: Result<RenderResult>) -> Self {
        match result {
            Ok(rendered) => Self::success(rendered),
            Err(err) => {
                log::debug!("Conversion failed: {}", err);
                Self::failure(&err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_result_meta() {
        let result = RenderResult::content_only("| a |".to_string())
            .with_meta("rows", 1)
            .with_meta("type", "table");

        assert_eq!(result.metadata["rows"], 1);
        assert_eq!(result.metadata["type"], "table");
        assert_eq!(result.content_len(), 5);
    }

    #[test]
    fn test_conversion_from_ok() {
        let rendered = RenderResult::content_only("# Hi".to_string()).with_meta("lines", 1);
        let result = ConversionResult::from(Ok(rendered));

        assert!(result.success);
        assert_eq!(result.markdown, "# Hi");
        assert_eq!(result.error, None);
        assert_eq!(result.meta("lines"), Some(&Value::from(1)));
    }

    #[test]
    fn test_conversion_from_err() {
        let result =
            ConversionResult::from(Err(Error::EmptyInput("Sheet is empty".to_string())));

        assert!(!result.success);
        assert!(result.markdown.is_empty());
        assert_eq!(result.error.as_deref(), Some("Sheet is empty"));
        assert_eq!(result.error_kind.as_deref(), Some("empty_input"));
        assert!(result.metadata.is_none());
    }

    #[test]
    fn test_json_skips_empty_fields() {
        let result = ConversionResult::success(RenderResult::content_only("x".to_string()));
        let json = result.to_json().unwrap();
        assert!(json.contains("\"success\": true"));
        assert!(!json.contains("\"error\""));
    }
}
