//! Presentation of recognized OCR text.

use super::OcrStyle;

/// One entry of the flattened OCR output.
#[derive(Debug, Clone, PartialEq, Eq)]
enum OcrLine {
    Text(String),
    BlockBreak,
}

/// Renders blocks of recognized lines in one of the [`OcrStyle`]s.
#[derive(Debug, Clone)]
pub struct OcrStyleFormatter {
    style: OcrStyle,
    eol: String,
}

impl OcrStyleFormatter {
    /// Create a formatter for a style.
    pub fn new(style: OcrStyle) -> Self {
        Self {
            style,
            eol: "\n".to_string(),
        }
    }

    /// Set the line terminator.
    pub fn with_eol(mut self, eol: impl Into<String>) -> Self {
        self.eol = eol.into();
        self
    }

    /// Render blocks of lines.
    ///
    /// Returns `None` when no non-blank line survives trimming.
    pub fn format<B, S>(&self, blocks: &[B]) -> Option<String>
    where
        B: AsRef<[S]>,
        S: AsRef<str>,
    {
        let lines = flatten(blocks);
        if lines.is_empty() {
            return None;
        }

        let body: Vec<String> = lines
            .iter()
            .map(|line| match (line, self.style) {
                (OcrLine::BlockBreak, _) => String::new(),
                (OcrLine::Text(text), OcrStyle::List) => format!("- {}", text),
                (OcrLine::Text(text), _) => text.clone(),
            })
            .collect();
        let body = body.join(&self.eol);

        Some(match self.style {
            OcrStyle::Code => format!("```{eol}{body}{eol}```", eol = self.eol, body = body),
            OcrStyle::Plain | OcrStyle::List => body,
        })
    }

    /// Count non-blank lines that [`format`](Self::format) would emit.
    pub fn line_count<B, S>(blocks: &[B]) -> usize
    where
        B: AsRef<[S]>,
        S: AsRef<str>,
    {
        flatten(blocks)
            .iter()
            .filter(|line| matches!(line, OcrLine::Text(_)))
            .count()
    }
}

fn flatten<B, S>(blocks: &[B]) -> Vec<OcrLine>
where
    B: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut lines = Vec::new();
    for block in blocks {
        for line in block.as_ref() {
            let line = line.as_ref().trim();
            if !line.is_empty() {
                lines.push(OcrLine::Text(line.to_string()));
            }
        }
        lines.push(OcrLine::BlockBreak);
    }

    while lines.last() == Some(&OcrLine::BlockBreak) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn blocks() -> Vec<Vec<&'static str>> {
        vec![vec!["Hello", "World"], vec!["Bye"]]
    }

    #[test]
    fn test_list_style() {
        let md = OcrStyleFormatter::new(OcrStyle::List).format(&blocks());
        assert_eq!(md.as_deref(), Some("- Hello\n- World\n\n- Bye"));
    }

    #[test]
    fn test_plain_style() {
        let md = OcrStyleFormatter::new(OcrStyle::Plain).format(&blocks());
        assert_eq!(md.as_deref(), Some("Hello\nWorld\n\nBye"));
    }

    #[test]
    fn test_code_style() {
        let md = OcrStyleFormatter::new(OcrStyle::Code).format(&blocks());
        assert_eq!(md.as_deref(), Some("```\nHello\nWorld\n\nBye\n```"));
    }

    #[test]
    fn test_blank_lines_dropped() {
        let blocks = vec![vec!["  ", " a "], vec![""], vec!["b"], vec![]];
        let md = OcrStyleFormatter::new(OcrStyle::Plain).format(&blocks);
        // An empty block still contributes its break marker
        assert_eq!(md.as_deref(), Some("a\n\n\nb"));
        assert_eq!(OcrStyleFormatter::line_count(&blocks), 2);
    }

    #[test]
    fn test_nothing_recognized() {
        let blocks = vec![vec!["   "], vec![]];
        assert_eq!(OcrStyleFormatter::new(OcrStyle::List).format(&blocks), None);
    }
}
