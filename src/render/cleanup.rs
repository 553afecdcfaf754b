//! Spacing and Unicode cleanup for extracted text.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Fix ligatures (fi, fl, etc.)
    pub fix_ligatures: bool,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: true,
        }
    }
}

const LIGATURES: [(&str, &str); 7] = [
    ("\u{FB00}", "ff"),
    ("\u{FB01}", "fi"),
    ("\u{FB02}", "fl"),
    ("\u{FB03}", "ffi"),
    ("\u{FB04}", "ffl"),
    ("\u{FB05}", "st"),
    ("\u{FB06}", "st"),
];

fn horizontal_space_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\S\n]+").unwrap())
}

fn blank_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").unwrap())
}

/// Text cleanup pipeline applied before heading detection.
#[derive(Debug, Clone, Default)]
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = if self.options.normalize_unicode {
            text.nfc().collect()
        } else {
            text.to_string()
        };

        if self.options.fix_ligatures {
            for (ligature, replacement) in LIGATURES {
                result = result.replace(ligature, replacement);
            }
        }

        normalize_spacing(&result)
    }

    /// Process text and split it into lines.
    pub fn lines(&self, text: &str) -> Vec<String> {
        let cleaned = self.process(text);
        if cleaned.is_empty() {
            return Vec::new();
        }
        cleaned.split('\n').map(str::to_string).collect()
    }
}

/// Normalize line endings and spacing.
///
/// CRLF and lone CR become LF, runs of horizontal whitespace become one
/// space, each line is trimmed, runs of three or more newlines collapse to a
/// single blank line, and the whole text is trimmed.
pub fn normalize_spacing(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = horizontal_space_regex().replace_all(&text, " ");
    let text = text
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");
    let text = blank_run_regex().replace_all(&text, "\n\n");
    text.trim().to_string()
}
