//! Heuristic heading detection for flat extracted text.
//!
//! Lines are classified top to bottom by walking an ordered rule list; the
//! first rule whose predicate holds decides the line's role. Lines that no
//! rule claims are body text. Two rule sets exist:
//!
//! - **basic**: a short line directly followed by a longer one reads as a
//!   lead-in heading (`##`).
//! - **advanced**: all-caps lines become `##` headings, title-like lines
//!   become `###` headings.

use regex::Regex;
use std::sync::OnceLock;

use super::ConversionOptions;

/// Role inferred for a line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    /// Level-2 heading
    HeadingMajor,
    /// Level-3 heading
    HeadingMinor,
    /// Ordinary text
    Body,
    /// Empty line
    Blank,
}

impl LineRole {
    /// Markdown prefix for heading roles.
    pub fn heading_prefix(self) -> Option<&'static str> {
        match self {
            LineRole::HeadingMajor => Some("## "),
            LineRole::HeadingMinor => Some("### "),
            LineRole::Body | LineRole::Blank => None,
        }
    }

    /// Check if the role is a heading.
    pub fn is_heading(self) -> bool {
        self.heading_prefix().is_some()
    }
}

/// A line tagged with its inferred role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedLine {
    /// Line text without any Markdown prefix
    pub text: String,
    /// Inferred role
    pub role: LineRole,
}

/// What a rule gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    /// The line being classified (never blank)
    pub line: &'a str,
    /// The following line, if any
    pub next: Option<&'a str>,
}

/// A predicate mapped to the role it assigns.
pub struct HeadingRule {
    /// Rule name, for logging
    pub name: &'static str,
    /// Role assigned when the predicate holds
    pub role: LineRole,
    /// Predicate over the line and its successor
    pub applies: fn(&LineContext<'_>) -> bool,
}

/// Rules used when formatting is not preserved.
pub const BASIC_RULES: &[HeadingRule] = &[HeadingRule {
    name: "lead-in",
    role: LineRole::HeadingMajor,
    applies: is_lead_in,
}];

/// Rules used when formatting is preserved and headings are detected.
pub const ADVANCED_RULES: &[HeadingRule] = &[
    HeadingRule {
        name: "all-caps",
        role: LineRole::HeadingMajor,
        applies: is_all_caps,
    },
    HeadingRule {
        name: "title-like",
        role: LineRole::HeadingMinor,
        applies: is_title_like,
    },
];

fn numeric_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+(?:\.\d+)*\.?$").unwrap())
}

fn title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\p{Lu}[\p{L}\p{N} ,;&:\-()]*$").unwrap())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn is_lead_in(ctx: &LineContext<'_>) -> bool {
    let len = char_len(ctx.line);
    len < 60
        && ctx.next.is_some_and(|next| char_len(next) > len)
        && !ctx.line.ends_with(['.', ',', ';'])
        && !numeric_token_regex().is_match(ctx.line)
}

fn is_all_caps(ctx: &LineContext<'_>) -> bool {
    let len = char_len(ctx.line);
    (3..80).contains(&len)
        && ctx.line.chars().any(char::is_alphabetic)
        // Caseless scripts (CJK, Arabic, Hebrew) have no upper-case letters
        && ctx
            .line
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
}

fn is_title_like(ctx: &LineContext<'_>) -> bool {
    char_len(ctx.line) < 60 && !ctx.line.ends_with('.') && title_regex().is_match(ctx.line)
}

/// Which rule set applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingTier {
    /// Lead-in detection
    Basic,
    /// All-caps and title-case detection
    Advanced,
    /// No promotion, lines pass through
    Off,
}

impl HeadingTier {
    /// Select the tier from conversion options.
    pub fn from_options(options: &ConversionOptions) -> Self {
        match (options.preserve_formatting, options.detect_headings) {
            (false, _) => HeadingTier::Basic,
            (true, true) => HeadingTier::Advanced,
            (true, false) => HeadingTier::Off,
        }
    }

    fn rules(self) -> &'static [HeadingRule] {
        match self {
            HeadingTier::Basic => BASIC_RULES,
            HeadingTier::Advanced => ADVANCED_RULES,
            HeadingTier::Off => &[],
        }
    }
}

/// Inserts Markdown heading markers into normalized text lines.
#[derive(Debug, Clone)]
pub struct TextStructureFormatter {
    tier: HeadingTier,
    eol: String,
}

impl TextStructureFormatter {
    /// Create a formatter for a tier.
    pub fn new(tier: HeadingTier) -> Self {
        Self {
            tier,
            eol: "\n".to_string(),
        }
    }

    /// Create a formatter from conversion options.
    pub fn from_options(options: &ConversionOptions) -> Self {
        Self::new(HeadingTier::from_options(options)).with_eol(options.line_ending())
    }

    /// Set the line terminator.
    pub fn with_eol(mut self, eol: impl Into<String>) -> Self {
        self.eol = eol.into();
        self
    }

    /// Classify each line.
    pub fn classify<S: AsRef<str>>(&self, lines: &[S]) -> Vec<FormattedLine> {
        let rules = self.tier.rules();

        lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let line = line.as_ref();
                if line.trim().is_empty() {
                    return FormattedLine {
                        text: String::new(),
                        role: LineRole::Blank,
                    };
                }

                let ctx = LineContext {
                    line,
                    next: lines.get(i + 1).map(|next| next.as_ref()),
                };
                let role = rules
                    .iter()
                    .find(|rule| (rule.applies)(&ctx))
                    .map(|rule| {
                        log::trace!("Rule '{}' promoted line {:?}", rule.name, line);
                        rule.role
                    })
                    .unwrap_or(LineRole::Body);

                FormattedLine {
                    text: line.to_string(),
                    role,
                }
            })
            .collect()
    }

    /// Render classified lines as Markdown.
    ///
    /// Each heading is followed by one blank line; a blank source line right
    /// after a heading is absorbed into it.
    pub fn render(&self, lines: &[FormattedLine]) -> String {
        let mut output: Vec<String> = Vec::with_capacity(lines.len() * 2);

        for (i, line) in lines.iter().enumerate() {
            match line.role.heading_prefix() {
                Some(prefix) => {
                    output.push(format!("{}{}", prefix, line.text));
                    output.push(String::new());
                }
                None => {
                    let after_heading = i > 0 && lines[i - 1].role.is_heading();
                    if line.role == LineRole::Blank && after_heading {
                        continue;
                    }
                    output.push(line.text.clone());
                }
            }
        }

        output.join(&self.eol).trim_end().to_string()
    }

    /// Classify and render in one step.
    pub fn format<S: AsRef<str>>(&self, lines: &[S]) -> String {
        self.render(&self.classify(lines))
    }
}
