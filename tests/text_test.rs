//! Integration tests for text and OCR conversion.

use pretty_assertions::assert_eq;
use tablemark::render::{HeadingTier, LineRole, TextStructureFormatter};
use tablemark::{ocr_to_markdown, text_to_markdown, ConversionOptions, OcrStyle};

#[test]
fn test_basic_tier_promotes_lead_in() {
    let lines = [
        "Intro",
        "This is a considerably longer line of body text.",
        "Some body text.",
    ];
    let formatter = TextStructureFormatter::new(HeadingTier::Basic);
    let classified = formatter.classify(&lines);

    assert_eq!(classified[0].role, LineRole::HeadingMajor);
    assert_eq!(classified[1].role, LineRole::Body);
    assert_eq!(classified[2].role, LineRole::Body);
    assert!(formatter.format(&lines).starts_with("## Intro\n\n"));
}

#[test]
fn test_multi_page_document() {
    let pages = [
        "Overview\r\nThe quarterly report covers three   regions.\r\n",
        "3.2.1\nA numbered clause that must not become a heading.",
    ];
    let result = text_to_markdown(&pages, &ConversionOptions::default());

    assert!(result.success);
    assert_eq!(
        result.markdown,
        "## Overview\n\n\
         The quarterly report covers three regions.\n\n\
         3.2.1\n\
         A numbered clause that must not become a heading."
    );
    assert_eq!(result.meta("pages"), Some(&serde_json::json!(2)));
    assert_eq!(result.meta("headings"), Some(&serde_json::json!(1)));
}

#[test]
fn test_advanced_tier_levels() {
    let text = "TABLE OF CONTENTS\nBackground & Scope: Phase (1)\nwhich was defined earlier.";
    let options = ConversionOptions::new().with_preserve_formatting(true);
    let result = text_to_markdown(&[text], &options);

    assert_eq!(
        result.markdown,
        "## TABLE OF CONTENTS\n\n### Background & Scope: Phase (1)\n\nwhich was defined earlier."
    );
}

#[test]
fn test_long_all_caps_line_is_body() {
    let line = "A".repeat(80);
    let options = ConversionOptions::new().with_preserve_formatting(true);
    let result = text_to_markdown(&[line.as_str()], &options);

    assert_eq!(result.markdown, line);
}

#[test]
fn test_ocr_styles() {
    let blocks = vec![vec!["Hello", "World"], vec!["Bye"]];

    let plain = ocr_to_markdown(&blocks, &ConversionOptions::new());
    let list = ocr_to_markdown(&blocks, &ConversionOptions::new().with_ocr_style(OcrStyle::List));
    let code = ocr_to_markdown(&blocks, &ConversionOptions::new().with_ocr_style(OcrStyle::Code));

    assert_eq!(plain.markdown, "Hello\nWorld\n\nBye");
    assert_eq!(list.markdown, "- Hello\n- World\n\n- Bye");
    assert_eq!(code.markdown, "```\nHello\nWorld\n\nBye\n```");
    assert_eq!(code.meta("style"), Some(&serde_json::json!("code")));
}

#[test]
fn test_ocr_unknown_style_from_config_falls_back() {
    let options: ConversionOptions = serde_json::from_str(r#"{"ocrStyle": "fancy"}"#).unwrap();
    let result = ocr_to_markdown(&[vec!["x"]], &options);

    assert_eq!(result.markdown, "x");
    assert_eq!(result.meta("style"), Some(&serde_json::json!("plain")));
}
