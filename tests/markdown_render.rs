use consultgen::markdown::{parse_document, plain_text, DocBlock, InlineSpan};
use pretty_assertions::assert_eq;

const SAMPLE: &str = r#"# Acme Corporation Consulting Template

## Introduction

Acme Corporation is a **leading** manufacturer in the `industrial` sector.

## Pitch Deck

* Strong distribution network
* Established brand
  * Recognized in 40 countries
* Growing online presence

> Acme is positioned to double its addressable market by 2027.

### Revenue Data

| Year | Revenue |
|------|---------|
| 2023 | $4.1B   |
| 2024 | $4.9B   |

```python
revenue = {"2023": 4.1, "2024": 4.9}
```
"#;

#[test]
fn sample_document_maps_to_expected_block_kinds() {
    let blocks = parse_document(SAMPLE);

    let kinds: Vec<&str> = blocks
        .iter()
        .map(|b| match b {
            DocBlock::Heading { .. } => "heading",
            DocBlock::Paragraph { .. } => "paragraph",
            DocBlock::ListItem { .. } => "item",
            DocBlock::BlockQuote { .. } => "quote",
            DocBlock::CodeBlock { .. } => "code",
            DocBlock::Table { .. } => "table",
            DocBlock::Rule => "rule",
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            "heading",   // # Acme Corporation Consulting Template
            "heading",   // ## Introduction
            "paragraph", // Acme Corporation is ...
            "heading",   // ## Pitch Deck
            "item",      // Strong distribution network
            "item",      // Established brand
            "item",      // Recognized in 40 countries (nested)
            "item",      // Growing online presence
            "quote",     // Acme is positioned ...
            "heading",   // ### Revenue Data
            "table",     // Year/Revenue
            "code",      // python block
        ]
    );
}

#[test]
fn heading_levels_match_markdown() {
    let blocks = parse_document(SAMPLE);
    let levels: Vec<u8> = blocks
        .iter()
        .filter_map(|b| match b {
            DocBlock::Heading { level, .. } => Some(*level),
            _ => None,
        })
        .collect();
    assert_eq!(levels, vec![1, 2, 2, 3]);
}

#[test]
fn bold_and_code_spans_are_styled() {
    let blocks = parse_document(SAMPLE);
    let paragraph = blocks
        .iter()
        .find_map(|b| match b {
            DocBlock::Paragraph { spans } => Some(spans),
            _ => None,
        })
        .expect("introduction paragraph");

    assert!(paragraph
        .iter()
        .any(|s| matches!(s, InlineSpan::Bold(t) if t == "leading")));
    assert!(paragraph
        .iter()
        .any(|s| matches!(s, InlineSpan::Code(t) if t == "industrial")));
}

#[test]
fn nested_item_is_deeper() {
    let blocks = parse_document(SAMPLE);
    let nested = blocks
        .iter()
        .find_map(|b| match b {
            DocBlock::ListItem { depth, spans, .. }
                if spans.iter().any(|s| s.content().contains("40 countries")) =>
            {
                Some(*depth)
            }
            _ => None,
        })
        .expect("nested item");
    assert_eq!(nested, 1);
}

#[test]
fn code_block_keeps_language_tag() {
    let blocks = parse_document(SAMPLE);
    let (language, code) = blocks
        .iter()
        .find_map(|b| match b {
            DocBlock::CodeBlock { language, code } => Some((language.clone(), code.clone())),
            _ => None,
        })
        .expect("code block");
    assert_eq!(language.as_deref(), Some("python"));
    assert!(code.contains("revenue"));
}

#[test]
fn table_cells_are_trimmed() {
    let blocks = parse_document(SAMPLE);
    let table = blocks.iter().find_map(|b| match b {
        DocBlock::Table { header, rows } => Some((header.clone(), rows.clone())),
        _ => None,
    });
    let (header, rows) = table.expect("table");
    assert_eq!(header, vec!["Year", "Revenue"]);
    assert_eq!(rows[0], vec!["2023", "$4.1B"]);
    assert_eq!(rows[1], vec!["2024", "$4.9B"]);
}

#[test]
fn unrecognized_constructs_fall_back_to_paragraph() {
    // Headings past level three and strikethrough are outside the supported
    // set; their text must still come through as paragraphs.
    let blocks = parse_document("##### Tiny heading\n\n~~gone~~ text\n");
    assert!(blocks
        .iter()
        .all(|b| matches!(b, DocBlock::Paragraph { .. })));
}

#[test]
fn plain_text_traversal_strips_styling() {
    let flat = plain_text("# Title\n\nBody with **bold** and `code`.\n\n* bullet\n");
    assert_eq!(flat, "Title\nBody with bold and code.\n• bullet");
}

#[test]
fn parsing_is_stable_for_partial_documents() {
    // The document re-renders while streaming, so prefixes of a valid
    // document must parse without panicking.
    for end in 0..SAMPLE.len() {
        if SAMPLE.is_char_boundary(end) {
            let _ = parse_document(&SAMPLE[..end]);
        }
    }
}
