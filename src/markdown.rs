//! Markdown-to-presentation mapping for generated documents.
//!
//! `parse_document` turns markdown text into a flat list of presentational
//! block descriptions. The mapping is deliberately small: the service emits
//! headings, paragraphs, lists, quotes, fenced code, tables and bold text,
//! and anything outside that set falls back to paragraph styling. The
//! function is pure, so the rendering layer (and the tests) never need a
//! terminal.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// A styled run of text inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    Text(String),
    Bold(String),
    Code(String),
}

impl InlineSpan {
    pub fn content(&self) -> &str {
        match self {
            InlineSpan::Text(s) | InlineSpan::Bold(s) | InlineSpan::Code(s) => s,
        }
    }
}

/// A presentational block of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocBlock {
    /// Heading levels 1-3; deeper headings degrade to paragraphs.
    Heading { level: u8, spans: Vec<InlineSpan> },
    Paragraph { spans: Vec<InlineSpan> },
    /// One list entry. `marker` is "•" for bullets or "3." for ordered lists,
    /// `depth` counts nesting levels starting at zero.
    ListItem {
        marker: String,
        depth: usize,
        spans: Vec<InlineSpan>,
    },
    BlockQuote { spans: Vec<InlineSpan> },
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Rule,
}

/// Parse a markdown document into presentational blocks.
pub fn parse_document(input: &str) -> Vec<DocBlock> {
    let parser = Parser::new_ext(input, Options::ENABLE_TABLES);
    let mut builder = DocumentBuilder::default();

    for event in parser {
        builder.handle(event);
    }

    builder.finish()
}

/// Flatten a document to unstyled text, one line per block.
pub fn plain_text(input: &str) -> String {
    let mut out = String::new();

    for block in parse_document(input) {
        match block {
            DocBlock::Heading { spans, .. }
            | DocBlock::Paragraph { spans }
            | DocBlock::BlockQuote { spans } => {
                push_line(&mut out, &spans_text(&spans));
            }
            DocBlock::ListItem { marker, spans, .. } => {
                push_line(&mut out, &format!("{} {}", marker, spans_text(&spans)));
            }
            DocBlock::CodeBlock { code, .. } => {
                push_line(&mut out, code.trim_end_matches('\n'));
            }
            DocBlock::Table { header, rows } => {
                push_line(&mut out, &header.join(" | "));
                for row in rows {
                    push_line(&mut out, &row.join(" | "));
                }
            }
            DocBlock::Rule => push_line(&mut out, "---"),
        }
    }

    out
}

fn spans_text(spans: &[InlineSpan]) -> String {
    spans.iter().map(|s| s.content()).collect()
}

fn push_line(out: &mut String, line: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(line);
}

/// Streaming state for one pass over the pulldown-cmark events.
#[derive(Default)]
struct DocumentBuilder {
    blocks: Vec<DocBlock>,
    spans: Vec<InlineSpan>,
    bold_depth: usize,
    heading: Option<u8>,
    quote_depth: usize,
    /// Next ordinal per open list; `None` for bullet lists.
    list_stack: Vec<Option<u64>>,
    item_marker: Option<String>,
    code: Option<(Option<String>, String)>,
    table: Option<TableBuilder>,
}

#[derive(Default)]
struct TableBuilder {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    current_row: Vec<String>,
    current_cell: String,
}

impl DocumentBuilder {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                if let Some(table) = self.table.as_mut() {
                    table.current_cell.push_str(&code);
                } else {
                    self.spans.push(InlineSpan::Code(code.into_string()));
                }
            }
            Event::SoftBreak | Event::HardBreak => self.text(" "),
            Event::Rule => self.blocks.push(DocBlock::Rule),
            // Raw HTML, math, footnotes: keep the text, drop the construct.
            Event::Html(text) | Event::InlineHtml(text) => self.text(&text),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.heading = Some(heading_rank(level));
            }
            Tag::BlockQuote(_) => self.quote_depth += 1,
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => {
                        let lang = info.split_whitespace().next().unwrap_or("").to_string();
                        (!lang.is_empty()).then_some(lang)
                    }
                    CodeBlockKind::Indented => None,
                };
                self.code = Some((language, String::new()));
            }
            Tag::List(start) => {
                // A nested list opens before its parent item ends; flush the
                // parent item's text so it does not absorb the children.
                self.flush_spans();
                self.list_stack.push(start);
            }
            Tag::Item => {
                let marker = match self.list_stack.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}.", n);
                        *n += 1;
                        marker
                    }
                    _ => "•".to_string(),
                };
                self.item_marker = Some(marker);
            }
            Tag::Table(_) => self.table = Some(TableBuilder::default()),
            Tag::Strong => self.bold_depth += 1,
            // Paragraph, emphasis, links, images: no styling of their own
            // here, their text flows into the enclosing block.
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) | TagEnd::Paragraph => self.flush_spans(),
            TagEnd::BlockQuote(_) => {
                self.flush_spans();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::CodeBlock => {
                if let Some((language, code)) = self.code.take() {
                    self.blocks.push(DocBlock::CodeBlock { language, code });
                }
            }
            TagEnd::Item => {
                self.flush_spans();
                self.item_marker = None;
            }
            TagEnd::List(_) => {
                self.list_stack.pop();
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.header = std::mem::take(&mut table.current_row);
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    let row = std::mem::take(&mut table.current_row);
                    table.rows.push(row);
                }
            }
            TagEnd::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    table.flush_cell();
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.blocks.push(DocBlock::Table {
                        header: table.header,
                        rows: table.rows,
                    });
                }
            }
            TagEnd::Strong => self.bold_depth = self.bold_depth.saturating_sub(1),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some((_, code)) = self.code.as_mut() {
            code.push_str(text);
        } else if let Some(table) = self.table.as_mut() {
            table.current_cell.push_str(text);
        } else if self.bold_depth > 0 {
            self.spans.push(InlineSpan::Bold(text.to_string()));
        } else {
            self.spans.push(InlineSpan::Text(text.to_string()));
        }
    }

    fn flush_spans(&mut self) {
        let heading = self.heading.take();
        if self.spans.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.spans);

        let block = if let Some(level) = heading {
            if level <= 3 {
                DocBlock::Heading { level, spans }
            } else {
                // Deep headings are outside the supported set.
                DocBlock::Paragraph { spans }
            }
        } else if let Some(marker) = self.item_marker.clone() {
            DocBlock::ListItem {
                marker,
                depth: self.list_stack.len().saturating_sub(1),
                spans,
            }
        } else if self.quote_depth > 0 {
            DocBlock::BlockQuote { spans }
        } else {
            DocBlock::Paragraph { spans }
        };

        self.blocks.push(block);
    }

    fn finish(mut self) -> Vec<DocBlock> {
        self.flush_spans();
        self.blocks
    }
}

impl TableBuilder {
    fn flush_cell(&mut self) {
        let cell = std::mem::take(&mut self.current_cell);
        self.current_row.push(cell.trim().to_string());
    }
}

fn heading_rank(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
