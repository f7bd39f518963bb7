//! Styled terminal rendering of parsed markdown blocks.
//!
//! The parsing lives in `crate::markdown`; this module only maps the
//! presentational blocks onto ratatui lines with the active theme.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use super::theme::Theme;
use crate::markdown::{parse_document, DocBlock, InlineSpan};

/// Render a markdown document as styled terminal text.
pub fn render_markdown(input: &str, theme: &Theme) -> Text<'static> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    for block in parse_document(input) {
        match block {
            DocBlock::Heading { level, spans } => {
                if !lines.is_empty() {
                    lines.push(Line::default());
                }
                let style = heading_style(level, theme);
                let text: String = spans.iter().map(|s| s.content()).collect();
                lines.push(Line::from(Span::styled(text, style)));
            }
            DocBlock::Paragraph { spans } => {
                if !lines.is_empty() {
                    lines.push(Line::default());
                }
                lines.push(Line::from(inline_spans(&spans, theme)));
            }
            DocBlock::ListItem {
                marker,
                depth,
                spans,
            } => {
                let mut parts = vec![Span::styled(
                    format!("{}{} ", "  ".repeat(depth + 1), marker),
                    theme.text_accent(),
                )];
                parts.extend(inline_spans(&spans, theme));
                lines.push(Line::from(parts));
            }
            DocBlock::BlockQuote { spans } => {
                if !lines.is_empty() {
                    lines.push(Line::default());
                }
                let mut parts = vec![Span::styled("▌ ", theme.text_accent())];
                let quote_style = theme.text_dim().add_modifier(Modifier::ITALIC);
                parts.extend(
                    spans
                        .iter()
                        .map(|s| Span::styled(s.content().to_string(), quote_style)),
                );
                lines.push(Line::from(parts));
            }
            DocBlock::CodeBlock { language, code } => {
                if !lines.is_empty() {
                    lines.push(Line::default());
                }
                if let Some(language) = language {
                    lines.push(Line::from(Span::styled(
                        format!("── {}", language),
                        theme.text_dim(),
                    )));
                }
                let code_style = theme.text().bg(theme.code_bg);
                for line in code.trim_end_matches('\n').lines() {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", line),
                        code_style,
                    )));
                }
            }
            DocBlock::Table { header, rows } => {
                if !lines.is_empty() {
                    lines.push(Line::default());
                }
                render_table(&mut lines, &header, &rows, theme);
            }
            DocBlock::Rule => {
                lines.push(Line::from(Span::styled(
                    "─".repeat(40),
                    theme.text_dim(),
                )));
            }
        }
    }

    Text::from(lines)
}

fn heading_style(level: u8, theme: &Theme) -> Style {
    match level {
        1 => theme
            .text_accent()
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        2 => theme.text_accent().add_modifier(Modifier::BOLD),
        _ => theme.text().add_modifier(Modifier::BOLD),
    }
}

fn inline_spans(spans: &[InlineSpan], theme: &Theme) -> Vec<Span<'static>> {
    spans
        .iter()
        .map(|span| match span {
            InlineSpan::Text(text) => Span::styled(text.clone(), theme.text()),
            InlineSpan::Bold(text) => Span::styled(
                text.clone(),
                theme.text_accent().add_modifier(Modifier::BOLD),
            ),
            InlineSpan::Code(text) => {
                Span::styled(format!("`{}`", text), theme.text().bg(theme.code_bg))
            }
        })
        .collect()
}

/// Lay a table out with columns padded to their widest cell.
fn render_table(
    lines: &mut Vec<Line<'static>>,
    header: &[String],
    rows: &[Vec<String>],
    theme: &Theme,
) {
    let columns = header.len().max(rows.iter().map(Vec::len).max().unwrap_or(0));
    if columns == 0 {
        return;
    }

    let mut widths = vec![0usize; columns];
    for (i, cell) in header.iter().enumerate() {
        widths[i] = widths[i].max(cell.chars().count());
    }
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let header_style = theme.text().add_modifier(Modifier::BOLD);
    lines.push(row_line(header, &widths, header_style));
    lines.push(Line::from(Span::styled(
        widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─"),
        theme.text_dim(),
    )));
    for row in rows {
        lines.push(row_line(row, &widths, theme.text()));
    }
}

fn row_line(cells: &[String], widths: &[usize], style: Style) -> Line<'static> {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            format!("{:<width$}", cell, width = width)
        })
        .collect();
    Line::from(Span::styled(padded.join(" │ "), style))
}
