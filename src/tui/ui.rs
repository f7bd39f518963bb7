//! Main UI layout and rendering.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::components::{ErrorBanner, Header, Spinner, StatusBar};
use super::markdown_view::render_markdown;
use super::state::{App, EntryFocus, Screen};
use super::theme::Theme;
use super::types::{DialogState, DialogType, TextField};

/// Main UI rendering function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.background)),
        area,
    );

    match app.screen {
        Screen::Entry => render_entry(frame, app, area),
        Screen::Document => render_document(frame, app, area),
    }

    if let Some(dialog) = &app.dialog {
        render_dialog(frame, dialog, &app.theme, app.export_loading, area);
    }
}

/// Entry screen: a centered card with the two required fields.
fn render_entry(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let width = area.width.clamp(30, 64);
    let height = area.height.min(16);
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let card = Rect::new(x, y, width, height);

    let block = Block::default()
        .title(" Consulting Template Generator ")
        .borders(Borders::ALL)
        .border_style(theme.border(true));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Subtitle
            Constraint::Length(3), // Company field
            Constraint::Length(3), // Task/domain field
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Notice
            Constraint::Min(0),
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let subtitle = Paragraph::new("Generate a consulting template for any company or domain.")
        .style(theme.text_dim())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(subtitle, chunks[0]);

    render_field(
        frame,
        &app.entry.company,
        "Company Name",
        app.entry.focus == EntryFocus::Company,
        theme,
        chunks[1],
    );
    render_field(
        frame,
        &app.entry.task_domain,
        "Task / Domain",
        app.entry.focus == EntryFocus::TaskDomain,
        theme,
        chunks[2],
    );

    if let Some(notice) = &app.entry.notice {
        frame.render_widget(
            ErrorBanner {
                message: notice,
                theme,
            },
            chunks[4],
        );
    }

    let help = Paragraph::new("Enter: Generate | Tab: Switch field | Esc: Quit")
        .style(theme.text_dim())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[6]);
}

/// A bordered single-line text field with its cursor when focused.
fn render_field(
    frame: &mut Frame,
    field: &TextField,
    label: &str,
    focused: bool,
    theme: &Theme,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(focused))
        .title(format!(" {} ", label));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let content = if field.value.is_empty() {
        Span::styled("required", theme.text_dim())
    } else {
        Span::styled(field.value.clone(), theme.text())
    };
    frame.render_widget(
        Paragraph::new(Line::from(content)).style(Style::default().bg(theme.field_bg)),
        inner,
    );

    if focused {
        let cursor_col = field.value[..field.cursor].chars().count() as u16;
        frame.set_cursor_position((inner.x + cursor_col.min(inner.width), inner.y));
    }
}

/// Document screen: header, rendered template, refinement row, status bar.
fn render_document(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Template
            Constraint::Length(1), // Refinement row
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let title = app
        .session
        .as_ref()
        .map(|s| format!("{} – {}", s.company_name, s.task_domain))
        .unwrap_or_else(|| "Consulting Template".to_string());
    frame.render_widget(
        Header {
            title: &title,
            status: app.status(),
            theme,
        },
        chunks[0],
    );

    render_template_area(frame, app, chunks[1]);

    if let Some(error) = &app.refine_error {
        frame.render_widget(
            ErrorBanner {
                message: error,
                theme,
            },
            chunks[2],
        );
    } else if app.refine_loading {
        frame.render_widget(
            Spinner {
                message: "Refining template...",
                frame: app.spinner_frame,
                theme,
            },
            chunks[2],
        );
    } else {
        let hint = Paragraph::new("Press r to refine the template").style(theme.text_dim());
        frame.render_widget(hint, chunks[2]);
    }

    let left = app.status_note.clone().unwrap_or_default();
    let hints = if app.last_export.is_some() {
        "r refine | e export | o open | c copy | d theme | Esc back"
    } else {
        "r refine | e export | c copy | d theme | Esc back"
    };
    frame.render_widget(
        StatusBar {
            left: &left,
            center: "",
            right: hints,
            theme,
        },
        chunks[3],
    );
}

fn render_template_area(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(false))
        .title(" Template ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(error) = &app.error {
        frame.render_widget(
            ErrorBanner {
                message: error,
                theme,
            },
            inner,
        );
        return;
    }

    if app.has_document() {
        let text = render_markdown(app.display_text(), theme);
        let paragraph = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .scroll((app.scroll, 0));
        frame.render_widget(paragraph, inner);
        return;
    }

    if app.loading {
        frame.render_widget(
            Spinner {
                message: "Generating template...",
                frame: app.spinner_frame,
                theme,
            },
            inner,
        );
    }
}

/// Render a dialog overlay.
fn render_dialog(
    frame: &mut Frame,
    dialog: &DialogState,
    theme: &Theme,
    export_loading: bool,
    area: Rect,
) {
    let width = area.width.clamp(30, 56);
    let height = match dialog.dialog_type {
        DialogType::RefinePrompt => 9,
        _ => (dialog.items.len() as u16 + 6).min(14),
    }
    .min(area.height);
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let dialog_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(format!(" {} ", dialog.title))
        .borders(Borders::ALL)
        .border_style(theme.border(true))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    match dialog.dialog_type {
        DialogType::RefinePrompt => render_input_dialog(frame, dialog, theme, inner),
        _ => render_select_dialog(frame, dialog, theme, export_loading, inner),
    }
}

/// Render a selection dialog (refinement kind, chart topic, export format).
fn render_select_dialog(
    frame: &mut Frame,
    dialog: &DialogState,
    theme: &Theme,
    export_loading: bool,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // List
            Constraint::Length(1), // Alert
            Constraint::Length(1), // Help
        ])
        .split(area);

    let items: Vec<ListItem> = dialog
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == dialog.selected_index {
                Style::default()
                    .fg(theme.background)
                    .bg(theme.accent)
            } else {
                theme.text()
            };

            let content = if let Some(desc) = &item.description {
                format!("{} - {}", item.label, desc)
            } else {
                item.label.clone()
            };

            ListItem::new(content).style(style)
        })
        .collect();
    frame.render_widget(List::new(items), chunks[0]);

    if let Some(alert) = &dialog.alert {
        frame.render_widget(
            ErrorBanner {
                message: alert,
                theme,
            },
            chunks[1],
        );
    }

    let help = if export_loading {
        "Exporting..."
    } else {
        "Enter: Select | Esc: Cancel"
    };
    let help = Paragraph::new(help)
        .style(theme.text_dim())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[2]);
}

/// Render the free-text instruction dialog.
fn render_input_dialog(frame: &mut Frame, dialog: &DialogState, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Length(1), // Alert
            Constraint::Min(0),
            Constraint::Length(1), // Help
        ])
        .split(area);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(true))
        .title(" Instructions ");
    let input_inner = input_block.inner(chunks[0]);
    frame.render_widget(input_block, chunks[0]);

    let content = if dialog.input.value.is_empty() {
        Span::styled("Describe your refinement or addition...", theme.text_dim())
    } else {
        Span::styled(dialog.input.value.clone(), theme.text())
    };
    frame.render_widget(Paragraph::new(Line::from(content)), input_inner);

    let cursor_col = dialog.input.value[..dialog.input.cursor].chars().count() as u16;
    frame.set_cursor_position((
        input_inner.x + cursor_col.min(input_inner.width),
        input_inner.y,
    ));

    if let Some(alert) = &dialog.alert {
        frame.render_widget(
            ErrorBanner {
                message: alert,
                theme,
            },
            chunks[1],
        );
    }

    let help = Paragraph::new("Enter: Refine | Esc: Cancel")
        .style(theme.text_dim())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}
