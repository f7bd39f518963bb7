//! Main TUI entry point and event loop.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;

use super::input::{key_to_action, Action};
use super::state::{App, Screen};
use super::streaming::{spawn_export, spawn_generate, spawn_refine};
use super::theme::Theme;
use super::types::{AppEvent, DialogType};
use super::ui;
use crate::api::{
    ApiClient, ChartTopic, ExportFormat, ExportRequest, GenerateRequest, RefineRequest,
    RefinementKind,
};
use crate::config::Config;

/// Run the TUI application
pub async fn run(config: Config, company: Option<String>, domain: Option<String>) -> Result<()> {
    // Check if we're running in a TTY
    if !atty::is(atty::Stream::Stdout) {
        anyhow::bail!(
            "This command requires a TTY (terminal). Please run in an interactive terminal,\n\
            or use the 'generate' command instead for non-interactive usage:\n  \
            consultgen generate --company \"Acme\" --domain \"Cloud strategy\""
        );
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::by_name(config.theme.as_deref().unwrap_or("dark"));
    let mut app = App::new(theme);
    let client = ApiClient::new(config.base_url());
    let export_dir = config.export_dir();

    // Event channel for async processing
    let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(100);

    // Prefilled navigation state skips the entry screen.
    if let (Some(company), Some(domain)) = (company, domain) {
        for c in company.chars() {
            app.entry.company.insert(c);
        }
        app.entry.next_field();
        for c in domain.chars() {
            app.entry.task_domain.insert(c);
        }
        if app.submit_entry() {
            start_generate(&mut app, &client, &event_tx);
        }
    }

    // Run event loop
    let result = run_app(
        &mut terminal,
        &mut app,
        &client,
        &export_dir,
        event_tx,
        &mut event_rx,
    )
    .await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main event loop
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &ApiClient,
    export_dir: &Path,
    event_tx: mpsc::Sender<AppEvent>,
    event_rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = std::time::Instant::now();

    loop {
        app.ensure_session();

        // Draw UI
        terminal.draw(|f| ui::render(f, app))?;

        // Handle terminal events
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                handle_key(app, client, export_dir, key, &event_tx);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if app.is_busy() {
                app.spinner_frame = app.spinner_frame.wrapping_add(1);
            }
            last_tick = std::time::Instant::now();
        }

        // Process async events
        while let Ok(event) = event_rx.try_recv() {
            app.apply_event(event);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(
    app: &mut App,
    client: &ApiClient,
    export_dir: &Path,
    key: KeyEvent,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    if app.dialog.is_some() {
        handle_dialog_key(app, client, export_dir, key, event_tx);
        return;
    }

    match app.screen {
        Screen::Entry => {
            let action = key_to_action(key);
            if app.handle_entry_action(action) {
                start_generate(app, client, event_tx);
            }
        }
        Screen::Document => handle_document_key(app, key),
    }
}

fn handle_document_key(app: &mut App, key: KeyEvent) {
    match key_to_action(key) {
        Action::Quit | Action::Char('q') => app.should_quit = true,
        Action::Cancel => app.back_to_entry(),
        Action::Up => app.scroll_by(-1),
        Action::Down => app.scroll_by(1),
        Action::PageUp => app.scroll_by(-10),
        Action::PageDown => app.scroll_by(10),
        Action::Char('r') => {
            if app.has_document() && !app.is_busy() {
                app.open_refine_dialog();
            }
        }
        Action::Char('e') => {
            if app.has_document() && !app.is_busy() {
                app.open_export_dialog();
            }
        }
        Action::Char('c') => {
            if app.has_document() {
                copy_document(app);
            }
        }
        Action::Char('d') => app.theme = app.theme.toggled(),
        Action::Char('o') => {
            if let Some(path) = &app.last_export {
                if let Err(e) = open::that(path) {
                    tracing::warn!(%e, "could not open exported file");
                }
            }
        }
        _ => {}
    }
}

fn handle_dialog_key(
    app: &mut App,
    client: &ApiClient,
    export_dir: &Path,
    key: KeyEvent,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    let Some(dialog_type) = app.dialog.as_ref().map(|d| d.dialog_type) else {
        return;
    };
    let action = key_to_action(key);

    match action {
        Action::Quit => app.should_quit = true,
        Action::Cancel => {
            // The export dialog stays put while a request is in flight.
            if !(dialog_type == DialogType::ExportFormat && app.export_loading) {
                app.close_dialog();
            }
        }
        Action::Up => {
            if let Some(dialog) = app.dialog.as_mut() {
                dialog.move_up();
            }
        }
        Action::Down => {
            if let Some(dialog) = app.dialog.as_mut() {
                dialog.move_down();
            }
        }
        Action::Submit => submit_dialog(app, dialog_type, client, export_dir, event_tx),
        _ if dialog_type == DialogType::RefinePrompt => {
            if let Some(dialog) = app.dialog.as_mut() {
                match action {
                    Action::Char(c) => dialog.input.insert(c),
                    Action::Backspace => dialog.input.backspace(),
                    Action::Delete => dialog.input.delete(),
                    Action::Left => dialog.input.left(),
                    Action::Right => dialog.input.right(),
                    Action::Home => dialog.input.home(),
                    Action::End => dialog.input.end(),
                    Action::ClearInput => dialog.input.clear(),
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

fn submit_dialog(
    app: &mut App,
    dialog_type: DialogType,
    client: &ApiClient,
    export_dir: &Path,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    match dialog_type {
        DialogType::RefineKind => {
            let Some(index) = app.dialog.as_ref().map(|d| d.selected_index) else {
                return;
            };
            let kind = RefinementKind::ALL[index.min(RefinementKind::ALL.len() - 1)];
            if kind.takes_topic() {
                app.open_topic_dialog(kind);
            } else {
                app.open_prompt_dialog(kind);
            }
        }
        DialogType::ChartTopic => {
            let Some(index) = app.dialog.as_ref().map(|d| d.selected_index) else {
                return;
            };
            let topic = ChartTopic::ALL[index.min(ChartTopic::ALL.len() - 1)];
            let template = app.document.clone();
            app.close_dialog();
            let epoch = app.begin_refine();
            spawn_refine(
                client.clone(),
                RefineRequest {
                    template,
                    refinement_option: RefinementKind::GraphVisualization,
                    refinement_prompt: String::new(),
                    visualize_data: Some(topic),
                },
                epoch,
                event_tx.clone(),
            );
        }
        DialogType::RefinePrompt => {
            let (kind, prompt) = {
                let Some(dialog) = app.dialog.as_mut() else {
                    return;
                };
                let Some(prompt) = dialog.take_instructions() else {
                    return;
                };
                (dialog.kind.unwrap_or(RefinementKind::Other), prompt)
            };
            let template = app.document.clone();
            app.close_dialog();
            let epoch = app.begin_refine();
            spawn_refine(
                client.clone(),
                RefineRequest {
                    template,
                    refinement_option: kind,
                    refinement_prompt: prompt,
                    visualize_data: None,
                },
                epoch,
                event_tx.clone(),
            );
        }
        DialogType::ExportFormat => {
            if app.export_loading {
                return;
            }
            let Some(index) = app.dialog.as_ref().map(|d| d.selected_index) else {
                return;
            };
            let Some(session) = app.session.clone() else {
                return;
            };
            let format = ExportFormat::ALL[index.min(ExportFormat::ALL.len() - 1)];
            if let Some(dialog) = app.dialog.as_mut() {
                dialog.alert = None;
            }
            app.export_loading = true;
            spawn_export(
                client.clone(),
                ExportRequest {
                    template: app.document.clone(),
                    format,
                    company_name: session.company_name,
                    task_or_domain: session.task_domain,
                },
                export_dir.to_path_buf(),
                event_tx.clone(),
            );
        }
    }
}

fn start_generate(app: &mut App, client: &ApiClient, event_tx: &mpsc::Sender<AppEvent>) {
    let Some(session) = app.session.clone() else {
        return;
    };
    let epoch = app.begin_generate();
    spawn_generate(
        client.clone(),
        GenerateRequest {
            company_name: session.company_name,
            task_or_domain: session.task_domain,
        },
        epoch,
        event_tx.clone(),
    );
}

fn copy_document(app: &mut App) {
    let text = crate::markdown::plain_text(app.display_text());
    match copy_to_clipboard(&text) {
        Ok(()) => app.status_note = Some("Copied to clipboard".to_string()),
        Err(e) => tracing::warn!(%e, "clipboard copy failed"),
    }
}

/// Copy text to the clipboard via OSC 52 plus the system clipboard.
fn copy_to_clipboard(text: &str) -> Result<()> {
    use base64::Engine;
    use std::io::Write;

    let encoded = base64::engine::general_purpose::STANDARD.encode(text);
    let osc52 = format!("\x1b]52;c;{}\x07", encoded);

    // Wrap the sequence for tmux passthrough
    let osc52 = if std::env::var("TMUX").is_ok() {
        format!("\x1bPtmux;\x1b{}\x1b\\", osc52)
    } else {
        osc52
    };

    let mut stdout = io::stdout();
    stdout.write_all(osc52.as_bytes())?;
    stdout.flush()?;

    if let Ok(mut clipboard) = arboard::Clipboard::new() {
        let _ = clipboard.set_text(text);
    }

    Ok(())
}
