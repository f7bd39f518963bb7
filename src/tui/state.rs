//! Application state management.
//!
//! The `App` struct owns everything the two screens show: the entry form,
//! the session input carried across navigation, the document buffers, the
//! loading flags and error banners, and the request epoch. Spawned network
//! tasks never touch it; their output arrives as `AppEvent`s and is applied
//! in one place, `apply_event`.

use std::path::PathBuf;

use super::input::Action;
use super::theme::Theme;
use super::types::{AppEvent, DialogState, DialogType, SelectItem, StreamPhase, TextField};
use crate::api::{ChartTopic, ExportFormat, RefinementKind};

pub const GENERATE_ERROR: &str = "Failed to generate template.";
pub const REFINE_ERROR: &str = "Failed to refine template.";
pub const EXPORT_ERROR: &str = "Export failed.";

/// Which of the two screens is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Entry,
    Document,
}

/// Focused field on the entry screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFocus {
    Company,
    TaskDomain,
}

impl Default for EntryFocus {
    fn default() -> Self {
        EntryFocus::Company
    }
}

/// The entry screen's two required fields.
#[derive(Debug, Default)]
pub struct EntryForm {
    pub company: TextField,
    pub task_domain: TextField,
    pub focus: EntryFocus,
    pub notice: Option<String>,
}

impl EntryForm {
    pub fn focused_field_mut(&mut self) -> &mut TextField {
        match self.focus {
            EntryFocus::Company => &mut self.company,
            EntryFocus::TaskDomain => &mut self.task_domain,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            EntryFocus::Company => EntryFocus::TaskDomain,
            EntryFocus::TaskDomain => EntryFocus::Company,
        };
    }

    pub fn reset(&mut self) {
        self.company.clear();
        self.task_domain.clear();
        self.focus = EntryFocus::Company;
        self.notice = None;
    }
}

/// Navigation state carried from the entry screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInput {
    pub company_name: String,
    pub task_domain: String,
}

/// Application state
pub struct App {
    pub screen: Screen,
    pub entry: EntryForm,
    /// Set on navigation; immutable while the document screen is up.
    pub session: Option<SessionInput>,
    /// Finalized full text of the last completed stream.
    pub document: String,
    /// Growing partial text of the stream in flight.
    pub streamed: String,
    pub loading: bool,
    pub refine_loading: bool,
    pub export_loading: bool,
    pub error: Option<String>,
    pub refine_error: Option<String>,
    /// Transient note in the status bar (export path, clipboard copy).
    pub status_note: Option<String>,
    pub last_export: Option<PathBuf>,
    pub scroll: u16,
    /// Identifies the stream whose output is currently welcome.
    pub epoch: u64,
    pub dialog: Option<DialogState>,
    pub theme: Theme,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self {
            screen: Screen::Entry,
            entry: EntryForm::default(),
            session: None,
            document: String::new(),
            streamed: String::new(),
            loading: false,
            refine_loading: false,
            export_loading: false,
            error: None,
            refine_error: None,
            status_note: None,
            last_export: None,
            scroll: 0,
            epoch: 0,
            dialog: None,
            theme: Theme::dark(),
            spinner_frame: 0,
            should_quit: false,
        }
    }
}

impl App {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..App::default()
        }
    }

    /// The text currently shown: the in-flight partial if any, otherwise the
    /// finalized document.
    pub fn display_text(&self) -> &str {
        if self.streamed.is_empty() {
            &self.document
        } else {
            &self.streamed
        }
    }

    pub fn has_document(&self) -> bool {
        !self.display_text().is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.refine_loading || self.export_loading
    }

    /// Status label for the header.
    pub fn status(&self) -> &'static str {
        if self.loading {
            "Generating"
        } else if self.refine_loading {
            "Refining"
        } else if self.export_loading {
            "Exporting"
        } else if self.error.is_some() || self.refine_error.is_some() {
            "Error"
        } else {
            "Ready"
        }
    }

    /// Validate the entry form and navigate. Returns true when navigation
    /// happened; the caller is expected to start the generation stream.
    pub fn submit_entry(&mut self) -> bool {
        if self.entry.company.is_blank() || self.entry.task_domain.is_blank() {
            self.entry.notice = Some("Company name and task/domain are both required.".to_string());
            return false;
        }

        self.session = Some(SessionInput {
            company_name: self.entry.company.value.clone(),
            task_domain: self.entry.task_domain.value.clone(),
        });
        self.entry.notice = None;
        self.screen = Screen::Document;
        true
    }

    /// The document screen is only reachable with navigation state; if it is
    /// somehow missing, fall back to the entry screen.
    pub fn ensure_session(&mut self) {
        if self.screen == Screen::Document && self.session.is_none() {
            self.screen = Screen::Entry;
        }
    }

    /// Handle an input action on the entry screen. Returns true when the
    /// form submitted and navigation happened.
    pub fn handle_entry_action(&mut self, action: Action) -> bool {
        match action {
            Action::Quit | Action::Cancel => {
                self.should_quit = true;
            }
            Action::Submit => return self.submit_entry(),
            Action::NextField => self.entry.next_field(),
            Action::Char(c) => self.entry.focused_field_mut().insert(c),
            Action::Backspace => self.entry.focused_field_mut().backspace(),
            Action::Delete => self.entry.focused_field_mut().delete(),
            Action::Left => self.entry.focused_field_mut().left(),
            Action::Right => self.entry.focused_field_mut().right(),
            Action::Home => self.entry.focused_field_mut().home(),
            Action::End => self.entry.focused_field_mut().end(),
            Action::ClearInput => self.entry.focused_field_mut().clear(),
            _ => {}
        }
        false
    }

    /// Reset stream state for a fresh generation. Returns the new epoch the
    /// stream task must stamp its events with.
    pub fn begin_generate(&mut self) -> u64 {
        self.document.clear();
        self.streamed.clear();
        self.loading = true;
        self.error = None;
        self.refine_error = None;
        self.status_note = None;
        self.scroll = 0;
        self.epoch += 1;
        self.epoch
    }

    /// Clear the display buffer and start a refinement stream. The caller
    /// must capture the previous document for the request body before
    /// calling this.
    pub fn begin_refine(&mut self) -> u64 {
        self.document.clear();
        self.streamed.clear();
        self.refine_loading = true;
        self.refine_error = None;
        self.status_note = None;
        self.scroll = 0;
        self.epoch += 1;
        self.epoch
    }

    /// Leave the document screen. The epoch bump strands any stream still in
    /// flight; its chunks will be discarded on arrival.
    pub fn back_to_entry(&mut self) {
        self.screen = Screen::Entry;
        self.session = None;
        self.document.clear();
        self.streamed.clear();
        self.loading = false;
        self.refine_loading = false;
        self.export_loading = false;
        self.error = None;
        self.refine_error = None;
        self.status_note = None;
        self.scroll = 0;
        self.dialog = None;
        self.epoch += 1;
        self.entry.reset();
    }

    /// Apply an async event. The single mutation point for everything the
    /// network tasks produce.
    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::StreamChunk { epoch, text } => {
                if epoch != self.epoch {
                    tracing::debug!(epoch, current = self.epoch, "discarding stale chunk");
                    return;
                }
                self.streamed.push_str(&text);
            }
            AppEvent::StreamDone { epoch } => {
                if epoch != self.epoch {
                    return;
                }
                self.document = std::mem::take(&mut self.streamed);
                self.loading = false;
                self.refine_loading = false;
            }
            AppEvent::StreamFailed { epoch, phase } => {
                if epoch != self.epoch {
                    return;
                }
                match phase {
                    StreamPhase::Generate => {
                        self.error = Some(GENERATE_ERROR.to_string());
                        self.loading = false;
                    }
                    StreamPhase::Refine => {
                        self.refine_error = Some(REFINE_ERROR.to_string());
                        self.refine_loading = false;
                    }
                }
            }
            AppEvent::ExportDone { path } => {
                self.export_loading = false;
                self.dialog = None;
                self.status_note = Some(format!(
                    "Saved {} at {}",
                    path.display(),
                    chrono::Local::now().format("%H:%M:%S")
                ));
                self.last_export = Some(path);
            }
            AppEvent::ExportFailed(message) => {
                self.export_loading = false;
                if let Some(dialog) = self.dialog.as_mut() {
                    dialog.alert = Some(message);
                }
            }
        }
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// Open the refinement kind selector.
    pub fn open_refine_dialog(&mut self) {
        let items = RefinementKind::ALL
            .iter()
            .map(|kind| SelectItem {
                id: kind.label().to_string(),
                label: kind.label().to_string(),
                description: None,
            })
            .collect();
        self.dialog = Some(DialogState::new(DialogType::RefineKind, "Refine Template").with_items(items));
    }

    /// Open the chart topic selector for the Graph Visualization kind.
    pub fn open_topic_dialog(&mut self, kind: RefinementKind) {
        let items = ChartTopic::ALL
            .iter()
            .map(|topic| SelectItem {
                id: topic.label().to_string(),
                label: topic.label().to_string(),
                description: None,
            })
            .collect();
        self.dialog = Some(
            DialogState::new(DialogType::ChartTopic, "Visualize Data")
                .with_items(items)
                .with_kind(kind),
        );
    }

    /// Open the free-text instruction input for the other kinds.
    pub fn open_prompt_dialog(&mut self, kind: RefinementKind) {
        self.dialog = Some(
            DialogState::new(DialogType::RefinePrompt, kind.label()).with_kind(kind),
        );
    }

    /// Open the export format selector.
    pub fn open_export_dialog(&mut self) {
        let items = ExportFormat::ALL
            .iter()
            .map(|format| SelectItem {
                id: format.extension().to_string(),
                label: format.label().to_string(),
                description: Some(format.filename()),
            })
            .collect();
        self.dialog = Some(DialogState::new(DialogType::ExportFormat, "Export Template").with_items(items));
    }

    /// Scroll the document view, clamped to its line count.
    pub fn scroll_by(&mut self, delta: i32) {
        let max = self.display_text().lines().count().saturating_sub(1) as u16;
        let next = if delta < 0 {
            self.scroll.saturating_sub(delta.unsigned_abs() as u16)
        } else {
            self.scroll.saturating_add(delta as u16)
        };
        self.scroll = next.min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(epoch: u64, text: &str) -> AppEvent {
        AppEvent::StreamChunk {
            epoch,
            text: text.to_string(),
        }
    }

    mod entry_form {
        use super::*;

        #[test]
        fn test_submit_navigates_with_exact_pair() {
            let mut app = App::default();
            for c in "Acme Corp".chars() {
                app.entry.company.insert(c);
            }
            app.entry.next_field();
            for c in "Cloud Migration".chars() {
                app.entry.task_domain.insert(c);
            }

            assert!(app.submit_entry());
            assert_eq!(app.screen, Screen::Document);
            assert_eq!(
                app.session,
                Some(SessionInput {
                    company_name: "Acme Corp".to_string(),
                    task_domain: "Cloud Migration".to_string(),
                })
            );
        }

        #[test]
        fn test_empty_company_blocks_navigation() {
            let mut app = App::default();
            app.entry.next_field();
            for c in "Strategy".chars() {
                app.entry.task_domain.insert(c);
            }

            assert!(!app.submit_entry());
            assert_eq!(app.screen, Screen::Entry);
            assert!(app.session.is_none());
            assert!(app.entry.notice.is_some());
        }

        #[test]
        fn test_whitespace_only_domain_blocks_navigation() {
            let mut app = App::default();
            app.entry.company.insert('A');
            app.entry.task_domain.insert(' ');

            assert!(!app.submit_entry());
            assert!(app.session.is_none());
        }

        #[test]
        fn test_missing_session_redirects() {
            let mut app = App::default();
            app.screen = Screen::Document;
            app.ensure_session();
            assert_eq!(app.screen, Screen::Entry);
        }
    }

    mod streaming {
        use super::*;

        #[test]
        fn test_chunks_concatenate_in_order() {
            let mut app = App::default();
            let epoch = app.begin_generate();

            let pieces = ["# Ti", "tle", "\n\nBo", "", "dy text"];
            for piece in pieces {
                app.apply_event(chunk(epoch, piece));
            }
            app.apply_event(AppEvent::StreamDone { epoch });

            assert_eq!(app.display_text(), pieces.concat());
            assert_eq!(app.document, pieces.concat());
            assert!(!app.loading);
        }

        #[test]
        fn test_refine_clears_previous_document() {
            let mut app = App::default();
            let epoch = app.begin_generate();
            app.apply_event(chunk(epoch, "old document"));
            app.apply_event(AppEvent::StreamDone { epoch });
            assert_eq!(app.display_text(), "old document");

            let epoch = app.begin_refine();
            assert_eq!(app.display_text(), "");

            app.apply_event(chunk(epoch, "new"));
            assert_eq!(app.display_text(), "new");
        }

        #[test]
        fn test_stale_chunks_discarded() {
            let mut app = App::default();
            let old_epoch = app.begin_generate();
            app.apply_event(chunk(old_epoch, "first stream "));

            let new_epoch = app.begin_refine();
            app.apply_event(chunk(old_epoch, "LATE CHUNK"));
            app.apply_event(chunk(new_epoch, "second stream"));
            app.apply_event(AppEvent::StreamDone { epoch: old_epoch });

            assert_eq!(app.display_text(), "second stream");
            // The stale Done must not clear the refine spinner.
            assert!(app.refine_loading);

            app.apply_event(AppEvent::StreamDone { epoch: new_epoch });
            assert!(!app.refine_loading);
            assert_eq!(app.document, "second stream");
        }

        #[test]
        fn test_generate_failure_sets_banner_and_clears_loading() {
            let mut app = App::default();
            let epoch = app.begin_generate();
            assert!(app.loading);

            app.apply_event(AppEvent::StreamFailed {
                epoch,
                phase: StreamPhase::Generate,
            });

            assert_eq!(app.error.as_deref(), Some(GENERATE_ERROR));
            assert!(!app.loading);
        }

        #[test]
        fn test_refine_failure_scoped_banner_leaves_empty_document() {
            let mut app = App::default();
            let epoch = app.begin_generate();
            app.apply_event(chunk(epoch, "good doc"));
            app.apply_event(AppEvent::StreamDone { epoch });

            let epoch = app.begin_refine();
            app.apply_event(AppEvent::StreamFailed {
                epoch,
                phase: StreamPhase::Refine,
            });

            assert_eq!(app.refine_error.as_deref(), Some(REFINE_ERROR));
            assert!(app.error.is_none());
            assert!(!app.refine_loading);
            // Prior state was already cleared, so failure leaves nothing.
            assert_eq!(app.display_text(), "");
        }

        #[test]
        fn test_back_to_entry_strands_in_flight_stream() {
            let mut app = App::default();
            app.entry.company.insert('A');
            app.entry.task_domain.insert('B');
            app.submit_entry();
            let epoch = app.begin_generate();
            app.apply_event(chunk(epoch, "partial"));

            app.back_to_entry();
            assert_eq!(app.screen, Screen::Entry);
            assert!(app.entry.company.value.is_empty());

            app.apply_event(chunk(epoch, " more"));
            assert_eq!(app.display_text(), "");
        }
    }

    mod export {
        use super::*;

        #[test]
        fn test_export_done_closes_dialog_with_note() {
            let mut app = App::default();
            app.open_export_dialog();
            app.export_loading = true;

            app.apply_event(AppEvent::ExportDone {
                path: PathBuf::from("consulting_template.txt"),
            });

            assert!(!app.export_loading);
            assert!(app.dialog.is_none());
            let note = app.status_note.as_deref().unwrap();
            assert!(note.starts_with("Saved consulting_template.txt"));
        }

        #[test]
        fn test_export_failure_keeps_dialog_open_with_alert() {
            let mut app = App::default();
            app.open_export_dialog();
            app.export_loading = true;

            app.apply_event(AppEvent::ExportFailed(EXPORT_ERROR.to_string()));

            assert!(!app.export_loading);
            let dialog = app.dialog.as_ref().expect("dialog stays open for retry");
            assert_eq!(dialog.alert.as_deref(), Some(EXPORT_ERROR));
        }
    }

    mod dialogs {
        use super::*;

        #[test]
        fn test_refine_dialog_lists_all_kinds() {
            let mut app = App::default();
            app.open_refine_dialog();
            let dialog = app.dialog.as_ref().unwrap();
            assert_eq!(dialog.items.len(), 5);
            assert_eq!(dialog.items[3].label, "Graph Visualization");
        }

        #[test]
        fn test_topic_dialog_lists_five_topics() {
            let mut app = App::default();
            app.open_topic_dialog(RefinementKind::GraphVisualization);
            let dialog = app.dialog.as_ref().unwrap();
            assert_eq!(dialog.items.len(), 5);
            assert_eq!(dialog.kind, Some(RefinementKind::GraphVisualization));
        }

        #[test]
        fn test_export_dialog_lists_three_formats() {
            let mut app = App::default();
            app.open_export_dialog();
            let dialog = app.dialog.as_ref().unwrap();
            let labels: Vec<&str> = dialog.items.iter().map(|i| i.id.as_str()).collect();
            assert_eq!(labels, vec!["pdf", "docx", "txt"]);
        }
    }

    mod scrolling {
        use super::*;

        #[test]
        fn test_scroll_clamped_to_document() {
            let mut app = App::default();
            app.document = "a\nb\nc\nd".to_string();

            app.scroll_by(10);
            assert_eq!(app.scroll, 3);
            app.scroll_by(-1);
            assert_eq!(app.scroll, 2);
            app.scroll_by(-10);
            assert_eq!(app.scroll, 0);
        }
    }
}
