//! Type definitions for the TUI application.

use std::path::PathBuf;

use crate::api::RefinementKind;

/// Which streaming request a stream event belongs to, for error routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPhase {
    Generate,
    Refine,
}

/// Application events for the TUI event loop.
///
/// Stream events are stamped with the request epoch they belong to; the
/// state layer drops events from superseded epochs.
#[derive(Debug)]
pub enum AppEvent {
    StreamChunk { epoch: u64, text: String },
    StreamDone { epoch: u64 },
    StreamFailed { epoch: u64, phase: StreamPhase },
    ExportDone { path: PathBuf },
    ExportFailed(String),
}

/// Active dialog type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogType {
    RefineKind,
    ChartTopic,
    RefinePrompt,
    ExportFormat,
}

/// Item for selection dialogs
#[derive(Debug, Clone)]
pub struct SelectItem {
    pub id: String,
    pub label: String,
    pub description: Option<String>,
}

/// A single-line editable text value with a char-boundary-safe cursor.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    pub value: String,
    pub cursor: usize,
}

impl TextField {
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.value[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    pub fn left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.value[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.value[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.value.len());
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Dialog state for selection and input dialogs
#[derive(Debug, Clone)]
pub struct DialogState {
    pub dialog_type: DialogType,
    pub title: String,
    pub items: Vec<SelectItem>,
    pub selected_index: usize,
    pub input: TextField,
    /// Blocking alert shown inside the dialog (e.g. export failure).
    pub alert: Option<String>,
    /// Refinement kind carried from the kind selector into the follow-up
    /// topic/prompt dialog.
    pub kind: Option<RefinementKind>,
}

impl DialogState {
    pub fn new(dialog_type: DialogType, title: &str) -> Self {
        Self {
            dialog_type,
            title: title.to_string(),
            items: Vec::new(),
            selected_index: 0,
            input: TextField::default(),
            alert: None,
            kind: None,
        }
    }

    pub fn with_items(mut self, items: Vec<SelectItem>) -> Self {
        self.items = items;
        self
    }

    pub fn with_kind(mut self, kind: RefinementKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn selected_item(&self) -> Option<&SelectItem> {
        self.items.get(self.selected_index)
    }

    /// Take the instruction text, rejecting blank input with an inline alert.
    pub fn take_instructions(&mut self) -> Option<String> {
        if self.input.is_blank() {
            self.alert = Some("Instructions are required.".to_string());
            None
        } else {
            Some(self.input.value.clone())
        }
    }

    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.items.len() {
            self.selected_index += 1;
        }
    }
}
