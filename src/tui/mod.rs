//! Terminal user interface built on ratatui.
//!
//! Two screens: the entry form and the streaming document view.

mod app;
mod components;
mod input;
mod markdown_view;
mod state;
mod streaming;
mod theme;
mod types;
mod ui;

pub use app::run;
pub use markdown_view::render_markdown;
pub use state::{App, Screen, SessionInput, EXPORT_ERROR, GENERATE_ERROR, REFINE_ERROR};
pub use theme::Theme;
pub use types::{AppEvent, DialogState, DialogType, SelectItem, StreamPhase, TextField};
