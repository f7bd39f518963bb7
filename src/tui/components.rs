//! Reusable TUI components.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Paragraph, Widget, Wrap},
};

use super::theme::Theme;

/// Header line showing the session title and request status.
pub struct Header<'a> {
    pub title: &'a str,
    pub status: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Widget for Header<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(12)])
            .split(area);

        let title = Paragraph::new(self.title)
            .style(self.theme.text_accent())
            .alignment(Alignment::Left);
        title.render(chunks[0], buf);

        let status_style = match self.status {
            "Ready" => self.theme.text().fg(self.theme.success),
            "Error" => self.theme.text().fg(self.theme.error),
            _ => self.theme.text().fg(self.theme.warning),
        };
        let status = Paragraph::new(self.status)
            .style(status_style)
            .alignment(Alignment::Right);
        status.render(chunks[1], buf);
    }
}

/// Status bar with left/center/right segments.
pub struct StatusBar<'a> {
    pub left: &'a str,
    pub center: &'a str,
    pub right: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ])
            .split(area);

        let left = Paragraph::new(self.left)
            .style(self.theme.text_dim())
            .alignment(Alignment::Left);
        left.render(chunks[0], buf);

        let center = Paragraph::new(self.center)
            .style(self.theme.text_dim())
            .alignment(Alignment::Center);
        center.render(chunks[1], buf);

        let right = Paragraph::new(self.right)
            .style(self.theme.text_dim())
            .alignment(Alignment::Right);
        right.render(chunks[2], buf);
    }
}

/// Loading spinner component
pub struct Spinner<'a> {
    pub message: &'a str,
    pub frame: usize,
    pub theme: &'a Theme,
}

impl<'a> Widget for Spinner<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frames = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
        let frame = frames[self.frame % frames.len()];

        let text = format!("{} {}", frame, self.message);
        let paragraph = Paragraph::new(text)
            .style(self.theme.text_accent())
            .alignment(Alignment::Left);
        paragraph.render(area, buf);
    }
}

/// Inline error banner.
pub struct ErrorBanner<'a> {
    pub message: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Widget for ErrorBanner<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let paragraph = Paragraph::new(self.message)
            .style(self.theme.text_error())
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        paragraph.render(area, buf);
    }
}
