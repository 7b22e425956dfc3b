use crate::ui::app::Screen;
use crate::ui::theme::{
    ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR, STATUS_OK,
    STATUS_WARN,
};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header;

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(
        &self,
        active: Screen,
        health: Option<bool>,
        loading: bool,
    ) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);

        let mut spans = vec![Span::styled(
            "  Task Manager",
            text_style.add_modifier(Modifier::BOLD),
        )];
        for (index, screen) in Screen::ALL.iter().enumerate() {
            spans.push(Span::styled("  │  ", separator_style));
            let label = format!("{} {}", index + 1, screen.title());
            let style = if *screen == active {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED_TEXT)
            };
            spans.push(Span::styled(label, style));
        }

        let (dot, status, color) = match health {
            Some(true) => ("●", "API online", STATUS_OK),
            Some(false) => ("●", "API offline", STATUS_ERROR),
            None => ("○", "API checking", STATUS_WARN),
        };
        spans.push(Span::styled("  │  ", separator_style));
        spans.push(Span::styled(dot, Style::default().fg(color)));
        spans.push(Span::styled(format!(" {status}"), text_style));
        if loading {
            spans.push(Span::styled("  │  ", separator_style));
            spans.push(Span::styled("Loading…", Style::default().fg(STATUS_WARN)));
        }

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
