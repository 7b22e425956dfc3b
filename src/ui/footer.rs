use crate::ui::app::{Focus, Screen};
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Footer;

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Footer {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, area: Rect, screen: Screen, focus: Focus) -> Paragraph<'static> {
        let hints = hints(screen, focus);
        let version = format!("v{} ", VERSION);

        // Padding by char count; hints contain box-drawing characters.
        let hints_width = hints.chars().count();
        let version_width = version.chars().count();
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width
            .saturating_sub(hints_width)
            .saturating_sub(version_width);

        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);

        let line = Line::from(vec![
            Span::styled(hints, text_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);

        Paragraph::new(line)
            .style(text_style)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}

fn hints(screen: Screen, focus: Focus) -> &'static str {
    match (focus, screen) {
        (Focus::Search, _) => " Type to filter │ Enter: Keep │ Esc: Clear",
        (Focus::Form, _) => " Tab: Next field │ Enter: Save │ Esc: Cancel",
        (Focus::ConfirmDelete, _) => " y: Delete │ n/Esc: Keep",
        (Focus::Main, Screen::Dashboard) => " Tab/1-3: Screens │ r: Refresh │ q: Quit",
        (Focus::Main, Screen::Tasks) => {
            " a: Add │ e: Edit │ d: Delete │ t: Toggle │ /: Search │ f: Filter │ v: View │ ←/→: Page │ +/-: Size │ x: Export │ q: Quit"
        }
        (Focus::Main, Screen::Users) => {
            " a: Add │ e: Edit │ d: Delete │ /: Search │ v: View │ ←/→: Page │ +/-: Size │ x: Export │ q: Quit"
        }
    }
}
