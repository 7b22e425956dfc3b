use crate::notify::NotificationKind;
use crate::ui::app::{App, Screen};
use crate::ui::dashboard::render_dashboard;
use crate::ui::footer::Footer;
use crate::ui::form::render_form_dialog;
use crate::ui::header::Header;
use crate::ui::layout::{centered_rect_by_size, layout_regions};
use crate::ui::lists::{render_tasks, render_users};
use crate::ui::theme::{HEADER_TEXT, MUTED_TEXT, POPUP_BORDER, STATUS_ERROR, STATUS_OK};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);

    frame.render_widget(
        Header::new().widget(app.screen(), app.health(), app.is_loading()),
        header,
    );
    frame.render_widget(Clear, body);
    match app.screen() {
        Screen::Dashboard => render_dashboard(frame, body, app),
        Screen::Tasks => render_tasks(frame, body, app),
        Screen::Users => render_users(frame, body, app),
    }
    frame.render_widget(
        Footer::new().widget(footer, app.screen(), app.focus()),
        footer,
    );

    render_form_dialog(frame, area, app.form(), &app.users().items);

    if let Some(target) = app.pending_delete() {
        let lines = vec![
            Line::from(Span::styled(target.prompt(), Style::default().fg(HEADER_TEXT))),
            Line::from(""),
            Line::from(Span::styled(
                "This cannot be undone.  y: Delete  n: Cancel",
                Style::default().fg(MUTED_TEXT),
            )),
        ];
        let rect = centered_rect_by_size(area, 56, 5);
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .title(Span::styled(
                "Confirm Delete",
                Style::default().fg(STATUS_ERROR).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(POPUP_BORDER));
        frame.render_widget(Paragraph::new(lines).block(block), rect);
    }

    render_notifications(frame, body, app);
}

/// Stacks toasts in the top-right corner of `area`, newest on top.
fn render_notifications(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let width = TOAST_WIDTH.min(area.width);
    let mut y = area.y;
    for notification in app.notifications().iter().rev() {
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let rect = Rect {
            x: area.x + area.width - width,
            y,
            width,
            height: TOAST_HEIGHT,
        };
        let color = match notification.kind {
            NotificationKind::Success => STATUS_OK,
            NotificationKind::Error => STATUS_ERROR,
        };
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .title(Span::styled(
                notification.title.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        frame.render_widget(
            Paragraph::new(notification.message.clone())
                .wrap(Wrap { trim: true })
                .block(block),
            rect,
        );
        y += TOAST_HEIGHT;
    }
}
