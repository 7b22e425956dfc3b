//! Task and user list screens in table or card view.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::display::{assigned_user_name, status_label, truncate};
use crate::model::date::format_display;
use crate::model::{Task, User};
use crate::query::{paginate, Page};
use crate::ui::app::{App, Focus, ViewMode};
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR, STATUS_OK,
    STATUS_WARN,
};

const CARD_HEIGHT: u16 = 6;
const CARD_MIN_WIDTH: u16 = 36;

pub fn render_tasks(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.tasks();
    let filtered = app.filtered_tasks();
    let page = paginate(&filtered, state.page, state.page_size);
    let [toolbar, body, pager] = split(area);

    let filter = format!("Status: {}", state.filters.status);
    frame.render_widget(
        toolbar_widget(app, &filter, state.error.as_deref()),
        toolbar,
    );

    if state.loading && state.items.is_empty() {
        frame.render_widget(placeholder("Loading tasks..."), body);
    } else if page.items.is_empty() {
        frame.render_widget(placeholder("No tasks found"), body);
    } else {
        let users = &app.users().items;
        match app.view_mode() {
            ViewMode::Table => render_task_table(frame, body, &page, users, app.selection()),
            ViewMode::Cards => {
                let cards: Vec<Card> = page
                    .items
                    .iter()
                    .map(|task| task_card(task, users))
                    .collect();
                render_cards(frame, body, &cards, app.selection());
            }
        }
    }
    frame.render_widget(pager_widget(&page, "tasks"), pager);
}

pub fn render_users(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.users();
    let filtered = app.filtered_users();
    let page = paginate(&filtered, state.page, state.page_size);
    let [toolbar, body, pager] = split(area);

    frame.render_widget(toolbar_widget(app, "", state.error.as_deref()), toolbar);

    if state.loading && state.items.is_empty() {
        frame.render_widget(placeholder("Loading users..."), body);
    } else if page.items.is_empty() {
        frame.render_widget(placeholder("No users found"), body);
    } else {
        match app.view_mode() {
            ViewMode::Table => render_user_table(frame, body, &page, app.selection()),
            ViewMode::Cards => {
                let cards: Vec<Card> = page.items.iter().map(|user| user_card(user)).collect();
                render_cards(frame, body, &cards, app.selection());
            }
        }
    }
    frame.render_widget(pager_widget(&page, "users"), pager);
}

fn split(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

fn toolbar_widget(app: &App, extra: &str, error: Option<&str>) -> Paragraph<'static> {
    let searching = app.focus() == Focus::Search;
    let term = app.search_term();
    let search_style = if searching {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(HEADER_TEXT)
    };
    let mut spans = vec![
        Span::styled(" Search: ", Style::default().fg(MUTED_TEXT)),
        Span::styled(
            if term.is_empty() && !searching {
                "(none)".to_string()
            } else {
                term.to_string()
            },
            search_style,
        ),
    ];
    if searching {
        spans.push(Span::styled("▏", Style::default().fg(ACCENT)));
    }
    if !extra.is_empty() {
        spans.push(Span::styled(format!("   {extra}"), Style::default().fg(MUTED_TEXT)));
    }
    if let Some(error) = error {
        spans.push(Span::styled(
            format!("   {error}"),
            Style::default().fg(STATUS_ERROR),
        ));
    }
    Paragraph::new(Line::from(spans))
}

fn pager_widget<T>(page: &Page<'_, T>, noun: &str) -> Paragraph<'static> {
    let range = if page.items.is_empty() {
        "0".to_string()
    } else {
        format!("{}-{}", page.row_number(0), page.row_number(page.items.len() - 1))
    };
    let line = format!(
        " {range} of {} {noun}   Page {}/{}   {} per page",
        page.total_items,
        page.page,
        page.total_pages.max(1),
        page.page_size,
    );
    Paragraph::new(line).style(Style::default().fg(MUTED_TEXT))
}

fn placeholder(text: &'static str) -> Paragraph<'static> {
    Paragraph::new(text)
        .style(Style::default().fg(MUTED_TEXT))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
}

fn render_task_table(
    frame: &mut Frame,
    area: Rect,
    page: &Page<'_, &Task>,
    users: &[User],
    selected: usize,
) {
    let header = Row::new(["#", "Title", "Assigned User", "Start Date", "End Date", "Status"])
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    let rows = page.items.iter().enumerate().map(|(index, task)| {
        let status_color = if task.completed { STATUS_OK } else { STATUS_WARN };
        Row::new(vec![
            Cell::from(page.row_number(index).to_string()),
            Cell::from(task.title.clone()),
            Cell::from(assigned_user_name(task, users)),
            Cell::from(format_display(task.start_date.as_deref())),
            Cell::from(format_display(task.end_date.as_deref())),
            Cell::from(status_label(task.completed)).style(Style::default().fg(status_color)),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Percentage(35),
            Constraint::Percentage(22),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(ACTIVE_HIGHLIGHT))
    .highlight_symbol("› ")
    .block(list_block());

    let mut state = TableState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_user_table(frame: &mut Frame, area: Rect, page: &Page<'_, &User>, selected: usize) {
    let header = Row::new(["#", "ID", "Name", "Email"])
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    let rows = page.items.iter().enumerate().map(|(index, user)| {
        Row::new(vec![
            Cell::from(page.row_number(index).to_string()),
            Cell::from(user.id.clone()),
            Cell::from(user.display_name()),
            Cell::from(user.email.clone().unwrap_or_default()),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Length(8),
            Constraint::Percentage(35),
            Constraint::Percentage(50),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(ACTIVE_HIGHLIGHT))
    .highlight_symbol("› ")
    .block(list_block());

    let mut state = TableState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn list_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER))
}

struct Card {
    title: String,
    lines: Vec<Line<'static>>,
}

fn task_card(task: &Task, users: &[User]) -> Card {
    let status_color = if task.completed { STATUS_OK } else { STATUS_WARN };
    Card {
        title: task.title.clone(),
        lines: vec![
            Line::from(Span::styled(
                truncate(&task.description, 60),
                Style::default().fg(MUTED_TEXT),
            )),
            Line::from(format!("👤 {}", assigned_user_name(task, users))),
            Line::from(format!(
                "📅 {} → {}",
                format_display(task.start_date.as_deref()),
                format_display(task.end_date.as_deref())
            )),
            Line::from(Span::styled(
                status_label(task.completed),
                Style::default().fg(status_color),
            )),
        ],
    }
}

fn user_card(user: &User) -> Card {
    Card {
        title: user.display_name(),
        lines: vec![
            Line::from(format!("ID: {}", user.id)),
            Line::from(format!("✉ {}", user.email.as_deref().unwrap_or("N/A"))),
            Line::from(Span::styled(
                user.avatar.clone().unwrap_or_default(),
                Style::default().fg(MUTED_TEXT),
            )),
        ],
    }
}

/// Lays cards out in a grid, scrolled so the selected card is visible.
fn render_cards(frame: &mut Frame, area: Rect, cards: &[Card], selected: usize) {
    let columns = (area.width / CARD_MIN_WIDTH).max(1) as usize;
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let selected_row = selected / columns;
    let first_row = selected_row.saturating_sub(visible_rows - 1);
    let card_width = area.width / columns as u16;

    for (index, card) in cards.iter().enumerate().skip(first_row * columns) {
        let row = index / columns - first_row;
        if row >= visible_rows {
            break;
        }
        let col = index % columns;
        let rect = Rect {
            x: area.x + col as u16 * card_width,
            y: area.y + row as u16 * CARD_HEIGHT,
            width: card_width,
            height: CARD_HEIGHT.min(area.height),
        };
        let border = if index == selected { ACCENT } else { GLOBAL_BORDER };
        let block = Block::default()
            .title(Span::styled(
                truncate(&card.title, card_width.saturating_sub(4) as usize),
                Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        frame.render_widget(Paragraph::new(card.lines.clone()).block(block), rect);
    }
}
