use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use crate::stats::{additional_stats, stat_cards, StatCard};
use crate::ui::app::App;
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR, STATUS_OK};

pub fn render_dashboard(frame: &mut Frame, area: Rect, app: &App) {
    let tasks = app.tasks();
    if tasks.loading && tasks.items.is_empty() {
        let loading = Paragraph::new("Loading dashboard...")
            .style(Style::default().fg(MUTED_TEXT))
            .block(bordered(""));
        frame.render_widget(loading, area);
        return;
    }

    let stats = app.stats();
    let user_count = app.users().items.len();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(7),
            Constraint::Min(0),
        ])
        .split(area);

    let cards = stat_cards(&stats, user_count);
    let card_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(rows[0]);
    for (card, rect) in cards.iter().zip(card_areas.iter()) {
        frame.render_widget(stat_card(card), *rect);
    }

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    let progress = bordered("Task Progress");
    let inner = progress.inner(middle[0]);
    frame.render_widget(progress, middle[0]);
    let progress_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(STATUS_OK))
        .ratio((stats.completion_rate / 100.0).clamp(0.0, 1.0))
        .label(stats.completion_rate_label());
    frame.render_widget(gauge, progress_rows[0]);
    let extra: Vec<Span> = additional_stats(&stats)
        .into_iter()
        .flat_map(|item| {
            [
                Span::styled(format!("{}: ", item.title), Style::default().fg(MUTED_TEXT)),
                Span::styled(
                    format!("{}   ", item.value),
                    Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
                ),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(extra)), progress_rows[2]);

    let quick = Paragraph::new(vec![
        quick_line("Users", user_count.to_string()),
        quick_line("Open tasks", stats.pending.to_string()),
        quick_line("Done", stats.completed.to_string()),
    ])
    .block(bordered("Quick Stats"));
    frame.render_widget(quick, middle[1]);

    if let Some(error) = tasks.error.as_deref().or(app.users().error.as_deref()) {
        let banner = Paragraph::new(Span::styled(
            format!(" {error}"),
            Style::default().fg(STATUS_ERROR),
        ));
        frame.render_widget(banner, rows[2]);
    }
}

fn stat_card(card: &StatCard) -> Paragraph<'static> {
    let mut lines = vec![Line::from(Span::styled(
        card.value.clone(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))];
    if let Some(description) = card.description {
        lines.push(Line::from(Span::styled(
            description,
            Style::default().fg(MUTED_TEXT),
        )));
    }
    Paragraph::new(lines).block(bordered(card.title))
}

fn quick_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label:<12}"), Style::default().fg(MUTED_TEXT)),
        Span::styled(value, Style::default().fg(HEADER_TEXT)),
    ])
}

fn bordered(title: &str) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(HEADER_TEXT),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER))
}
