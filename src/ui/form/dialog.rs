use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::display::find_user;
use crate::forms::{TaskField, TaskForm, UserField};
use crate::model::User;
use crate::ui::form::state::{FormDialogState, FormKind};
use crate::ui::layout::centered_rect_by_size;
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, HEADER_TEXT, MUTED_TEXT, POPUP_BORDER, STATUS_ERROR,
};

const DIALOG_WIDTH: u16 = 64;
const LABEL_WIDTH: usize = 15;

pub fn render_form_dialog(frame: &mut Frame, area: Rect, state: &FormDialogState, users: &[User]) {
    let FormDialogState::Visible {
        kind,
        focused,
        errors,
        ..
    } = state
    else {
        return;
    };

    let mut lines = Vec::new();
    match kind {
        FormKind::Task(form) => {
            for (index, field) in TaskField::ALL.iter().enumerate() {
                let value = task_value(form, *field, users);
                let error = errors.get(field.key());
                push_field(&mut lines, field.label(), value, index == *focused, error);
            }
        }
        FormKind::User(form) => {
            for (index, field) in UserField::ALL.iter().enumerate() {
                let value = form.text(*field).to_string();
                let error = errors.get(field.key());
                push_field(&mut lines, field.label(), value, index == *focused, error);
            }
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        hint(state),
        Style::default().fg(MUTED_TEXT),
    )));

    let height = lines.len().saturating_add(2) as u16;
    let rect = centered_rect_by_size(area, DIALOG_WIDTH, height);
    frame.render_widget(Clear, rect);
    let block = Block::default()
        .title(Span::styled(state.title(), Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn task_value(form: &TaskForm, field: TaskField, users: &[User]) -> String {
    match field {
        TaskField::Completed => {
            if form.completed {
                "[x]".to_string()
            } else {
                "[ ]".to_string()
            }
        }
        TaskField::AssignedUser => match find_user(users, Some(form.assigned_user_id.as_str())) {
            Some(user) => format!("◀ {} ▶", user.display_name()),
            None if form.assigned_user_id.is_empty() => "◀ Select a user ▶".to_string(),
            None => format!("◀ #{} ▶", form.assigned_user_id),
        },
        other => form.text(other).unwrap_or_default().to_string(),
    }
}

fn push_field(
    lines: &mut Vec<Line<'static>>,
    label: &'static str,
    value: String,
    focused: bool,
    error: Option<&str>,
) {
    let marker = if focused { "› " } else { "  " };
    let label_style = if focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(HEADER_TEXT)
    };
    let mut line = Line::from(vec![
        Span::styled(marker, label_style),
        Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), label_style),
        Span::styled(value, Style::default().fg(HEADER_TEXT)),
        Span::styled(if focused { "▏" } else { "" }, Style::default().fg(ACCENT)),
    ]);
    if focused {
        line = line.style(Style::default().bg(ACTIVE_HIGHLIGHT));
    }
    lines.push(line);
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            format!("{:width$}{error}", "", width = LABEL_WIDTH + 2),
            Style::default().fg(STATUS_ERROR),
        )));
    }
}

fn hint(state: &FormDialogState) -> &'static str {
    match state.focused_task_field() {
        Some(TaskField::AssignedUser) => "←/→: Pick user  Tab: Next  Enter: Save  Esc: Cancel",
        Some(TaskField::Completed) => "Space: Toggle  Tab: Next  Enter: Save  Esc: Cancel",
        _ => "Tab/Shift+Tab: Move  Enter: Save  Esc: Cancel",
    }
}
