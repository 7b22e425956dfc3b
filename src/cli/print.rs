//! Plain-text renderings for command output.

use std::io::{self, Write};

use crate::display::{assigned_user_name, status_label, truncate};
use crate::model::date::format_display;
use crate::model::{Task, User};
use crate::query::Page;
use crate::stats::{additional_stats, stat_cards, TaskStats};

pub fn stats(out: &mut impl Write, stats: &TaskStats, user_count: usize) -> io::Result<()> {
    for card in stat_cards(stats, user_count)
        .into_iter()
        .chain(additional_stats(stats))
    {
        writeln!(out, "{:<16} {:>8}", card.title, card.value)?;
    }
    Ok(())
}

pub fn task_page(out: &mut impl Write, page: &Page<'_, &Task>, users: &[User]) -> io::Result<()> {
    if page.items.is_empty() {
        return writeln!(out, "No tasks found");
    }
    writeln!(
        out,
        "{:>4}  {:<6} {:<32} {:<20} {:<11} {:<11} {}",
        "#", "ID", "TITLE", "ASSIGNED", "START", "END", "STATUS"
    )?;
    for (index, task) in page.items.iter().enumerate() {
        writeln!(
            out,
            "{:>4}  {:<6} {:<32} {:<20} {:<11} {:<11} {}",
            page.row_number(index),
            task.id,
            truncate(&task.title, 32),
            truncate(&assigned_user_name(task, users), 20),
            format_display(task.start_date.as_deref()),
            format_display(task.end_date.as_deref()),
            status_label(task.completed),
        )?;
    }
    footer(out, page, "tasks")
}

pub fn user_page(out: &mut impl Write, page: &Page<'_, &User>) -> io::Result<()> {
    if page.items.is_empty() {
        return writeln!(out, "No users found");
    }
    writeln!(out, "{:>4}  {:<6} {:<28} {}", "#", "ID", "NAME", "EMAIL")?;
    for (index, user) in page.items.iter().enumerate() {
        writeln!(
            out,
            "{:>4}  {:<6} {:<28} {}",
            page.row_number(index),
            user.id,
            truncate(&user.display_name(), 28),
            user.email.as_deref().unwrap_or("N/A"),
        )?;
    }
    footer(out, page, "users")
}

fn footer<T>(out: &mut impl Write, page: &Page<'_, T>, noun: &str) -> io::Result<()> {
    writeln!(
        out,
        "Page {}/{} ({} {noun}, {} per page)",
        page.page,
        page.total_pages.max(1),
        page.total_items,
        page.page_size
    )
}

pub fn task_detail(out: &mut impl Write, task: &Task, users: &[User]) -> io::Result<()> {
    writeln!(out, "Task #{}", task.id)?;
    writeln!(out, "  Title:       {}", task.title)?;
    writeln!(out, "  Description: {}", task.description)?;
    writeln!(out, "  Assigned to: {}", assigned_user_name(task, users))?;
    writeln!(
        out,
        "  Dates:       {} to {}",
        format_display(task.start_date.as_deref()),
        format_display(task.end_date.as_deref())
    )?;
    writeln!(out, "  Status:      {}", status_label(task.completed))?;
    if let Some(priority) = &task.priority {
        writeln!(out, "  Priority:    {priority}")?;
    }
    Ok(())
}

pub fn user_detail(out: &mut impl Write, user: &User) -> io::Result<()> {
    writeln!(out, "User #{}", user.id)?;
    writeln!(out, "  Name:   {}", user.display_name())?;
    writeln!(out, "  Email:  {}", user.email.as_deref().unwrap_or("N/A"))?;
    if let Some(avatar) = &user.avatar {
        writeln!(out, "  Avatar: {avatar}")?;
    }
    Ok(())
}
