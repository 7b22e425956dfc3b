//! Client-side search and pagination over already fetched lists.

use crate::model::{Task, User};
use crate::store::TaskFilters;

/// Case-insensitive substring match over title and description.
pub fn task_matches(task: &Task, term: &str) -> bool {
    let term = term.to_lowercase();
    task.title.to_lowercase().contains(&term) || task.description.to_lowercase().contains(&term)
}

/// Case-insensitive substring match over first name, last name, email and id.
pub fn user_matches(user: &User, term: &str) -> bool {
    let term = term.to_lowercase();
    [
        Some(user.first_name.as_str()),
        Some(user.last_name.as_str()),
        user.email.as_deref(),
        Some(user.id.as_str()),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&term))
}

pub fn filter_tasks<'a>(tasks: &'a [Task], filters: &TaskFilters) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| filters.status.matches(task.completed))
        .filter(|task| task_matches(task, &filters.search))
        .collect()
}

pub fn filter_users<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    if term.is_empty() {
        return users.iter().collect();
    }
    users.iter().filter(|user| user_matches(user, term)).collect()
}

/// One window of a list.
#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based page actually shown.
    pub page: usize,
    pub page_size: usize,
    /// Index of `items[0]` in the full list.
    pub offset: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    /// 1-based row number of `items[index]` across all pages.
    pub fn row_number(&self, index: usize) -> usize {
        self.offset + index + 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// `ceil(len / page_size)`; zero for an empty list or zero page size.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Slices `[(page-1)*size, page*size)` clamped to the list. Page 0 is read as 1.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page = page.max(1);
    let total_items = items.len();
    let start = (page - 1).saturating_mul(page_size).min(total_items);
    let end = start.saturating_add(page_size).min(total_items);
    Page {
        items: &items[start..end],
        page,
        page_size,
        offset: start,
        total_items,
        total_pages: total_pages(total_items, page_size),
    }
}
