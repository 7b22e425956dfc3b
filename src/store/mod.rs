//! Resource state containers.
//!
//! One [`ResourceState`] per resource, driven by [`ResourceIntent`]s through
//! the shared [`ResourceReducer`]. The async functions in [`tasks`] and
//! [`users`] perform one API call each and return the intent describing its
//! outcome; the caller dispatches `Pending` first and the result after.

mod intent;
mod reducer;
mod state;
pub mod tasks;
pub mod users;

pub use intent::ResourceIntent;
pub use reducer::ResourceReducer;
pub use state::{Filters, Record, ResourceState, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
pub use tasks::{StatusFilter, TaskFilterPatch, TaskFilters, TaskIntent, TaskReducer, TaskState};
pub use users::{UserFilterPatch, UserFilters, UserIntent, UserReducer, UserState};

/// Next entry of [`PAGE_SIZE_OPTIONS`] in `direction`, clamped at the ends.
pub fn step_page_size(current: usize, direction: i32) -> usize {
    let index = PAGE_SIZE_OPTIONS
        .iter()
        .position(|size| *size == current)
        .unwrap_or(0);
    let next = if direction.is_negative() {
        index.saturating_sub(1)
    } else {
        (index + 1).min(PAGE_SIZE_OPTIONS.len() - 1)
    };
    PAGE_SIZE_OPTIONS[next]
}
