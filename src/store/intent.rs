use tracing::debug;

use crate::api::ApiError;
use crate::mvi::Intent;
use crate::store::state::Record;

/// Everything that can happen to a resource store.
///
/// `Pending`, the fulfilled variants and `Rejected` mirror the lifecycle of
/// one API call; the rest are local edits.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceIntent<T, P> {
    Pending,
    ListLoaded(Vec<T>),
    DetailLoaded(T),
    Created(T),
    Updated(T),
    /// Completion flip; does not touch the loading flag.
    Toggled(T),
    Deleted(String),
    Rejected(String),
    ClearError,
    SetFilters(P),
    ClearFilters,
    SetPage(usize),
    SetPageSize(usize),
    ClearCurrent,
}

impl<T: Record, P: Send + 'static> Intent for ResourceIntent<T, P> {}

impl<T, P> ResourceIntent<T, P> {
    /// Converts a failed call into the rejection carrying its user message.
    pub fn rejected(err: ApiError) -> Self {
        debug!(error = %err, status = ?err.status(), "api call rejected");
        ResourceIntent::Rejected(err.user_message())
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ResourceIntent::Rejected(_))
    }
}
