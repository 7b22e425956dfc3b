use std::fmt::Debug;

use crate::mvi::UiState;

/// Page sizes offered by list screens.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A server record addressable by id.
pub trait Record: Clone + PartialEq + Debug + Send + 'static {
    fn id(&self) -> &str;
}

/// Client-side filter criteria with partial updates.
pub trait Filters: Clone + PartialEq + Default + Debug + Send + 'static {
    type Patch: Debug + Clone + Send + 'static;

    fn merge(&mut self, patch: Self::Patch);
}

/// Cached view of one resource: last fetched list, one detail record,
/// request flags and local filter/pagination settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T, F> {
    pub items: Vec<T>,
    pub current: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub filters: F,
    pub total: usize,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl<T, F: Default> Default for ResourceState<T, F> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: None,
            loading: false,
            error: None,
            filters: F::default(),
            total: 0,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl<T: Record, F: Filters> UiState for ResourceState<T, F> {}

impl<T: Record, F: Filters> ResourceState<T, F> {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }
}
