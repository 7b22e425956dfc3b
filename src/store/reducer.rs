use std::marker::PhantomData;

use crate::mvi::Reducer;
use crate::store::intent::ResourceIntent;
use crate::store::state::{Filters, Record, ResourceState};

/// Reducer shared by every resource store.
pub struct ResourceReducer<T, F>(PhantomData<fn() -> (T, F)>);

impl<T: Record, F: Filters> Reducer for ResourceReducer<T, F> {
    type State = ResourceState<T, F>;
    type Intent = ResourceIntent<T, F::Patch>;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ResourceIntent::Pending => {
                state.loading = true;
                state.error = None;
            }
            ResourceIntent::ListLoaded(items) => {
                state.loading = false;
                state.total = items.len();
                state.items = items;
            }
            ResourceIntent::DetailLoaded(item) => {
                state.loading = false;
                state.current = Some(item);
            }
            ResourceIntent::Created(item) => {
                state.loading = false;
                state.items.insert(0, item);
                state.total += 1;
            }
            ResourceIntent::Updated(item) => {
                state.loading = false;
                if state.current.as_ref().is_some_and(|c| c.id() == item.id()) {
                    state.current = Some(item.clone());
                }
                replace_by_id(&mut state.items, item);
            }
            ResourceIntent::Toggled(item) => {
                replace_by_id(&mut state.items, item);
            }
            ResourceIntent::Deleted(id) => {
                state.loading = false;
                state.items.retain(|item| item.id() != id);
                state.total = state.total.saturating_sub(1);
                if state.current.as_ref().is_some_and(|c| c.id() == id) {
                    state.current = None;
                }
            }
            ResourceIntent::Rejected(message) => {
                state.loading = false;
                state.error = Some(message);
            }
            ResourceIntent::ClearError => state.error = None,
            ResourceIntent::SetFilters(patch) => {
                state.filters.merge(patch);
                state.page = 1;
            }
            ResourceIntent::ClearFilters => {
                state.filters = F::default();
                state.page = 1;
            }
            ResourceIntent::SetPage(page) => state.page = page.max(1),
            ResourceIntent::SetPageSize(size) => {
                state.page_size = size.max(1);
                state.page = 1;
            }
            ResourceIntent::ClearCurrent => state.current = None,
        }
        state
    }
}

fn replace_by_id<T: Record>(items: &mut [T], item: T) {
    if let Some(slot) = items.iter_mut().find(|existing| existing.id() == item.id()) {
        *slot = item;
    }
}
