use crate::api::{UserQuery, UsersApi};
use crate::model::{User, UserPayload};
use crate::store::intent::ResourceIntent;
use crate::store::reducer::ResourceReducer;
use crate::store::state::{Filters, Record, ResourceState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserFilters {
    pub search: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserFilterPatch {
    pub search: Option<String>,
}

impl Filters for UserFilters {
    type Patch = UserFilterPatch;

    fn merge(&mut self, patch: UserFilterPatch) {
        if let Some(search) = patch.search {
            self.search = search;
        }
    }
}

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }
}

pub type UserState = ResourceState<User, UserFilters>;
pub type UserIntent = ResourceIntent<User, UserFilterPatch>;
pub type UserReducer = ResourceReducer<User, UserFilters>;

pub async fn fetch_users(api: &UsersApi, query: &UserQuery) -> UserIntent {
    match api.get_all(query).await {
        Ok(users) => UserIntent::ListLoaded(
            users.into_iter().map(User::with_derived_profile).collect(),
        ),
        Err(err) => UserIntent::rejected(err),
    }
}

pub async fn fetch_user(api: &UsersApi, id: &str) -> UserIntent {
    match api.get_by_id(id).await {
        Ok(user) => UserIntent::DetailLoaded(user.with_derived_profile()),
        Err(err) => UserIntent::rejected(err),
    }
}

pub async fn search_users(api: &UsersApi, term: &str) -> UserIntent {
    match api.search(term).await {
        Ok(users) => UserIntent::ListLoaded(
            users.into_iter().map(User::with_derived_profile).collect(),
        ),
        Err(err) => UserIntent::rejected(err),
    }
}

pub async fn create_user(api: &UsersApi, payload: &UserPayload) -> UserIntent {
    match api.create(payload).await {
        Ok(user) => UserIntent::Created(user.with_derived_profile()),
        Err(err) => UserIntent::rejected(err),
    }
}

pub async fn update_user(api: &UsersApi, id: &str, payload: &UserPayload) -> UserIntent {
    match api.update(id, payload).await {
        Ok(user) => UserIntent::Updated(user.with_derived_profile()),
        Err(err) => UserIntent::rejected(err),
    }
}

pub async fn delete_user(api: &UsersApi, id: &str) -> UserIntent {
    match api.delete(id).await {
        Ok(()) => UserIntent::Deleted(id.to_string()),
        Err(err) => UserIntent::rejected(err),
    }
}
