use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::model::{User, UserPayload};

const ENDPOINT: &str = "/users";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserQuery {
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

impl UserQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            params.push(("limit", limit.to_string()));
        }
        if let Some(page) = self.page.filter(|p| *p > 0) {
            params.push(("page", page.to_string()));
        }
        params
    }
}

/// Typed access to `/users`.
#[derive(Debug, Clone)]
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self, query: &UserQuery) -> Result<Vec<User>, ApiError> {
        self.client.get_all(ENDPOINT, &query.to_params()).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<User, ApiError> {
        self.client.get_by_id(ENDPOINT, id).await
    }

    pub async fn search(&self, term: &str) -> Result<Vec<User>, ApiError> {
        self.client
            .get_all(ENDPOINT, &[("search", term.to_string())])
            .await
    }

    pub async fn create(&self, payload: &UserPayload) -> Result<User, ApiError> {
        if payload.first_name.trim().is_empty() || payload.last_name.trim().is_empty() {
            return Err(ApiError::InvalidArgument(
                "First name and last name are required".to_string(),
            ));
        }
        self.client.create(ENDPOINT, payload).await
    }

    pub async fn update(&self, id: &str, payload: &UserPayload) -> Result<User, ApiError> {
        self.client.update(ENDPOINT, id, payload).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(ENDPOINT, id).await
    }
}
