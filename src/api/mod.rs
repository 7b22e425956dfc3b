//! HTTP access to the mock REST API.
//!
//! [`ApiClient`] owns transport concerns (timeout, retry, error
//! normalization); [`TasksApi`] and [`UsersApi`] add per-resource paths and
//! argument checks on top.

mod client;
mod error;
mod retry;
mod tasks;
mod users;

pub use client::{ApiClient, ClientSettings};
pub use error::{status_message, ApiError, NETWORK_ERROR_MESSAGE};
pub use retry::RetryPolicy;
pub use tasks::{TaskQuery, TasksApi};
pub use users::{UserQuery, UsersApi};

/// Both resource handles over one shared client.
#[derive(Debug, Clone)]
pub struct Api {
    pub client: ApiClient,
    pub tasks: TasksApi,
    pub users: UsersApi,
}

impl Api {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let client = ApiClient::new(settings)?;
        Ok(Self {
            tasks: TasksApi::new(client.clone()),
            users: UsersApi::new(client.clone()),
            client,
        })
    }

    /// Connectivity probe used by the header indicator and `deskboard health`.
    pub async fn check_connection(&self) -> bool {
        self.client.health_check().await
    }
}
