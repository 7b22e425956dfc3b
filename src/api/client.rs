use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

use crate::api::error::ApiError;
use crate::api::retry::RetryPolicy;
use crate::config::ApiConfig;

/// Endpoint probed by [`ApiClient::health_check`].
const HEALTH_ENDPOINT: &str = "/users";

/// Connection settings resolved from [`ApiConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub base_url: String,
    /// Per-attempt timeout.
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl From<&ApiConfig> for ClientSettings {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_seconds),
            retry: RetryPolicy::from(config),
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

/// JSON-over-HTTP client with per-attempt timeout and retry on transport
/// failures. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    settings: ClientSettings,
}

impl ApiClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let client = Client::builder().build().map_err(ApiError::Client)?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// `GET {endpoint}?{params}`; parameters are omitted when empty.
    pub async fn get_all<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        let value = self.execute(Method::GET, endpoint, params, None).await?;
        decode(endpoint, value)
    }

    pub async fn get_by_id<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        id: &str,
    ) -> Result<T, ApiError> {
        require_id(id, "ID is required")?;
        let path = format!("{}/{}", endpoint, id);
        let value = self.execute(Method::GET, &path, &[], None).await?;
        decode(&path, value)
    }

    pub async fn create<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        data: &B,
    ) -> Result<T, ApiError> {
        let body = require_body(data, "Data is required for creation")?;
        let value = self.execute(Method::POST, endpoint, &[], Some(body)).await?;
        decode(endpoint, value)
    }

    pub async fn update<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        id: &str,
        data: &B,
    ) -> Result<T, ApiError> {
        require_id(id, "ID is required for update")?;
        let body = require_body(data, "Data is required for update")?;
        let path = format!("{}/{}", endpoint, id);
        let value = self.execute(Method::PUT, &path, &[], Some(body)).await?;
        decode(&path, value)
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        id: &str,
        data: &B,
    ) -> Result<T, ApiError> {
        require_id(id, "ID is required for patch")?;
        let body = require_body(data, "Data is required for patch")?;
        let path = format!("{}/{}", endpoint, id);
        let value = self.execute(Method::PATCH, &path, &[], Some(body)).await?;
        decode(&path, value)
    }

    pub async fn delete(&self, endpoint: &str, id: &str) -> Result<(), ApiError> {
        require_id(id, "ID is required for deletion")?;
        let path = format!("{}/{}", endpoint, id);
        self.execute(Method::DELETE, &path, &[], None).await?;
        Ok(())
    }

    /// True when a minimal list request succeeds.
    pub async fn health_check(&self) -> bool {
        let params = [("limit", "1".to_string())];
        match self
            .execute(Method::GET, HEALTH_ENDPOINT, &params, None)
            .await
        {
            Ok(_) => true,
            Err(err) => {
                debug!(error = %err, "health check failed");
                false
            }
        }
    }

    /// Runs one request with retries. `Ok(None)` means a DELETE without body.
    async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<Option<Value>, ApiError> {
        let url = self.url_for(endpoint, params)?;
        let label = display_endpoint(&url);
        let policy = self.settings.retry;
        let mut attempt: u32 = 0;

        loop {
            debug!(%method, endpoint = %label, attempt, "sending request");
            match self.attempt(&method, &url, &label, body.as_ref()).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < policy.max_retries => {
                    let delay = policy.delay_for(attempt);
                    warn!(
                        %method,
                        endpoint = %label,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "request failed, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    warn!(%method, endpoint = %label, attempt, error = %err, "request failed");
                    return Err(err);
                }
            }
        }
    }

    async fn attempt(
        &self,
        method: &Method,
        url: &Url,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>, ApiError> {
        let mut builder = self
            .client
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            builder = builder.json(body);
        }

        match timeout(self.settings.timeout, read_response(builder, method, endpoint)).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout {
                endpoint: endpoint.to_string(),
                timeout: self.settings.timeout,
            }),
        }
    }

    fn url_for(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.settings.base_url, endpoint);
        let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

async fn read_response(
    builder: RequestBuilder,
    method: &Method,
    endpoint: &str,
) -> Result<Option<Value>, ApiError> {
    let response = builder.send().await.map_err(|source| ApiError::Network {
        endpoint: endpoint.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ApiError::Http {
            status: status.as_u16(),
            reason,
            body,
            endpoint: endpoint.to_string(),
        });
    }

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));

    if !is_json {
        if *method == Method::DELETE {
            return Ok(None);
        }
        return Err(ApiError::InvalidJson {
            endpoint: endpoint.to_string(),
            reason: "response is not JSON".to_string(),
        });
    }

    let bytes = response.bytes().await.map_err(|source| ApiError::Network {
        endpoint: endpoint.to_string(),
        source,
    })?;
    if bytes.is_empty() && *method == Method::DELETE {
        return Ok(None);
    }

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| ApiError::InvalidJson {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
}

fn decode<T: DeserializeOwned>(endpoint: &str, value: Option<Value>) -> Result<T, ApiError> {
    let value = value.ok_or_else(|| ApiError::InvalidJson {
        endpoint: endpoint.to_string(),
        reason: "empty response body".to_string(),
    })?;
    serde_json::from_value(value).map_err(|e| ApiError::InvalidJson {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })
}

fn require_id(id: &str, message: &str) -> Result<(), ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::InvalidArgument(message.to_string()));
    }
    Ok(())
}

fn require_body<B: Serialize>(data: &B, message: &str) -> Result<Value, ApiError> {
    match serde_json::to_value(data) {
        Ok(Value::Null) | Err(_) => Err(ApiError::InvalidArgument(message.to_string())),
        Ok(value) => Ok(value),
    }
}

fn display_endpoint(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(ClientSettings {
            base_url: base_url.to_string(),
            ..ClientSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn settings_follow_config() {
        let config = ApiConfig {
            base_url: "http://localhost:9000/api/".to_string(),
            timeout_seconds: 3,
            max_retries: 1,
            retry_backoff_base_ms: 20,
        };
        let settings = ClientSettings::from(&config);
        assert_eq!(settings.base_url, "http://localhost:9000/api");
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert_eq!(settings.retry.max_attempts(), 2);
    }

    #[test]
    fn url_encodes_query_params() {
        let client = client("http://localhost:9000/api/v1");
        let url = client
            .url_for("/tasks", &[("search", "a b&c".to_string())])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/api/v1/tasks?search=a+b%26c");
        assert_eq!(display_endpoint(&url), "/api/v1/tasks?search=a+b%26c");
    }

    #[test]
    fn url_without_params_has_no_query() {
        let client = client("http://localhost:9000");
        let url = client.url_for("/users", &[]).unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn body_must_not_be_null() {
        let err = require_body(&Option::<u8>::None, "Data is required for creation").unwrap_err();
        assert_eq!(err.to_string(), "Data is required for creation");
    }

    #[tokio::test]
    async fn empty_id_is_rejected_before_sending() {
        let client = client("http://127.0.0.1:1");
        let err = client.delete("/tasks", "  ").await.unwrap_err();
        assert_eq!(err.to_string(), "ID is required for deletion");
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }
}
