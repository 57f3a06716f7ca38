//! Data access for todos.
//!
//! The todo list reaches the remote API only through [`TodosClient`], so
//! reducers can be tested against an in-memory implementation.

use crate::types::Task;
use futures::future::BoxFuture;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Default todos endpoint
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com/todos";

/// Errors that can occur when fetching todos
#[derive(Debug, Error)]
pub enum TodosClientError {
    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    /// HTTP request failed (connection, timeout)
    #[error("Request failed: {0}")]
    Request(String),

    /// API answered with a non-success status
    #[error("API error (status {status}): {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Response body is not a list of todos
    #[error("Response parsing failed: {0}")]
    Decode(String),
}

/// Source of the full todo collection
pub trait TodosClient: Send + Sync {
    /// Fetch all todos, in the order the source returns them
    fn fetch_todos(&self) -> BoxFuture<'static, Result<Vec<Task>, TodosClientError>>;
}

/// [`TodosClient`] backed by a JSON-over-HTTP API
#[derive(Clone, Debug)]
pub struct HttpTodosClient {
    client: Client,
    api_url: String,
}

impl HttpTodosClient {
    /// Create a client for `api_url` with a per-request timeout
    ///
    /// # Errors
    ///
    /// Returns [`TodosClientError::Client`] if the underlying HTTP client
    /// cannot be initialized (e.g. TLS backend failure).
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, TodosClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TodosClientError::Client(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    /// The endpoint this client fetches from
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn get_todos(client: Client, api_url: String) -> Result<Vec<Task>, TodosClientError> {
        tracing::debug!(url = %api_url, "Fetching todos");

        let response = client
            .get(&api_url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| TodosClientError::Request(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let body = response
                    .text()
                    .await
                    .map_err(|e| TodosClientError::Request(e.to_string()))?;
                serde_json::from_str::<Vec<Task>>(&body)
                    .map_err(|e| TodosClientError::Decode(e.to_string()))
            },
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(TodosClientError::Status {
                    status: status.as_u16(),
                    body,
                })
            },
        }
    }
}

impl TodosClient for HttpTodosClient {
    fn fetch_todos(&self) -> BoxFuture<'static, Result<Vec<Task>, TodosClientError>> {
        Box::pin(Self::get_todos(self.client.clone(), self.api_url.clone()))
    }
}

/// [`TodosClient`] serving a fixed answer from memory
///
/// Used in tests and for running the app without network access.
#[derive(Clone, Debug)]
pub struct InMemoryTodosClient {
    result: Result<Vec<Task>, String>,
    latency: Duration,
}

impl InMemoryTodosClient {
    /// Client that always returns `tasks`
    #[must_use]
    pub const fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            result: Ok(tasks),
            latency: Duration::ZERO,
        }
    }

    /// Client whose fetch always fails with a request error
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            result: Err(message.into()),
            latency: Duration::ZERO,
        }
    }

    /// Delay every answer by `latency`
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl TodosClient for InMemoryTodosClient {
    fn fetch_todos(&self) -> BoxFuture<'static, Result<Vec<Task>, TodosClientError>> {
        let result = self.result.clone().map_err(TodosClientError::Request);
        let latency = self.latency;
        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            result
        })
    }
}
