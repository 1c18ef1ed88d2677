//! HTTP client for the task API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::ClientError;
use crate::config::ClientConfig;
use crate::http::{MessageBody, TaskPayload};
use crate::task::domain::{Task, TaskId};

/// Typed client for the task API.
///
/// Every request, including reading the response body, is bounded by the
/// configured timeout. A timeout aborts the request locally; the server may
/// still apply the write.
#[derive(Debug, Clone)]
pub struct TaskApiClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl TaskApiClient {
    /// Creates a client with [`ClientConfig::DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] when `base_url` is not an
    /// absolute `http`/`https` URL.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, ClientConfig::DEFAULT_TIMEOUT)
    }

    /// Creates a client with an explicit timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] for a malformed base URL and
    /// [`ClientError::Connectivity`] when the HTTP stack cannot be built.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed =
            Url::parse(trimmed).map_err(|_| ClientError::InvalidBaseUrl(base_url.to_owned()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl(base_url.to_owned()));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Connectivity)?;
        Ok(Self {
            http,
            base_url: trimmed.to_owned(),
            timeout,
        })
    }

    /// Creates a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// See [`TaskApiClient::with_timeout`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::with_timeout(&config.base_url, config.timeout)
    }

    /// Returns the base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks that the server answers its health probe.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when the probe fails.
    pub async fn health(&self) -> Result<(), ClientError> {
        let _: serde_json::Value = self.send(self.http.get(self.url("/api/health"))).await?;
        Ok(())
    }

    /// Fetches up to five incomplete tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when the request fails.
    pub async fn list_recent(&self) -> Result<Vec<Task>, ClientError> {
        self.send(self.http.get(self.url("/api/tasks"))).await
    }

    /// Creates a task and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Server`] with status 400 for an invalid title.
    pub async fn create(&self, payload: &TaskPayload) -> Result<Task, ClientError> {
        self.send(self.http.post(self.url("/api/tasks")).json(payload))
            .await
    }

    /// Replaces the title and description of an incomplete task.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Server`] with status 404 when the task is
    /// missing or already completed.
    pub async fn edit(&self, id: TaskId, payload: &TaskPayload) -> Result<Task, ClientError> {
        self.send(
            self.http
                .put(self.url(&format!("/api/tasks/{id}")))
                .json(payload),
        )
        .await
    }

    /// Marks a task completed and returns the server confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Server`] with status 404 when the task is
    /// missing.
    pub async fn complete(&self, id: TaskId) -> Result<String, ClientError> {
        let body: MessageBody = self
            .send(self.http.put(self.url(&format!("/api/tasks/{id}/complete"))))
            .await?;
        Ok(body.message)
    }

    /// Deletes a task and returns the server confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Server`] with status 404 when the task is
    /// missing.
    pub async fn delete(&self, id: TaskId) -> Result<String, ClientError> {
        let body: MessageBody = self
            .send(self.http.delete(self.url(&format!("/api/tasks/{id}"))))
            .await?;
        Ok(body.message)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;
        let status = response.status();
        debug!(%status, url = %response.url(), "task API responded");
        if !status.is_success() {
            let fallback = status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_owned();
            let message = response
                .json::<MessageBody>()
                .await
                .map_or(fallback, |body| body.message);
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|err| self.transport_error(err))
    }

    fn transport_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.timeout)
        } else if err.is_decode() {
            ClientError::Decode(err)
        } else {
            ClientError::Connectivity(err)
        }
    }
}
