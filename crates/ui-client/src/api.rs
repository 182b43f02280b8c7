//! HTTP client for the task API

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use tm_core::task::{Task, TaskPatch};

use crate::{ApiError, Result};

/// Transport interface for the task API
///
/// The view-model talks to this trait so tests can swap in an in-memory
/// transport with failure injection.
#[async_trait]
pub trait TasksApi: Send + Sync {
    /// GET /api/tasks
    async fn list(&self) -> Result<Vec<Task>>;

    /// POST /api/tasks
    async fn create(&self, title: &str) -> Result<Task>;

    /// PUT /api/tasks/:id
    async fn update(&self, id: i64, patch: TaskPatch) -> Result<Task>;

    /// DELETE /api/tasks/:id
    async fn delete(&self, id: i64) -> Result<()>;
}

#[derive(Serialize)]
struct CreateBody<'a> {
    title: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// `TasksApi` over HTTP against a running API server
pub struct HttpTasksApi {
    client: Client,
    base_url: String,
}

impl HttpTasksApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Pass successful responses through, turn everything else into a
    /// typed status error carrying the server's `{error}` message.
    async fn check(res: reqwest::Response) -> Result<reqwest::Response> {
        if res.status().is_success() {
            return Ok(res);
        }
        let code = res.status().as_u16();
        let message = res
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
            .map(|body| body.error)
            .unwrap_or_else(|| "request failed".to_string());
        Err(ApiError::Status { code, message })
    }
}

#[async_trait]
impl TasksApi for HttpTasksApi {
    async fn list(&self) -> Result<Vec<Task>> {
        let res = self.client.get(self.url("/api/tasks")).send().await?;
        Ok(Self::check(res).await?.json().await?)
    }

    async fn create(&self, title: &str) -> Result<Task> {
        let res = self
            .client
            .post(self.url("/api/tasks"))
            .json(&CreateBody { title })
            .send()
            .await?;
        Ok(Self::check(res).await?.json().await?)
    }

    async fn update(&self, id: i64, patch: TaskPatch) -> Result<Task> {
        let res = self
            .client
            .put(self.url(&format!("/api/tasks/{}", id)))
            .json(&patch)
            .send()
            .await?;
        Ok(Self::check(res).await?.json().await?)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let res = self
            .client
            .delete(self.url(&format!("/api/tasks/{}", id)))
            .send()
            .await?;
        Self::check(res).await?;
        Ok(())
    }
}
