//! Stateless HTTP request builder and response parser for the task API.
//!
//! # Design
//! `TaskClient` holds only a base URL source and carries no mutable state
//! between calls. Each CRUD operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. `TaskApi` glues the two together around a `Transport`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::BaseUrl;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewTask, Task, TaskId, TaskPatch};

const JSON_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

/// Synchronous, stateless client for the task API.
#[derive(Debug, Clone)]
pub struct TaskClient {
    base_url: BaseUrl,
}

impl TaskClient {
    /// Client with a fixed base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: BaseUrl::fixed(base_url),
        }
    }

    /// Client that resolves `TASK_API_URL` on every request.
    pub fn from_env() -> Self {
        Self {
            base_url: BaseUrl::Env,
        }
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    pub fn build_get_tasks(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.tasks_path(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_task(&self, input: &NewTask) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.tasks_path(),
            headers: json_headers(),
            body: Some(to_json(input)?),
        })
    }

    pub fn build_update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.task_path(id),
            headers: json_headers(),
            body: Some(to_json(patch)?),
        })
    }

    pub fn build_delete_task(&self, id: TaskId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.task_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_get_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_update_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    /// Any 2xx counts as success; the body is ignored.
    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn tasks_path(&self) -> String {
        format!("{}/tasks", self.base_url.resolve())
    }

    fn task_path(&self, id: TaskId) -> String {
        format!("{}/tasks/{id}", self.base_url.resolve())
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![(JSON_CONTENT_TYPE.0.to_string(), JSON_CONTENT_TYPE.1.to_string())]
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map any non-2xx response to `ApiError::Http`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_ok() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        status_text: response.status_text.clone(),
    })
}
