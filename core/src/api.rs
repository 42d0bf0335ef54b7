//! Async facade: one `TaskClient` build, one transport call, one parse.

use tracing::debug;

use crate::client::TaskClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{NewTask, Task, TaskId, TaskPatch};

/// The four task operations over a pluggable `Transport`.
///
/// Holds no state besides the client and transport; every call issues
/// exactly one request.
#[derive(Debug, Clone)]
pub struct TaskApi<T> {
    client: TaskClient,
    transport: T,
}

impl<T: Transport> TaskApi<T> {
    pub fn new(client: TaskClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TaskClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET {base}/tasks`
    pub async fn get_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let response = self.send(self.client.build_get_tasks()).await?;
        self.client.parse_get_tasks(response)
    }

    /// `POST {base}/tasks`
    pub async fn create_task(&self, input: &NewTask) -> Result<Task, ApiError> {
        let request = self.client.build_create_task(input)?;
        let response = self.send(request).await?;
        self.client.parse_create_task(response)
    }

    /// `PUT {base}/tasks/{id}`
    pub async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, ApiError> {
        let request = self.client.build_update_task(id, patch)?;
        let response = self.send(request).await?;
        self.client.parse_update_task(response)
    }

    /// `DELETE {base}/tasks/{id}`
    pub async fn delete_task(&self, id: TaskId) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_task(id)).await?;
        self.client.parse_delete_task(response)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request).await?;
        debug!(
            status = response.status,
            status_text = %response.status_text,
            "received response"
        );
        Ok(response)
    }
}
