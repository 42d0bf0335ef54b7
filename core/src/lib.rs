//! API client core for the task service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A `Transport` performs the
//! round-trip; `TaskApi` wires the two into async `get_tasks`,
//! `create_task`, `update_task` and `delete_task`.
//!
//! # Design
//! - `TaskClient` is stateless; it holds only where its base URL comes from.
//!   `TaskClient::from_env` re-reads `TASK_API_URL` on every call, default
//!   `/api`.
//! - Every non-2xx response becomes `ApiError::Http`, displayed as
//!   `API error: {status} {status_text}`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::TaskApi;
pub use client::TaskClient;
pub use config::{BaseUrl, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
pub use types::{NewTask, Task, TaskId, TaskPatch, TaskStatus};
