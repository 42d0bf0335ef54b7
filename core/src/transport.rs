//! The I/O seam between `TaskClient` and the network.
//!
//! A `Transport` executes exactly one `HttpRequest` and hands back the
//! `HttpResponse` as data, whatever its status. Status interpretation stays
//! with the client's `parse_*` methods. Tests swap in their own transport.

use std::future::Future;

use hyper::ext::ReasonPhrase;
use reqwest::Method;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP round-trip.
pub trait Transport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;
}

/// Default transport backed by `reqwest`.
///
/// Request paths that are not absolute URLs (the default `/api` base yields
/// `/api/tasks`) are joined onto `origin`. Without an origin such a path
/// fails with `ApiError::Transport`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    origin: Option<String>,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, ApiError> {
        Self::build(None)
    }

    pub fn with_origin(origin: &str) -> Result<Self, ApiError> {
        Self::build(Some(origin.trim_end_matches('/').to_string()))
    }

    fn build(origin: Option<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("task-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { client, origin })
    }

    fn url_for(&self, path: &str) -> Result<String, ApiError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(path.to_string());
        }
        match &self.origin {
            Some(origin) if path.starts_with('/') => Ok(format!("{origin}{path}")),
            Some(origin) => Ok(format!("{origin}/{path}")),
            None => Err(ApiError::Transport(format!(
                "relative URL '{path}' requires an origin"
            ))),
        }
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = self.url_for(&request.path)?;
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let status_text = status_text(&response);
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            status_text,
            body,
        })
    }
}

/// Reason phrase as received on the wire. hyper only records it when it
/// differs from the canonical phrase, so that is the fallback.
fn status_text(response: &reqwest::Response) -> String {
    match response.extensions().get::<ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}
