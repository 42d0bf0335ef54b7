//! Base URL resolution.
//!
//! A client built from the environment reads `TASK_API_URL` on every request
//! rather than once at construction, so a changed variable takes effect on
//! the next call.

use std::borrow::Cow;
use std::env;

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "TASK_API_URL";

/// Base URL used when `TASK_API_URL` is unset or empty.
pub const DEFAULT_BASE_URL: &str = "/api";

/// Where a `TaskClient` gets its base URL from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseUrl {
    /// Resolved from `TASK_API_URL` at call time.
    Env,
    /// Fixed at construction, trailing slash already stripped.
    Fixed(String),
}

impl BaseUrl {
    pub fn fixed(url: &str) -> Self {
        BaseUrl::Fixed(normalize(url).to_string())
    }

    pub fn resolve(&self) -> Cow<'_, str> {
        match self {
            BaseUrl::Env => Cow::Owned(base_url_from_env()),
            BaseUrl::Fixed(url) => Cow::Borrowed(url),
        }
    }
}

/// Read `TASK_API_URL`, falling back to `/api`.
pub fn base_url_from_env() -> String {
    env::var(BASE_URL_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(|v| normalize(v.trim()).to_string())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

fn normalize(url: &str) -> &str {
    url.trim_end_matches('/')
}
