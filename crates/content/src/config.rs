use std::time::Duration;

use crate::slug::trim_separators;

/// Construction-time settings for the content middleware.
///
/// Both the API base URL and the route root are normalized once here, so
/// later consumers can join paths with a single `/`.
#[derive(Debug, Clone)]
pub struct ContentConfig {
    api_url: String,
    route_root: String,
    timeout: Option<Duration>,
}

impl ContentConfig {
    /// Creates a configuration for the content API at `api_url`, serving routes mounted at `route_root`.
    pub fn new(api_url: impl AsRef<str>, route_root: impl AsRef<str>) -> Self {
        Self {
            api_url: trim_separators(api_url.as_ref()).to_owned(),
            route_root: trim_separators(route_root.as_ref()).to_owned(),
            timeout: None,
        }
    }

    /// Bounds every upstream request by `timeout`. Requests are unbounded by default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Base URL of the content API without a trailing separator.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Mount prefix of the content routes without surrounding separators.
    pub fn route_root(&self) -> &str {
        &self.route_root
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
