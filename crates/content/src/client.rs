use async_trait::async_trait;
use reqwest::{
    header::CONTENT_TYPE,
    redirect::Policy,
    Client, ClientBuilder, StatusCode, Url,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{config::ContentConfig, error::FetchError, loader::ContentSource};

const JSON_MEDIA_TYPE: &str = "application/json";

/// Transport selected from the scheme of the content API URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Plain `http`.
    Plain,
    /// TLS-protected `https`.
    Secure,
}

impl Scheme {
    pub fn from_url(url: &Url) -> Result<Self, FetchError> {
        match url.scheme() {
            "http" => Ok(Scheme::Plain),
            "https" => Ok(Scheme::Secure),
            other => Err(FetchError::UnsupportedScheme(other.to_owned())),
        }
    }

    fn client_builder(self) -> ClientBuilder {
        let builder = Client::builder().redirect(Policy::none());
        match self {
            Scheme::Plain => builder,
            Scheme::Secure => builder.https_only(true),
        }
    }
}

/// HTTP client for the remote content API.
#[derive(Debug, Clone)]
pub struct ContentClient {
    base_url: String,
    scheme: Scheme,
    http: Client,
}

impl ContentClient {
    /// Validates the configured API URL and builds a client for its scheme.
    pub fn try_new(config: &ContentConfig) -> Result<Self, FetchError> {
        let base_url = config.api_url();
        let parsed = Url::parse(base_url).map_err(|err| FetchError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: err.to_string(),
        })?;
        let scheme = Scheme::from_url(&parsed)?;

        let mut builder = scheme.client_builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.to_owned(),
            scheme,
            http: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Absolute URL for `resource`, which may carry a `?query`. An empty resource addresses the API index.
    pub fn resource_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    /// Fetches `resource` and parses the body as JSON.
    ///
    /// 200 and 404 responses are both treated as content; any other status is
    /// a [`FetchError::RequestFailed`]. The body must be typed `application/json`
    /// regardless of status.
    pub async fn fetch(&self, resource: &str) -> Result<Value, FetchError> {
        let url = self.resource_url(resource);
        debug!(url = %url, "fetching content");

        let response = self.http.get(&url).send().await.map_err(|err| {
            warn!(url = %url, error = %err, "content request could not be sent");
            FetchError::Transport(err)
        })?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::NOT_FOUND {
            warn!(url = %url, status = status.as_u16(), "content API returned unexpected status");
            return Err(FetchError::RequestFailed {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
        if !content_type.as_deref().is_some_and(is_json_media_type) {
            let found = content_type.unwrap_or_else(|| "<none>".to_owned());
            warn!(url = %url, content_type = %found, "content API returned non-JSON body");
            return Err(FetchError::InvalidContentType { found });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|err| {
            warn!(url = %url, error = %err, "content API body is not valid JSON");
            FetchError::ResponseParsing(err.to_string())
        })
    }
}

#[async_trait]
impl ContentSource for ContentClient {
    async fn fetch(&self, resource: &str) -> Result<Value, FetchError> {
        ContentClient::fetch(self, resource).await
    }
}

fn is_json_media_type(value: &str) -> bool {
    value
        .get(..JSON_MEDIA_TYPE.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(JSON_MEDIA_TYPE))
}
