use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::{
    client::ContentClient,
    config::ContentConfig,
    error::FetchError,
    model::{ContentData, ContentEnvelope},
    slug::{resolve_slug, trim_separators},
};

/// Resource holding the navigation menu.
pub const MENU_RESOURCE: &str = "menu";

/// Source of raw JSON content addressed by resource path.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetches and parses the JSON document stored under `resource`.
    async fn fetch(&self, resource: &str) -> Result<Value, FetchError>;
}

/// Resolves the content for a request path: the menu first, then the page.
#[derive(Debug)]
pub struct ContentLoader<S = ContentClient> {
    source: S,
    route_root: String,
}

impl ContentLoader<ContentClient> {
    /// Builds a loader backed by the HTTP content API described by `config`.
    pub fn try_new(config: ContentConfig) -> Result<Self, FetchError> {
        let client = ContentClient::try_new(&config)?;
        Ok(Self::with_source(client, config.route_root()))
    }
}

impl<S> ContentLoader<S>
where
    S: ContentSource,
{
    pub fn with_source(source: S, route_root: &str) -> Self {
        Self {
            source,
            route_root: trim_separators(route_root).to_owned(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn route_root(&self) -> &str {
        &self.route_root
    }

    pub fn slug_for(&self, original_path: &str) -> String {
        resolve_slug(&self.route_root, original_path)
    }

    /// Loads the menu and the page for `original_path`.
    ///
    /// The request `query` is forwarded on the page request only. The page is
    /// only requested once the menu was fetched successfully, and nothing is
    /// returned unless both succeed.
    pub async fn load(
        &self,
        original_path: &str,
        query: Option<&str>,
    ) -> Result<ContentData, FetchError> {
        let slug = self.slug_for(original_path);
        let page_resource = with_query(slug, query);
        debug!(path = %original_path, resource = %page_resource, "resolved content slug");

        let menu = self.fetch_envelope(MENU_RESOURCE).await?;
        let page = self.fetch_envelope(&page_resource).await?;

        Ok(ContentData {
            page: page.result,
            menu: menu.result,
        })
    }

    async fn fetch_envelope(&self, resource: &str) -> Result<ContentEnvelope, FetchError> {
        let value = self.source.fetch(resource).await?;
        ContentEnvelope::from_value(value)
    }
}

fn with_query(slug: String, query: Option<&str>) -> String {
    match query.filter(|query| !query.is_empty()) {
        Some(query) => format!("{slug}?{query}"),
        None => slug,
    }
}
