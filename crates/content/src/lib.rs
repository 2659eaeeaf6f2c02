//! Content resolution for requests served under a mounted route root.
//!
//! A request path is mapped onto a slug ([`slug`]), and the navigation menu
//! plus the slug's page are fetched as JSON from a remote content API
//! ([`client`]). [`ContentLoader`] ties the two together.

pub mod client;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod slug;

pub use client::{ContentClient, Scheme};
pub use config::ContentConfig;
pub use error::FetchError;
pub use loader::{ContentLoader, ContentSource, MENU_RESOURCE};
pub use model::{ContentData, ContentEnvelope};
