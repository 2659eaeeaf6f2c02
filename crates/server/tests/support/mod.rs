#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Instant,
};

use axum::{
    body::Body,
    extract::State,
    http::{header, Response, StatusCode, Uri},
    Router,
};
use content::{ContentConfig, ContentLoader};
use server::{app::AppState, telemetry};
use tokio::net::TcpListener;

/// Canned answer served by [`Upstream`] for one path.
#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub content_type: Option<&'static str>,
    pub body: &'static str,
}

impl Reply {
    pub fn json(body: &'static str) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: Some("application/json; charset=utf-8"),
            body,
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body: "{}",
        }
    }

    pub fn html(body: &'static str) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: Some("text/html"),
            body,
        }
    }
}

/// Local stand-in for the remote content API that records requested paths and queries.
#[derive(Clone)]
pub struct Upstream {
    replies: Arc<HashMap<String, Reply>>,
    hits: Arc<Mutex<Vec<String>>>,
}

impl Upstream {
    pub fn new(replies: impl IntoIterator<Item = (&'static str, Reply)>) -> Self {
        Self {
            replies: Arc::new(
                replies
                    .into_iter()
                    .map(|(path, reply)| (path.to_owned(), reply))
                    .collect(),
            ),
            hits: Arc::default(),
        }
    }

    /// Starts serving on an ephemeral port and returns the base URL.
    pub async fn spawn(&self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind upstream");
        let addr = listener.local_addr().expect("upstream addr");
        let app = Router::new().fallback(reply).with_state(self.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("upstream server");
        });
        format!("http://{addr}")
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

async fn reply(State(upstream): State<Upstream>, uri: Uri) -> Response<Body> {
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_owned(), |target| target.as_str().to_owned());
    upstream.hits.lock().unwrap().push(target);

    let reply = upstream
        .replies
        .get(uri.path())
        .cloned()
        .unwrap_or_else(|| Reply::status(StatusCode::INTERNAL_SERVER_ERROR));

    let mut builder = Response::builder().status(reply.status);
    if let Some(content_type) = reply.content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder.body(Body::from(reply.body)).unwrap()
}

pub fn test_state(api_url: &str, route_root: &str) -> AppState {
    telemetry::init_tracing().ok();
    let metrics = telemetry::init_metrics().expect("metrics initialisation");
    let loader =
        ContentLoader::try_new(ContentConfig::new(api_url, route_root)).expect("content loader");
    AppState::new(loader, metrics, Instant::now())
}
