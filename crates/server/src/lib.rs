pub mod app;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod telemetry;

pub use app::{build_router, content_routes, AppState};
pub use middleware::attach_content;
pub use telemetry::{init_metrics, init_tracing};
