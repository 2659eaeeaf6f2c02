pub mod errors;
pub mod request;

pub use errors::{AppError, ErrorCode};
pub use request::{RequestContext, TraceContext};
