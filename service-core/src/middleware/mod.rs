pub mod access_log;
pub mod panic;
pub mod tracing;

pub use access_log::access_log_middleware;
pub use panic::panic_response;
pub use tracing::{REQUEST_ID_HEADER, RequestId, next_request_id, request_id_middleware};
