//! HTTP middleware stack for the intake service.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Cross-origin policy (answers preflight requests)
//! 4. Body size limit (`DefaultBodyLimit`)
//! 5. Request log (timestamp, method, path, origin)
//! 6. Panic responder (turns handler panics into JSON 500s)

pub mod cors;
pub mod panic;
pub mod request_log;

pub use cors::cors_layer;
pub use panic::panic_layer;
pub use request_log::request_log_middleware;
