//! Task-local trace id for the request being served.
//!
//! `RequestTrace` opens the scope; error rendering reads it back so problem
//! responses carry the same id as the request logs. Service code does not
//! touch this module.

use tokio::task_local;

/// Reported when no request scope is active.
pub const NO_TRACE: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the current request, or [`NO_TRACE`] outside one.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(String::clone)
        .unwrap_or_else(|_| NO_TRACE.to_string())
}

/// Run `future` with `trace_id` as the current trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
