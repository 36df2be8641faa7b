//! Request-scoped trace identifier for correlation across logs and errors.
//!
//! The identifier lives in Tokio task-local storage so handlers and error
//! constructors can read it without threading it through every call.
//! Task-locals are not inherited by spawned tasks; wrap spawned work in
//! [`TraceId::scope`] to carry the identifier along.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

/// Response header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static TRACE_ID: TraceId;
}

/// Per-request trace identifier.
///
/// # Examples
/// ```
/// use api_backend::TraceId;
///
/// async fn handler() -> String {
///     TraceId::current().map(|id| id.to_string()).unwrap_or_default()
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a new random trace identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the current trace identifier if one is in scope.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run the future with `trace_id` in scope.
    ///
    /// # Examples
    /// ```
    /// use api_backend::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let trace_id = TraceId::generate();
    /// let observed = TraceId::scope(trace_id, async { TraceId::current() }).await;
    /// assert_eq!(observed, Some(trace_id));
    /// # });
    /// ```
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }

    /// Run a synchronous closure with `trace_id` in scope.
    pub fn sync_scope<F, R>(trace_id: TraceId, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        TRACE_ID.sync_scope(trace_id, f)
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}
