//! Read/write volume observers.
//!
//! A [`SqlRunner`](crate::SqlRunner) reports one read per prepared query and
//! one write per prepared exec or record update to its observer. The default
//! is [`NoopObserver`], so an unconfigured runner never fails because nothing
//! is listening.
//!
//! # Example
//!
//! ```rust,ignore
//! use sqlpatch::{CountingObserver, SqlRunner};
//! use std::sync::Arc;
//!
//! let counts = Arc::new(CountingObserver::new());
//! let runner = SqlRunner::new(client).with_observer_arc(counts.clone());
//!
//! runner.prepared_exec("DELETE FROM sessions WHERE expires_at < now()", &[]).await?;
//! assert_eq!(counts.counts().writes, 1);
//! ```

mod observers;
mod tracing_observer;

#[cfg(test)]
mod tests;

pub use observers::{CompositeObserver, CountingObserver, NoopObserver, OpCounts};
pub use tracing_observer::TracingObserver;

/// Receives one event per observed database operation.
///
/// Runners call observers from whatever task issues the query, so
/// implementations must tolerate concurrent calls.
pub trait SqlObserver: Send + Sync {
    /// A prepared query is about to run.
    fn record_read(&self);

    /// A prepared exec or record update is about to run.
    fn record_write(&self);
}
