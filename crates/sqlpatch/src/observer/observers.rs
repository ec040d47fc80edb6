use super::SqlObserver;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// An observer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SqlObserver for NoopObserver {
    fn record_read(&self) {}

    fn record_write(&self) {}
}

/// An observer that counts reads and writes.
#[derive(Debug, Default)]
pub struct CountingObserver {
    reads: AtomicU64,
    writes: AtomicU64,
}

/// Snapshot of a [`CountingObserver`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpCounts {
    /// Number of prepared queries.
    pub reads: u64,
    /// Number of prepared execs and record updates.
    pub writes: u64,
}

impl OpCounts {
    pub fn total(&self) -> u64 {
        self.reads.saturating_add(self.writes)
    }
}

impl CountingObserver {
    /// Create a new counting observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of the current counts.
    pub fn counts(&self) -> OpCounts {
        OpCounts {
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
        }
    }

    /// Reset both counters to zero.
    pub fn reset(&self) {
        self.reads.store(0, Ordering::Relaxed);
        self.writes.store(0, Ordering::Relaxed);
    }
}

impl SqlObserver for CountingObserver {
    fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }
}

/// An observer that forwards to several observers in order.
pub struct CompositeObserver {
    observers: Vec<Arc<dyn SqlObserver>>,
}

impl CompositeObserver {
    /// Create an empty composite observer.
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Add an observer.
    #[allow(clippy::should_implement_trait)]
    pub fn add<O: SqlObserver + 'static>(mut self, observer: O) -> Self {
        self.observers.push(Arc::new(observer));
        self
    }

    /// Add an Arc-wrapped observer.
    pub fn add_arc(mut self, observer: Arc<dyn SqlObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl Default for CompositeObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlObserver for CompositeObserver {
    fn record_read(&self) {
        for observer in &self.observers {
            observer.record_read();
        }
    }

    fn record_write(&self) {
        for observer in &self.observers {
            observer.record_write();
        }
    }
}
