use super::SqlObserver;
use tracing::Level;

/// A `tracing`-based observer that emits one event per read or write.
///
/// Events go to target `sqlpatch.observer` with an `op` field of `"read"` or
/// `"write"`, which makes them easy to aggregate in a subscriber layer.
#[derive(Debug, Clone)]
pub struct TracingObserver {
    /// Tracing event level to emit at.
    pub level: Level,
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self {
            level: Level::TRACE,
        }
    }
}

impl TracingObserver {
    /// Create a new observer with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    fn emit(&self, op: &'static str) {
        /// Dispatch a tracing event at a runtime-determined level.
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        emit_at_level!(self.level, target: "sqlpatch.observer", op);
    }
}

impl SqlObserver for TracingObserver {
    fn record_read(&self) {
        self.emit("read");
    }

    fn record_write(&self) {
        self.emit("write");
    }
}
