/// Default maximum SQL length (bytes) included in log events.
const DEFAULT_MAX_SQL_LENGTH: usize = 200;

/// Configuration for a [`SqlRunner`](super::SqlRunner).
///
/// By default SQL text is logged at `debug` level, truncated to 200 bytes.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Whether to include SQL text in `tracing` events.
    pub log_sql: bool,
    /// Truncate logged SQL to this many bytes. `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            log_sql: true,
            max_sql_length: Some(DEFAULT_MAX_SQL_LENGTH),
        }
    }
}

impl RunnerConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Include SQL text in log events.
    pub fn with_sql_logging(mut self) -> Self {
        self.log_sql = true;
        self
    }

    /// Omit SQL text from log events (operation names and counts are still logged).
    pub fn without_sql_logging(mut self) -> Self {
        self.log_sql = false;
        self
    }

    /// Set maximum SQL length to log.
    pub fn with_max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub(crate) fn loggable_sql<'a>(&self, sql: &'a str) -> &'a str {
        if !self.log_sql {
            return "";
        }
        match self.max_sql_length {
            Some(max) => truncate_sql_bytes(sql, max),
            None => sql,
        }
    }
}

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
