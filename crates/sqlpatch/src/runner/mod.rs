//! Prepared-statement lifecycle wrappers.
//!
//! [`SqlRunner`] wraps any [`StatementExecutor`] and gives every operation the
//! same shape: acquire the statement (and cursor), report to the observer,
//! run, and release both before returning, on success and on every error
//! path alike.
//!
//! ```ignore
//! use sqlpatch::{SqlRunner, Value};
//!
//! let runner = SqlRunner::new(client);
//!
//! let name: String = runner
//!     .query_row("SELECT name FROM users WHERE id = ?", &[Value::Int(7)], |row| {
//!         row.try_get(0).map_err(|e| sqlpatch::SqlError::decode("name", e.to_string()))
//!     })
//!     .await?;
//!
//! runner.update_record("users", "id", &patch, "").await?;
//! ```

mod config;

#[cfg(test)]
pub(crate) mod mock;

pub use config::RunnerConfig;

use crate::error::{SqlError, SqlResult};
use crate::executor::{RowCursor, StatementExecutor};
use crate::observer::{NoopObserver, SqlObserver};
use crate::record::{RecordTable, UpdateRecord};
use crate::update::compile_update;
use crate::value::Value;
use std::sync::Arc;

/// Statement runner over a [`StatementExecutor`].
pub struct SqlRunner<E> {
    executor: E,
    observer: Arc<dyn SqlObserver>,
    config: RunnerConfig,
}

impl<E: StatementExecutor> SqlRunner<E> {
    /// Create a runner with no observer and the default configuration.
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            observer: Arc::new(NoopObserver),
            config: RunnerConfig::default(),
        }
    }

    /// Set the runner configuration.
    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the observer.
    pub fn with_observer<O: SqlObserver + 'static>(mut self, observer: O) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Set the observer from an Arc, e.g. to keep a handle for reading counters.
    pub fn with_observer_arc(mut self, observer: Arc<dyn SqlObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Get a reference to the inner executor.
    pub fn inner(&self) -> &E {
        &self.executor
    }

    /// Get the inner executor, consuming this runner.
    pub fn into_inner(self) -> E {
        self.executor
    }

    /// Prepare `sql`, execute it with `args`, and return the affected row count.
    ///
    /// Counts as one write.
    pub async fn prepared_exec(&self, sql: &str, args: &[Value]) -> SqlResult<u64> {
        self.log_start("prepared_exec", sql, args.len());
        let result = async {
            let stmt = self.executor.prepare(sql).await?;
            self.observer.record_write();
            self.executor.execute_prepared(&stmt, args).await
        }
        .await;
        self.log_outcome("prepared_exec", sql, result)
    }

    /// Execute `sql` directly, without preparing it first.
    ///
    /// Not reported to the observer.
    pub async fn exec_without_prepare(&self, sql: &str, args: &[Value]) -> SqlResult<u64> {
        self.log_start("exec_without_prepare", sql, args.len());
        let result = self.executor.execute(sql, args).await;
        self.log_outcome("exec_without_prepare", sql, result)
    }

    /// Prepare `sql`, run it, and scan the first row with `scan`.
    ///
    /// Extra rows are discarded. Counts as one read.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::NotFound`] if the query yields no rows, and any
    /// error produced by `scan` unchanged.
    pub async fn query_row<T, F>(&self, sql: &str, args: &[Value], scan: F) -> SqlResult<T>
    where
        F: FnOnce(&E::Row) -> SqlResult<T>,
    {
        self.log_start("query_row", sql, args.len());
        let result = async {
            let stmt = self.executor.prepare(sql).await?;
            self.observer.record_read();
            let mut rows = self.executor.query_prepared(&stmt, args).await?;
            match rows.next_row().await? {
                Some(row) => scan(&row),
                None => Err(SqlError::not_found("query returned no rows")),
            }
        }
        .await;
        self.log_outcome("query_row", sql, result)
    }

    /// Prepare `sql`, run it, and feed every row to `consumer`.
    ///
    /// The first consumer error stops iteration and is returned. Returns the
    /// number of rows consumed. Counts as one read.
    pub async fn prepared_query<F>(
        &self,
        sql: &str,
        args: &[Value],
        mut consumer: F,
    ) -> SqlResult<u64>
    where
        F: FnMut(&E::Row) -> SqlResult<()>,
    {
        self.log_start("prepared_query", sql, args.len());
        let result = async {
            let stmt = self.executor.prepare(sql).await?;
            self.observer.record_read();
            let mut rows = self.executor.query_prepared(&stmt, args).await?;
            drain(&mut rows, &mut consumer).await
        }
        .await;
        self.log_outcome("prepared_query", sql, result)
    }

    /// Run `sql` without preparing it and feed every row to `consumer`.
    ///
    /// Not reported to the observer.
    pub async fn query_without_prepare<F>(
        &self,
        sql: &str,
        args: &[Value],
        mut consumer: F,
    ) -> SqlResult<u64>
    where
        F: FnMut(&E::Row) -> SqlResult<()>,
    {
        self.log_start("query_without_prepare", sql, args.len());
        let result = async {
            let mut rows = self.executor.query(sql, args).await?;
            drain(&mut rows, &mut consumer).await
        }
        .await;
        self.log_outcome("query_without_prepare", sql, result)
    }

    /// Update one row of `table` from the set fields of `record`.
    ///
    /// The statement is compiled with [`compile_update`] and executed once,
    /// without preparing (the text changes with every combination of set
    /// fields). Returns the affected row count. Counts as one write.
    ///
    /// # Errors
    ///
    /// Compilation errors are returned before anything is executed; in
    /// particular a record with nothing to update yields
    /// [`SqlError::NoUpdatableFields`] and no statement runs.
    pub async fn update_record<R>(
        &self,
        table: &str,
        id_column: &str,
        record: &R,
        extra_filter: &str,
    ) -> SqlResult<u64>
    where
        R: UpdateRecord + ?Sized,
    {
        let plan = match compile_update(table, id_column, record, extra_filter) {
            Ok(plan) => plan,
            Err(err) => {
                tracing::debug!(
                    target: "sqlpatch.sql",
                    op = "update_record",
                    table,
                    error = %err,
                    "update not compiled"
                );
                return Err(err);
            }
        };

        let (sql, args) = plan.into_parts();
        self.log_start("update_record", &sql, args.len());
        self.observer.record_write();
        let result = self.executor.execute(&sql, &args).await;
        self.log_outcome("update_record", &sql, result)
    }

    /// Update a record that declares its own table and identifier column.
    pub async fn update<R: RecordTable>(&self, record: &R) -> SqlResult<u64> {
        self.update_record(R::TABLE, R::ID_COLUMN, record, "").await
    }

    /// Like [`SqlRunner::update`], with an extra raw SQL condition.
    pub async fn update_where<R: RecordTable>(
        &self,
        record: &R,
        extra_filter: &str,
    ) -> SqlResult<u64> {
        self.update_record(R::TABLE, R::ID_COLUMN, record, extra_filter)
            .await
    }

    fn log_start(&self, op: &'static str, sql: &str, param_count: usize) {
        tracing::debug!(
            target: "sqlpatch.sql",
            op,
            param_count,
            sql = self.config.loggable_sql(sql),
        );
    }

    fn log_outcome<T>(&self, op: &'static str, sql: &str, result: SqlResult<T>) -> SqlResult<T> {
        if let Err(err) = &result {
            tracing::warn!(
                target: "sqlpatch.sql",
                op,
                sql = self.config.loggable_sql(sql),
                error = %err,
                "statement failed"
            );
        }
        result
    }
}

async fn drain<R, F>(rows: &mut R, consumer: &mut F) -> SqlResult<u64>
where
    R: RowCursor,
    F: FnMut(&R::Row) -> SqlResult<()>,
{
    let mut consumed = 0;
    while let Some(row) = rows.next_row().await? {
        consumer(&row)?;
        consumed += 1;
    }
    Ok(consumed)
}
