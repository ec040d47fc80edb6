//! The statement executor contract.
//!
//! sqlpatch does not own connections. Anything that can prepare, execute and
//! query with positional [`Value`] arguments can drive a
//! [`SqlRunner`](crate::SqlRunner). `tokio_postgres::Client` and
//! `tokio_postgres::Transaction` implement it out of the box.
//!
//! Statement and cursor handles are released by dropping them. Callers keep
//! them as locals so every exit path, `?` included, releases them before the
//! enclosing call returns.

use crate::error::SqlResult;
use crate::value::Value;
use std::future::Future;

/// A lazy, forward-only, single-pass sequence of result rows.
pub trait RowCursor: Send {
    type Row: Send;

    /// Advance to the next row. `Ok(None)` marks the end of the sequence.
    fn next_row(&mut self) -> impl Future<Output = SqlResult<Option<Self::Row>>> + Send;
}

/// Capability surface the runner and UPDATE compiler consume.
pub trait StatementExecutor: Send + Sync {
    /// Prepared statement handle.
    type Statement: Send + Sync;
    /// Row type yielded by cursors.
    type Row: Send;
    /// Cursor over query results.
    type Rows: RowCursor<Row = Self::Row>;

    /// Compile query text into a reusable statement.
    fn prepare(&self, sql: &str) -> impl Future<Output = SqlResult<Self::Statement>> + Send;

    /// Execute without preparing. Returns the number of affected rows.
    fn execute(&self, sql: &str, args: &[Value]) -> impl Future<Output = SqlResult<u64>> + Send;

    /// Bind `args` to a prepared statement and execute it.
    fn execute_prepared(
        &self,
        stmt: &Self::Statement,
        args: &[Value],
    ) -> impl Future<Output = SqlResult<u64>> + Send;

    /// Bind `args` to a prepared statement and open a row cursor.
    fn query_prepared(
        &self,
        stmt: &Self::Statement,
        args: &[Value],
    ) -> impl Future<Output = SqlResult<Self::Rows>> + Send;

    /// Open a row cursor without preparing.
    fn query(
        &self,
        sql: &str,
        args: &[Value],
    ) -> impl Future<Output = SqlResult<Self::Rows>> + Send;
}
