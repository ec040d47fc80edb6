//! [`StatementExecutor`] for `tokio-postgres`.
//!
//! Both `tokio_postgres::Client` and `tokio_postgres::Transaction` can drive a
//! [`SqlRunner`](crate::SqlRunner). SQL is written with `?` placeholders and
//! rewritten to `$n` before it reaches the server.
//!
//! ```ignore
//! let (client, connection) = tokio_postgres::connect(&database_url, NoTls).await?;
//! tokio::spawn(connection);
//!
//! let runner = SqlRunner::new(client);
//! runner.prepared_exec("DELETE FROM sessions WHERE user_id = ?", &[Value::Int(7)]).await?;
//! ```

mod placeholders;
mod to_sql;


pub use placeholders::rewrite_placeholders;

use crate::error::{SqlError, SqlResult};
use crate::executor::{RowCursor, StatementExecutor};
use crate::value::Value;
use futures_core::Stream;
use std::pin::Pin;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Row, Statement};

/// Row cursor over a `tokio_postgres::RowStream`.
///
/// Dropping it before the stream is exhausted abandons the remaining rows.
pub struct PgRows {
    inner: Pin<Box<tokio_postgres::RowStream>>,
}

impl PgRows {
    fn new(stream: tokio_postgres::RowStream) -> Self {
        Self {
            inner: Box::pin(stream),
        }
    }

    /// Number of rows affected, available once the cursor is exhausted.
    pub fn rows_affected(&self) -> Option<u64> {
        self.inner.rows_affected()
    }
}

impl RowCursor for PgRows {
    type Row = Row;

    async fn next_row(&mut self) -> SqlResult<Option<Row>> {
        match std::future::poll_fn(|cx| self.inner.as_mut().poll_next(cx)).await {
            Some(Ok(row)) => Ok(Some(row)),
            Some(Err(e)) => Err(SqlError::from_db_error(e)),
            None => Ok(None),
        }
    }
}

fn as_params(args: &[Value]) -> Vec<&(dyn ToSql + Sync)> {
    args.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
}

macro_rules! impl_pg_executor {
    ($ty:ty) => {
        impl StatementExecutor for $ty {
            type Statement = Statement;
            type Row = Row;
            type Rows = PgRows;

            async fn prepare(&self, sql: &str) -> SqlResult<Statement> {
                let sql = rewrite_placeholders(sql);
                <$ty>::prepare(self, &sql)
                    .await
                    .map_err(SqlError::from_prepare_error)
            }

            async fn execute(&self, sql: &str, args: &[Value]) -> SqlResult<u64> {
                let sql = rewrite_placeholders(sql);
                let params = as_params(args);
                <$ty>::execute(self, &*sql, &params)
                    .await
                    .map_err(SqlError::from_db_error)
            }

            async fn execute_prepared(&self, stmt: &Statement, args: &[Value]) -> SqlResult<u64> {
                let params = as_params(args);
                <$ty>::execute(self, stmt, &params)
                    .await
                    .map_err(SqlError::from_db_error)
            }

            async fn query_prepared(&self, stmt: &Statement, args: &[Value]) -> SqlResult<PgRows> {
                let stream = <$ty>::query_raw(self, stmt, args.iter())
                    .await
                    .map_err(SqlError::from_db_error)?;
                Ok(PgRows::new(stream))
            }

            async fn query(&self, sql: &str, args: &[Value]) -> SqlResult<PgRows> {
                let sql = rewrite_placeholders(sql);
                let stream = <$ty>::query_raw(self, &*sql, args.iter())
                    .await
                    .map_err(SqlError::from_db_error)?;
                Ok(PgRows::new(stream))
            }
        }
    };
}

impl_pg_executor!(tokio_postgres::Client);
impl_pg_executor!(tokio_postgres::Transaction<'_>);
