//! # sqlpatch
//!
//! Prepared-statement helpers and patch-style `UPDATE` synthesis for Postgres.
//!
//! ## Features
//!
//! - **Patch updates**: build `UPDATE ... SET` from only the fields a record actually carries
//! - **Deterministic SQL**: assignments follow field declaration order, the identifier binds last
//! - **Statement lifecycle**: prepared statements and cursors are released on every path
//! - **Executor-agnostic**: anything implementing [`StatementExecutor`] can drive a [`SqlRunner`]
//! - **Observers**: count reads and writes, or forward them to `tracing`
//!
//! ## Example
//!
//! ```ignore
//! use sqlpatch::{SqlRunner, UpdateRecord};
//!
//! #[derive(UpdateRecord)]
//! #[sql(table = "users", id_column = "user_id")]
//! struct UserPatch {
//!     #[sql(column = "user_id")]
//!     user_id: i64,
//!     #[sql(column = "first_name")]
//!     first_name: Option<String>,
//!     #[sql(column = "last_name")]
//!     last_name: Option<String>,
//! }
//!
//! let runner = SqlRunner::new(client);
//!
//! // UPDATE users SET first_name = $1 WHERE user_id = $2
//! runner
//!     .update(&UserPatch { user_id: 7, first_name: Some("Ann".into()), last_name: None })
//!     .await?;
//! ```

pub mod error;
pub mod executor;
pub mod observer;
pub mod postgres;
pub mod prelude;
pub mod record;
pub mod runner;
pub mod update;
pub mod value;

pub use error::{SqlError, SqlResult};
pub use executor::{RowCursor, StatementExecutor};
pub use observer::{
    CompositeObserver, CountingObserver, NoopObserver, OpCounts, SqlObserver, TracingObserver,
};
pub use postgres::{PgRows, rewrite_placeholders};
pub use record::{Field, RecordTable, UpdateRecord};
pub use runner::{RunnerConfig, SqlRunner};
pub use update::{Assignment, UpdatePlan, compile_record_update, compile_update};
pub use value::{Json, ToValue, Value, ValueError};

#[cfg(feature = "derive")]
pub use sqlpatch_derive::UpdateRecord;
