//! Convenient imports for typical `sqlpatch` usage.
//!
//! ```ignore
//! use sqlpatch::prelude::*;
//! ```

pub use crate::{
    RecordTable, SqlError, SqlResult, SqlRunner, StatementExecutor, ToValue, UpdateRecord, Value,
};
