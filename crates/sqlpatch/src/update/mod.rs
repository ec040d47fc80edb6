//! Patch-style UPDATE synthesis.
//!
//! [`compile_update`] turns a partially populated record into a single
//! parameterized `UPDATE` that touches only the columns the caller set:
//!
//! ```ignore
//! let patch = UserPatch { user_id: 7, first_name: Some("Ann".into()), last_name: None };
//! let plan = sqlpatch::compile_update("users", "user_id", &patch, "")?;
//! assert_eq!(plan.sql(), "UPDATE users SET first_name = ? WHERE user_id = ?");
//! assert_eq!(plan.args(), &[Value::from("Ann"), Value::Int(7)]);
//! ```
//!
//! Rules:
//! - fields are visited in declaration order, which is the SET order
//! - untagged fields are invisible
//! - fields that normalize to [`Value::Null`] are skipped, so a column can not
//!   be cleared through a patch
//! - the field tagged with the identifier column (case-insensitive) only
//!   feeds the WHERE clause; the first such field wins
//! - a record with nothing to assign is rejected with
//!   [`SqlError::NoUpdatableFields`]

mod plan;


pub use plan::{Assignment, UpdatePlan};

use crate::error::{SqlError, SqlResult};
use crate::record::{RecordTable, UpdateRecord};
use crate::value::Value;

/// Compile `record` into an UPDATE of `table` keyed by `id_column`.
///
/// `extra_filter` is raw SQL appended to the WHERE clause with `AND`; pass an
/// empty string for none. It is not escaped and must not contain placeholders.
///
/// # Errors
///
/// - [`SqlError::Validation`] if `table` or `id_column` is empty
/// - [`SqlError::Conversion`] if any tagged field fails to normalize
/// - [`SqlError::NoUpdatableFields`] if no non-identifier field is set
///
/// A record without an identifier value still compiles; the identifier
/// binds as [`Value::Null`] and the statement matches no rows.
pub fn compile_update<R>(
    table: &str,
    id_column: &str,
    record: &R,
    extra_filter: &str,
) -> SqlResult<UpdatePlan>
where
    R: UpdateRecord + ?Sized,
{
    if table.trim().is_empty() {
        return Err(SqlError::validation("UPDATE requires a table name"));
    }
    if id_column.trim().is_empty() {
        return Err(SqlError::validation("UPDATE requires a row identifier column"));
    }

    let id_key = id_column.to_lowercase();
    let mut assignments = Vec::new();
    let mut args = Vec::new();
    let mut id_value: Option<Value> = None;

    for field in record.fields() {
        if !field.is_tagged() {
            continue;
        }
        let column = field.column();

        let value = field
            .value()
            .to_value()
            .map_err(|e| SqlError::conversion(column, e.message()))?;
        if value.is_null() {
            tracing::trace!(target: "sqlpatch.update", column, "skipping unset field");
            continue;
        }

        if column.to_lowercase() == id_key {
            if id_value.is_none() {
                id_value = Some(value);
            }
            continue;
        }

        assignments.push(Assignment::new(column));
        args.push(value);
    }

    if assignments.is_empty() {
        return Err(SqlError::NoUpdatableFields(table.to_string()));
    }

    // An unset identifier still binds the WHERE placeholder, as NULL.
    args.push(id_value.unwrap_or(Value::Null));

    let extra_filter = Some(extra_filter)
        .filter(|f| !f.trim().is_empty())
        .map(str::to_string);

    Ok(UpdatePlan {
        table: table.to_string(),
        id_column: id_column.to_string(),
        assignments,
        args,
        extra_filter,
    })
}

/// Compile a record that declares its own table and identifier column.
pub fn compile_record_update<R: RecordTable>(
    record: &R,
    extra_filter: &str,
) -> SqlResult<UpdatePlan> {
    compile_update(R::TABLE, R::ID_COLUMN, record, extra_filter)
}
