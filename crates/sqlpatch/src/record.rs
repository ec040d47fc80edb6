//! Record descriptions consumed by the UPDATE compiler.
//!
//! A record exposes its fields as an ordered list of [`Field`]s. Each field
//! carries the destination column tag and a borrowed value that is normalized
//! lazily by the compiler. Records are usually derived:
//!
//! ```ignore
//! use sqlpatch::UpdateRecord;
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
//! ```

use crate::value::ToValue;
use std::fmt;

/// One tagged field of a record.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    column: &'a str,
    value: &'a dyn ToValue,
}

impl<'a> Field<'a> {
    /// A field mapped to `column`.
    pub fn new(column: &'a str, value: &'a dyn ToValue) -> Self {
        Self { column, value }
    }

    /// A field without a column mapping. The compiler ignores it.
    pub fn untagged(value: &'a dyn ToValue) -> Self {
        Self { column: "", value }
    }

    /// Destination column tag (empty when untagged).
    pub fn column(&self) -> &'a str {
        self.column
    }

    pub fn value(&self) -> &'a dyn ToValue {
        self.value
    }

    pub fn is_tagged(&self) -> bool {
        !self.column.is_empty()
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("column", &self.column)
            .finish_non_exhaustive()
    }
}

/// A structured value whose fields map to table columns.
///
/// `fields` must yield fields in declaration order; that order is the order of
/// the generated SET clause.
pub trait UpdateRecord {
    fn fields(&self) -> Vec<Field<'_>>;
}

impl<T: UpdateRecord + ?Sized> UpdateRecord for &T {
    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

/// Table metadata for records that always target the same table.
///
/// Implemented by `#[derive(UpdateRecord)]` when the struct carries
/// `#[sql(table = "...", id_column = "...")]`.
pub trait RecordTable: UpdateRecord {
    /// Target table name.
    const TABLE: &'static str;
    /// Column tag of the row identifier.
    const ID_COLUMN: &'static str;
}
