//! Derive macros for sqlpatch
//!
//! Provides `#[derive(UpdateRecord)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod sql_ident;
mod update_record;

/// Derive `UpdateRecord` (and optionally `RecordTable`) for a struct.
///
/// # Example
///
/// ```ignore
/// use sqlpatch::UpdateRecord;
///
/// #[derive(UpdateRecord)]
/// #[sql(table = "users", id_column = "user_id")]
/// struct UserPatch {
///     #[sql(column = "user_id")]
///     user_id: i64,
///     #[sql(column = "first_name")]
///     first_name: Option<String>,
///     // no column tag: never part of an UPDATE
///     request_id: String,
/// }
/// ```
///
/// # Attributes
///
/// - `#[sql(column = "name")]` - Map field to a column. Untagged fields are omitted.
/// - `#[sql(table = "name", id_column = "name")]` - Also implement `RecordTable`.
///   Both keys must be given together.
#[proc_macro_derive(UpdateRecord, attributes(sql))]
pub fn derive_update_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    update_record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
