//! Error types for sqlpatch

use thiserror::Error;

/// Result type alias for sqlpatch operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Error types for statement execution and UPDATE synthesis
#[derive(Debug, Error)]
pub enum SqlError {
    /// The executor could not compile query text into a statement
    #[error("Prepare error: {0}")]
    Prepare(String),

    /// Query execution error reported by PostgreSQL
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Execution error reported by a non-PostgreSQL executor
    #[error("Execution error: {0}")]
    Execution(String),

    /// A field value could not be normalized into a bind parameter
    #[error("Conversion error on column '{column}': {message}")]
    Conversion { column: String, message: String },

    /// Every tagged field besides the identifier was unset
    #[error("Nothing to update in table '{0}': no assignable fields were set")]
    NoUpdatableFields(String),

    /// Row decode/scan error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid arguments
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unique constraint violation
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation
    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl SqlError {
    /// Create a conversion error for a specific column
    pub fn conversion(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conversion {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a conversion error
    pub fn is_conversion(&self) -> bool {
        matches!(self, Self::Conversion { .. })
    }

    /// Check if the record had nothing to update
    pub fn is_no_updatable_fields(&self) -> bool {
        matches!(self, Self::NoUpdatableFields(_))
    }

    /// Check if this is a unique violation error
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, Self::ForeignKeyViolation(_))
    }

    pub fn is_check_violation(&self) -> bool {
        matches!(self, Self::CheckViolation(_))
    }

    /// Parse a tokio_postgres error into a more specific SqlError
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            let constraint = db_err.constraint().unwrap_or("unknown");
            let message = db_err.message();

            match db_err.code().code() {
                "23505" => return Self::UniqueViolation(format!("{}: {}", constraint, message)),
                "23503" => {
                    return Self::ForeignKeyViolation(format!("{}: {}", constraint, message));
                }
                "23514" => return Self::CheckViolation(format!("{}: {}", constraint, message)),
                _ => {}
            }
        }
        Self::Query(err)
    }

    /// Classify an error raised while preparing a statement.
    ///
    /// Server-side rejections (syntax errors, unknown relations) become
    /// [`SqlError::Prepare`]; transport failures stay [`SqlError::Query`].
    pub fn from_prepare_error(err: tokio_postgres::Error) -> Self {
        match err.as_db_error() {
            Some(db_err) => Self::Prepare(format!(
                "{} ({})",
                db_err.message(),
                db_err.code().code()
            )),
            None => Self::Query(err),
        }
    }
}
