use crate::database::DatabaseError;
use crate::models::ProductId;
use sqlx::Error as SqlxError;
use thiserror::Error;

/// Errors returned by ledger operations.
///
/// Every variant carries the offending values so the presentation layer can
/// render its own message.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Input outside the accepted shape or range
    #[error("Validation error on {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// A product with this name already exists
    #[error("Product already exists: {name}")]
    DuplicateName { name: String },

    /// Referenced record does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The sale would drive stock negative
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// An aggregate no longer fits its numeric type
    #[error("Arithmetic overflow computing {quantity}")]
    Overflow { quantity: &'static str },

    /// Underlying persistence failure
    #[error("Storage error: {0}")]
    Storage(#[source] SqlxError),
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        LedgerError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn product_not_found(product_id: ProductId) -> Self {
        LedgerError::NotFound {
            entity: "product",
            id: product_id.0,
        }
    }

    /// Stable tag for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::Validation { .. } => "validation",
            LedgerError::DuplicateName { .. } => "duplicate_name",
            LedgerError::NotFound { .. } => "not_found",
            LedgerError::InsufficientStock { .. } => "insufficient_stock",
            LedgerError::Overflow { .. } => "overflow",
            LedgerError::Storage(_) => "storage",
        }
    }

    /// Check if error is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::NotFound { .. })
    }

    /// Check if error comes from the storage backend rather than the caller's input
    pub fn is_storage(&self) -> bool {
        matches!(self, LedgerError::Storage(_))
    }
}

/// Repository-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database query error
    #[error("Query error: {0}")]
    Query(SqlxError),

    /// Record not found
    #[error("Record not found: {entity} {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Duplicate record; holds the conflicting value
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// Constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Conditional stock decrement did not apply
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Running total left its numeric range
    #[error("Arithmetic overflow computing {0}")]
    Overflow(&'static str),
}

impl From<RepositoryError> for LedgerError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Query(e) => LedgerError::Storage(e),
            RepositoryError::NotFound { entity, id } => LedgerError::NotFound { entity, id },
            RepositoryError::Duplicate(name) => LedgerError::DuplicateName { name },
            RepositoryError::ConstraintViolation(msg) => LedgerError::validation("record", msg),
            RepositoryError::InvalidInput(msg) => LedgerError::validation("input", msg),
            RepositoryError::InsufficientStock {
                product_id,
                requested,
                available,
            } => LedgerError::InsufficientStock {
                product_id,
                requested,
                available,
            },
            RepositoryError::Overflow(quantity) => LedgerError::Overflow { quantity },
        }
    }
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        match &err {
            SqlxError::Database(db_err) => {
                if db_err.is_unique_violation() {
                    RepositoryError::Duplicate(db_err.message().to_string())
                } else if db_err.is_foreign_key_violation() || db_err.is_check_violation() {
                    RepositoryError::ConstraintViolation(db_err.message().to_string())
                } else {
                    RepositoryError::Query(err)
                }
            }
            _ => RepositoryError::Query(err),
        }
    }
}

impl From<SqlxError> for LedgerError {
    fn from(err: SqlxError) -> Self {
        RepositoryError::from(err).into()
    }
}

/// Process-level errors for the binary
#[derive(Error, Debug)]
pub enum AppError {
    /// Database bootstrap errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ledger operation errors
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Bad command line usage
    #[error("Usage error: {0}")]
    Usage(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Process exit code for the error
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Usage(_) => 2,
            AppError::Config(_) => 78,
            AppError::Ledger(e) if !e.is_storage() => 1,
            _ => 74,
        }
    }
}
