//! Error types for store operations
//!
//! Only two domain error kinds exist: a keyed lookup that misses
//! (`NotFound`) and a unique-constraint violation (`Duplicate`). Everything
//! else is a passthrough of the underlying sqlx error — no recovery or
//! retry logic lives here.

use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the persistence layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found by its surrogate key
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity type name (e.g., "user", "authority")
        entity: &'static str,
        /// Key that missed
        id: i64,
    },

    /// Unique constraint violation
    #[error("duplicate {entity}: {field} '{value}' already exists")]
    Duplicate {
        /// Entity type name
        entity: &'static str,
        /// Column that collided
        field: &'static str,
        /// Conflicting value
        value: String,
    },

    /// Any other database error, propagated unmodified
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Maps an insert/update error to `Duplicate` when the underlying
    /// cause is a unique-constraint violation, passing it through otherwise.
    pub(crate) fn on_conflict(
        err: sqlx::Error,
        entity: &'static str,
        field: &'static str,
        value: &str,
    ) -> Self {
        let is_unique = err
            .as_database_error()
            .map(|db| db.is_unique_violation())
            .unwrap_or(false);

        if is_unique {
            StoreError::Duplicate {
                entity,
                field,
                value: value.to_string(),
            }
        } else {
            StoreError::Database(err)
        }
    }

    /// Returns true if this is a `NotFound` error
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Returns true if this is a `Duplicate` error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::Duplicate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = StoreError::NotFound {
            entity: "user",
            id: 42,
        };
        assert_eq!(err.to_string(), "user with id 42 not found");
        assert!(err.is_not_found());
        assert!(!err.is_duplicate());
    }

    #[test]
    fn test_duplicate_display() {
        let err = StoreError::Duplicate {
            entity: "user",
            field: "username",
            value: "alice".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "duplicate user: username 'alice' already exists"
        );
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_on_conflict_passthrough() {
        // A non-database error must not be rewritten as Duplicate
        let err = StoreError::on_conflict(sqlx::Error::RowNotFound, "user", "username", "alice");
        assert!(matches!(err, StoreError::Database(_)));
    }
}
