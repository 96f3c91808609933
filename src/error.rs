use sea_orm::DbErr;
use thiserror::Error;

/// Failures surfaced by the store layer.
///
/// Storage errors are wrapped with the attempted operation so callers see
/// "failed to store stock prices" rather than a bare driver error. Absence
/// of a row is never an error; stores return `Option`/empty collections.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Malformed input rejected before any write reaches the database.
    #[error("invalid price row: {0}")]
    InvalidRow(String),

    /// An underlying database failure, annotated with the operation that
    /// was being attempted. Never retried at this layer.
    #[error("{context}")]
    Db {
        context: &'static str,
        #[source]
        source: DbErr,
    },
}

impl StoreError {
    pub fn db(context: &'static str, source: DbErr) -> Self {
        Self::Db { context, source }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidRow(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_displays_operation_context() {
        let err = StoreError::db(
            "failed to fetch invoices",
            DbErr::Custom("connection reset".to_string()),
        );
        assert_eq!(err.to_string(), "failed to fetch invoices");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_error_displays_field_class() {
        let err = StoreError::InvalidRow("row 2: missing date".to_string());
        assert_eq!(err.to_string(), "invalid price row: row 2: missing date");
        assert!(err.is_validation());
    }

    #[test]
    fn test_db_error_preserves_source() {
        use std::error::Error;

        let err = StoreError::db(
            "failed to store stock prices",
            DbErr::Custom("duplicate key".to_string()),
        );
        let source = err.source().expect("source should be preserved");
        assert!(source.to_string().contains("duplicate key"));
    }
}
