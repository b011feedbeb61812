//! Repository Module
//!
//! Free functions over a `&mut SqliteConnection`, so the same query runs
//! on a pooled connection or inside a transaction (`&mut *tx`).

pub mod catalog;
pub mod dining_table;
pub mod history;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod tenant;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// SQLite write lock not acquired within the busy timeout
    #[error("Database busy: {0}")]
    Busy(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // SQLITE_BUSY (5) and its extended codes (e.g. 517 BUSY_SNAPSHOT)
            if let Some(code) = db_err.code()
                && let Ok(code) = code.parse::<i32>()
                && code & 0xff == 5
            {
                return RepoError::Busy(db_err.message().to_string());
            }
            if db_err.is_unique_violation() {
                return RepoError::Duplicate(db_err.message().to_string());
            }
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Build ` (?, ?, ?)` for an `IN` clause of `n` binds
pub(crate) fn in_placeholders(n: usize) -> String {
    let mut s = String::with_capacity(n * 3 + 2);
    s.push('(');
    for i in 0..n {
        if i > 0 {
            s.push_str(", ");
        }
        s.push('?');
    }
    s.push(')');
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_placeholders() {
        assert_eq!(in_placeholders(1), "(?)");
        assert_eq!(in_placeholders(3), "(?, ?, ?)");
    }
}
