use thiserror::Error;

/// Errors raised by repository implementations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Query did not return a unique result: {count} rows matched")]
    NonUniqueResult { count: usize },

    #[error("{entity} references an unsaved {target}; save the {target} first")]
    TransientReference {
        entity: &'static str,
        target: &'static str,
    },
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors raised while turning request parameters into a page request
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PagingError {
    #[error("Unknown sort property: {0}")]
    UnknownSortProperty(String),

    #[error("Invalid sort direction: {0} (expected asc or desc)")]
    InvalidSortDirection(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message() {
        let err = RepositoryError::not_found("Member", 7);
        assert_eq!(err.to_string(), "Member not found: 7");
    }

    #[test]
    fn non_unique_message() {
        let err = RepositoryError::NonUniqueResult { count: 2 };
        assert!(err.to_string().contains("2 rows"));
    }

    #[test]
    fn transient_reference_message() {
        let err = RepositoryError::TransientReference {
            entity: "Member",
            target: "Team",
        };
        assert_eq!(
            err.to_string(),
            "Member references an unsaved Team; save the Team first"
        );
    }
}
