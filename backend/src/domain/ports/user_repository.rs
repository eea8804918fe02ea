//! Port for user directory persistence adapters.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{ProfileChanges, ProfileSearchFilter, User, UserId};

/// Persistence errors raised by user directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl UserRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for reading and updating user records.
///
/// Discovery queries apply all three eligibility gates (public, active,
/// verified) inside the adapter so callers cannot accidentally widen the
/// visible set.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier, regardless of flags.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Return one page of discoverable users matching the filter, ordered by
    /// descending average rating. Text matching is a case-insensitive
    /// substring test over first name, last name, and linked skill names,
    /// with each user appearing at most once.
    async fn find_discoverable(
        &self,
        filter: &ProfileSearchFilter,
    ) -> Result<Page<User>, UserRepositoryError>;

    /// Apply a partial profile update. Returns `false` when no row matched.
    async fn apply_profile_changes(
        &self,
        id: &UserId,
        changes: &ProfileChanges,
    ) -> Result<bool, UserRepositoryError>;

    /// Count active users with a verified email.
    async fn count_active_verified(&self) -> Result<u64, UserRepositoryError>;
}
