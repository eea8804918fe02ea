//! Port for user-to-skill link persistence adapters.

use async_trait::async_trait;

use crate::domain::{SkillDirection, SkillId, UserId};

/// Persistence errors raised by skill link adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserSkillRepositoryError {
    /// Repository connection could not be established.
    #[error("skill link repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("skill link repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl UserSkillRepositoryError {
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

/// Port for directional links between users and catalog skills.
///
/// A user holds at most one link per (skill, direction) pair. The invariant
/// is maintained by replacing a user's links wholesale rather than through
/// incremental deduplication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserSkillRepository: Send + Sync {
    /// Resolve the skill names a user has linked in the given direction.
    async fn skill_names(
        &self,
        user_id: &UserId,
        direction: SkillDirection,
    ) -> Result<Vec<String>, UserSkillRepositoryError>;

    /// Replace all of a user's links, both directions, in one transactional
    /// scope.
    async fn replace_links(
        &self,
        user_id: &UserId,
        offered: Vec<SkillId>,
        wanted: Vec<SkillId>,
    ) -> Result<(), UserSkillRepositoryError>;
}
