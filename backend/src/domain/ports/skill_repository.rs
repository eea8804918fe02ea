//! Port for the skill catalog.

use async_trait::async_trait;

use crate::domain::Skill;

/// Persistence errors raised by skill catalog adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkillRepositoryError {
    /// Repository connection could not be established.
    #[error("skill repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("skill repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl SkillRepositoryError {
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

/// Port for the deduplicated skill catalog.
///
/// Names are unique case-insensitively. First use of a new name must be
/// race-safe: adapters resolve concurrent creation through a unique
/// constraint on the normalised name with insert-or-fetch-on-conflict
/// semantics, never through a bare existence check.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Look a skill up by name, creating it under the default category when
    /// absent.
    async fn get_or_create(&self, name: &str) -> Result<Skill, SkillRepositoryError>;

    /// Count distinct skills with at least one offered link.
    async fn count_distinct_offered(&self) -> Result<u64, SkillRepositoryError>;
}
