//! Driving port for profile and skill list mutations.

use async_trait::async_trait;

use crate::domain::{DomainError, ProfileChanges, UserId};

/// Replacement skill lists for a member, by display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSkillsRequest {
    /// Names of skills the member teaches.
    pub offered: Vec<String>,
    /// Names of skills the member wants to learn.
    pub wanted: Vec<String>,
}

/// Confirmation returned by profile mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdateOutcome {
    /// Human-readable confirmation for the caller.
    pub message: String,
}

/// Use-case port for updating the caller's own profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfilesCommand: Send + Sync {
    /// Apply a partial update to the caller's profile fields.
    async fn update_profile(
        &self,
        caller: &UserId,
        changes: ProfileChanges,
    ) -> Result<ProfileUpdateOutcome, DomainError>;

    /// Replace the caller's offered and wanted skill lists wholesale,
    /// creating unknown skills in the catalog on first use.
    async fn update_skills(
        &self,
        caller: &UserId,
        request: UpdateSkillsRequest,
    ) -> Result<ProfileUpdateOutcome, DomainError>;
}
