//! Driving port for profile discovery and platform statistics.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{DomainError, PlatformStats, ProfileSearchFilter, ProfileSummary, UserId};

/// Use-case port for reading profiles and dashboard counters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfilesQuery: Send + Sync {
    /// One page of discoverable profiles matching the filter, ordered by
    /// descending average rating.
    async fn search(
        &self,
        filter: ProfileSearchFilter,
    ) -> Result<Page<ProfileSummary>, DomainError>;

    /// A single discoverable profile; `NotFound` when the user is absent or
    /// fails any eligibility gate.
    async fn public_profile(&self, id: &UserId) -> Result<ProfileSummary, DomainError>;

    /// The caller's own profile; only the active gate applies.
    async fn own_profile(&self, id: &UserId) -> Result<ProfileSummary, DomainError>;

    /// Aggregate counters for the landing page. Never fails: each counter
    /// degrades to zero when its underlying query does.
    async fn platform_stats(&self) -> PlatformStats;
}
