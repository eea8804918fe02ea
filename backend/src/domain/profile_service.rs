//! Profile discovery, ranking, and self-service domain service.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use tracing::warn;

use crate::domain::ports::{
    ProfileUpdateOutcome, ProfilesCommand, ProfilesQuery, SkillRepository, SkillRepositoryError,
    UpdateSkillsRequest, UserRepository, UserRepositoryError, UserSkillRepository,
    UserSkillRepositoryError,
};
use crate::domain::ports::ConnectionRequestRepository;
use crate::domain::projection::summarize;
use crate::domain::{
    DomainError, PlatformStats, ProfileChanges, ProfileSearchFilter, ProfileSummary, SkillId,
    User, UserId,
};

/// Profile search and self-service implementation of the driving ports.
#[derive(Clone)]
pub struct ProfileService<U, L, S, C> {
    users: Arc<U>,
    user_skills: Arc<L>,
    skills: Arc<S>,
    connections: Arc<C>,
}

impl<U, L, S, C> ProfileService<U, L, S, C> {
    /// Create a new service over the given repositories.
    pub fn new(users: Arc<U>, user_skills: Arc<L>, skills: Arc<S>, connections: Arc<C>) -> Self {
        Self {
            users,
            user_skills,
            skills,
            connections,
        }
    }
}

/// Drop whitespace-only search text so adapters see either a real needle or
/// no text filter at all.
fn normalise_filter(mut filter: ProfileSearchFilter) -> ProfileSearchFilter {
    filter.search_text = filter
        .search_text
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty());
    filter
}

impl<U, L, S, C> ProfileService<U, L, S, C>
where
    U: UserRepository,
    L: UserSkillRepository,
    S: SkillRepository,
    C: ConnectionRequestRepository,
{
    fn map_user_error(error: UserRepositoryError) -> DomainError {
        match error {
            UserRepositoryError::Connection { message } => {
                DomainError::service_unavailable(format!("user directory unavailable: {message}"))
            }
            UserRepositoryError::Query { message } => {
                DomainError::internal(format!("user directory error: {message}"))
            }
        }
    }

    fn map_link_error(error: UserSkillRepositoryError) -> DomainError {
        match error {
            UserSkillRepositoryError::Connection { message } => DomainError::service_unavailable(
                format!("skill link repository unavailable: {message}"),
            ),
            UserSkillRepositoryError::Query { message } => {
                DomainError::internal(format!("skill link repository error: {message}"))
            }
        }
    }

    fn map_catalog_error(error: SkillRepositoryError) -> DomainError {
        match error {
            SkillRepositoryError::Connection { message } => {
                DomainError::service_unavailable(format!("skill catalog unavailable: {message}"))
            }
            SkillRepositoryError::Query { message } => {
                DomainError::internal(format!("skill catalog error: {message}"))
            }
        }
    }

    async fn active_user(&self, id: &UserId) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await
            .map_err(Self::map_user_error)?
            .filter(|user| user.active)
            .ok_or_else(|| DomainError::not_found("user not found"))
    }

    /// Resolve skill names to catalog ids, creating unknown skills and
    /// collapsing case-insensitive duplicates so the replace cannot violate
    /// the one-link-per-pair invariant.
    async fn resolve_skill_ids(&self, names: Vec<String>) -> Result<Vec<SkillId>, DomainError> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                continue;
            }
            let skill = self
                .skills
                .get_or_create(trimmed)
                .await
                .map_err(Self::map_catalog_error)?;
            if !ids.contains(&skill.id) {
                ids.push(skill.id);
            }
        }
        Ok(ids)
    }
}

#[async_trait]
impl<U, L, S, C> ProfilesQuery for ProfileService<U, L, S, C>
where
    U: UserRepository,
    L: UserSkillRepository,
    S: SkillRepository,
    C: ConnectionRequestRepository,
{
    async fn search(
        &self,
        filter: ProfileSearchFilter,
    ) -> Result<Page<ProfileSummary>, DomainError> {
        let filter = normalise_filter(filter);
        let page = self
            .users
            .find_discoverable(&filter)
            .await
            .map_err(Self::map_user_error)?;

        let mut summaries = Vec::with_capacity(page.items.len());
        for user in &page.items {
            summaries.push(summarize(self.user_skills.as_ref(), user).await);
        }
        Ok(Page {
            items: summaries,
            page: page.page,
            size: page.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
            has_next: page.has_next,
            has_previous: page.has_previous,
        })
    }

    async fn public_profile(&self, id: &UserId) -> Result<ProfileSummary, DomainError> {
        let user = self
            .users
            .find_by_id(id)
            .await
            .map_err(Self::map_user_error)?
            .filter(User::discoverable)
            .ok_or_else(|| DomainError::not_found("profile not found"))?;
        Ok(summarize(self.user_skills.as_ref(), &user).await)
    }

    async fn own_profile(&self, id: &UserId) -> Result<ProfileSummary, DomainError> {
        let user = self.active_user(id).await?;
        Ok(summarize(self.user_skills.as_ref(), &user).await)
    }

    async fn platform_stats(&self) -> PlatformStats {
        let active_members = self.users.count_active_verified().await.unwrap_or_else(|error| {
            warn!(%error, "active member count failed; defaulting to 0");
            0
        });
        let successful_matches = self.connections.count_accepted().await.unwrap_or_else(|error| {
            warn!(%error, "accepted request count failed; defaulting to 0");
            0
        });
        let total_skills_offered =
            self.skills.count_distinct_offered().await.unwrap_or_else(|error| {
                warn!(%error, "offered skill count failed; defaulting to 0");
                0
            });
        let total_connection_requests = self.connections.count_all().await.unwrap_or_else(|error| {
            warn!(%error, "request count failed; defaulting to 0");
            0
        });

        PlatformStats {
            active_members,
            successful_matches,
            total_skills_offered,
            total_connection_requests,
        }
    }
}

#[async_trait]
impl<U, L, S, C> ProfilesCommand for ProfileService<U, L, S, C>
where
    U: UserRepository,
    L: UserSkillRepository,
    S: SkillRepository,
    C: ConnectionRequestRepository,
{
    async fn update_profile(
        &self,
        caller: &UserId,
        changes: ProfileChanges,
    ) -> Result<ProfileUpdateOutcome, DomainError> {
        self.active_user(caller).await?;
        if !changes.is_empty() {
            let updated = self
                .users
                .apply_profile_changes(caller, &changes)
                .await
                .map_err(Self::map_user_error)?;
            if !updated {
                return Err(DomainError::not_found("user not found"));
            }
        }
        Ok(ProfileUpdateOutcome {
            message: "Profile updated successfully".to_owned(),
        })
    }

    async fn update_skills(
        &self,
        caller: &UserId,
        request: UpdateSkillsRequest,
    ) -> Result<ProfileUpdateOutcome, DomainError> {
        self.active_user(caller).await?;
        let offered = self.resolve_skill_ids(request.offered).await?;
        let wanted = self.resolve_skill_ids(request.wanted).await?;
        self.user_skills
            .replace_links(caller, offered, wanted)
            .await
            .map_err(Self::map_link_error)?;
        Ok(ProfileUpdateOutcome {
            message: "Skills updated successfully".to_owned(),
        })
    }
}
