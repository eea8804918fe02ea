//! In-memory implementations of the driven ports for integration flows.
//!
//! One store implements all four repository ports over a single
//! mutex-guarded state so cross-port behaviour (searching by skill name,
//! platform statistics) stays consistent. The ledger invariants are enforced
//! the same way the SQL adapters enforce them: duplicate pairs are rejected
//! in either direction and status transitions are conditional on `PENDING`.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use pagination::Page;

use backend::domain::ports::{
    ConnectionRepositoryError, ConnectionRequestRepository, NewConnectionRequest,
    SkillRepository, SkillRepositoryError, UserRepository, UserRepositoryError,
    UserSkillRepository, UserSkillRepositoryError,
};
use backend::domain::{
    Availability, ConnectionRequest, ConnectionRequestId, ConnectionService,
    DEFAULT_SKILL_CATEGORY, ProfileChanges, ProfileSearchFilter, ProfileService, RequestDecision,
    RequestStatus, Skill, SkillDirection, SkillId, User, UserId, skill_name_key,
};

/// A directional link between a member and a catalog skill.
struct SkillLink {
    user_id: UserId,
    skill_id: SkillId,
    direction: SkillDirection,
}

#[derive(Default)]
struct StoreState {
    users: Vec<User>,
    skills: Vec<Skill>,
    links: Vec<SkillLink>,
    requests: Vec<ConnectionRequest>,
}

/// Shared in-memory backing store; clones share the same state.
#[derive(Clone, Default)]
pub struct SharedStore {
    state: Arc<Mutex<StoreState>>,
}

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().expect("store lock")
    }

    pub fn add_user(&self, user: User) {
        self.lock().users.push(user);
    }

    /// Read a request back for assertions.
    pub fn request(&self, id: &ConnectionRequestId) -> Option<ConnectionRequest> {
        self.lock().requests.iter().find(|r| r.id == *id).cloned()
    }

    fn skill_name_matches(state: &StoreState, user_id: &UserId, needle: &str) -> bool {
        state
            .links
            .iter()
            .filter(|link| link.user_id == *user_id)
            .any(|link| {
                state
                    .skills
                    .iter()
                    .find(|skill| skill.id == link.skill_id)
                    .is_some_and(|skill| skill.name.to_lowercase().contains(needle))
            })
    }

    fn blocking_request_exists(state: &StoreState, a: &UserId, b: &UserId) -> bool {
        state.requests.iter().any(|request| {
            request.status.blocks_new_request()
                && ((request.sender_id == *a && request.receiver_id == *b)
                    || (request.sender_id == *b && request.receiver_id == *a))
        })
    }
}

#[async_trait]
impl UserRepository for SharedStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.lock().users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_discoverable(
        &self,
        filter: &ProfileSearchFilter,
    ) -> Result<Page<User>, UserRepositoryError> {
        let state = self.lock();
        let needle = filter.search_text.as_deref().map(str::to_lowercase);

        let mut matches: Vec<User> = state
            .users
            .iter()
            .filter(|user| user.discoverable())
            .filter(|user| {
                filter
                    .availability
                    .is_none_or(|wanted| user.availability == wanted)
            })
            .filter(|user| match &needle {
                None => true,
                Some(needle) => {
                    user.first_name.to_lowercase().contains(needle)
                        || user.last_name.to_lowercase().contains(needle)
                        || Self::skill_name_matches(&state, &user.id, needle)
                }
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| {
            b.average_rating
                .partial_cmp(&a.average_rating)
                .unwrap_or(Ordering::Equal)
        });

        let total = matches.len() as u64;
        let start = usize::try_from(filter.page.offset()).expect("offset fits usize");
        let items = if start >= matches.len() {
            Vec::new()
        } else {
            let end = (start + filter.page.limit() as usize).min(matches.len());
            matches[start..end].to_vec()
        };
        Ok(Page::new(items, filter.page, total))
    }

    async fn apply_profile_changes(
        &self,
        id: &UserId,
        changes: &ProfileChanges,
    ) -> Result<bool, UserRepositoryError> {
        let mut state = self.lock();
        let Some(user) = state.users.iter_mut().find(|u| u.id == *id) else {
            return Ok(false);
        };
        if let Some(first_name) = &changes.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &changes.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(bio) = &changes.bio {
            user.bio = Some(bio.clone());
        }
        if let Some(location) = &changes.location {
            user.location = Some(location.clone());
        }
        if let Some(profile_public) = changes.profile_public {
            user.profile_public = profile_public;
        }
        if let Some(availability) = changes.availability {
            user.availability = availability;
        }
        user.updated_at = Utc::now();
        Ok(true)
    }

    async fn count_active_verified(&self) -> Result<u64, UserRepositoryError> {
        Ok(self
            .lock()
            .users
            .iter()
            .filter(|u| u.active && u.email_verified)
            .count() as u64)
    }
}

#[async_trait]
impl SkillRepository for SharedStore {
    async fn get_or_create(&self, name: &str) -> Result<Skill, SkillRepositoryError> {
        let mut state = self.lock();
        let key = skill_name_key(name);
        if let Some(existing) = state
            .skills
            .iter()
            .find(|skill| skill_name_key(&skill.name) == key)
        {
            return Ok(existing.clone());
        }
        let skill = Skill {
            id: SkillId::random(),
            name: name.trim().to_owned(),
            category: DEFAULT_SKILL_CATEGORY.to_owned(),
            description: None,
        };
        state.skills.push(skill.clone());
        Ok(skill)
    }

    async fn count_distinct_offered(&self) -> Result<u64, SkillRepositoryError> {
        let state = self.lock();
        let distinct: HashSet<_> = state
            .links
            .iter()
            .filter(|link| link.direction == SkillDirection::Offered)
            .map(|link| link.skill_id)
            .collect();
        Ok(distinct.len() as u64)
    }
}

#[async_trait]
impl UserSkillRepository for SharedStore {
    async fn skill_names(
        &self,
        user_id: &UserId,
        direction: SkillDirection,
    ) -> Result<Vec<String>, UserSkillRepositoryError> {
        let state = self.lock();
        Ok(state
            .links
            .iter()
            .filter(|link| link.user_id == *user_id && link.direction == direction)
            .filter_map(|link| {
                state
                    .skills
                    .iter()
                    .find(|skill| skill.id == link.skill_id)
                    .map(|skill| skill.name.clone())
            })
            .collect())
    }

    async fn replace_links(
        &self,
        user_id: &UserId,
        offered: Vec<SkillId>,
        wanted: Vec<SkillId>,
    ) -> Result<(), UserSkillRepositoryError> {
        let mut state = self.lock();
        state.links.retain(|link| link.user_id != *user_id);
        state.links.extend(
            offered
                .into_iter()
                .map(|skill_id| SkillLink {
                    user_id: *user_id,
                    skill_id,
                    direction: SkillDirection::Offered,
                })
                .chain(wanted.into_iter().map(|skill_id| SkillLink {
                    user_id: *user_id,
                    skill_id,
                    direction: SkillDirection::Wanted,
                })),
        );
        Ok(())
    }
}

#[async_trait]
impl ConnectionRequestRepository for SharedStore {
    async fn create_pending(
        &self,
        request: NewConnectionRequest,
    ) -> Result<ConnectionRequest, ConnectionRepositoryError> {
        let mut state = self.lock();
        if Self::blocking_request_exists(&state, &request.sender_id, &request.receiver_id) {
            return Err(ConnectionRepositoryError::DuplicatePair);
        }
        let created = ConnectionRequest {
            id: ConnectionRequestId::random(),
            sender_id: request.sender_id,
            receiver_id: request.receiver_id,
            message: request.message,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
            responded_at: None,
        };
        state.requests.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(
        &self,
        id: &ConnectionRequestId,
    ) -> Result<Option<ConnectionRequest>, ConnectionRepositoryError> {
        Ok(self.request(id))
    }

    async fn list_for_receiver(
        &self,
        receiver_id: &UserId,
        status: RequestStatus,
    ) -> Result<Vec<ConnectionRequest>, ConnectionRepositoryError> {
        Ok(self
            .lock()
            .requests
            .iter()
            .filter(|r| r.receiver_id == *receiver_id && r.status == status)
            .cloned()
            .collect())
    }

    async fn list_for_sender(
        &self,
        sender_id: &UserId,
        status: RequestStatus,
    ) -> Result<Vec<ConnectionRequest>, ConnectionRepositoryError> {
        Ok(self
            .lock()
            .requests
            .iter()
            .filter(|r| r.sender_id == *sender_id && r.status == status)
            .cloned()
            .collect())
    }

    async fn resolve(
        &self,
        id: &ConnectionRequestId,
        decision: RequestDecision,
    ) -> Result<ConnectionRequest, ConnectionRepositoryError> {
        let mut state = self.lock();
        let Some(request) = state.requests.iter_mut().find(|r| r.id == *id) else {
            return Err(ConnectionRepositoryError::query(
                "connection request not found",
            ));
        };
        if request.status != RequestStatus::Pending {
            return Err(ConnectionRepositoryError::StaleStatus {
                status: request.status,
            });
        }
        request.status = decision.terminal_status();
        request.responded_at = Some(Utc::now());
        Ok(request.clone())
    }

    async fn count_all(&self) -> Result<u64, ConnectionRepositoryError> {
        Ok(self.lock().requests.len() as u64)
    }

    async fn count_accepted(&self) -> Result<u64, ConnectionRepositoryError> {
        Ok(self
            .lock()
            .requests
            .iter()
            .filter(|r| r.status == RequestStatus::Accepted)
            .count() as u64)
    }
}

/// Services wired over one shared store.
pub struct TestServices {
    pub connections: ConnectionService<SharedStore, SharedStore, SharedStore>,
    pub profiles: ProfileService<SharedStore, SharedStore, SharedStore, SharedStore>,
}

/// Wire both domain services over the given store.
pub fn services(store: &SharedStore) -> TestServices {
    let repo = Arc::new(store.clone());
    TestServices {
        connections: ConnectionService::new(repo.clone(), repo.clone(), repo.clone()),
        profiles: ProfileService::new(repo.clone(), repo.clone(), repo.clone(), repo),
    }
}

/// A member with all discovery gates open and default aggregates.
pub fn member(first_name: &str, last_name: &str) -> User {
    User {
        id: UserId::random(),
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        email: format!(
            "{}.{}@example.com",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        ),
        bio: None,
        location: None,
        profile_public: true,
        active: true,
        email_verified: true,
        availability: Availability::Flexible,
        average_rating: 0.0,
        total_reviews: 0,
        completed_swaps: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
