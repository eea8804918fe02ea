//! Connection ledger domain service.
//!
//! Implements the driving ports for the connection-request lifecycle. The
//! duplicate-prevention and single-response invariants are enforced by the
//! ledger repository's atomic operations; this service owns the precondition
//! checks and the mapping of repository failures onto domain errors.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    ConnectionRepositoryError, ConnectionRequestRepository, ConnectionRequestView,
    ConnectionResponseOutcome, ConnectionsCommand, ConnectionsQuery, NewConnectionRequest,
    SendConnectionRequest, SentConnectionRequest, UserRepository, UserRepositoryError,
    UserSkillRepository,
};
use crate::domain::projection::summarize;
use crate::domain::{
    ConnectionRequest, ConnectionRequestId, DomainError, MAX_REQUEST_MESSAGE_CHARS,
    RequestDecision, RequestStatus, User, UserId,
};

/// Connection ledger service implementing the driving ports.
#[derive(Clone)]
pub struct ConnectionService<U, C, L> {
    users: Arc<U>,
    connections: Arc<C>,
    user_skills: Arc<L>,
}

impl<U, C, L> ConnectionService<U, C, L> {
    /// Create a new service over the given repositories.
    pub fn new(users: Arc<U>, connections: Arc<C>, user_skills: Arc<L>) -> Self {
        Self {
            users,
            connections,
            user_skills,
        }
    }
}

impl<U, C, L> ConnectionService<U, C, L>
where
    U: UserRepository,
    C: ConnectionRequestRepository,
    L: UserSkillRepository,
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

    fn map_ledger_error(error: ConnectionRepositoryError) -> DomainError {
        match error {
            ConnectionRepositoryError::Connection { message } => {
                DomainError::service_unavailable(format!("connection ledger unavailable: {message}"))
            }
            ConnectionRepositoryError::Query { message } => {
                DomainError::internal(format!("connection ledger error: {message}"))
            }
            ConnectionRepositoryError::DuplicatePair => DomainError::conflict(
                "a connection request already exists between you and this user",
            ),
            ConnectionRepositoryError::StaleStatus { .. } => {
                DomainError::invalid_operation("this request has already been processed")
            }
        }
    }

    async fn active_user(&self, id: &UserId, missing: &str) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await
            .map_err(Self::map_user_error)?
            .filter(|user| user.active)
            .ok_or_else(|| DomainError::not_found(missing))
    }

    async fn view(&self, request: ConnectionRequest) -> Result<ConnectionRequestView, DomainError> {
        let sender = self
            .users
            .find_by_id(&request.sender_id)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| DomainError::internal("request sender missing from user directory"))?;
        let receiver = self
            .users
            .find_by_id(&request.receiver_id)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| DomainError::internal("request receiver missing from user directory"))?;

        Ok(ConnectionRequestView {
            id: request.id,
            message: request.message,
            status: request.status,
            created_at: request.created_at,
            responded_at: request.responded_at,
            sender: summarize(self.user_skills.as_ref(), &sender).await,
            receiver: summarize(self.user_skills.as_ref(), &receiver).await,
        })
    }

    async fn pending_views(
        &self,
        requests: Vec<ConnectionRequest>,
    ) -> Result<Vec<ConnectionRequestView>, DomainError> {
        let mut views = Vec::with_capacity(requests.len());
        for request in requests {
            views.push(self.view(request).await?);
        }
        Ok(views)
    }

    async fn respond(
        &self,
        caller: &UserId,
        request_id: &ConnectionRequestId,
        decision: RequestDecision,
    ) -> Result<ConnectionResponseOutcome, DomainError> {
        self.active_user(caller, "user not found").await?;

        let request = self
            .connections
            .find_by_id(request_id)
            .await
            .map_err(Self::map_ledger_error)?
            .ok_or_else(|| DomainError::not_found("connection request not found"))?;

        if request.receiver_id != *caller {
            return Err(DomainError::forbidden(
                "only the receiver may respond to this request",
            ));
        }
        if request.status != RequestStatus::Pending {
            return Err(DomainError::invalid_operation(
                "this request has already been processed",
            ));
        }

        // The conditional update inside `resolve` settles concurrent
        // responders: the loser surfaces StaleStatus and maps to
        // InvalidOperation above in `map_ledger_error`.
        let updated = self
            .connections
            .resolve(request_id, decision)
            .await
            .map_err(Self::map_ledger_error)?;
        let responded_at = updated
            .responded_at
            .ok_or_else(|| DomainError::internal("resolved request missing response timestamp"))?;

        let message = match decision {
            RequestDecision::Accept => "Connection request accepted",
            RequestDecision::Decline => "Connection request declined",
        };
        Ok(ConnectionResponseOutcome {
            request_id: updated.id,
            status: updated.status,
            responded_at,
            message: message.to_owned(),
        })
    }
}

#[async_trait]
impl<U, C, L> ConnectionsCommand for ConnectionService<U, C, L>
where
    U: UserRepository,
    C: ConnectionRequestRepository,
    L: UserSkillRepository,
{
    async fn send_request(
        &self,
        request: SendConnectionRequest,
    ) -> Result<SentConnectionRequest, DomainError> {
        // Checked before any lookup so a self-request is always reported as
        // an invalid operation, never as a missing or forbidden profile.
        if request.sender_id == request.receiver_id {
            return Err(DomainError::invalid_operation(
                "cannot send a connection request to yourself",
            ));
        }
        if let Some(message) = &request.message {
            if message.chars().count() > MAX_REQUEST_MESSAGE_CHARS {
                return Err(DomainError::invalid_request(format!(
                    "message must be at most {MAX_REQUEST_MESSAGE_CHARS} characters"
                )));
            }
        }

        let sender = self.active_user(&request.sender_id, "sender not found").await?;
        let receiver = self
            .users
            .find_by_id(&request.receiver_id)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| DomainError::not_found("receiver not found"))?;
        if !receiver.profile_public || !receiver.active {
            return Err(DomainError::forbidden(
                "cannot send a connection request to this user",
            ));
        }

        let created = self
            .connections
            .create_pending(NewConnectionRequest {
                sender_id: sender.id,
                receiver_id: receiver.id,
                message: request.message,
            })
            .await
            .map_err(Self::map_ledger_error)?;

        let message = format!("Connection request sent to {}", receiver.full_name());
        Ok(SentConnectionRequest {
            request: created,
            message,
        })
    }

    async fn accept(
        &self,
        caller: &UserId,
        request_id: &ConnectionRequestId,
    ) -> Result<ConnectionResponseOutcome, DomainError> {
        self.respond(caller, request_id, RequestDecision::Accept).await
    }

    async fn decline(
        &self,
        caller: &UserId,
        request_id: &ConnectionRequestId,
    ) -> Result<ConnectionResponseOutcome, DomainError> {
        self.respond(caller, request_id, RequestDecision::Decline).await
    }
}

#[async_trait]
impl<U, C, L> ConnectionsQuery for ConnectionService<U, C, L>
where
    U: UserRepository,
    C: ConnectionRequestRepository,
    L: UserSkillRepository,
{
    async fn list_received(
        &self,
        caller: &UserId,
    ) -> Result<Vec<ConnectionRequestView>, DomainError> {
        self.active_user(caller, "user not found").await?;
        let requests = self
            .connections
            .list_for_receiver(caller, RequestStatus::Pending)
            .await
            .map_err(Self::map_ledger_error)?;
        self.pending_views(requests).await
    }

    async fn list_sent(&self, caller: &UserId) -> Result<Vec<ConnectionRequestView>, DomainError> {
        self.active_user(caller, "user not found").await?;
        let requests = self
            .connections
            .list_for_sender(caller, RequestStatus::Pending)
            .await
            .map_err(Self::map_ledger_error)?;
        self.pending_views(requests).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Availability;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{
        MockConnectionRequestRepository, MockUserRepository, MockUserSkillRepository,
    };
    use chrono::Utc;
    use rstest::rstest;

    fn member(id: UserId, public: bool, active: bool) -> User {
        User {
            id,
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: format!("{id}@example.com"),
            bio: None,
            location: None,
            profile_public: public,
            active,
            email_verified: true,
            availability: Availability::Flexible,
            average_rating: 0.0,
            total_reviews: 0,
            completed_swaps: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn pending_request(
        id: ConnectionRequestId,
        sender_id: UserId,
        receiver_id: UserId,
    ) -> ConnectionRequest {
        ConnectionRequest {
            id,
            sender_id,
            receiver_id,
            message: None,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
            responded_at: None,
        }
    }

    fn service(
        users: MockUserRepository,
        connections: MockConnectionRequestRepository,
    ) -> ConnectionService<
        MockUserRepository,
        MockConnectionRequestRepository,
        MockUserSkillRepository,
    > {
        let mut user_skills = MockUserSkillRepository::new();
        user_skills.expect_skill_names().returning(|_, _| Ok(Vec::new()));
        ConnectionService::new(Arc::new(users), Arc::new(connections), Arc::new(user_skills))
    }

    fn users_returning(members: Vec<User>) -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(move |id| {
            Ok(members.iter().find(|user| user.id == *id).cloned())
        });
        users
    }

    #[tokio::test]
    async fn self_request_is_invalid_before_any_lookup() {
        let caller = UserId::random();
        let service = service(
            MockUserRepository::new(),
            MockConnectionRequestRepository::new(),
        );

        let error = service
            .send_request(SendConnectionRequest {
                sender_id: caller,
                receiver_id: caller,
                message: None,
            })
            .await
            .expect_err("self request must fail");

        assert_eq!(error.code(), ErrorCode::InvalidOperation);
    }

    #[tokio::test]
    async fn oversized_message_is_rejected() {
        let service = service(
            MockUserRepository::new(),
            MockConnectionRequestRepository::new(),
        );

        let error = service
            .send_request(SendConnectionRequest {
                sender_id: UserId::random(),
                receiver_id: UserId::random(),
                message: Some("x".repeat(MAX_REQUEST_MESSAGE_CHARS + 1)),
            })
            .await
            .expect_err("oversized message must fail");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn send_request_creates_pending_request() {
        let sender = member(UserId::random(), true, true);
        let receiver = member(UserId::random(), true, true);
        let users = users_returning(vec![sender.clone(), receiver.clone()]);

        let mut connections = MockConnectionRequestRepository::new();
        let sender_id = sender.id;
        let receiver_id = receiver.id;
        connections
            .expect_create_pending()
            .withf(move |request| {
                request.sender_id == sender_id
                    && request.receiver_id == receiver_id
                    && request.message.as_deref() == Some("hi")
            })
            .times(1)
            .returning(|request| {
                Ok(ConnectionRequest {
                    id: ConnectionRequestId::random(),
                    sender_id: request.sender_id,
                    receiver_id: request.receiver_id,
                    message: request.message,
                    status: RequestStatus::Pending,
                    created_at: Utc::now(),
                    responded_at: None,
                })
            });

        let outcome = service(users, connections)
            .send_request(SendConnectionRequest {
                sender_id: sender.id,
                receiver_id: receiver.id,
                message: Some("hi".to_owned()),
            })
            .await
            .expect("request should be created");

        assert_eq!(outcome.request.status, RequestStatus::Pending);
        assert!(outcome.message.contains("Ada Lovelace"));
    }

    #[tokio::test]
    async fn duplicate_pair_maps_to_conflict() {
        let sender = member(UserId::random(), true, true);
        let receiver = member(UserId::random(), true, true);
        let users = users_returning(vec![sender.clone(), receiver.clone()]);

        let mut connections = MockConnectionRequestRepository::new();
        connections
            .expect_create_pending()
            .returning(|_| Err(ConnectionRepositoryError::DuplicatePair));

        let error = service(users, connections)
            .send_request(SendConnectionRequest {
                sender_id: sender.id,
                receiver_id: receiver.id,
                message: None,
            })
            .await
            .expect_err("duplicate must fail");

        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[case(false, true)]
    #[case(true, false)]
    #[tokio::test]
    async fn hidden_or_inactive_receiver_is_forbidden(
        #[case] public: bool,
        #[case] active: bool,
    ) {
        let sender = member(UserId::random(), true, true);
        let receiver = member(UserId::random(), public, active);
        let users = users_returning(vec![sender.clone(), receiver.clone()]);

        let error = service(users, MockConnectionRequestRepository::new())
            .send_request(SendConnectionRequest {
                sender_id: sender.id,
                receiver_id: receiver.id,
                message: None,
            })
            .await
            .expect_err("must be forbidden");

        assert_eq!(error.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn inactive_sender_is_not_found() {
        let sender = member(UserId::random(), true, false);
        let receiver = member(UserId::random(), true, true);
        let users = users_returning(vec![sender.clone(), receiver.clone()]);

        let error = service(users, MockConnectionRequestRepository::new())
            .send_request(SendConnectionRequest {
                sender_id: sender.id,
                receiver_id: receiver.id,
                message: None,
            })
            .await
            .expect_err("inactive sender must fail");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn accept_by_non_receiver_is_forbidden() {
        let outsider = member(UserId::random(), true, true);
        let request = pending_request(
            ConnectionRequestId::random(),
            UserId::random(),
            UserId::random(),
        );
        let users = users_returning(vec![outsider.clone()]);

        let mut connections = MockConnectionRequestRepository::new();
        let stored = request.clone();
        connections
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));

        let error = service(users, connections)
            .accept(&outsider.id, &request.id)
            .await
            .expect_err("outsider must not accept");

        assert_eq!(error.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn accept_of_processed_request_is_invalid() {
        let receiver = member(UserId::random(), true, true);
        let mut request =
            pending_request(ConnectionRequestId::random(), UserId::random(), receiver.id);
        request.status = RequestStatus::Declined;
        request.responded_at = Some(Utc::now());
        let users = users_returning(vec![receiver.clone()]);

        let mut connections = MockConnectionRequestRepository::new();
        let stored = request.clone();
        connections
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));

        let error = service(users, connections)
            .accept(&receiver.id, &request.id)
            .await
            .expect_err("processed request must not accept");

        assert_eq!(error.code(), ErrorCode::InvalidOperation);
    }

    #[tokio::test]
    async fn losing_a_resolve_race_is_invalid_operation() {
        let receiver = member(UserId::random(), true, true);
        let request =
            pending_request(ConnectionRequestId::random(), UserId::random(), receiver.id);
        let users = users_returning(vec![receiver.clone()]);

        let mut connections = MockConnectionRequestRepository::new();
        let stored = request.clone();
        connections
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        connections.expect_resolve().returning(|_, _| {
            Err(ConnectionRepositoryError::StaleStatus {
                status: RequestStatus::Accepted,
            })
        });

        let error = service(users, connections)
            .decline(&receiver.id, &request.id)
            .await
            .expect_err("race loser must fail");

        assert_eq!(error.code(), ErrorCode::InvalidOperation);
    }

    #[tokio::test]
    async fn accept_sets_terminal_state_and_timestamp() {
        let receiver = member(UserId::random(), true, true);
        let request =
            pending_request(ConnectionRequestId::random(), UserId::random(), receiver.id);
        let users = users_returning(vec![receiver.clone()]);

        let mut connections = MockConnectionRequestRepository::new();
        let stored = request.clone();
        connections
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        let resolved = request.clone();
        connections
            .expect_resolve()
            .withf(|_, decision| *decision == RequestDecision::Accept)
            .times(1)
            .returning(move |_, _| {
                let mut updated = resolved.clone();
                updated.status = RequestStatus::Accepted;
                updated.responded_at = Some(Utc::now());
                Ok(updated)
            });

        let outcome = service(users, connections)
            .accept(&receiver.id, &request.id)
            .await
            .expect("accept should succeed");

        assert_eq!(outcome.status, RequestStatus::Accepted);
        assert_eq!(outcome.request_id, request.id);
    }

    #[tokio::test]
    async fn list_received_resolves_profiles() {
        let sender = member(UserId::random(), true, true);
        let receiver = member(UserId::random(), true, true);
        let request = pending_request(ConnectionRequestId::random(), sender.id, receiver.id);
        let users = users_returning(vec![sender.clone(), receiver.clone()]);

        let mut connections = MockConnectionRequestRepository::new();
        let stored = request.clone();
        connections
            .expect_list_for_receiver()
            .withf(|_, status| *status == RequestStatus::Pending)
            .returning(move |_, _| Ok(vec![stored.clone()]));

        let views = service(users, connections)
            .list_received(&receiver.id)
            .await
            .expect("listing should succeed");

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].sender.id, sender.id);
        assert_eq!(views[0].receiver.id, receiver.id);
    }
}
