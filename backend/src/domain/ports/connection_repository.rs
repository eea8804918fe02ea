//! Port for connection ledger persistence adapters.

use async_trait::async_trait;

use crate::domain::{
    ConnectionRequest, ConnectionRequestId, RequestDecision, RequestStatus, UserId,
};

/// Payload for creating a new pending request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConnectionRequest {
    /// Member initiating the request.
    pub sender_id: UserId,
    /// Member asked to respond.
    pub receiver_id: UserId,
    /// Optional greeting from the sender.
    pub message: Option<String>,
}

/// Persistence errors raised by connection ledger adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionRepositoryError {
    /// Repository connection could not be established.
    #[error("connection ledger connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("connection ledger query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
    /// A pending or accepted request already links the pair, in either
    /// direction.
    #[error("a pending or accepted request already exists between these users")]
    DuplicatePair,
    /// The request left the `PENDING` state before the transition applied.
    #[error("request is no longer pending: {status}")]
    StaleStatus {
        /// Status observed after the conditional update missed.
        status: RequestStatus,
    },
}

impl ConnectionRepositoryError {
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

/// Port for the connection request ledger.
///
/// Adapters enforce the duplicate-prevention invariant atomically: the
/// existence check and the insert in [`create_pending`] cannot interleave
/// with a concurrent insert for the same pair, and
/// [`resolve`] applies the status transition as a single conditional update
/// so only one of two racing responders succeeds.
///
/// [`create_pending`]: ConnectionRequestRepository::create_pending
/// [`resolve`]: ConnectionRequestRepository::resolve
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionRequestRepository: Send + Sync {
    /// Insert a new `PENDING` request, failing with
    /// [`ConnectionRepositoryError::DuplicatePair`] when a pending or
    /// accepted request already exists between the two users in either
    /// direction.
    async fn create_pending(
        &self,
        request: NewConnectionRequest,
    ) -> Result<ConnectionRequest, ConnectionRepositoryError>;

    /// Fetch a request by identifier.
    async fn find_by_id(
        &self,
        id: &ConnectionRequestId,
    ) -> Result<Option<ConnectionRequest>, ConnectionRepositoryError>;

    /// All requests a user has received in the given status, in insertion
    /// order.
    async fn list_for_receiver(
        &self,
        receiver_id: &UserId,
        status: RequestStatus,
    ) -> Result<Vec<ConnectionRequest>, ConnectionRepositoryError>;

    /// All requests a user has sent in the given status, in insertion order.
    async fn list_for_sender(
        &self,
        sender_id: &UserId,
        status: RequestStatus,
    ) -> Result<Vec<ConnectionRequest>, ConnectionRepositoryError>;

    /// Apply the receiver's decision to a still-pending request, setting the
    /// terminal status and `responded_at` together. Fails with
    /// [`ConnectionRepositoryError::StaleStatus`] when the request is no
    /// longer pending.
    async fn resolve(
        &self,
        id: &ConnectionRequestId,
        decision: RequestDecision,
    ) -> Result<ConnectionRequest, ConnectionRepositoryError>;

    /// Count all requests regardless of status.
    async fn count_all(&self) -> Result<u64, ConnectionRepositoryError>;

    /// Count requests that reached `ACCEPTED`.
    async fn count_accepted(&self) -> Result<u64, ConnectionRepositoryError>;
}
