//! Driving port for connection request mutations.
//!
//! Inbound adapters (HTTP handlers) act on the ledger through this port so
//! they stay independent of persistence concerns.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    ConnectionRequest, ConnectionRequestId, DomainError, RequestStatus, UserId,
};

/// Input for sending a connection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendConnectionRequest {
    /// Authenticated caller initiating the request.
    pub sender_id: UserId,
    /// Member asked to respond.
    pub receiver_id: UserId,
    /// Optional greeting, at most
    /// [`MAX_REQUEST_MESSAGE_CHARS`](crate::domain::MAX_REQUEST_MESSAGE_CHARS)
    /// characters.
    pub message: Option<String>,
}

/// Successful outcome of sending a request.
#[derive(Debug, Clone, PartialEq)]
pub struct SentConnectionRequest {
    /// The newly created pending request.
    pub request: ConnectionRequest,
    /// Human-readable confirmation for the caller.
    pub message: String,
}

/// Successful outcome of accepting or declining a request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionResponseOutcome {
    /// The resolved request.
    pub request_id: ConnectionRequestId,
    /// Terminal status the request reached.
    pub status: RequestStatus,
    /// When the receiver responded.
    pub responded_at: DateTime<Utc>,
    /// Human-readable confirmation for the caller.
    pub message: String,
}

/// Use-case port for mutating the connection ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionsCommand: Send + Sync {
    /// Create a new pending request from sender to receiver.
    async fn send_request(
        &self,
        request: SendConnectionRequest,
    ) -> Result<SentConnectionRequest, DomainError>;

    /// Accept a pending request; the caller must be its receiver.
    async fn accept(
        &self,
        caller: &UserId,
        request_id: &ConnectionRequestId,
    ) -> Result<ConnectionResponseOutcome, DomainError>;

    /// Decline a pending request; the caller must be its receiver.
    async fn decline(
        &self,
        caller: &UserId,
        request_id: &ConnectionRequestId,
    ) -> Result<ConnectionResponseOutcome, DomainError>;
}
