//! Driving port for connection request listings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    ConnectionRequestId, DomainError, ProfileSummary, RequestStatus, UserId,
};

/// A connection request with both parties resolved to profile summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRequestView {
    /// Stable identifier.
    pub id: ConnectionRequestId,
    /// Optional greeting from the sender.
    pub message: Option<String>,
    /// Current lifecycle state.
    pub status: RequestStatus,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When the receiver responded, if they have.
    pub responded_at: Option<DateTime<Utc>>,
    /// Profile of the initiating member.
    pub sender: ProfileSummary,
    /// Profile of the responding member.
    pub receiver: ProfileSummary,
}

/// Use-case port for listing a member's pending requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionsQuery: Send + Sync {
    /// Pending requests where the caller is the receiver.
    async fn list_received(
        &self,
        caller: &UserId,
    ) -> Result<Vec<ConnectionRequestView>, DomainError>;

    /// Pending requests where the caller is the sender.
    async fn list_sent(&self, caller: &UserId) -> Result<Vec<ConnectionRequestView>, DomainError>;
}
