//! Connection ledger data model and request state machine.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;

/// Longest message a connection request may carry, in characters.
pub const MAX_REQUEST_MESSAGE_CHARS: usize = 1000;

/// Stable connection-request identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ConnectionRequestId(Uuid);

impl ConnectionRequestId {
    /// Wrap an existing UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ConnectionRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle state of a connection request.
///
/// `Pending` is the sole initial state. `Accepted` and `Declined` are
/// terminal and reachable only by the receiver. `Cancelled` is a reserved
/// terminal state: no operation currently transitions into it (a
/// sender-scoped cancel is a documented extension point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Awaiting a response from the receiver.
    Pending,
    /// Accepted by the receiver.
    Accepted,
    /// Declined by the receiver.
    Declined,
    /// Withdrawn by the sender (reserved, currently unreachable).
    Cancelled,
}

impl RequestStatus {
    /// Canonical storage representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Declined => "DECLINED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Whether no further transition may leave this state.
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Whether a request in this state blocks a new request between the
    /// same pair of users.
    pub const fn blocks_new_request(&self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }
}

/// Error raised when parsing a [`RequestStatus`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised request status: {value}")]
pub struct RequestStatusParseError {
    /// The rejected input.
    pub value: String,
}

impl FromStr for RequestStatus {
    type Err = RequestStatusParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "ACCEPTED" => Ok(Self::Accepted),
            "DECLINED" => Ok(Self::Declined),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(RequestStatusParseError {
                value: value.to_owned(),
            }),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The receiver's decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestDecision {
    /// Transition to [`RequestStatus::Accepted`].
    Accept,
    /// Transition to [`RequestStatus::Declined`].
    Decline,
}

impl RequestDecision {
    /// Terminal status this decision transitions into.
    pub const fn terminal_status(&self) -> RequestStatus {
        match self {
            Self::Accept => RequestStatus::Accepted,
            Self::Decline => RequestStatus::Declined,
        }
    }
}

/// A bilateral invitation between two members.
///
/// References both users by id without owning them. `responded_at` is set
/// exactly once, together with the transition out of `Pending`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRequest {
    /// Stable identifier.
    pub id: ConnectionRequestId,
    /// Member who initiated the request.
    pub sender_id: UserId,
    /// Member asked to respond.
    pub receiver_id: UserId,
    /// Optional greeting from the sender.
    pub message: Option<String>,
    /// Current lifecycle state.
    pub status: RequestStatus,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When the receiver responded, if they have.
    pub responded_at: Option<DateTime<Utc>>,
}
