//! User directory data model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
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

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// When a member is available for skill exchanges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    /// Weekends only.
    Weekend,
    /// Regular working hours.
    Working,
    /// No fixed schedule.
    #[default]
    Flexible,
}

/// Error raised when parsing an [`Availability`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised availability value: {value}")]
pub struct AvailabilityParseError {
    /// The rejected input.
    pub value: String,
}

impl Availability {
    /// Canonical storage representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weekend => "WEEKEND",
            Self::Working => "WORKING",
            Self::Flexible => "FLEXIBLE",
        }
    }
}

impl FromStr for Availability {
    type Err = AvailabilityParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "WEEKEND" => Ok(Self::Weekend),
            "WORKING" => Ok(Self::Working),
            "FLEXIBLE" => Ok(Self::Flexible),
            _ => Err(AvailabilityParseError {
                value: value.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered member of the platform.
///
/// Rating aggregates (`average_rating`, `total_reviews`, `completed_swaps`)
/// are maintained by the review subsystem; this core only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique contact address; doubles as the login identity.
    pub email: String,
    /// Free-form self description.
    pub bio: Option<String>,
    /// Free-form location string.
    pub location: Option<String>,
    /// Whether the profile may appear in discovery results.
    pub profile_public: bool,
    /// Whether the account is enabled.
    pub active: bool,
    /// Whether the contact address has been confirmed.
    pub email_verified: bool,
    /// Preferred exchange schedule.
    pub availability: Availability,
    /// Mean review score in `[0, 5]`.
    pub average_rating: f64,
    /// Number of reviews backing the average.
    pub total_reviews: i32,
    /// Number of completed exchanges.
    pub completed_swaps: i32,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Display name combining first and last name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether the profile satisfies all three discovery gates
    /// (public, active, verified).
    pub const fn discoverable(&self) -> bool {
        self.profile_public && self.active && self.email_verified
    }
}
