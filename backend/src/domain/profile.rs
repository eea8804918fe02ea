//! Discovery-facing profile projections and platform statistics.

use pagination::PageRequest;
use serde::{Deserialize, Serialize};

use super::user::{Availability, User, UserId};

/// Public projection of a member's profile.
///
/// This is the shape discovery and connection listings expose; it never
/// carries credentials, flags, or the email address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    /// Stable identifier.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Free-form self description.
    pub bio: Option<String>,
    /// Free-form location string.
    pub location: Option<String>,
    /// Preferred exchange schedule.
    pub availability: Availability,
    /// Mean review score in `[0, 5]`.
    pub average_rating: f64,
    /// Number of reviews backing the average.
    pub total_reviews: i32,
    /// Number of completed exchanges.
    pub completed_swaps: i32,
    /// Names of skills the member teaches.
    pub skills_offered: Vec<String>,
    /// Names of skills the member wants to learn.
    pub skills_wanted: Vec<String>,
}

impl ProfileSummary {
    /// Project a user record plus resolved skill name lists.
    pub fn project(user: &User, skills_offered: Vec<String>, skills_wanted: Vec<String>) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            bio: user.bio.clone(),
            location: user.location.clone(),
            availability: user.availability,
            average_rating: user.average_rating,
            total_reviews: user.total_reviews,
            completed_swaps: user.completed_swaps,
            skills_offered,
            skills_wanted,
        }
    }
}

/// Filter and page selection for profile discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSearchFilter {
    /// Case-insensitive substring matched against names and skill names.
    /// `None` (or whitespace-only input, normalised at the boundary) means
    /// no text filter.
    pub search_text: Option<String>,
    /// Exact availability to require; `None` means no filter. Unrecognised
    /// availability strings are mapped to `None` at the boundary.
    pub availability: Option<Availability>,
    /// Page window to return.
    pub page: PageRequest,
}

/// Partial profile update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New self description.
    pub bio: Option<String>,
    /// New location string.
    pub location: Option<String>,
    /// New discovery visibility.
    pub profile_public: Option<bool>,
    /// New exchange schedule.
    pub availability: Option<Availability>,
}

impl ProfileChanges {
    /// Whether the update carries no field at all.
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.bio.is_none()
            && self.location.is_none()
            && self.profile_public.is_none()
            && self.availability.is_none()
    }
}

/// Aggregate counters backing the landing-page dashboard.
///
/// Each counter degrades to zero when its underlying query fails; the
/// operation producing these never hard-fails the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    /// Active members with a verified email.
    pub active_members: u64,
    /// Connection requests that reached `ACCEPTED`.
    pub successful_matches: u64,
    /// Distinct skills with at least one offered link.
    pub total_skills_offered: u64,
    /// All connection requests regardless of status.
    pub total_connection_requests: u64,
}
