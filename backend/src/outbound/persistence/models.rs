//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. Conversions into domain types live here so every adapter maps
//! rows the same way.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Availability, ConnectionRequest, ConnectionRequestId, RequestStatus, RequestStatusParseError,
    Skill, SkillId, User, UserId,
};

use super::schema::{connection_requests, skills, user_skills, users};

/// Row struct for reading from the users table.
///
/// Also derives `QueryableByName` so the raw discovery search query can load
/// it directly.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub profile_public: bool,
    pub active: bool,
    pub email_verified: bool,
    pub availability: String,
    pub average_rating: f64,
    pub total_reviews: i32,
    pub completed_swaps: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let availability = match row.availability.parse::<Availability>() {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(
                    user_id = %row.id,
                    value = %err.value,
                    "unrecognised availability value, defaulting to FLEXIBLE"
                );
                Availability::Flexible
            }
        };
        Self {
            id: UserId::from_uuid(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            bio: row.bio,
            location: row.location,
            profile_public: row.profile_public,
            active: row.active,
            email_verified: row.email_verified,
            availability,
            average_rating: row.average_rating,
            total_reviews: row.total_reviews,
            completed_swaps: row.completed_swaps,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Changeset struct for partial profile updates.
///
/// `None` fields are skipped; `updated_at` is always set so the changeset is
/// never empty.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserProfileChangeset<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub location: Option<&'a str>,
    pub profile_public: Option<bool>,
    pub availability: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for counting results of raw queries.
#[derive(Debug, QueryableByName)]
pub(crate) struct CountRow {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub count: i64,
}

/// Row struct for reading from the skills table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = skills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SkillRow {
    pub id: Uuid,
    pub name: String,
    #[expect(dead_code, reason = "lookup key column, only queried by filter")]
    pub name_key: String,
    pub category: String,
    pub description: Option<String>,
    #[expect(dead_code, reason = "schema field not exposed through the domain")]
    pub created_at: DateTime<Utc>,
}

impl From<SkillRow> for Skill {
    fn from(row: SkillRow) -> Self {
        Self {
            id: SkillId::from_uuid(row.id),
            name: row.name,
            category: row.category,
            description: row.description,
        }
    }
}

/// Insertable struct for creating catalog skills.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = skills)]
pub(crate) struct NewSkillRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub name_key: &'a str,
    pub category: &'a str,
    pub description: Option<&'a str>,
}

/// Insertable struct for creating skill links.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_skills)]
pub(crate) struct NewUserSkillRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skill_id: Uuid,
    pub direction: &'a str,
}

/// Row struct for reading from the connection_requests table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = connection_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ConnectionRequestRow {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub message: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl TryFrom<ConnectionRequestRow> for ConnectionRequest {
    type Error = RequestStatusParseError;

    fn try_from(row: ConnectionRequestRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<RequestStatus>()?;
        Ok(Self {
            id: ConnectionRequestId::from_uuid(row.id),
            sender_id: UserId::from_uuid(row.sender_id),
            receiver_id: UserId::from_uuid(row.receiver_id),
            message: row.message,
            status,
            created_at: row.created_at,
            responded_at: row.responded_at,
        })
    }
}

/// Insertable struct for creating pending requests.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = connection_requests)]
pub(crate) struct NewConnectionRequestRow<'a> {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub message: Option<&'a str>,
    pub status: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn user_row(availability: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            bio: None,
            location: None,
            profile_public: true,
            active: true,
            email_verified: true,
            availability: availability.to_owned(),
            average_rating: 4.5,
            total_reviews: 2,
            completed_swaps: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    fn user_row_converts_known_availability() {
        let user = User::from(user_row("WEEKEND"));
        assert_eq!(user.availability, Availability::Weekend);
    }

    #[rstest]
    fn user_row_defaults_unknown_availability() {
        let user = User::from(user_row("WHENEVER"));
        assert_eq!(user.availability, Availability::Flexible);
    }

    #[rstest]
    fn connection_row_rejects_unknown_status() {
        let row = ConnectionRequestRow {
            id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            receiver_id: Uuid::new_v4(),
            message: None,
            status: "EXPIRED".to_owned(),
            created_at: Utc::now(),
            responded_at: None,
        };

        assert!(ConnectionRequest::try_from(row).is_err());
    }

    #[rstest]
    fn connection_row_converts_pending_request() {
        let row = ConnectionRequestRow {
            id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            receiver_id: Uuid::new_v4(),
            message: Some("hi".to_owned()),
            status: "PENDING".to_owned(),
            created_at: Utc::now(),
            responded_at: None,
        };

        let request = ConnectionRequest::try_from(row).expect("valid row");
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.message.as_deref(), Some("hi"));
    }
}
