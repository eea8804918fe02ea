//! Profile discovery and self-service HTTP handlers.
//!
//! ```text
//! GET  /api/v1/profiles?search=&availability=&page=&size=
//! GET  /api/v1/profiles/{id}
//! GET  /api/v1/stats
//! GET  /api/v1/profile/me
//! PUT  /api/v1/profile/me
//! POST /api/v1/profile/me/skills
//! ```

use actix_web::{get, post, put, web};
use pagination::{Page, PageRequest};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::UpdateSkillsRequest;
use crate::domain::{
    Availability, DomainError, PlatformStats, ProfileChanges, ProfileSearchFilter, ProfileSummary,
    UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::identity::CallerIdentity;
use crate::inbound::http::state::HttpState;

/// Public profile payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummaryDto {
    /// Stable user id.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Free-form self description.
    pub bio: Option<String>,
    /// Free-form location string.
    pub location: Option<String>,
    /// Exchange schedule.
    pub availability: Availability,
    /// Mean review score.
    pub average_rating: f64,
    /// Review count.
    pub total_reviews: i32,
    /// Completed exchange count.
    pub completed_swaps: i32,
    /// Skills the member teaches.
    pub skills_offered: Vec<String>,
    /// Skills the member wants to learn.
    pub skills_wanted: Vec<String>,
}

impl From<ProfileSummary> for ProfileSummaryDto {
    fn from(summary: ProfileSummary) -> Self {
        Self {
            id: *summary.id.as_uuid(),
            first_name: summary.first_name,
            last_name: summary.last_name,
            bio: summary.bio,
            location: summary.location,
            availability: summary.availability,
            average_rating: summary.average_rating,
            total_reviews: summary.total_reviews,
            completed_swaps: summary.completed_swaps,
            skills_offered: summary.skills_offered,
            skills_wanted: summary.skills_wanted,
        }
    }
}

/// Query parameters accepted by the discovery search.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Zero-based page index.
    #[serde(default)]
    pub page: u32,
    /// Page size; defaults to 6.
    #[serde(default = "default_page_size")]
    pub size: u32,
    /// Case-insensitive substring matched against names and skill names.
    pub search: Option<String>,
    /// Availability filter; unrecognised values are ignored.
    pub availability: Option<String>,
}

const fn default_page_size() -> u32 {
    6
}

/// Paged search response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSearchResponse {
    /// Profiles on this page, rating-ordered.
    pub profiles: Vec<ProfileSummaryDto>,
    /// Zero-based index of this page.
    pub current_page: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Total matching profiles.
    pub total_elements: u64,
    /// Total pages at the requested size.
    pub total_pages: u64,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_previous: bool,
}

impl From<Page<ProfileSummary>> for ProfileSearchResponse {
    fn from(page: Page<ProfileSummary>) -> Self {
        Self {
            current_page: page.page,
            page_size: page.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
            has_next: page.has_next,
            has_previous: page.has_previous,
            profiles: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Platform dashboard counters.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStatsDto {
    /// Active members with a verified email.
    pub active_members: u64,
    /// Accepted connection requests.
    pub successful_matches: u64,
    /// Distinct skills with at least one offered link.
    pub total_skills_offered: u64,
    /// All connection requests regardless of status.
    pub total_connection_requests: u64,
}

impl From<PlatformStats> for PlatformStatsDto {
    fn from(stats: PlatformStats) -> Self {
        Self {
            active_members: stats.active_members,
            successful_matches: stats.successful_matches,
            total_skills_offered: stats.total_skills_offered,
            total_connection_requests: stats.total_connection_requests,
        }
    }
}

/// Partial profile update payload; absent fields are left unchanged.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileBody {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New self description.
    pub bio: Option<String>,
    /// New location string.
    pub location: Option<String>,
    /// New discovery visibility.
    pub is_profile_public: Option<bool>,
    /// New exchange schedule (`WEEKEND`, `WORKING`, or `FLEXIBLE`).
    pub availability: Option<String>,
}

/// Replacement skill lists payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSkillsBody {
    /// Skills the member teaches.
    pub skills_offered: Vec<String>,
    /// Skills the member wants to learn.
    pub skills_wanted: Vec<String>,
}

/// Confirmation payload for profile mutations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateResponse {
    /// Human-readable confirmation.
    pub message: String,
}

fn invalid_availability_error(value: &str) -> ApiError {
    ApiError::from(
        DomainError::invalid_request("availability must be WEEKEND, WORKING, or FLEXIBLE")
            .with_details(json!({ "field": "availability", "value": value })),
    )
}

/// Search public profiles.
#[utoipa::path(
    get,
    path = "/api/v1/profiles",
    params(SearchParams),
    responses(
        (status = 200, description = "One page of matching profiles", body = ProfileSearchResponse),
        (status = 400, description = "Invalid pagination", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["profiles"],
    operation_id = "searchProfiles"
)]
#[get("/profiles")]
pub async fn search_profiles(
    state: web::Data<HttpState>,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<ProfileSearchResponse>> {
    let params = params.into_inner();
    let page = PageRequest::new(params.page, params.size)
        .map_err(|err| ApiError::from(DomainError::invalid_request(err.to_string())))?;
    // An unrecognised availability value means "no filter", by contract.
    let availability = params
        .availability
        .as_deref()
        .and_then(|value| value.parse::<Availability>().ok());

    let results = state
        .profiles
        .search(ProfileSearchFilter {
            search_text: params.search,
            availability,
            page,
        })
        .await?;
    Ok(web::Json(ProfileSearchResponse::from(results)))
}

/// Fetch a single public profile.
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "The profile", body = ProfileSummaryDto),
        (status = 404, description = "Profile absent or not discoverable", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["profiles"],
    operation_id = "getPublicProfile"
)]
#[get("/profiles/{id}")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<ProfileSummaryDto>> {
    let id = UserId::from_uuid(path.into_inner());
    let summary = state.profiles.public_profile(&id).await?;
    Ok(web::Json(summary.into()))
}

/// Platform statistics for the landing page.
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    responses(
        (status = 200, description = "Aggregate counters", body = PlatformStatsDto)
    ),
    tags = ["profiles"],
    operation_id = "getPlatformStats"
)]
#[get("/stats")]
pub async fn platform_stats(state: web::Data<HttpState>) -> web::Json<PlatformStatsDto> {
    web::Json(state.profiles.platform_stats().await.into())
}

/// Fetch the caller's own profile.
#[utoipa::path(
    get,
    path = "/api/v1/profile/me",
    responses(
        (status = 200, description = "The caller's profile", body = ProfileSummaryDto),
        (status = 401, description = "Missing caller identity", body = ApiError),
        (status = 404, description = "Unknown or inactive caller", body = ApiError)
    ),
    tags = ["profiles"],
    operation_id = "getOwnProfile"
)]
#[get("/profile/me")]
pub async fn own_profile(
    state: web::Data<HttpState>,
    caller: CallerIdentity,
) -> ApiResult<web::Json<ProfileSummaryDto>> {
    let summary = state.profiles.own_profile(&caller.user_id()).await?;
    Ok(web::Json(summary.into()))
}

/// Update the caller's profile fields.
#[utoipa::path(
    put,
    path = "/api/v1/profile/me",
    request_body = UpdateProfileBody,
    responses(
        (status = 200, description = "Profile updated", body = ProfileUpdateResponse),
        (status = 400, description = "Invalid field value", body = ApiError),
        (status = 401, description = "Missing caller identity", body = ApiError),
        (status = 404, description = "Unknown or inactive caller", body = ApiError)
    ),
    tags = ["profiles"],
    operation_id = "updateProfile"
)]
#[put("/profile/me")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    caller: CallerIdentity,
    payload: web::Json<UpdateProfileBody>,
) -> ApiResult<web::Json<ProfileUpdateResponse>> {
    let body = payload.into_inner();
    // Unlike the search filter, a bad availability here is a caller mistake
    // and must be reported, not ignored.
    let availability = match body.availability.as_deref() {
        Some(value) => Some(
            value
                .parse::<Availability>()
                .map_err(|_| invalid_availability_error(value))?,
        ),
        None => None,
    };

    let outcome = state
        .profiles_command
        .update_profile(
            &caller.user_id(),
            ProfileChanges {
                first_name: body.first_name,
                last_name: body.last_name,
                bio: body.bio,
                location: body.location,
                profile_public: body.is_profile_public,
                availability,
            },
        )
        .await?;
    Ok(web::Json(ProfileUpdateResponse {
        message: outcome.message,
    }))
}

/// Replace the caller's skill lists.
#[utoipa::path(
    post,
    path = "/api/v1/profile/me/skills",
    request_body = UpdateSkillsBody,
    responses(
        (status = 200, description = "Skills updated", body = ProfileUpdateResponse),
        (status = 401, description = "Missing caller identity", body = ApiError),
        (status = 404, description = "Unknown or inactive caller", body = ApiError)
    ),
    tags = ["profiles"],
    operation_id = "updateSkills"
)]
#[post("/profile/me/skills")]
pub async fn update_skills(
    state: web::Data<HttpState>,
    caller: CallerIdentity,
    payload: web::Json<UpdateSkillsBody>,
) -> ApiResult<web::Json<ProfileUpdateResponse>> {
    let body = payload.into_inner();
    let outcome = state
        .profiles_command
        .update_skills(
            &caller.user_id(),
            UpdateSkillsRequest {
                offered: body.skills_offered,
                wanted: body.skills_wanted,
            },
        )
        .await?;
    Ok(web::Json(ProfileUpdateResponse {
        message: outcome.message,
    }))
}
