//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

/// Aggregated OpenAPI description served through Swagger UI in debug builds.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SkillSwap backend",
        description = "Connection-request lifecycle and profile discovery API"
    ),
    paths(
        crate::inbound::http::health::health,
        crate::inbound::http::profiles::search_profiles,
        crate::inbound::http::profiles::get_profile,
        crate::inbound::http::profiles::platform_stats,
        crate::inbound::http::profiles::own_profile,
        crate::inbound::http::profiles::update_profile,
        crate::inbound::http::profiles::update_skills,
        crate::inbound::http::connections::send_request,
        crate::inbound::http::connections::received_requests,
        crate::inbound::http::connections::sent_requests,
        crate::inbound::http::connections::accept_request,
        crate::inbound::http::connections::decline_request,
    ),
    components(schemas(
        crate::domain::ErrorCode,
        crate::domain::Availability,
        crate::domain::RequestStatus,
        crate::inbound::http::error::ApiError,
        crate::inbound::http::profiles::ProfileSummaryDto,
        crate::inbound::http::profiles::ProfileSearchResponse,
        crate::inbound::http::profiles::PlatformStatsDto,
        crate::inbound::http::profiles::UpdateProfileBody,
        crate::inbound::http::profiles::UpdateSkillsBody,
        crate::inbound::http::profiles::ProfileUpdateResponse,
        crate::inbound::http::connections::SendRequestBody,
        crate::inbound::http::connections::SendRequestResponse,
        crate::inbound::http::connections::RequestResolutionResponse,
        crate::inbound::http::connections::ConnectionRequestDto,
    )),
    tags(
        (name = "connections", description = "Connection request lifecycle"),
        (name = "profiles", description = "Profile discovery and self-service"),
        (name = "health", description = "Service probes")
    )
)]
pub struct ApiDoc;
