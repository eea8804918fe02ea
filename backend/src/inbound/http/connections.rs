//! Connection request HTTP handlers.
//!
//! ```text
//! POST /api/v1/connections/request
//! GET  /api/v1/connections/received
//! GET  /api/v1/connections/sent
//! PUT  /api/v1/connections/{request_id}/accept
//! PUT  /api/v1/connections/{request_id}/decline
//! ```

use actix_web::{get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{
    ConnectionRequestView, ConnectionResponseOutcome, SendConnectionRequest, SentConnectionRequest,
};
use crate::domain::{ConnectionRequestId, RequestStatus, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::CallerIdentity;
use crate::inbound::http::profiles::ProfileSummaryDto;
use crate::inbound::http::state::HttpState;

/// Payload for sending a connection request.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendRequestBody {
    /// Member to connect with.
    pub receiver_id: Uuid,
    /// Optional greeting, at most 1000 characters.
    pub message: Option<String>,
}

/// Confirmation payload for a sent request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendRequestResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Identifier of the created request.
    pub request_id: Uuid,
    /// Initial lifecycle state, always `PENDING`.
    pub status: RequestStatus,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
}

impl From<SentConnectionRequest> for SendRequestResponse {
    fn from(outcome: SentConnectionRequest) -> Self {
        Self {
            message: outcome.message,
            request_id: *outcome.request.id.as_uuid(),
            status: outcome.request.status,
            created_at: outcome.request.created_at,
        }
    }
}

/// Confirmation payload for an accept or decline.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestResolutionResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Identifier of the resolved request.
    pub request_id: Uuid,
    /// Terminal lifecycle state reached.
    pub status: RequestStatus,
    /// When the receiver responded.
    pub responded_at: DateTime<Utc>,
}

impl From<ConnectionResponseOutcome> for RequestResolutionResponse {
    fn from(outcome: ConnectionResponseOutcome) -> Self {
        Self {
            message: outcome.message,
            request_id: *outcome.request_id.as_uuid(),
            status: outcome.status,
            responded_at: outcome.responded_at,
        }
    }
}

/// A pending request with both parties resolved.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRequestDto {
    /// Stable identifier.
    pub id: Uuid,
    /// Optional greeting from the sender.
    pub message: Option<String>,
    /// Current lifecycle state.
    pub status: RequestStatus,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When the receiver responded, if they have.
    pub responded_at: Option<DateTime<Utc>>,
    /// Profile of the initiating member.
    pub sender: ProfileSummaryDto,
    /// Profile of the responding member.
    pub receiver: ProfileSummaryDto,
}

impl From<ConnectionRequestView> for ConnectionRequestDto {
    fn from(view: ConnectionRequestView) -> Self {
        Self {
            id: *view.id.as_uuid(),
            message: view.message,
            status: view.status,
            created_at: view.created_at,
            responded_at: view.responded_at,
            sender: view.sender.into(),
            receiver: view.receiver.into(),
        }
    }
}

/// Send a connection request to another member.
#[utoipa::path(
    post,
    path = "/api/v1/connections/request",
    request_body = SendRequestBody,
    responses(
        (status = 200, description = "Request created", body = SendRequestResponse),
        (status = 401, description = "Missing caller identity", body = crate::inbound::http::error::ApiError),
        (status = 403, description = "Receiver not reachable", body = crate::inbound::http::error::ApiError),
        (status = 404, description = "Sender or receiver unknown", body = crate::inbound::http::error::ApiError),
        (status = 409, description = "A request already links the pair", body = crate::inbound::http::error::ApiError),
        (status = 422, description = "Self-request", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["connections"],
    operation_id = "sendConnectionRequest"
)]
#[post("/connections/request")]
pub async fn send_request(
    state: web::Data<HttpState>,
    caller: CallerIdentity,
    payload: web::Json<SendRequestBody>,
) -> ApiResult<web::Json<SendRequestResponse>> {
    let body = payload.into_inner();
    let outcome = state
        .connections
        .send_request(SendConnectionRequest {
            sender_id: caller.user_id(),
            receiver_id: UserId::from_uuid(body.receiver_id),
            message: body.message,
        })
        .await?;
    Ok(web::Json(outcome.into()))
}

/// List pending requests the caller has received.
#[utoipa::path(
    get,
    path = "/api/v1/connections/received",
    responses(
        (status = 200, description = "Pending received requests", body = [ConnectionRequestDto]),
        (status = 401, description = "Missing caller identity", body = crate::inbound::http::error::ApiError),
        (status = 404, description = "Unknown or inactive caller", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["connections"],
    operation_id = "listReceivedRequests"
)]
#[get("/connections/received")]
pub async fn received_requests(
    state: web::Data<HttpState>,
    caller: CallerIdentity,
) -> ApiResult<web::Json<Vec<ConnectionRequestDto>>> {
    let views = state
        .connections_query
        .list_received(&caller.user_id())
        .await?;
    Ok(web::Json(views.into_iter().map(Into::into).collect()))
}

/// List pending requests the caller has sent.
#[utoipa::path(
    get,
    path = "/api/v1/connections/sent",
    responses(
        (status = 200, description = "Pending sent requests", body = [ConnectionRequestDto]),
        (status = 401, description = "Missing caller identity", body = crate::inbound::http::error::ApiError),
        (status = 404, description = "Unknown or inactive caller", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["connections"],
    operation_id = "listSentRequests"
)]
#[get("/connections/sent")]
pub async fn sent_requests(
    state: web::Data<HttpState>,
    caller: CallerIdentity,
) -> ApiResult<web::Json<Vec<ConnectionRequestDto>>> {
    let views = state.connections_query.list_sent(&caller.user_id()).await?;
    Ok(web::Json(views.into_iter().map(Into::into).collect()))
}

/// Accept a pending request; only its receiver may do so.
#[utoipa::path(
    put,
    path = "/api/v1/connections/{request_id}/accept",
    params(("request_id" = Uuid, Path, description = "Request id")),
    responses(
        (status = 200, description = "Request accepted", body = RequestResolutionResponse),
        (status = 401, description = "Missing caller identity", body = crate::inbound::http::error::ApiError),
        (status = 403, description = "Caller is not the receiver", body = crate::inbound::http::error::ApiError),
        (status = 404, description = "Request not found", body = crate::inbound::http::error::ApiError),
        (status = 422, description = "Request already processed", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["connections"],
    operation_id = "acceptConnectionRequest"
)]
#[put("/connections/{request_id}/accept")]
pub async fn accept_request(
    state: web::Data<HttpState>,
    caller: CallerIdentity,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<RequestResolutionResponse>> {
    let request_id = ConnectionRequestId::from_uuid(path.into_inner());
    let outcome = state
        .connections
        .accept(&caller.user_id(), &request_id)
        .await?;
    Ok(web::Json(outcome.into()))
}

/// Decline a pending request; only its receiver may do so.
#[utoipa::path(
    put,
    path = "/api/v1/connections/{request_id}/decline",
    params(("request_id" = Uuid, Path, description = "Request id")),
    responses(
        (status = 200, description = "Request declined", body = RequestResolutionResponse),
        (status = 401, description = "Missing caller identity", body = crate::inbound::http::error::ApiError),
        (status = 403, description = "Caller is not the receiver", body = crate::inbound::http::error::ApiError),
        (status = 404, description = "Request not found", body = crate::inbound::http::error::ApiError),
        (status = 422, description = "Request already processed", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["connections"],
    operation_id = "declineConnectionRequest"
)]
#[put("/connections/{request_id}/decline")]
pub async fn decline_request(
    state: web::Data<HttpState>,
    caller: CallerIdentity,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<RequestResolutionResponse>> {
    let request_id = ConnectionRequestId::from_uuid(path.into_inner());
    let outcome = state
        .connections
        .decline(&caller.user_id(), &request_id)
        .await?;
    Ok(web::Json(outcome.into()))
}
