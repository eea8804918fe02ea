//! Trusted caller identity extraction.
//!
//! Credential handling lives in the authenticating reverse proxy, which
//! terminates the session and forwards the caller's stable user id in the
//! [`USER_ID_HEADER`] header. The core trusts that id without re-verifying;
//! requests without a parseable id are rejected before any handler runs.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use uuid::Uuid;

use crate::domain::{DomainError, UserId};

use super::error::ApiError;

/// Header carrying the authenticated caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller, extracted per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity {
    user_id: UserId,
}

impl CallerIdentity {
    /// The caller's stable user id.
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }
}

fn identity_from_request(req: &HttpRequest) -> Result<CallerIdentity, ApiError> {
    let value = req
        .headers()
        .get(USER_ID_HEADER)
        .ok_or_else(|| ApiError::from(DomainError::unauthorized("missing caller identity")))?;
    let raw = value
        .to_str()
        .map_err(|_| ApiError::from(DomainError::unauthorized("malformed caller identity")))?;
    let id = Uuid::parse_str(raw)
        .map_err(|_| ApiError::from(DomainError::unauthorized("malformed caller identity")))?;
    Ok(CallerIdentity {
        user_id: UserId::from_uuid(id),
    })
}

impl FromRequest for CallerIdentity {
    type Error = ApiError;
    type Future = Ready<Result<Self, ApiError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    fn extracts_valid_header() {
        let id = Uuid::new_v4();
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, id.to_string()))
            .to_http_request();

        let identity = identity_from_request(&req).expect("valid header");
        assert_eq!(identity.user_id(), UserId::from_uuid(id));
    }

    #[rstest]
    fn missing_header_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let error = identity_from_request(&req).expect_err("must reject");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    fn non_uuid_header_is_unauthorized() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "not-a-uuid"))
            .to_http_request();

        let error = identity_from_request(&req).expect_err("must reject");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }
}
