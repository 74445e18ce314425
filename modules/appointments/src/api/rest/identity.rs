use axum::{extract::FromRequestParts, http::request::Parts, http::StatusCode};
use uuid::Uuid;

use crate::api::rest::error::from_parts;
use crate::api::rest::problem::ProblemResponse;
use crate::contract::model::Requester;

const USER_ID_HEADER: &str = "x-user-id";
const USER_ROLE_HEADER: &str = "x-user-role";

/// The authenticated caller of a request.
///
/// Authentication itself is out of scope here: the fronting gateway verifies
/// credentials and injects `x-user-id`/`x-user-role`, and this module trusts
/// those headers as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub is_admin: bool,
}

impl Identity {
    pub fn requester(self) -> Requester {
        Requester {
            id: self.user_id,
            is_admin: self.is_admin,
        }
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let instance = parts.uri.path().to_owned();

        let raw_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| missing_identity(&instance))?;

        let user_id = raw_id.parse().map_err(|_| {
            from_parts(
                StatusCode::UNAUTHORIZED,
                "IDENTITY_INVALID",
                "Unauthorized",
                format!("{USER_ID_HEADER} is not a valid UUID"),
                &instance,
            )
        })?;

        let is_admin = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|role| role.eq_ignore_ascii_case("admin"));

        Ok(Identity { user_id, is_admin })
    }
}

fn missing_identity(instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::UNAUTHORIZED,
        "IDENTITY_REQUIRED",
        "Unauthorized",
        format!("{USER_ID_HEADER} header is required"),
        instance,
    )
}
