//! Authentication handlers and viewer derivation.
//!
//! ```text
//! POST /api/v1/login  {"email":"member@example.com","password":"password"}
//! POST /api/v1/logout
//! ```
//!
//! Keep the other HTTP modules focused on request/response mapping by
//! concentrating credential checks and viewer derivation here.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::{AuthenticatedUser, Credentials, IdentityProviderError};
use crate::domain::{Email, Error, TierAssignmentState, UserValidationError, Viewer};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email address.
    pub email: String,
    /// Account password, verified by the identity collaborator.
    pub password: String,
}

fn map_email_error(err: UserValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "email", "code": "invalid_email" }))
}

fn map_identity_error(err: IdentityProviderError) -> Error {
    match err {
        IdentityProviderError::InvalidCredentials { .. } => {
            Error::unauthorized("invalid credentials")
        }
        IdentityProviderError::Unavailable { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
    }
}

/// Derive the viewer for a signed-in identity.
///
/// The administrator capability is decided first, by configured email match;
/// members then need a completed tier selection. An unassigned member is a
/// `409 Conflict` carrying a `tier_not_selected` detail code so clients know
/// to run the selection flow rather than render an empty dashboard.
pub async fn resolve_viewer(
    state: &HttpState,
    identity: &AuthenticatedUser,
) -> Result<Viewer, Error> {
    if state.admin_email.matches(&identity.email) {
        return Ok(Viewer::Administrator);
    }
    match state.tier_selection.load(&identity.user_id).await? {
        TierAssignmentState::Assigned(tier) => Ok(Viewer::Member { tier }),
        TierAssignmentState::Unknown | TierAssignmentState::Unassigned => {
            Err(Error::conflict("tier not selected")
                .with_details(json!({ "code": "tier_not_selected" })))
        }
    }
}

/// Authenticate against the identity collaborator and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Identity provider unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials = Credentials {
        email: Email::new(email).map_err(map_email_error)?,
        password,
    };
    let user = state
        .identity
        .authenticate(&credentials)
        .await
        .map_err(map_identity_error)?;
    session.persist_identity(&user)?;
    Ok(HttpResponse::Ok().finish())
}

/// Clear the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        FixtureIdentityProvider, FixtureShowcaseCommand, FixtureShowcaseQuery,
        FixtureTierSelection, TierSelection,
    };
    use crate::domain::{AdminEmail, ErrorCode, Tier, TierAssignment, UserId};
    use crate::inbound::http::state::HttpStatePorts;
    use async_trait::async_trait;
    use rstest::rstest;
    use std::sync::Arc;

    /// Test double reporting every user as already assigned a tier.
    #[derive(Debug, Clone, Copy)]
    struct AssignedTierSelection(Tier);

    #[async_trait]
    impl TierSelection for AssignedTierSelection {
        async fn load(&self, _user_id: &UserId) -> Result<TierAssignmentState, Error> {
            Ok(TierAssignmentState::Assigned(self.0))
        }

        async fn select(&self, user_id: &UserId, tier: Tier) -> Result<TierAssignment, Error> {
            Ok(TierAssignment {
                user_id: user_id.clone(),
                tier,
            })
        }
    }

    fn make_state(tier_selection: Arc<dyn TierSelection>) -> HttpState {
        HttpState::new(
            HttpStatePorts {
                identity: Arc::new(FixtureIdentityProvider),
                showcase: Arc::new(FixtureShowcaseQuery),
                showcase_command: Arc::new(FixtureShowcaseCommand),
                tier_selection,
            },
            AdminEmail::new(Email::new("admin@example.com").expect("valid admin email")),
        )
    }

    fn identity(email: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: UserId::random(),
            email: Email::new(email).expect("valid email"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn administrator_email_match_is_case_insensitive() {
        let state = make_state(Arc::new(FixtureTierSelection));
        let result = resolve_viewer(&state, &identity("Admin@Example.COM")).await;
        let viewer = result.expect("viewer resolves");
        assert!(viewer.is_administrator());
    }

    #[rstest]
    #[tokio::test]
    async fn assigned_member_resolves_to_their_tier() {
        let state = make_state(Arc::new(AssignedTierSelection(Tier::Gold)));
        let result = resolve_viewer(&state, &identity("member@example.com")).await;
        let viewer = result.expect("viewer resolves");
        assert_eq!(viewer, Viewer::Member { tier: Tier::Gold });
    }

    #[rstest]
    #[tokio::test]
    async fn unassigned_member_is_asked_to_select_a_tier() {
        let state = make_state(Arc::new(FixtureTierSelection));
        let result = resolve_viewer(&state, &identity("member@example.com")).await;
        let error = result.expect_err("selection pending");
        assert_eq!(error.code(), ErrorCode::Conflict);
        let details = error
            .details()
            .and_then(|value| value.as_object())
            .expect("details");
        assert_eq!(
            details.get("code").and_then(|v| v.as_str()),
            Some("tier_not_selected")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn administrator_skips_the_tier_assignment_load() {
        // The fixture selection reports Unassigned; the administrator must
        // resolve regardless.
        let state = make_state(Arc::new(FixtureTierSelection));
        let result = resolve_viewer(&state, &identity("admin@example.com")).await;
        assert!(result.expect("viewer resolves").is_administrator());
    }
}
