//! Tier catalog and one-time tier selection handlers.
//!
//! ```text
//! GET  /api/v1/tiers           catalog in ascending-rank order
//! GET  /api/v1/users/me/tier   the signed-in user's assignment state
//! POST /api/v1/users/me/tier   one-time selection; first write wins
//! ```

use std::str::FromStr;

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, Tier, TierAssignment, TierAssignmentState};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// One entry in the tier catalog.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TierDescriptor {
    /// Canonical lowercase tier name.
    pub name: String,
    /// Position in the ascending tier order, starting at zero.
    pub rank: usize,
}

impl From<Tier> for TierDescriptor {
    fn from(tier: Tier) -> Self {
        Self {
            name: tier.as_str().to_owned(),
            rank: tier.rank(),
        }
    }
}

/// The signed-in user's assignment state.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TierAssignmentResponse {
    /// Whether a tier has been selected.
    pub assigned: bool,
    /// The assigned tier name, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
}

impl From<TierAssignmentState> for TierAssignmentResponse {
    fn from(state: TierAssignmentState) -> Self {
        match state.tier() {
            Some(tier) => Self {
                assigned: true,
                tier: Some(tier.as_str().to_owned()),
            },
            None => Self {
                assigned: false,
                tier: None,
            },
        }
    }
}

impl From<TierAssignment> for TierAssignmentResponse {
    fn from(assignment: TierAssignment) -> Self {
        Self {
            assigned: true,
            tier: Some(assignment.tier.as_str().to_owned()),
        }
    }
}

/// Request body for the one-time tier selection.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TierSelectionRequest {
    /// Tier name to select.
    pub tier: String,
}

/// List the tier catalog in ascending-rank order.
///
/// The catalog is static and requires no session, so selection screens can
/// render it before the member has chosen.
#[utoipa::path(
    get,
    path = "/api/v1/tiers",
    responses(
        (status = 200, description = "Tier catalog", body = [TierDescriptor])
    ),
    tags = ["tiers"],
    operation_id = "listTiers",
    security([])
)]
#[get("/tiers")]
pub async fn list_tiers() -> web::Json<Vec<TierDescriptor>> {
    web::Json(Tier::all().into_iter().map(TierDescriptor::from).collect())
}

/// Report the signed-in user's tier assignment state.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/tier",
    responses(
        (status = 200, description = "Assignment state", body = TierAssignmentResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Assignment store unavailable", body = Error)
    ),
    tags = ["tiers"],
    operation_id = "getMyTier"
)]
#[get("/users/me/tier")]
pub async fn get_my_tier(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<TierAssignmentResponse>> {
    let identity = session.require_identity()?;
    let assignment = state.tier_selection.load(&identity.user_id).await?;
    Ok(web::Json(TierAssignmentResponse::from(assignment)))
}

/// Select a tier for the signed-in user.
///
/// The response always reflects the stored assignment, so a repeat selection
/// (or a lost race) returns the tier that actually stuck rather than the one
/// requested.
#[utoipa::path(
    post,
    path = "/api/v1/users/me/tier",
    request_body = TierSelectionRequest,
    responses(
        (status = 200, description = "Stored assignment", body = TierAssignmentResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Assignment store unavailable", body = Error)
    ),
    tags = ["tiers"],
    operation_id = "selectMyTier"
)]
#[post("/users/me/tier")]
pub async fn select_my_tier(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<TierSelectionRequest>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_identity()?;
    let tier = Tier::from_str(&payload.tier).map_err(|_| {
        Error::invalid_request("tier must be free, silver, gold, or platinum").with_details(
            json!({
                "field": "tier",
                "value": payload.tier.as_str(),
                "code": "invalid_tier",
            }),
        )
    })?;
    let assignment = state.tier_selection.select(&identity.user_id, tier).await?;
    Ok(HttpResponse::Ok().json(TierAssignmentResponse::from(assignment)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::App;
    use rstest::rstest;

    #[rstest]
    fn catalog_descriptors_keep_ascending_rank_order() {
        let catalog: Vec<TierDescriptor> =
            Tier::all().into_iter().map(TierDescriptor::from).collect();
        let names: Vec<&str> = catalog.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["free", "silver", "gold", "platinum"]);
        let ranks: Vec<usize> = catalog.iter().map(|d| d.rank).collect();
        assert_eq!(ranks, [0, 1, 2, 3]);
    }

    #[rstest]
    #[case::unassigned(TierAssignmentState::Unassigned, false, None)]
    #[case::assigned(TierAssignmentState::Assigned(Tier::Gold), true, Some("gold"))]
    fn assignment_state_maps_to_the_response_shape(
        #[case] state: TierAssignmentState,
        #[case] assigned: bool,
        #[case] tier: Option<&str>,
    ) {
        let response = TierAssignmentResponse::from(state);
        assert_eq!(response.assigned, assigned);
        assert_eq!(response.tier.as_deref(), tier);
    }

    #[actix_web::test]
    async fn tier_catalog_is_served_without_a_session() {
        use actix_web::test;

        let app = test::init_service(App::new().service(list_tiers)).await;
        let request = test::TestRequest::get().uri("/tiers").to_request();
        let body: Vec<serde_json::Value> = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body.len(), 4);
        assert_eq!(
            body[0].get("name").and_then(|v| v.as_str()),
            Some("free")
        );
        assert_eq!(
            body[3].get("name").and_then(|v| v.as_str()),
            Some("platinum")
        );
    }
}
