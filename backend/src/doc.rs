//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer
//! - **Schemas**: The request/response payloads and the shared error shape
//! - **Security**: Session cookie authentication scheme
//!
//! The generated specification drives Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Tier};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::events::{EventRequest, EventResponse};
use crate::inbound::http::tiers::{TierAssignmentResponse, TierDescriptor, TierSelectionRequest};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Tiered event showcase API",
        description = "HTTP interface for the tier-gated event dashboard: \
                       session sign-in, one-time tier selection, and \
                       visibility-filtered event reads with administrator CRUD."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::tiers::list_tiers,
        crate::inbound::http::tiers::get_my_tier,
        crate::inbound::http::tiers::select_my_tier,
        crate::inbound::http::events::list_events,
        crate::inbound::http::events::create_event,
        crate::inbound::http::events::update_event,
        crate::inbound::http::events::delete_event,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Tier,
        LoginRequest,
        TierDescriptor,
        TierAssignmentResponse,
        TierSelectionRequest,
        EventRequest,
        EventResponse,
    )),
    tags(
        (name = "auth", description = "Session sign-in and sign-out"),
        (name = "tiers", description = "Tier catalog and the one-time selection flow"),
        (name = "events", description = "Visibility-filtered event reads and administrator CRUD")
    )
)]
pub struct ApiDoc;
