//! Event showcase HTTP handlers.
//!
//! ```text
//! GET    /api/v1/events?tier=gold
//! POST   /api/v1/events
//! PUT    /api/v1/events/{id}
//! DELETE /api/v1/events/{id}
//! ```
//!
//! Reads are visibility-filtered for the signed-in viewer; mutations require
//! the administrator capability.

use std::str::FromStr;

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;
use uuid::Uuid;

use crate::domain::{Error, Event, EventDraft, EventId, Tier, TierFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::resolve_viewer;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request payload for creating or replacing an event.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    /// Short headline shown on the dashboard.
    pub title: Option<String>,
    /// Longer description shown on the event card.
    pub description: Option<String>,
    /// Minimum tier required to view the event.
    pub tier: Option<String>,
    /// Calendar date in `YYYY-MM-DD` form, when known.
    pub event_date: Option<String>,
    /// Image reference for the event card.
    pub image_url: Option<String>,
}

/// Response payload for a single event.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    /// Unique identifier.
    pub id: String,
    /// Short headline.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Minimum tier required to view the event.
    pub tier: String,
    /// Calendar date in `YYYY-MM-DD` form, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,
    /// Image reference, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            description: value.description,
            tier: value.tier.to_string(),
            event_date: value.event_date.map(|date| date.to_string()),
            image_url: value.image_url.as_ref().map(Url::to_string),
        }
    }
}

/// Query parameters for the event listing.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsQuery {
    /// Display filter: a tier name or `all` (the default).
    pub tier: Option<String>,
}

fn missing_field_error(field: &str) -> Error {
    Error::invalid_request(format!("{field} is required"))
        .with_details(json!({ "field": field, "code": "missing_field" }))
}

fn invalid_tier_error(value: &str) -> Error {
    Error::invalid_request("tier must be free, silver, gold, or platinum").with_details(json!({
        "field": "tier",
        "value": value,
        "code": "invalid_tier",
    }))
}

fn parse_tier(value: &str) -> Result<Tier, Error> {
    Tier::from_str(value).map_err(|_| invalid_tier_error(value))
}

fn parse_tier_filter(value: Option<&str>) -> Result<TierFilter, Error> {
    match value {
        None => Ok(TierFilter::All),
        Some(raw) => TierFilter::from_str(raw).map_err(|_| {
            Error::invalid_request("tier filter must be a tier name or \"all\"").with_details(
                json!({
                    "field": "tier",
                    "value": raw,
                    "code": "invalid_tier_filter",
                }),
            )
        }),
    }
}

fn parse_event_date(value: Option<String>) -> Result<Option<NaiveDate>, Error> {
    match value {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                Error::invalid_request("event date must be formatted YYYY-MM-DD").with_details(
                    json!({
                        "field": "eventDate",
                        "value": raw,
                        "code": "invalid_event_date",
                    }),
                )
            }),
    }
}

fn parse_event_id(raw: &str) -> Result<EventId, Error> {
    Uuid::parse_str(raw)
        .map(EventId::from_uuid)
        .map_err(|_| Error::invalid_request("event id must be a valid UUID"))
}

fn parse_event_request(payload: EventRequest) -> Result<EventDraft, Error> {
    let title = payload.title.ok_or_else(|| missing_field_error("title"))?;
    let description = payload
        .description
        .ok_or_else(|| missing_field_error("description"))?;
    let tier = payload.tier.ok_or_else(|| missing_field_error("tier"))?;

    let draft = EventDraft::new(title, description, parse_tier(&tier)?)
        .event_date(parse_event_date(payload.event_date)?)
        .image_url(payload.image_url);
    draft
        .validate()
        .map_err(|err| Error::invalid_request(err.to_string()))
}

/// List the events the signed-in viewer may see.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    params(ListEventsQuery),
    responses(
        (status = 200, description = "Visible events", body = [EventResponse]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 409, description = "Tier selection pending", body = Error),
        (status = 503, description = "Event store unavailable", body = Error)
    ),
    tags = ["events"],
    operation_id = "listEvents"
)]
#[get("/events")]
pub async fn list_events(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ListEventsQuery>,
) -> ApiResult<web::Json<Vec<EventResponse>>> {
    let identity = session.require_identity()?;
    let viewer = resolve_viewer(&state, &identity).await?;
    let filter = parse_tier_filter(query.tier.as_deref())?;
    let events = state.showcase.list(viewer, filter).await?;
    Ok(web::Json(
        events.into_iter().map(EventResponse::from).collect(),
    ))
}

/// Create an event (administrator only).
#[utoipa::path(
    post,
    path = "/api/v1/events",
    request_body = EventRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 503, description = "Event store unavailable", body = Error)
    ),
    tags = ["events"],
    operation_id = "createEvent"
)]
#[post("/events")]
pub async fn create_event(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<EventRequest>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_identity()?;
    let viewer = resolve_viewer(&state, &identity).await?;
    let draft = parse_event_request(payload.into_inner())?;
    let event = state.showcase_command.create(viewer, draft).await?;
    Ok(HttpResponse::Created().json(EventResponse::from(event)))
}

/// Replace an event (administrator only).
#[utoipa::path(
    put,
    path = "/api/v1/events/{id}",
    request_body = EventRequest,
    params(("id" = String, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "Event updated", body = EventResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 503, description = "Event store unavailable", body = Error)
    ),
    tags = ["events"],
    operation_id = "updateEvent"
)]
#[put("/events/{id}")]
pub async fn update_event(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<EventRequest>,
) -> ApiResult<web::Json<EventResponse>> {
    let identity = session.require_identity()?;
    let viewer = resolve_viewer(&state, &identity).await?;
    let id = parse_event_id(&path.into_inner())?;
    let draft = parse_event_request(payload.into_inner())?;
    let event = state.showcase_command.update(viewer, id, draft).await?;
    Ok(web::Json(EventResponse::from(event)))
}

/// Delete an event (administrator only).
#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    params(("id" = String, Path, description = "Event identifier")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 503, description = "Event store unavailable", body = Error)
    ),
    tags = ["events"],
    operation_id = "deleteEvent"
)]
#[delete("/events/{id}")]
pub async fn delete_event(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_identity()?;
    let viewer = resolve_viewer(&state, &identity).await?;
    let id = parse_event_id(&path.into_inner())?;
    state.showcase_command.delete(viewer, id).await?;
    Ok(HttpResponse::NoContent().finish())
}
