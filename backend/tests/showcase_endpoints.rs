//! Behavioural tests for the event showcase endpoints.
//!
//! Exercises the full HTTP stack (session middleware, viewer derivation,
//! visibility policy, administrator gate) over in-memory repositories.

#[allow(dead_code)]
mod support;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use backend::domain::{EventDraft, Tier};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{auth, events, tiers};
use support::{
    InMemoryEventRepository, InMemoryTierAssignmentRepository, fixture_user_id, login, make_state,
};

const MEMBER_EMAIL: &str = "member@example.com";

async fn spawn_app(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    test::init_service(
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1")
                .wrap(support::session_middleware())
                .service(auth::login)
                .service(auth::logout)
                .service(tiers::list_tiers)
                .service(tiers::get_my_tier)
                .service(tiers::select_my_tier)
                .service(events::list_events)
                .service(events::create_event)
                .service(events::update_event)
                .service(events::delete_event),
        ),
    )
    .await
}

fn seeded_events() -> InMemoryEventRepository {
    let events = Tier::all()
        .into_iter()
        .map(|tier| {
            EventDraft::new(format!("{tier} event"), "desc", tier)
                .into_event()
                .expect("valid draft")
        })
        .collect();
    InMemoryEventRepository::with_events(events)
}

fn member_state(events: InMemoryEventRepository, tier: Tier) -> HttpState {
    let assignments =
        InMemoryTierAssignmentRepository::with_assignment(&fixture_user_id(MEMBER_EMAIL), tier);
    make_state(events, assignments)
}

fn listed_tiers(body: &[Value]) -> Vec<&str> {
    body.iter()
        .filter_map(|event| event.get("tier").and_then(Value::as_str))
        .collect()
}

#[actix_web::test]
async fn listing_requires_a_session() {
    let app = spawn_app(member_state(seeded_events(), Tier::Free)).await;

    let request = test::TestRequest::get().uri("/api/v1/events").to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn member_listing_is_bounded_by_their_tier() {
    let app = spawn_app(member_state(seeded_events(), Tier::Silver)).await;
    let cookie = login(&app, MEMBER_EMAIL).await;

    let request = test::TestRequest::get()
        .uri("/api/v1/events")
        .cookie(cookie)
        .to_request();
    let body: Vec<Value> = test::call_and_read_body_json(&app, request).await;

    assert_eq!(listed_tiers(&body), ["free", "silver"]);
}

#[actix_web::test]
async fn administrator_listing_sees_every_event() {
    let app = spawn_app(member_state(seeded_events(), Tier::Free)).await;
    let cookie = login(&app, support::ADMIN_EMAIL).await;

    let request = test::TestRequest::get()
        .uri("/api/v1/events")
        .cookie(cookie)
        .to_request();
    let body: Vec<Value> = test::call_and_read_body_json(&app, request).await;

    assert_eq!(listed_tiers(&body), ["free", "silver", "gold", "platinum"]);
}

#[actix_web::test]
async fn display_filter_narrows_but_never_widens() {
    let app = spawn_app(member_state(seeded_events(), Tier::Gold)).await;
    let cookie = login(&app, MEMBER_EMAIL).await;

    let request = test::TestRequest::get()
        .uri("/api/v1/events?tier=silver")
        .cookie(cookie.clone())
        .to_request();
    let body: Vec<Value> = test::call_and_read_body_json(&app, request).await;
    assert_eq!(listed_tiers(&body), ["silver"]);

    // Platinum is above the member's tier; the filter cannot reveal it.
    let request = test::TestRequest::get()
        .uri("/api/v1/events?tier=platinum")
        .cookie(cookie)
        .to_request();
    let body: Vec<Value> = test::call_and_read_body_json(&app, request).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn unknown_display_filters_are_rejected() {
    let app = spawn_app(member_state(seeded_events(), Tier::Gold)).await;
    let cookie = login(&app, MEMBER_EMAIL).await;

    let request = test::TestRequest::get()
        .uri("/api/v1/events?tier=bronze")
        .cookie(cookie)
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn administrator_creates_updates_and_deletes_events() {
    let app = spawn_app(member_state(
        InMemoryEventRepository::default(),
        Tier::Free,
    ))
    .await;
    let cookie = login(&app, support::ADMIN_EMAIL).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/events")
        .cookie(cookie.clone())
        .set_json(json!({
            "title": "Launch night",
            "description": "Doors at 7",
            "tier": "gold",
            "eventDate": "2026-03-14"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(response).await;
    let id = created
        .get("id")
        .and_then(Value::as_str)
        .expect("created id")
        .to_owned();

    let request = test::TestRequest::put()
        .uri(&format!("/api/v1/events/{id}"))
        .cookie(cookie.clone())
        .set_json(json!({
            "title": "Launch night (rescheduled)",
            "description": "Doors at 8",
            "tier": "gold"
        }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(
        updated.get("title").and_then(Value::as_str),
        Some("Launch night (rescheduled)")
    );
    assert!(updated.get("eventDate").is_none());

    let request = test::TestRequest::delete()
        .uri(&format!("/api/v1/events/{id}"))
        .cookie(cookie.clone())
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = test::TestRequest::get()
        .uri("/api/v1/events")
        .cookie(cookie)
        .to_request();
    let body: Vec<Value> = test::call_and_read_body_json(&app, request).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn updating_a_missing_event_is_not_found() {
    let app = spawn_app(member_state(
        InMemoryEventRepository::default(),
        Tier::Free,
    ))
    .await;
    let cookie = login(&app, support::ADMIN_EMAIL).await;

    let request = test::TestRequest::put()
        .uri(&format!("/api/v1/events/{}", uuid::Uuid::new_v4()))
        .cookie(cookie)
        .set_json(json!({
            "title": "Ghost",
            "description": "does not exist",
            "tier": "free"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn members_cannot_mutate_the_showcase() {
    let app = spawn_app(member_state(seeded_events(), Tier::Platinum)).await;
    let cookie = login(&app, MEMBER_EMAIL).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/events")
        .cookie(cookie)
        .set_json(json!({
            "title": "Rogue event",
            "description": "should not land",
            "tier": "free"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("forbidden"));
}

#[actix_web::test]
async fn invalid_event_payloads_are_rejected() {
    let app = spawn_app(member_state(
        InMemoryEventRepository::default(),
        Tier::Free,
    ))
    .await;
    let cookie = login(&app, support::ADMIN_EMAIL).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/events")
        .cookie(cookie)
        .set_json(json!({
            "title": "",
            "description": "empty title",
            "tier": "free"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
