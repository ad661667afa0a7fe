//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! small helpers live here: a cookie-session middleware builder, in-memory
//! repository implementations, and a sign-in helper that captures the
//! session cookie.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::test;
use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use backend::domain::ports::{
    EventRepository, EventRepositoryError, FixtureIdentityProvider, TierAssignmentRepository,
    TierAssignmentRepositoryError,
};
use backend::domain::{
    AdminEmail, Email, Event, EventId, ShowcaseService, Tier, TierAssignment,
    TierSelectionService, UserId,
};
use backend::inbound::http::state::{HttpState, HttpStatePorts};

/// Administrator address wired into the test state.
pub const ADMIN_EMAIL: &str = "admin@example.com";

/// Build a session middleware configured for tests.
pub fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// In-memory implementation of the event repository port.
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    events: Mutex<Vec<Event>>,
}

impl InMemoryEventRepository {
    /// Seed the repository with an initial collection.
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: Mutex::new(events),
        }
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn list(&self) -> Result<Vec<Event>, EventRepositoryError> {
        Ok(self.events.lock().expect("events lock").clone())
    }

    async fn insert(&self, event: &Event) -> Result<(), EventRepositoryError> {
        self.events.lock().expect("events lock").push(event.clone());
        Ok(())
    }

    async fn update(&self, event: &Event) -> Result<(), EventRepositoryError> {
        let mut events = self.events.lock().expect("events lock");
        match events.iter_mut().find(|stored| stored.id == event.id) {
            Some(stored) => {
                *stored = event.clone();
                Ok(())
            }
            None => Err(EventRepositoryError::not_found(event.id.to_string())),
        }
    }

    async fn delete(&self, id: &EventId) -> Result<(), EventRepositoryError> {
        let mut events = self.events.lock().expect("events lock");
        let before = events.len();
        events.retain(|stored| stored.id != *id);
        if events.len() == before {
            return Err(EventRepositoryError::not_found(id.to_string()));
        }
        Ok(())
    }
}

/// In-memory implementation of the tier assignment repository port.
///
/// `insert_if_absent` matches the storage contract: the first write wins and
/// later writes return the stored row unchanged.
#[derive(Debug, Default)]
pub struct InMemoryTierAssignmentRepository {
    assignments: Mutex<HashMap<Uuid, Tier>>,
}

impl InMemoryTierAssignmentRepository {
    /// Seed an existing assignment.
    pub fn with_assignment(user_id: &UserId, tier: Tier) -> Self {
        let repo = Self::default();
        repo.assignments
            .lock()
            .expect("assignments lock")
            .insert(*user_id.as_uuid(), tier);
        repo
    }
}

#[async_trait]
impl TierAssignmentRepository for InMemoryTierAssignmentRepository {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<TierAssignment>, TierAssignmentRepositoryError> {
        let assignments = self.assignments.lock().expect("assignments lock");
        Ok(assignments.get(user_id.as_uuid()).map(|tier| TierAssignment {
            user_id: user_id.clone(),
            tier: *tier,
        }))
    }

    async fn insert_if_absent(
        &self,
        user_id: &UserId,
        tier: Tier,
    ) -> Result<TierAssignment, TierAssignmentRepositoryError> {
        let mut assignments = self.assignments.lock().expect("assignments lock");
        let stored = *assignments.entry(*user_id.as_uuid()).or_insert(tier);
        Ok(TierAssignment {
            user_id: user_id.clone(),
            tier: stored,
        })
    }
}

/// The stable user id the fixture identity provider derives for an email.
pub fn fixture_user_id(email: &str) -> UserId {
    let uuid = Uuid::new_v5(&Uuid::NAMESPACE_URL, email.to_lowercase().as_bytes());
    UserId::from_uuid(uuid)
}

/// Build HTTP state over in-memory repositories and the fixture identity
/// provider (any email, password `password`).
pub fn make_state(
    events: InMemoryEventRepository,
    assignments: InMemoryTierAssignmentRepository,
) -> HttpState {
    let showcase = Arc::new(ShowcaseService::new(Arc::new(events)));
    let tier_selection = Arc::new(TierSelectionService::new(Arc::new(assignments)));
    HttpState::new(
        HttpStatePorts {
            identity: Arc::new(FixtureIdentityProvider),
            showcase: showcase.clone(),
            showcase_command: showcase,
            tier_selection,
        },
        AdminEmail::new(Email::new(ADMIN_EMAIL).expect("valid admin email")),
    )
}

/// Sign in through the login endpoint and return the session cookie.
pub async fn login<S, B>(app: &S, email: &str) -> Cookie<'static>
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": email, "password": "password" }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert!(response.status().is_success(), "login should succeed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie issued")
        .into_owned()
}
