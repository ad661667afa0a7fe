//! Backend entry-point: wires the HTTP adapter, persistence, and OpenAPI docs.

use std::env;
use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::{App, HttpServer, web};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::domain::ports::FixtureIdentityProvider;
use backend::domain::{
    AdminEmail, Email, ShowcaseService, TierSelectionService,
};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::inbound::http::{auth, events, tiers};
use backend::outbound::identity::StaticIdentityProvider;
use backend::outbound::persistence::{
    DbPool, DieselEventRepository, DieselTierAssignmentRepository, PoolConfig,
};

fn session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

fn admin_email() -> std::io::Result<AdminEmail> {
    let raw = env::var("ADMIN_EMAIL")
        .map_err(|_| std::io::Error::other("ADMIN_EMAIL must be set"))?;
    Email::new(raw)
        .map(AdminEmail::new)
        .map_err(|e| std::io::Error::other(format!("invalid ADMIN_EMAIL: {e}")))
}

fn identity_provider() -> std::io::Result<Arc<dyn backend::domain::ports::IdentityProvider>> {
    match env::var("AUTH_USERS") {
        Ok(spec) => {
            let provider = StaticIdentityProvider::from_spec(&spec)
                .map_err(|e| std::io::Error::other(format!("invalid AUTH_USERS: {e}")))?;
            Ok(Arc::new(provider))
        }
        Err(_) => {
            warn!("AUTH_USERS not set, using the fixture identity provider (dev only)");
            Ok(Arc::new(FixtureIdentityProvider))
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;
    let pool = DbPool::new(PoolConfig::from_env(database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("failed to build database pool: {e}")))?;

    let events_repo = Arc::new(DieselEventRepository::new(pool.clone()));
    let showcase = Arc::new(ShowcaseService::new(events_repo));
    let tier_selection = Arc::new(TierSelectionService::new(Arc::new(
        DieselTierAssignmentRepository::new(pool),
    )));

    let state = HttpState::new(
        HttpStatePorts {
            identity: identity_provider()?,
            showcase: showcase.clone(),
            showcase_command: showcase,
            tier_selection,
        },
        admin_email()?,
    );

    let key = session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

    HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();

        let api = web::scope("/api/v1")
            .wrap(session)
            .service(auth::login)
            .service(auth::logout)
            .service(tiers::list_tiers)
            .service(tiers::get_my_tier)
            .service(tiers::select_my_tier)
            .service(events::list_events)
            .service(events::create_event)
            .service(events::update_event)
            .service(events::delete_event);

        let app = App::new()
            .app_data(web::Data::new(state.clone()))
            .service(api);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(bind_addr)?
    .run()
    .await
}
