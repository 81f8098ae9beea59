//! people-api - HTTP API server for the people & notes service.
//!
//! The router is built here so the binary and the integration tests serve
//! the exact same stack.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod telemetry;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use people_core::{Note, NoteInput, NotePerson, Person, PersonInput, PersonNote};
use people_db::Database;

pub use config::ApiConfig;
pub use error::ApiError;

use handlers::{health_check, notes, pages, people};

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// OpenAPI document served at `/api/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "People & Notes API",
        description = "People and the short notes they write"
    ),
    paths(
        people::read_all,
        people::read_one,
        people::create,
        people::update,
        people::delete,
        notes::read_all,
        notes::read_one,
        notes::create,
        notes::update,
        notes::delete,
    ),
    components(schemas(Person, PersonNote, Note, NotePerson, PersonInput, NoteInput)),
    tags(
        (name = "People", description = "Person CRUD operations"),
        (name = "Notes", description = "Note CRUD operations")
    )
)]
pub struct ApiDoc;

/// Parse a comma-separated CORS origin list.
///
/// Blank entries are skipped and invalid ones are logged and dropped.
///
/// # Example
/// ```text
/// ALLOWED_ORIGINS=http://localhost:5000,https://people.example.com
/// ```
pub fn parse_allowed_origins(origins: &str) -> Vec<HeaderValue> {
    origins
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

/// Build the full application router.
pub fn app(state: AppState, allowed_origins: Vec<HeaderValue>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // OpenAPI / Swagger UI
        .merge(SwaggerUi::new("/api/ui").url("/api/openapi.json", ApiDoc::openapi()))
        // People
        .route("/api/people", get(people::read_all).post(people::create))
        .route(
            "/api/people/:person_id",
            get(people::read_one)
                .put(people::update)
                .delete(people::delete),
        )
        // Notes
        .route("/api/people/notes", get(notes::read_all))
        .route(
            "/api/people/:person_id/notes",
            axum::routing::post(notes::create),
        )
        .route(
            "/api/people/:person_id/notes/:note_id",
            get(notes::read_one)
                .put(notes::update)
                .delete(notes::delete),
        )
        // Pages
        .route("/", get(pages::home))
        .route("/people", get(pages::home))
        .route("/people/:person_id", get(pages::person))
        .route("/people/:person_id/notes", get(pages::person))
        .route("/people/:person_id/notes/:note_id", get(pages::note))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed_origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .max_age(std::time::Duration::from_secs(3600)),
        )
        .with_state(state)
}
