mod auth;
mod handlers;

use std::sync::Arc;

pub use auth::ApiKey;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::catalog::Catalog;
use crate::db::Database;
use crate::engine::ChecklistGenerator;

/// Shared state of the HTTP surface.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub generator: ChecklistGenerator,
}

impl AppState {
    pub fn new(db: Database, catalog: Arc<Catalog>) -> Self {
        Self {
            db,
            generator: ChecklistGenerator::new(catalog),
        }
    }
}

pub fn create_router(state: AppState, api_key: ApiKey) -> Router {
    let api = Router::new()
        // Remote progress contract
        .route(
            "/progress/{checklist_id}",
            get(handlers::get_progress).put(handlers::upsert_progress),
        )
        .route_layer(middleware::from_fn_with_state(
            api_key,
            auth::require_api_key,
        ))
        // Generation
        .route("/checklists", post(handlers::generate_checklist))
        .route("/resources", get(handlers::find_city_resources))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
