use std::sync::Arc;

use axum::{routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::{Health, Welcome};
use service::peak::{repo::seaorm::SeaOrmPeakRepository, PeakRepository, PeakService};

use crate::openapi::{ApiDoc, HealthResponse, WelcomeResponse};

pub mod peaks;

/// Shared handler state; the repository behind the service is chosen at startup.
#[derive(Clone)]
pub struct ServerState {
    pub peaks: Arc<PeakService<dyn PeakRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn PeakRepository>) -> Self {
        Self { peaks: Arc::new(PeakService::new(repo)) }
    }

    pub fn from_db(db: DatabaseConnection) -> Self {
        Self::new(Arc::new(SeaOrmPeakRepository::new(db)))
    }
}

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, body = WelcomeResponse)))]
pub async fn root() -> Json<Welcome> {
    Json(Welcome::default())
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, body = HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/openapi.json", get(openapi_json));

    // `/peaks` and `/peaks/` are the same collection
    let peaks = Router::new()
        .route("/peaks", get(peaks::list_peaks).post(peaks::create_peak))
        .route("/peaks/", get(peaks::list_peaks).post(peaks::create_peak))
        .route(
            "/peaks/:id",
            get(peaks::get_peak).patch(peaks::update_peak).delete(peaks::delete_peak),
        );

    public
        .merge(peaks)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
