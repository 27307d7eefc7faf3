use std::path::PathBuf;

use axum::{
    routing::{get, post},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;

pub mod offerings;
pub mod tags;
pub mod users;

/// Shared request state: one connection pool plus the upload directory
/// the file store writes to.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub upload_dir: PathBuf,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, entity routes, uploaded
/// assets and API docs.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let uploads = ServeDir::new(state.upload_dir.clone());

    let api = Router::new()
        .route("/api/usuarios", get(users::list).post(users::create))
        .route(
            "/api/usuarios/:id",
            get(users::get).put(users::update).delete(users::remove),
        )
        .route("/api/usuarios/email/:email", get(users::get_by_email))
        .route("/api/usuarios/:id/strikes", post(users::add_strike))
        .route(
            "/api/usuarios/:id/imagem",
            axum::routing::put(users::upload_image).delete(users::remove_image),
        )
        .route("/api/servicos", get(offerings::list))
        .route(
            "/api/servicos/:id",
            get(offerings::get)
                // POST binds the path parameter as the provider id
                .post(offerings::create)
                .put(offerings::update)
                .delete(offerings::remove),
        )
        .route("/api/servicos/prestador/:id", get(offerings::list_by_provider))
        .route("/api/tags", get(tags::list).post(tags::create))
        .route(
            "/api/tags/:id",
            get(tags::get).put(tags::update).delete(tags::remove),
        )
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .nest_service("/uploads", uploads)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
