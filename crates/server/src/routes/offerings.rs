use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use service::offerings::domain::{NewOffering, OfferingWithTags};
use service::offerings::repo::seaorm::SeaOrmOfferingRepository;
use service::offerings::OfferingService;
use service::users::repo::seaorm::SeaOrmUserRepository;

use crate::errors::JsonApiError;
use crate::routes::ServerState;

type Service = OfferingService<SeaOrmOfferingRepository, SeaOrmUserRepository>;

fn offering_service(state: &ServerState) -> Service {
    OfferingService::new(
        Arc::new(SeaOrmOfferingRepository { db: state.db.clone() }),
        Arc::new(SeaOrmUserRepository { db: state.db.clone() }),
    )
}

#[utoipa::path(get, path = "/api/servicos", tag = "servicos",
    responses((status = 200, description = "All offerings with their tags")))]
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<OfferingWithTags>>, JsonApiError> {
    let all = offering_service(&state).list_all().await?;
    Ok(Json(all))
}

#[utoipa::path(get, path = "/api/servicos/prestador/{id}", tag = "servicos",
    params(("id" = i64, Path, description = "Provider id")),
    responses(
        (status = 200, description = "Offerings of one provider"),
        (status = 404, description = "Provider not found")
    ))]
pub async fn list_by_provider(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<OfferingWithTags>>, JsonApiError> {
    let mine = offering_service(&state).list_by_provider(id).await?;
    Ok(Json(mine))
}

#[utoipa::path(get, path = "/api/servicos/{id}", tag = "servicos",
    params(("id" = i64, Path, description = "Offering id")),
    responses((status = 200, description = "Found"), (status = 404, description = "Not Found")))]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<OfferingWithTags>, JsonApiError> {
    match offering_service(&state).get(id).await? {
        Some(found) => Ok(Json(found)),
        None => Err(service::errors::ServiceError::not_found("offering").into()),
    }
}

#[utoipa::path(post, path = "/api/servicos/{prestador_id}", tag = "servicos",
    params(("prestador_id" = i64, Path, description = "Provider the offering belongs to")),
    request_body = crate::openapi::NewOfferingRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Provider not found")
    ))]
pub async fn create(
    State(state): State<ServerState>,
    Path(provider_id): Path<i64>,
    Json(input): Json<NewOffering>,
) -> Result<(StatusCode, Json<OfferingWithTags>), JsonApiError> {
    let created = offering_service(&state).create(provider_id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/api/servicos/{id}", tag = "servicos",
    params(("id" = i64, Path, description = "Offering id")),
    request_body = crate::openapi::NewOfferingRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not Found"),
        (status = 400, description = "Validation Error")
    ))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(input): Json<NewOffering>,
) -> Result<Json<OfferingWithTags>, JsonApiError> {
    let updated = offering_service(&state).update(id, input).await?;
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/api/servicos/{id}", tag = "servicos",
    params(("id" = i64, Path, description = "Offering id")),
    responses((status = 204, description = "Removed"), (status = 404, description = "Not Found")))]
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, JsonApiError> {
    offering_service(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
