use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use models::tag;
use service::tags::repo::seaorm::SeaOrmTagRepository;
use service::tags::TagService;

use crate::errors::JsonApiError;
use crate::routes::ServerState;

fn tag_service(state: &ServerState) -> TagService<SeaOrmTagRepository> {
    TagService::new(Arc::new(SeaOrmTagRepository { db: state.db.clone() }))
}

#[derive(Debug, Deserialize)]
pub struct TagInput {
    pub name: String,
}

#[utoipa::path(get, path = "/api/tags", tag = "tags",
    responses((status = 200, description = "All tags")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<tag::Model>>, JsonApiError> {
    let all = tag_service(&state).list_all().await?;
    Ok(Json(all))
}

#[utoipa::path(get, path = "/api/tags/{id}", tag = "tags",
    params(("id" = i64, Path, description = "Tag id")),
    responses((status = 200, description = "Found"), (status = 404, description = "Not Found")))]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<tag::Model>, JsonApiError> {
    match tag_service(&state).find_by_id(id).await? {
        Some(found) => Ok(Json(found)),
        None => Err(service::errors::ServiceError::not_found("tag").into()),
    }
}

#[utoipa::path(post, path = "/api/tags", tag = "tags",
    request_body = crate::openapi::TagRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 409, description = "Name already taken"),
        (status = 400, description = "Validation Error")
    ))]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<TagInput>,
) -> Result<(StatusCode, Json<tag::Model>), JsonApiError> {
    let created = tag_service(&state).create(&input.name).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/api/tags/{id}", tag = "tags",
    params(("id" = i64, Path, description = "Tag id")),
    request_body = crate::openapi::TagRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Name already taken")
    ))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(input): Json<TagInput>,
) -> Result<Json<tag::Model>, JsonApiError> {
    let updated = tag_service(&state).update(id, &input.name).await?;
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/api/tags/{id}", tag = "tags",
    params(("id" = i64, Path, description = "Tag id")),
    responses((status = 204, description = "Removed"), (status = 404, description = "Not Found")))]
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, JsonApiError> {
    tag_service(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
