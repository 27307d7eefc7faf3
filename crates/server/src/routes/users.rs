use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};

use models::user;
use service::password::Argon2PasswordHasher;
use service::storage::LocalFileStore;
use service::users::domain::{NewUser, UserPatch};
use service::users::repo::seaorm::SeaOrmUserRepository;
use service::users::UserService;

use crate::errors::JsonApiError;
use crate::routes::ServerState;

type Service = UserService<SeaOrmUserRepository, Argon2PasswordHasher, LocalFileStore>;

fn user_service(state: &ServerState) -> Service {
    UserService::new(
        Arc::new(SeaOrmUserRepository { db: state.db.clone() }),
        Arc::new(Argon2PasswordHasher),
        Arc::new(LocalFileStore::new(state.upload_dir.clone())),
    )
}

#[utoipa::path(get, path = "/api/usuarios", tag = "usuarios",
    responses((status = 200, description = "All users")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<user::Model>>, JsonApiError> {
    let all = user_service(&state).list_all().await?;
    Ok(Json(all))
}

#[utoipa::path(post, path = "/api/usuarios", tag = "usuarios",
    request_body = crate::openapi::NewUserRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Email or document already taken")
    ))]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<NewUser>,
) -> Result<(StatusCode, Json<user::Model>), JsonApiError> {
    let created = user_service(&state).register(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/usuarios/{id}", tag = "usuarios",
    params(("id" = i64, Path, description = "User id")),
    responses((status = 200, description = "Found"), (status = 404, description = "Not Found")))]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<user::Model>, JsonApiError> {
    match user_service(&state).find_by_id(id).await? {
        Some(found) => Ok(Json(found)),
        None => Err(service::errors::ServiceError::not_found("user").into()),
    }
}

#[utoipa::path(get, path = "/api/usuarios/email/{email}", tag = "usuarios",
    params(("email" = String, Path, description = "User email")),
    responses((status = 200, description = "Found"), (status = 404, description = "Not Found")))]
pub async fn get_by_email(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> Result<Json<user::Model>, JsonApiError> {
    match user_service(&state).find_by_email(&email).await? {
        Some(found) => Ok(Json(found)),
        None => Err(service::errors::ServiceError::not_found("user").into()),
    }
}

#[utoipa::path(put, path = "/api/usuarios/{id}", tag = "usuarios",
    params(("id" = i64, Path, description = "User id")),
    request_body = crate::openapi::UserPatchRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Email already taken"),
        (status = 400, description = "Validation Error")
    ))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<user::Model>, JsonApiError> {
    let updated = user_service(&state).update(id, patch).await?;
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/api/usuarios/{id}", tag = "usuarios",
    params(("id" = i64, Path, description = "User id")),
    responses((status = 204, description = "Removed (idempotent)")))]
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, JsonApiError> {
    user_service(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/usuarios/{id}/strikes", tag = "usuarios",
    params(("id" = i64, Path, description = "User id")),
    responses((status = 204, description = "Strike recorded (no-op for missing id)")))]
pub async fn add_strike(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, JsonApiError> {
    user_service(&state).increment_strikes(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(put, path = "/api/usuarios/{id}/imagem", tag = "usuarios",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Stored; body carries the asset token"),
        (status = 400, description = "Missing multipart field 'imagem'"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Storage Error")
    ))]
pub async fn upload_image(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, JsonApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string()))
    })? {
        if field.name() != Some("imagem") {
            continue;
        }
        let original_name = field.file_name().unwrap_or("upload.bin").to_string();
        let bytes = field.bytes().await.map_err(|e| {
            JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string()))
        })?;
        let token = user_service(&state)
            .set_profile_image(id, &bytes, &original_name)
            .await?;
        return Ok(Json(serde_json::json!({ "filename": token })));
    }
    Err(JsonApiError::new(
        StatusCode::BAD_REQUEST,
        "Validation Error",
        Some("missing multipart field 'imagem'".into()),
    ))
}

#[utoipa::path(delete, path = "/api/usuarios/{id}/imagem", tag = "usuarios",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "Cleared (no-op when unset)"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Storage Error")
    ))]
pub async fn remove_image(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, JsonApiError> {
    user_service(&state).clear_profile_image(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
