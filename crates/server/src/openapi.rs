use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct NewUserRequest {
    pub name: String,
    pub email: String,
    pub document: String,
    pub password: String,
    pub phone: String,
}

#[derive(ToSchema)]
pub struct UserPatchRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub profile_image: Option<String>,
}

#[derive(ToSchema)]
pub struct NewOfferingRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub tag_ids: Vec<i64>,
}

#[derive(ToSchema)]
pub struct TagRequest {
    pub name: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::list,
        crate::routes::users::create,
        crate::routes::users::get,
        crate::routes::users::get_by_email,
        crate::routes::users::update,
        crate::routes::users::remove,
        crate::routes::users::add_strike,
        crate::routes::users::upload_image,
        crate::routes::users::remove_image,
        crate::routes::offerings::list,
        crate::routes::offerings::list_by_provider,
        crate::routes::offerings::get,
        crate::routes::offerings::create,
        crate::routes::offerings::update,
        crate::routes::offerings::remove,
        crate::routes::tags::list,
        crate::routes::tags::get,
        crate::routes::tags::create,
        crate::routes::tags::update,
        crate::routes::tags::remove,
    ),
    components(
        schemas(
            HealthResponse,
            NewUserRequest,
            UserPatchRequest,
            NewOfferingRequest,
            TagRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "usuarios"),
        (name = "servicos"),
        (name = "tags")
    )
)]
pub struct ApiDoc;
