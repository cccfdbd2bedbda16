use axum::Json;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct UserSummaryDoc { pub id: i32, pub username: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(ToSchema)]
pub struct ReplaceUserRequest { pub username: String }

#[derive(ToSchema)]
pub struct CreateClientRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub user_id: i32,
    pub company_id: i32,
    pub company_name: Option<String>,
}

#[derive(ToSchema)]
pub struct PatchClientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::list_users,
        crate::routes::users::replace_user,
        crate::routes::clients::create_client,
        crate::routes::clients::patch_client,
    ),
    components(
        schemas(
            HealthResponse,
            UserSummaryDoc,
            MessageDoc,
            ErrorDoc,
            ReplaceUserRequest,
            CreateClientRequest,
            PatchClientRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "users"),
        (name = "clients")
    )
)]
pub struct ApiDoc;

pub async fn serve() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
