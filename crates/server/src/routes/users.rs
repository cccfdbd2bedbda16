use axum::{extract::{Query, State}, Json};

use common::types::MessageBody;
use service::registry::domain::{ReplaceUserInput, UserSummary};

use crate::errors::JsonApiError;
use crate::extract::EntityId;
use crate::state::ServerState;

/// First `username` in the query string; repeated keys are ignored and an
/// empty value counts as no filter further down.
fn username_filter(pairs: &[(String, String)]) -> Option<&str> {
    pairs.iter().find(|(k, _)| k == "username").map(|(_, v)| v.as_str())
}

#[utoipa::path(
    get, path = "/users", tag = "users",
    params(("username" = Option<String>, Query, description = "Exact username to match")),
    responses(
        (status = 200, description = "Users", body = [crate::openapi::UserSummaryDoc])
    )
)]
pub async fn list_users(
    State(state): State<ServerState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<UserSummary>>, JsonApiError> {
    let users = state.registry.list_users(username_filter(&pairs)).await?;
    Ok(Json(users))
}

#[utoipa::path(
    put, path = "/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = crate::openapi::ReplaceUserRequest,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::MessageDoc),
        (status = 404, description = "User not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn replace_user(
    State(state): State<ServerState>,
    id: EntityId,
    Json(input): Json<ReplaceUserInput>,
) -> Result<Json<MessageBody>, JsonApiError> {
    let id = id.or_not_found("User")?;
    state.registry.replace_user(id, input.username.as_deref()).await?;
    Ok(Json(MessageBody::new("User updated successfully")))
}
