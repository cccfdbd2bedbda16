use axum::{extract::State, Json};

use common::types::MessageBody;
use service::registry::domain::{CreateClientInput, PatchClientInput};

use crate::errors::JsonApiError;
use crate::extract::EntityId;
use crate::state::ServerState;

#[utoipa::path(
    post, path = "/clients", tag = "clients",
    request_body = crate::openapi::CreateClientRequest,
    responses(
        (status = 200, description = "Created", body = crate::openapi::MessageDoc),
        (status = 400, description = "Company already exists", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create_client(
    State(state): State<ServerState>,
    Json(input): Json<CreateClientInput>,
) -> Result<Json<MessageBody>, JsonApiError> {
    state.registry.create_client(input).await?;
    Ok(Json(MessageBody::new("Client created successfully")))
}

#[utoipa::path(
    patch, path = "/clients/{id}", tag = "clients",
    params(("id" = i32, Path, description = "Client ID")),
    request_body = crate::openapi::PatchClientRequest,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::MessageDoc),
        (status = 404, description = "Client not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn patch_client(
    State(state): State<ServerState>,
    id: EntityId,
    Json(input): Json<PatchClientInput>,
) -> Result<Json<MessageBody>, JsonApiError> {
    let id = id.or_not_found("Client")?;
    state.registry.patch_client(id, input.into()).await?;
    Ok(Json(MessageBody::new("Client fields updated successfully")))
}
