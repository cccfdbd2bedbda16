use axum::async_trait;
use axum::extract::{FromRequestParts, Path};
use axum::http::{request::Parts, StatusCode};

use service::errors::ServiceError;

use crate::errors::JsonApiError;

/// Integer `{id}` path segment. Anything but plain digits does not match the
/// route and is answered with a bare 404.
///
/// Digits outside the `i32` range do match, but no row can carry them; the
/// handler answers those with its own not-found body via [`EntityId::or_not_found`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub Option<i32>);

impl EntityId {
    pub fn or_not_found(self, entity: &str) -> Result<i32, JsonApiError> {
        self.0.ok_or_else(|| ServiceError::not_found(entity).into())
    }
}

fn parse_id(raw: &str) -> Result<Option<i32>, StatusCode> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(raw.parse().ok())
}

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::NOT_FOUND)?;
        parse_id(&raw).map(EntityId)
    }
}
