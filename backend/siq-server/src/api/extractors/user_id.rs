//! Axum extractors for REST API authentication

use crate::api::error::ApiError;
use crate::app_state::AppState;

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

/// Extracts the authenticated user id from the `X-User-Id` header.
///
/// The session layer in front of this service resolves the session cookie
/// and forwards the user id; a missing or malformed header is rejected
/// before any handler logic runs.
pub struct UserId(pub Uuid);

impl FromRequestParts<AppState> for UserId {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header_value = parts
                .headers
                .get("X-User-Id")
                .ok_or_else(|| ApiError::unauthorized("Missing X-User-Id header"))?;

            let user_id_str = header_value
                .to_str()
                .map_err(|_| ApiError::unauthorized("Invalid X-User-Id header"))?;

            let uuid = Uuid::parse_str(user_id_str).map_err(|_| {
                log::warn!("Invalid UUID in X-User-Id header: {}", user_id_str);
                ApiError::unauthorized("Invalid X-User-Id header")
            })?;

            Ok(UserId(uuid))
        }
    }
}
