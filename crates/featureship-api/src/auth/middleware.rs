//! Bearer-token auth middleware.
//!
//! Every `/api/v0` route except the health check runs behind this layer. On
//! success an [`AuthContext`] is inserted into request extensions for handler
//! extraction; on failure the request is rejected with 401 before reaching
//! any handler.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use featureship_core::AppError;

use crate::auth::{jwt, AuthContext};
use crate::error::HttpAppError;
use crate::state::AppState;

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, HttpAppError> {
    let token = bearer_token(&request).ok_or_else(|| {
        tracing::debug!(path = %request.uri().path(), "Missing bearer token");
        HttpAppError(AppError::Unauthorized(
            "Missing or malformed Authorization header".to_string(),
        ))
    })?;

    let claims = jwt::decode_token(token, &state.config.jwt_secret).map_err(|e| {
        tracing::debug!(path = %request.uri().path(), "Token verification failed");
        HttpAppError(e)
    })?;

    request.extensions_mut().insert(AuthContext {
        user_id: claims.sub,
    });

    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
