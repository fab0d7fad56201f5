//! Structured logging for mutating requests.
//!
//! Complements the per-entity audit rows written by the repositories: this
//! layer records every POST/PATCH/DELETE at the HTTP level, including ones
//! that fail before reaching a repository.

use axum::{extract::Request, http::Method, middleware::Next, response::Response};

use crate::auth::AuthContext;

pub async fn log_mutations(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    if method == Method::GET || method == Method::HEAD {
        return next.run(request).await;
    }

    let user_id = request
        .extensions()
        .get::<AuthContext>()
        .map(|ctx| ctx.user_id.to_string());

    let response = next.run(request).await;

    tracing::info!(
        http.method = %method,
        http.path = %path,
        http.status = response.status().as_u16(),
        user.id = user_id.as_deref().unwrap_or("anonymous"),
        "Mutation request"
    );

    response
}
