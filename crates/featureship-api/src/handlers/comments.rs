//! Feedback comment handlers. Comments are open to any authenticated user
//! and immutable once created.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use featureship_core::{
    models::{CreateCommentRequest, FeedbackComment},
    AppError,
};
use uuid::Uuid;

use crate::auth::AuthContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Add a comment to a post.
#[utoipa::path(
    post,
    path = "/posts/{id}/comments",
    tag = "comments",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = FeedbackComment),
        (status = 400, description = "Empty comment", body = crate::error::ErrorResponse),
        (status = 404, description = "Post not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(post_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CreateCommentRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    if payload.content.trim().is_empty() {
        return Err(AppError::InvalidInput("Comment cannot be empty".to_string()).into());
    }

    let user = state
        .users
        .get_user(auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unknown user".to_string()))?;

    let comment = state
        .comments
        .add_comment(post_id, auth.user_id, user.name, payload.content)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// List a post's comments, oldest first.
#[utoipa::path(
    get,
    path = "/posts/{id}/comments",
    tag = "comments",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Comments", body = Vec<FeedbackComment>),
        (status = 404, description = "Post not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_comments(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Vec<FeedbackComment>>, HttpAppError> {
    state
        .posts
        .get_post(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let comments = state.comments.list_for_post(post_id).await?;

    Ok(Json(comments))
}
