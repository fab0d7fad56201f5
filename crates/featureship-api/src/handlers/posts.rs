//! Feedback post handlers.
//!
//! Posts are readable and submittable by any authenticated user (the portal
//! is public to signed-in visitors). Triage operations, changing status or
//! relabeling, require company membership.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use featureship_core::{
    models::{CreatePostRequest, FeedbackPost, FeedbackStatus, UpdateLabelsRequest, UpdateStatusRequest},
    timestamp, AppError,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListPostsQuery {
    /// Company whose board to list
    pub company_id: Uuid,
    /// Filter to a single triage status
    pub status: Option<FeedbackStatus>,
    /// Only posts created at or after this instant (RFC 3339 or epoch)
    pub since: Option<String>,
}

/// Submit a feedback post.
#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = FeedbackPost),
        (status = 400, description = "Invalid title or description", body = crate::error::ErrorResponse),
        (status = 404, description = "Company not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(payload): ValidatedJson<CreatePostRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    payload.validate().map_err(AppError::from)?;

    state
        .companies
        .get_company(payload.company_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

    let user = state
        .users
        .get_user(auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unknown user".to_string()))?;

    let post = state
        .posts
        .create_post(
            payload.company_id,
            auth.user_id,
            user.name,
            payload.title,
            payload.description,
            payload.types,
            payload.tags,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// List a company's posts, newest first.
#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    params(ListPostsQuery),
    responses(
        (status = 200, description = "Posts", body = Vec<FeedbackPost>),
        (status = 400, description = "Invalid filter", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_posts(
    State(state): State<AppState>,
    _auth: AuthContext,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<FeedbackPost>>, HttpAppError> {
    let since = query
        .since
        .as_deref()
        .map(timestamp::parse_instant_str)
        .transpose()?;

    let posts = state
        .posts
        .list_posts(query.company_id, query.status, since)
        .await?;

    Ok(Json(posts))
}

/// Get a single post.
#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post", body = FeedbackPost),
        (status = 404, description = "Post not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_post(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<FeedbackPost>, HttpAppError> {
    let post = state
        .posts
        .get_post(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(Json(post))
}

/// Toggle the caller's upvote on a post. Calling twice is a no-op overall.
#[utoipa::path(
    post,
    path = "/posts/{id}/upvote",
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Updated post", body = FeedbackPost),
        (status = 404, description = "Post not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn toggle_upvote(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<FeedbackPost>, HttpAppError> {
    let post = state
        .posts
        .toggle_upvote(id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(Json(post))
}

/// Set a post's triage status. Company members only; any status is reachable
/// from any status.
#[utoipa::path(
    patch,
    path = "/posts/{id}/status",
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated post", body = FeedbackPost),
        (status = 403, description = "Not a company member", body = crate::error::ErrorResponse),
        (status = 404, description = "Post not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateStatusRequest>,
) -> Result<Json<FeedbackPost>, HttpAppError> {
    require_post_membership(&state, id, auth.user_id).await?;

    let post = state
        .posts
        .update_status(id, payload.status)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(Json(post))
}

/// Replace a post's tag list. Company members only.
#[utoipa::path(
    put,
    path = "/posts/{id}/tags",
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = UpdateLabelsRequest,
    responses(
        (status = 200, description = "Updated post", body = FeedbackPost),
        (status = 403, description = "Not a company member", body = crate::error::ErrorResponse),
        (status = 404, description = "Post not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn replace_tags(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateLabelsRequest>,
) -> Result<Json<FeedbackPost>, HttpAppError> {
    require_post_membership(&state, id, auth.user_id).await?;

    let post = state
        .posts
        .replace_tags(id, payload.ids)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(Json(post))
}

/// Replace a post's type list. Company members only.
#[utoipa::path(
    put,
    path = "/posts/{id}/types",
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = UpdateLabelsRequest,
    responses(
        (status = 200, description = "Updated post", body = FeedbackPost),
        (status = 403, description = "Not a company member", body = crate::error::ErrorResponse),
        (status = 404, description = "Post not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn replace_types(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateLabelsRequest>,
) -> Result<Json<FeedbackPost>, HttpAppError> {
    require_post_membership(&state, id, auth.user_id).await?;

    let post = state
        .posts
        .replace_types(id, payload.ids)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(Json(post))
}

/// Resolve a post's company and require the caller to be a member.
async fn require_post_membership(
    state: &AppState,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<(), AppError> {
    let post = state
        .posts
        .get_post(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if !state.companies.is_member(post.company_id, user_id).await? {
        return Err(AppError::Forbidden(
            "Only company members can triage posts".to_string(),
        ));
    }

    Ok(())
}
