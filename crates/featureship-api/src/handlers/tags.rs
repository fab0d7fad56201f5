//! Feedback tag handlers.
//!
//! Mutations require membership in the owning company. Global default tags
//! (no owning company) are read-only through this API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use featureship_core::{
    models::{validate_label_name, CreateTagRequest, FeedbackTag, UpdateTagRequest},
    AppError,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::auth::AuthContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListTagsQuery {
    pub company_id: Uuid,
}

/// Create a tag for a company.
#[utoipa::path(
    post,
    path = "/tags",
    tag = "tags",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Tag created", body = FeedbackTag),
        (status = 400, description = "Invalid name", body = crate::error::ErrorResponse),
        (status = 403, description = "Not a company member", body = crate::error::ErrorResponse),
        (status = 409, description = "Duplicate name", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_tag(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(payload): ValidatedJson<CreateTagRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    validate_label_name(&payload.name).map_err(AppError::InvalidInput)?;
    require_membership(&state, payload.company_id, auth.user_id).await?;

    let tag = state
        .tags
        .create_tag(payload.company_id, payload.name, payload.color)
        .await?;

    Ok((StatusCode::CREATED, Json(tag)))
}

/// List a company's tags plus the global defaults.
#[utoipa::path(
    get,
    path = "/tags",
    tag = "tags",
    params(ListTagsQuery),
    responses(
        (status = 200, description = "Tags", body = Vec<FeedbackTag>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_tags(
    State(state): State<AppState>,
    _auth: AuthContext,
    Query(query): Query<ListTagsQuery>,
) -> Result<Json<Vec<FeedbackTag>>, HttpAppError> {
    let tags = state.tags.list_for_company(query.company_id).await?;

    Ok(Json(tags))
}

/// Patch a tag's name and/or color.
#[utoipa::path(
    patch,
    path = "/tags/{id}",
    tag = "tags",
    params(("id" = Uuid, Path, description = "Tag id")),
    request_body = UpdateTagRequest,
    responses(
        (status = 200, description = "Updated tag", body = FeedbackTag),
        (status = 400, description = "Empty patch or invalid name", body = crate::error::ErrorResponse),
        (status = 403, description = "Default tag or not a member", body = crate::error::ErrorResponse),
        (status = 404, description = "Tag not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Duplicate name", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_tag(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateTagRequest>,
) -> Result<Json<FeedbackTag>, HttpAppError> {
    if payload.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()).into());
    }
    if let Some(ref name) = payload.name {
        validate_label_name(name).map_err(AppError::InvalidInput)?;
    }

    let company_id = require_owned_tag(&state, id, auth.user_id).await?;

    let tag = state
        .tags
        .update_tag(id, company_id, payload.name, payload.color, auth.user_id)
        .await?;

    Ok(Json(tag))
}

/// Delete a tag. Its id is removed from every post that references it before
/// the tag row goes away; partial cleanup is never visible.
#[utoipa::path(
    delete,
    path = "/tags/{id}",
    tag = "tags",
    params(("id" = Uuid, Path, description = "Tag id")),
    responses(
        (status = 200, description = "Tag deleted"),
        (status = 403, description = "Default tag or not a member", body = crate::error::ErrorResponse),
        (status = 404, description = "Tag not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_tag(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, HttpAppError> {
    let company_id = require_owned_tag(&state, id, auth.user_id).await?;

    state
        .tags
        .delete_with_cleanup(id, company_id, auth.user_id)
        .await?;

    Ok(Json(json!({ "success": true })))
}

/// Resolve a tag to its owning company, rejecting default tags and
/// non-members. Returns the company id for the repository call.
async fn require_owned_tag(
    state: &AppState,
    tag_id: Uuid,
    user_id: Uuid,
) -> Result<Uuid, AppError> {
    let tag = state
        .tags
        .get_tag(tag_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))?;

    let Some(company_id) = tag.company_id else {
        return Err(AppError::Forbidden(
            "Default tags cannot be modified".to_string(),
        ));
    };

    require_membership(state, company_id, user_id).await?;

    Ok(company_id)
}

async fn require_membership(
    state: &AppState,
    company_id: Uuid,
    user_id: Uuid,
) -> Result<(), AppError> {
    if !state.companies.is_member(company_id, user_id).await? {
        return Err(AppError::Forbidden(
            "Only company members can manage tags".to_string(),
        ));
    }
    Ok(())
}
