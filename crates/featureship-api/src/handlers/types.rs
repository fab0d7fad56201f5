//! Feedback type handlers. Same membership rules as tags; types have no
//! global defaults.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use featureship_core::{
    models::{validate_label_name, CreateTypeRequest, FeedbackType, UpdateTypeRequest},
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
pub struct ListTypesQuery {
    pub company_id: Uuid,
}

/// Create a type for a company.
#[utoipa::path(
    post,
    path = "/types",
    tag = "types",
    request_body = CreateTypeRequest,
    responses(
        (status = 201, description = "Type created", body = FeedbackType),
        (status = 400, description = "Invalid name", body = crate::error::ErrorResponse),
        (status = 403, description = "Not a company member", body = crate::error::ErrorResponse),
        (status = 409, description = "Duplicate name", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_type(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(payload): ValidatedJson<CreateTypeRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    validate_label_name(&payload.name).map_err(AppError::InvalidInput)?;
    require_membership(&state, payload.company_id, auth.user_id).await?;

    let feedback_type = state
        .types
        .create_type(
            payload.company_id,
            payload.name,
            payload.color,
            payload.emoji,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(feedback_type)))
}

/// List a company's types.
#[utoipa::path(
    get,
    path = "/types",
    tag = "types",
    params(ListTypesQuery),
    responses(
        (status = 200, description = "Types", body = Vec<FeedbackType>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_types(
    State(state): State<AppState>,
    _auth: AuthContext,
    Query(query): Query<ListTypesQuery>,
) -> Result<Json<Vec<FeedbackType>>, HttpAppError> {
    let types = state.types.list_for_company(query.company_id).await?;

    Ok(Json(types))
}

/// Patch a type's name, color, and/or emoji.
#[utoipa::path(
    patch,
    path = "/types/{id}",
    tag = "types",
    params(("id" = Uuid, Path, description = "Type id")),
    request_body = UpdateTypeRequest,
    responses(
        (status = 200, description = "Updated type", body = FeedbackType),
        (status = 400, description = "Empty patch or invalid name", body = crate::error::ErrorResponse),
        (status = 403, description = "Not a company member", body = crate::error::ErrorResponse),
        (status = 404, description = "Type not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Duplicate name", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_type(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateTypeRequest>,
) -> Result<Json<FeedbackType>, HttpAppError> {
    if payload.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()).into());
    }
    if let Some(ref name) = payload.name {
        validate_label_name(name).map_err(AppError::InvalidInput)?;
    }

    let company_id = require_owned_type(&state, id, auth.user_id).await?;

    let feedback_type = state
        .types
        .update_type(
            id,
            company_id,
            payload.name,
            payload.color,
            payload.emoji,
            auth.user_id,
        )
        .await?;

    Ok(Json(feedback_type))
}

/// Delete a type, scrubbing its id from every post that references it.
#[utoipa::path(
    delete,
    path = "/types/{id}",
    tag = "types",
    params(("id" = Uuid, Path, description = "Type id")),
    responses(
        (status = 200, description = "Type deleted"),
        (status = 403, description = "Not a company member", body = crate::error::ErrorResponse),
        (status = 404, description = "Type not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_type(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, HttpAppError> {
    let company_id = require_owned_type(&state, id, auth.user_id).await?;

    state
        .types
        .delete_with_cleanup(id, company_id, auth.user_id)
        .await?;

    Ok(Json(json!({ "success": true })))
}

async fn require_owned_type(
    state: &AppState,
    type_id: Uuid,
    user_id: Uuid,
) -> Result<Uuid, AppError> {
    let feedback_type = state
        .types
        .get_type(type_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Type not found".to_string()))?;

    require_membership(state, feedback_type.company_id, user_id).await?;

    Ok(feedback_type.company_id)
}

async fn require_membership(
    state: &AppState,
    company_id: Uuid,
    user_id: Uuid,
) -> Result<(), AppError> {
    if !state.companies.is_member(company_id, user_id).await? {
        return Err(AppError::Forbidden(
            "Only company members can manage types".to_string(),
        ));
    }
    Ok(())
}
