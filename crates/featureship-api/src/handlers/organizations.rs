//! Organization handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use featureship_core::{
    models::{CreateOrganizationRequest, Organization},
    AppError,
};
use serde_json::json;
use uuid::Uuid;

use crate::auth::AuthContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Create an organization owned by the caller.
#[utoipa::path(
    post,
    path = "/organizations",
    tag = "organizations",
    request_body = CreateOrganizationRequest,
    responses(
        (status = 201, description = "Organization created", body = Organization),
        (status = 400, description = "Invalid name", body = crate::error::ErrorResponse),
        (status = 409, description = "Duplicate name", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_organization(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(payload): ValidatedJson<CreateOrganizationRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::InvalidInput("Organization name cannot be empty".to_string()).into());
    }

    let organization = state
        .organizations
        .create_organization(
            payload.name.trim().to_string(),
            payload.team_size,
            auth.user_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(organization)))
}

/// List the caller's organizations.
#[utoipa::path(
    get,
    path = "/organizations",
    tag = "organizations",
    responses(
        (status = 200, description = "Organizations", body = Vec<Organization>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_organizations(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<Organization>>, HttpAppError> {
    let organizations = state.organizations.list_for_user(auth.user_id).await?;

    Ok(Json(organizations))
}

/// Delete an organization. Refused when it is the caller's only one.
#[utoipa::path(
    delete,
    path = "/organizations/{id}",
    tag = "organizations",
    params(("id" = Uuid, Path, description = "Organization id")),
    responses(
        (status = 200, description = "Organization deleted"),
        (status = 400, description = "Only organization", body = crate::error::ErrorResponse),
        (status = 403, description = "Not a member", body = crate::error::ErrorResponse),
        (status = 404, description = "Organization not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_organization(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, HttpAppError> {
    state
        .organizations
        .delete_organization(id, auth.user_id)
        .await?;

    Ok(Json(json!({ "success": true })))
}
