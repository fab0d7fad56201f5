//! Company handlers, including the audit log listing for members.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use featureship_core::{
    models::{AuditLog, Company, CreateCompanyRequest},
    AppError,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::auth::AuthContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

const DEFAULT_AUDIT_LIMIT: i64 = 100;
const MAX_AUDIT_LIMIT: i64 = 500;

#[derive(Debug, Deserialize, IntoParams)]
pub struct AuditLogQuery {
    /// Max entries to return (default 100, cap 500)
    pub limit: Option<i64>,
}

/// Create a company. The caller becomes its first member.
#[utoipa::path(
    post,
    path = "/companies",
    tag = "companies",
    request_body = CreateCompanyRequest,
    responses(
        (status = 201, description = "Company created", body = Company),
        (status = 400, description = "Invalid name", body = crate::error::ErrorResponse),
        (status = 409, description = "Duplicate name", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_company(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(payload): ValidatedJson<CreateCompanyRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::InvalidInput("Company name cannot be empty".to_string()).into());
    }

    let company = state
        .companies
        .create_company(
            payload.name.trim().to_string(),
            payload.website,
            payload.team_size,
            payload.logo,
            auth.user_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(company)))
}

/// List the caller's companies.
#[utoipa::path(
    get,
    path = "/companies",
    tag = "companies",
    responses(
        (status = 200, description = "Companies", body = Vec<Company>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_companies(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<Company>>, HttpAppError> {
    let companies = state.companies.list_for_user(auth.user_id).await?;

    Ok(Json(companies))
}

/// Delete a company. Refused when it is the caller's only one.
#[utoipa::path(
    delete,
    path = "/companies/{id}",
    tag = "companies",
    params(("id" = Uuid, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company deleted"),
        (status = 400, description = "Only company", body = crate::error::ErrorResponse),
        (status = 403, description = "Not a member", body = crate::error::ErrorResponse),
        (status = 404, description = "Company not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_company(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, HttpAppError> {
    state.companies.delete_company(id, auth.user_id).await?;

    Ok(Json(json!({ "success": true })))
}

/// List a company's audit log, newest first. Members only.
#[utoipa::path(
    get,
    path = "/companies/{id}/audit-logs",
    tag = "companies",
    params(("id" = Uuid, Path, description = "Company id"), AuditLogQuery),
    responses(
        (status = 200, description = "Audit entries", body = Vec<AuditLog>),
        (status = 403, description = "Not a member", body = crate::error::ErrorResponse),
        (status = 404, description = "Company not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_audit_logs(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Query(query): Query<AuditLogQuery>,
) -> Result<Json<Vec<AuditLog>>, HttpAppError> {
    let company = state
        .companies
        .get_company(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

    if !company.is_member(auth.user_id) {
        return Err(AppError::Forbidden(
            "Only company members can view audit logs".to_string(),
        )
        .into());
    }

    let limit = query
        .limit
        .unwrap_or(DEFAULT_AUDIT_LIMIT)
        .clamp(1, MAX_AUDIT_LIMIT);

    let logs = state.audit_logs.list_for_company(id, limit).await?;

    Ok(Json(logs))
}
