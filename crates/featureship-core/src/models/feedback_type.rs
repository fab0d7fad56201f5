//! Feedback type models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A company-scoped post type (e.g. "Feature", "Bug"), with an optional emoji.
/// Unlike tags, types always belong to a company; there are no global defaults.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FeedbackType {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub color: String,
    pub emoji: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for creating a type
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTypeRequest {
    pub company_id: Uuid,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub emoji: Option<String>,
}

/// Request DTO for patching a type
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTypeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
}

impl UpdateTypeRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none() && self.emoji.is_none()
    }
}
