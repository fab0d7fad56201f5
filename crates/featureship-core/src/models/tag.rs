//! Feedback tag models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A company-scoped label attached to posts for filtering.
///
/// `company_id` of `None` marks a global default tag shared by every company;
/// defaults cannot be modified or deleted through the company API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FeedbackTag {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl FeedbackTag {
    /// Default tags have no owning company.
    pub fn is_default(&self) -> bool {
        self.company_id.is_none()
    }
}

/// Request DTO for creating a tag
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTagRequest {
    pub company_id: Uuid,
    pub name: String,
    pub color: String,
}

/// Request DTO for patching a tag
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTagRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl UpdateTagRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none()
    }
}

/// Shared validation for tag and type names.
pub fn validate_label_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if trimmed.len() > 50 {
        return Err("Name cannot exceed 50 characters".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_label_name() {
        assert!(validate_label_name("Bug").is_ok());
        assert!(validate_label_name("   ").is_err());
        assert!(validate_label_name(&"x".repeat(51)).is_err());
    }
}
