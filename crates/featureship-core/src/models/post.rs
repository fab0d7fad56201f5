//! Feedback post models and status workflow labels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Triage status of a feedback post.
///
/// Statuses are an unordered label set: any company member may move a post
/// to any status (kanban columns, not a strict workflow).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "feedback_status"))]
pub enum FeedbackStatus {
    #[serde(rename = "Under Review")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Under Review"))]
    UnderReview,
    Accepted,
    Rejected,
    Planned,
    Completed,
}

impl Default for FeedbackStatus {
    fn default() -> Self {
        FeedbackStatus::UnderReview
    }
}

/// A feature request submitted to a company's feedback portal.
///
/// Invariant: `upvotes_count == upvotes.len()` and each user id appears at
/// most once in `upvotes`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FeedbackPost {
    pub id: Uuid,
    pub company_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub title: String,
    pub description: String,
    pub types: Vec<Uuid>,
    pub tags: Vec<Uuid>,
    pub status: FeedbackStatus,
    pub upvotes: Vec<Uuid>,
    pub upvotes_count: i32,
    pub comments_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for creating a feedback post
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreatePostRequest {
    pub company_id: Uuid,
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    #[validate(custom(function = "validate_description"))]
    pub description: String,
    #[serde(default)]
    pub types: Vec<Uuid>,
    #[serde(default)]
    pub tags: Vec<Uuid>,
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("title_empty").with_message("Post title cannot be empty".into()));
    }
    if trimmed.len() > 200 {
        return Err(ValidationError::new("title_too_long")
            .with_message("Post title cannot exceed 200 characters".into()));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(ValidationError::new("description_empty")
            .with_message("Post description cannot be empty".into()));
    }
    Ok(())
}

/// Request DTO for changing a post's triage status
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: FeedbackStatus,
}

/// Request DTO for replacing a post's full tag or type id list
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLabelsRequest {
    pub ids: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_labels() {
        assert_eq!(
            serde_json::to_string(&FeedbackStatus::UnderReview).unwrap(),
            "\"Under Review\""
        );
        assert_eq!(
            serde_json::to_string(&FeedbackStatus::Planned).unwrap(),
            "\"Planned\""
        );
        let parsed: FeedbackStatus = serde_json::from_str("\"Under Review\"").unwrap();
        assert_eq!(parsed, FeedbackStatus::UnderReview);
    }

    #[test]
    fn test_status_default_is_under_review() {
        assert_eq!(FeedbackStatus::default(), FeedbackStatus::UnderReview);
    }

    #[test]
    fn test_create_post_request_rejects_blank_fields() {
        let request = |title: &str, description: &str| CreatePostRequest {
            company_id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            types: vec![],
            tags: vec![],
        };
        assert!(request("  ", "desc").validate().is_err());
        assert!(request("title", "").validate().is_err());
        assert!(request(&"x".repeat(201), "desc").validate().is_err());
        assert!(request("title", "desc").validate().is_ok());
    }
}
