//! Audit log models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One audit row per tag/type/company/organization mutation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AuditLog {
    pub id: Uuid,
    pub action: String,
    pub user_id: Uuid,
    pub company_id: Option<Uuid>,
    pub entity_id: Option<Uuid>,
    pub updates: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Builder-style input for a new audit entry.
#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub action: String,
    pub user_id: Uuid,
    pub company_id: Option<Uuid>,
    pub entity_id: Option<Uuid>,
    pub updates: Option<serde_json::Value>,
}

impl NewAuditLog {
    pub fn new(action: impl Into<String>, user_id: Uuid) -> Self {
        Self {
            action: action.into(),
            user_id,
            company_id: None,
            entity_id: None,
            updates: None,
        }
    }

    pub fn company(mut self, company_id: Uuid) -> Self {
        self.company_id = Some(company_id);
        self
    }

    pub fn entity(mut self, entity_id: Uuid) -> Self {
        self.entity_id = Some(entity_id);
        self
    }

    pub fn updates(mut self, updates: serde_json::Value) -> Self {
        self.updates = Some(updates);
        self
    }
}
