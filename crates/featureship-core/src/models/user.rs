//! User models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// An end user of the portal. The identity provider owns credentials; this
/// record tracks display data and company/organization membership lists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub companies: Vec<Uuid>,
    pub organizations: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}
