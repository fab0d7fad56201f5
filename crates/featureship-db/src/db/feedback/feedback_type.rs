use featureship_core::{
    models::{FeedbackType, NewAuditLog},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::db::control::AuditLogRepository;
use crate::db::transaction::TransactionGuard;

const TYPE_COLUMNS: &str = "id, company_id, name, color, emoji, created_at";

/// Repository for feedback types. Types always belong to a company; unlike
/// tags there are no global defaults.
#[derive(Clone)]
pub struct TypeRepository {
    pool: PgPool,
}

impl TypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a type for a company. Names are unique per company,
    /// case-insensitive.
    #[tracing::instrument(skip(self), fields(db.table = "feedback_types", db.operation = "insert"))]
    pub async fn create_type(
        &self,
        company_id: Uuid,
        name: String,
        color: String,
        emoji: Option<String>,
    ) -> Result<FeedbackType, AppError> {
        let duplicate_exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM feedback_types WHERE company_id = $1 AND LOWER(name) = LOWER($2))",
        )
        .bind(company_id)
        .bind(&name)
        .fetch_one(&self.pool)
        .await?;

        if duplicate_exists {
            return Err(AppError::Conflict(format!(
                "A type named '{}' already exists",
                name.trim()
            )));
        }

        let feedback_type = sqlx::query_as::<Postgres, FeedbackType>(&format!(
            r#"
            INSERT INTO feedback_types (company_id, name, color, emoji)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            TYPE_COLUMNS
        ))
        .bind(company_id)
        .bind(name.trim())
        .bind(&color)
        .bind(&emoji)
        .fetch_one(&self.pool)
        .await?;

        Ok(feedback_type)
    }

    /// Get a type by ID
    #[tracing::instrument(skip(self), fields(db.table = "feedback_types", db.operation = "select", db.record_id = %id))]
    pub async fn get_type(&self, id: Uuid) -> Result<Option<FeedbackType>, AppError> {
        let feedback_type = sqlx::query_as::<Postgres, FeedbackType>(&format!(
            "SELECT {} FROM feedback_types WHERE id = $1",
            TYPE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(feedback_type)
    }

    /// List a company's types.
    #[tracing::instrument(skip(self), fields(db.table = "feedback_types", db.operation = "select"))]
    pub async fn list_for_company(&self, company_id: Uuid) -> Result<Vec<FeedbackType>, AppError> {
        let types = sqlx::query_as::<Postgres, FeedbackType>(&format!(
            "SELECT {} FROM feedback_types WHERE company_id = $1 ORDER BY name ASC",
            TYPE_COLUMNS
        ))
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(types)
    }

    /// Patch a type's name, color, and/or emoji, with an audit entry.
    #[tracing::instrument(skip(self), fields(db.table = "feedback_types", db.operation = "update", db.record_id = %id))]
    pub async fn update_type(
        &self,
        id: Uuid,
        company_id: Uuid,
        name: Option<String>,
        color: Option<String>,
        emoji: Option<String>,
        updated_by: Uuid,
    ) -> Result<FeedbackType, AppError> {
        if let Some(ref new_name) = name {
            let duplicate_exists = sqlx::query_scalar::<Postgres, bool>(
                "SELECT EXISTS(SELECT 1 FROM feedback_types WHERE company_id = $1 AND LOWER(name) = LOWER($2) AND id != $3)",
            )
            .bind(company_id)
            .bind(new_name)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

            if duplicate_exists {
                return Err(AppError::Conflict(format!(
                    "A type named '{}' already exists",
                    new_name.trim()
                )));
            }
        }

        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let feedback_type = sqlx::query_as::<Postgres, FeedbackType>(&format!(
            r#"
            UPDATE feedback_types
            SET name = COALESCE($3, name),
                color = COALESCE($4, color),
                emoji = COALESCE($5, emoji)
            WHERE id = $1 AND company_id = $2
            RETURNING {}
            "#,
            TYPE_COLUMNS
        ))
        .bind(id)
        .bind(company_id)
        .bind(name.as_deref().map(str::trim))
        .bind(&color)
        .bind(&emoji)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Type not found".to_string()))?;

        AuditLogRepository::record_tx(
            &mut tx,
            NewAuditLog::new("type.update", updated_by)
                .company(company_id)
                .entity(id)
                .updates(serde_json::json!({ "name": name, "color": color, "emoji": emoji })),
        )
        .await?;

        tx.commit().await?;

        Ok(feedback_type)
    }

    /// Delete a type and scrub its id from every post that references it.
    /// Same transactional cleanup as `TagRepository::delete_with_cleanup`.
    #[tracing::instrument(skip(self), fields(db.table = "feedback_types", db.operation = "delete", db.record_id = %id))]
    pub async fn delete_with_cleanup(
        &self,
        id: Uuid,
        company_id: Uuid,
        deleted_by: Uuid,
    ) -> Result<u64, AppError> {
        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let cleaned = sqlx::query(
            r#"
            UPDATE feedback_posts
            SET types = array_remove(types, $1), updated_at = NOW()
            WHERE company_id = $2 AND types @> ARRAY[$1]::uuid[]
            "#,
        )
        .bind(id)
        .bind(company_id)
        .execute(&mut **tx)
        .await?
        .rows_affected();

        let deleted = sqlx::query("DELETE FROM feedback_types WHERE id = $1 AND company_id = $2")
            .bind(id)
            .bind(company_id)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Err(AppError::NotFound("Type not found".to_string()));
        }

        AuditLogRepository::record_tx(
            &mut tx,
            NewAuditLog::new("type.delete", deleted_by)
                .company(company_id)
                .entity(id),
        )
        .await?;

        tx.commit().await?;

        tracing::debug!(posts_cleaned = cleaned, "Type references removed");
        Ok(cleaned)
    }
}
