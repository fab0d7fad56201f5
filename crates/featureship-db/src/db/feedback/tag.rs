use featureship_core::{
    models::{FeedbackTag, NewAuditLog},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::db::control::AuditLogRepository;
use crate::db::transaction::TransactionGuard;

const TAG_COLUMNS: &str = "id, company_id, name, color, created_at";

/// Repository for feedback tags.
///
/// Tags with a NULL company id are global defaults visible to every company;
/// they cannot be updated or deleted through this repository's company paths.
#[derive(Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a tag for a company. Names are unique per company,
    /// case-insensitive; the unique index backstops the pre-query.
    #[tracing::instrument(skip(self), fields(db.table = "feedback_tags", db.operation = "insert"))]
    pub async fn create_tag(
        &self,
        company_id: Uuid,
        name: String,
        color: String,
    ) -> Result<FeedbackTag, AppError> {
        let duplicate_exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM feedback_tags WHERE company_id = $1 AND LOWER(name) = LOWER($2))",
        )
        .bind(company_id)
        .bind(&name)
        .fetch_one(&self.pool)
        .await?;

        if duplicate_exists {
            return Err(AppError::Conflict(format!(
                "A tag named '{}' already exists",
                name.trim()
            )));
        }

        let tag = sqlx::query_as::<Postgres, FeedbackTag>(&format!(
            r#"
            INSERT INTO feedback_tags (company_id, name, color)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            TAG_COLUMNS
        ))
        .bind(company_id)
        .bind(name.trim())
        .bind(&color)
        .fetch_one(&self.pool)
        .await?;

        Ok(tag)
    }

    /// Get a tag by ID
    #[tracing::instrument(skip(self), fields(db.table = "feedback_tags", db.operation = "select", db.record_id = %id))]
    pub async fn get_tag(&self, id: Uuid) -> Result<Option<FeedbackTag>, AppError> {
        let tag = sqlx::query_as::<Postgres, FeedbackTag>(&format!(
            "SELECT {} FROM feedback_tags WHERE id = $1",
            TAG_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tag)
    }

    /// List a company's tags plus the global defaults.
    #[tracing::instrument(skip(self), fields(db.table = "feedback_tags", db.operation = "select"))]
    pub async fn list_for_company(&self, company_id: Uuid) -> Result<Vec<FeedbackTag>, AppError> {
        let tags = sqlx::query_as::<Postgres, FeedbackTag>(&format!(
            r#"
            SELECT {}
            FROM feedback_tags
            WHERE company_id = $1 OR company_id IS NULL
            ORDER BY name ASC
            "#,
            TAG_COLUMNS
        ))
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }

    /// Patch a tag's name and/or color, with an audit entry.
    #[tracing::instrument(skip(self), fields(db.table = "feedback_tags", db.operation = "update", db.record_id = %id))]
    pub async fn update_tag(
        &self,
        id: Uuid,
        company_id: Uuid,
        name: Option<String>,
        color: Option<String>,
        updated_by: Uuid,
    ) -> Result<FeedbackTag, AppError> {
        if let Some(ref new_name) = name {
            let duplicate_exists = sqlx::query_scalar::<Postgres, bool>(
                "SELECT EXISTS(SELECT 1 FROM feedback_tags WHERE company_id = $1 AND LOWER(name) = LOWER($2) AND id != $3)",
            )
            .bind(company_id)
            .bind(new_name)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

            if duplicate_exists {
                return Err(AppError::Conflict(format!(
                    "A tag named '{}' already exists",
                    new_name.trim()
                )));
            }
        }

        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let tag = sqlx::query_as::<Postgres, FeedbackTag>(&format!(
            r#"
            UPDATE feedback_tags
            SET name = COALESCE($3, name), color = COALESCE($4, color)
            WHERE id = $1 AND company_id = $2
            RETURNING {}
            "#,
            TAG_COLUMNS
        ))
        .bind(id)
        .bind(company_id)
        .bind(name.as_deref().map(str::trim))
        .bind(&color)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))?;

        AuditLogRepository::record_tx(
            &mut tx,
            NewAuditLog::new("tag.update", updated_by)
                .company(company_id)
                .entity(id)
                .updates(serde_json::json!({ "name": name, "color": color })),
        )
        .await?;

        tx.commit().await?;

        Ok(tag)
    }

    /// Delete a tag and scrub its id from every post that references it.
    ///
    /// Cleanup and delete run in one transaction: either every referencing
    /// post loses the id and the tag row goes away, or nothing changes. A
    /// post can never be left pointing at a tag that no longer exists.
    #[tracing::instrument(skip(self), fields(db.table = "feedback_tags", db.operation = "delete", db.record_id = %id))]
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
            SET tags = array_remove(tags, $1), updated_at = NOW()
            WHERE company_id = $2 AND tags @> ARRAY[$1]::uuid[]
            "#,
        )
        .bind(id)
        .bind(company_id)
        .execute(&mut **tx)
        .await?
        .rows_affected();

        let deleted = sqlx::query("DELETE FROM feedback_tags WHERE id = $1 AND company_id = $2")
            .bind(id)
            .bind(company_id)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Err(AppError::NotFound("Tag not found".to_string()));
        }

        AuditLogRepository::record_tx(
            &mut tx,
            NewAuditLog::new("tag.delete", deleted_by)
                .company(company_id)
                .entity(id),
        )
        .await?;

        tx.commit().await?;

        tracing::debug!(posts_cleaned = cleaned, "Tag references removed");
        Ok(cleaned)
    }
}
