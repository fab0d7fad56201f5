use featureship_core::{
    models::{AuditLog, NewAuditLog},
    AppError,
};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Repository for audit log entries. One row is written per tag/type/company/
/// organization mutation.
#[derive(Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record an audit entry inside a caller-owned transaction, so the entry
    /// commits with the mutation it describes.
    pub async fn record_tx(
        tx: &mut Transaction<'_, Postgres>,
        entry: NewAuditLog,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (action, user_id, company_id, entity_id, updates)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&entry.action)
        .bind(entry.user_id)
        .bind(entry.company_id)
        .bind(entry.entity_id)
        .bind(entry.updates)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// List entries for a company, newest first.
    #[tracing::instrument(skip(self), fields(db.table = "audit_logs", db.operation = "select"))]
    pub async fn list_for_company(
        &self,
        company_id: Uuid,
        limit: i64,
    ) -> Result<Vec<AuditLog>, AppError> {
        let logs = sqlx::query_as::<Postgres, AuditLog>(
            r#"
            SELECT id, action, user_id, company_id, entity_id, updates, created_at
            FROM audit_logs
            WHERE company_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(company_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }
}
