use featureship_core::{
    models::{Company, NewAuditLog},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::db::control::AuditLogRepository;
use crate::db::transaction::TransactionGuard;

const COMPANY_COLUMNS: &str =
    "id, name, website, team_size, logo, created_by, members, created_at, updated_at";

/// Repository for companies (tenants).
#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a company owned by `created_by`. The creator becomes the first
    /// member and the company id is appended to their user record.
    #[tracing::instrument(skip(self), fields(db.table = "companies", db.operation = "insert"))]
    pub async fn create_company(
        &self,
        name: String,
        website: Option<String>,
        team_size: Option<String>,
        logo: Option<String>,
        created_by: Uuid,
    ) -> Result<Company, AppError> {
        // Company names are globally unique, case-insensitive. The unique
        // index is the backstop; this pre-query gives the friendly error.
        let duplicate_exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM companies WHERE LOWER(name) = LOWER($1))",
        )
        .bind(&name)
        .fetch_one(&self.pool)
        .await?;

        if duplicate_exists {
            return Err(AppError::Conflict(format!(
                "A company named '{}' already exists",
                name
            )));
        }

        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let company = sqlx::query_as::<Postgres, Company>(&format!(
            r#"
            INSERT INTO companies (name, website, team_size, logo, created_by, members)
            VALUES ($1, $2, $3, $4, $5, ARRAY[$5])
            RETURNING {}
            "#,
            COMPANY_COLUMNS
        ))
        .bind(&name)
        .bind(&website)
        .bind(&team_size)
        .bind(&logo)
        .bind(created_by)
        .fetch_one(&mut **tx)
        .await?;

        sqlx::query(
            "UPDATE users SET companies = array_append(companies, $1) WHERE id = $2 AND NOT ($1 = ANY(companies))",
        )
        .bind(company.id)
        .bind(created_by)
        .execute(&mut **tx)
        .await?;

        tx.commit().await?;

        Ok(company)
    }

    /// Get a company by ID
    #[tracing::instrument(skip(self), fields(db.table = "companies", db.operation = "select", db.record_id = %id))]
    pub async fn get_company(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<Postgres, Company>(&format!(
            "SELECT {} FROM companies WHERE id = $1",
            COMPANY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(company)
    }

    /// List every company the user belongs to
    #[tracing::instrument(skip(self), fields(db.table = "companies", db.operation = "select"))]
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Company>, AppError> {
        let companies = sqlx::query_as::<Postgres, Company>(&format!(
            "SELECT {} FROM companies WHERE $1 = ANY(members) ORDER BY name ASC",
            COMPANY_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(companies)
    }

    /// Check whether a user is a member of a company
    pub async fn is_member(&self, company_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let is_member = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM companies WHERE id = $1 AND $2 = ANY(members))",
        )
        .bind(company_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(is_member)
    }

    /// Delete a company.
    ///
    /// Refuses when the company is the caller's only one. Otherwise removes
    /// the company id from every member's user record and deletes the row in
    /// one transaction, with an audit entry. Posts and tags owned by the
    /// company are not cascaded.
    #[tracing::instrument(skip(self), fields(db.table = "companies", db.operation = "delete", db.record_id = %id))]
    pub async fn delete_company(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let company = self
            .get_company(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

        if !company.is_member(user_id) {
            return Err(AppError::Forbidden(
                "Only company members can delete a company".to_string(),
            ));
        }

        let membership_count = sqlx::query_scalar::<Postgres, i64>(
            "SELECT COUNT(*) FROM companies WHERE $1 = ANY(members)",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        if membership_count <= 1 {
            return Err(AppError::BadRequest(
                "Cannot delete your only company".to_string(),
            ));
        }

        let mut tx = TransactionGuard::begin(&self.pool).await?;

        sqlx::query("UPDATE users SET companies = array_remove(companies, $1) WHERE $1 = ANY(companies)")
            .bind(id)
            .execute(&mut **tx)
            .await?;

        sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;

        AuditLogRepository::record_tx(
            &mut tx,
            NewAuditLog::new("company.delete", user_id)
                .company(id)
                .entity(id),
        )
        .await?;

        tx.commit().await?;

        Ok(())
    }
}
