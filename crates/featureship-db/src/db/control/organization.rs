use featureship_core::{
    models::{NewAuditLog, Organization},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::db::control::AuditLogRepository;
use crate::db::transaction::TransactionGuard;

const ORGANIZATION_COLUMNS: &str =
    "id, name, team_size, owner, members, companies, created_at, updated_at";

/// Repository for organizations (groupings of companies under shared membership).
#[derive(Clone)]
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an organization with `owner` as its first member.
    #[tracing::instrument(skip(self), fields(db.table = "organizations", db.operation = "insert"))]
    pub async fn create_organization(
        &self,
        name: String,
        team_size: Option<String>,
        owner: Uuid,
    ) -> Result<Organization, AppError> {
        let duplicate_exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM organizations WHERE LOWER(name) = LOWER($1))",
        )
        .bind(&name)
        .fetch_one(&self.pool)
        .await?;

        if duplicate_exists {
            return Err(AppError::Conflict(format!(
                "An organization named '{}' already exists",
                name
            )));
        }

        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let organization = sqlx::query_as::<Postgres, Organization>(&format!(
            r#"
            INSERT INTO organizations (name, team_size, owner, members)
            VALUES ($1, $2, $3, ARRAY[$3])
            RETURNING {}
            "#,
            ORGANIZATION_COLUMNS
        ))
        .bind(&name)
        .bind(&team_size)
        .bind(owner)
        .fetch_one(&mut **tx)
        .await?;

        sqlx::query(
            "UPDATE users SET organizations = array_append(organizations, $1) WHERE id = $2 AND NOT ($1 = ANY(organizations))",
        )
        .bind(organization.id)
        .bind(owner)
        .execute(&mut **tx)
        .await?;

        tx.commit().await?;

        Ok(organization)
    }

    /// Get an organization by ID
    #[tracing::instrument(skip(self), fields(db.table = "organizations", db.operation = "select", db.record_id = %id))]
    pub async fn get_organization(&self, id: Uuid) -> Result<Option<Organization>, AppError> {
        let organization = sqlx::query_as::<Postgres, Organization>(&format!(
            "SELECT {} FROM organizations WHERE id = $1",
            ORGANIZATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(organization)
    }

    /// List every organization the user belongs to
    #[tracing::instrument(skip(self), fields(db.table = "organizations", db.operation = "select"))]
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Organization>, AppError> {
        let organizations = sqlx::query_as::<Postgres, Organization>(&format!(
            "SELECT {} FROM organizations WHERE $1 = ANY(members) ORDER BY name ASC",
            ORGANIZATION_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(organizations)
    }

    /// Delete an organization, refusing when it is the caller's only one.
    /// Mirrors `CompanyRepository::delete_company`.
    #[tracing::instrument(skip(self), fields(db.table = "organizations", db.operation = "delete", db.record_id = %id))]
    pub async fn delete_organization(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let organization = self
            .get_organization(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Organization not found".to_string()))?;

        if !organization.members.contains(&user_id) {
            return Err(AppError::Forbidden(
                "Only organization members can delete an organization".to_string(),
            ));
        }

        let membership_count = sqlx::query_scalar::<Postgres, i64>(
            "SELECT COUNT(*) FROM organizations WHERE $1 = ANY(members)",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        if membership_count <= 1 {
            return Err(AppError::BadRequest(
                "Cannot delete your only organization".to_string(),
            ));
        }

        let mut tx = TransactionGuard::begin(&self.pool).await?;

        sqlx::query(
            "UPDATE users SET organizations = array_remove(organizations, $1) WHERE $1 = ANY(organizations)",
        )
        .bind(id)
        .execute(&mut **tx)
        .await?;

        sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;

        AuditLogRepository::record_tx(
            &mut tx,
            NewAuditLog::new("organization.delete", user_id).entity(id),
        )
        .await?;

        tx.commit().await?;

        Ok(())
    }
}
