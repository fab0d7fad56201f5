use chrono::{DateTime, Utc};
use featureship_core::{
    models::{FeedbackPost, FeedbackStatus},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const POST_COLUMNS: &str = "id, company_id, user_id, user_name, title, description, types, tags, \
     status, upvotes, upvotes_count, comments_count, created_at, updated_at";

/// Repository for feedback posts.
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a post. New posts start Under Review with no upvotes or comments.
    #[tracing::instrument(skip(self, title, description), fields(db.table = "feedback_posts", db.operation = "insert"))]
    pub async fn create_post(
        &self,
        company_id: Uuid,
        user_id: Uuid,
        user_name: String,
        title: String,
        description: String,
        types: Vec<Uuid>,
        tags: Vec<Uuid>,
    ) -> Result<FeedbackPost, AppError> {
        let post = sqlx::query_as::<Postgres, FeedbackPost>(&format!(
            r#"
            INSERT INTO feedback_posts (company_id, user_id, user_name, title, description, types, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            POST_COLUMNS
        ))
        .bind(company_id)
        .bind(user_id)
        .bind(&user_name)
        .bind(title.trim())
        .bind(description.trim())
        .bind(&types)
        .bind(&tags)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    /// Get a post by ID
    #[tracing::instrument(skip(self), fields(db.table = "feedback_posts", db.operation = "select", db.record_id = %id))]
    pub async fn get_post(&self, id: Uuid) -> Result<Option<FeedbackPost>, AppError> {
        let post = sqlx::query_as::<Postgres, FeedbackPost>(&format!(
            "SELECT {} FROM feedback_posts WHERE id = $1",
            POST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// List posts for a company, newest first, optionally filtered by status
    /// and creation instant.
    #[tracing::instrument(skip(self), fields(db.table = "feedback_posts", db.operation = "select"))]
    pub async fn list_posts(
        &self,
        company_id: Uuid,
        status: Option<FeedbackStatus>,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<FeedbackPost>, AppError> {
        let posts = sqlx::query_as::<Postgres, FeedbackPost>(&format!(
            r#"
            SELECT {}
            FROM feedback_posts
            WHERE company_id = $1
              AND ($2::feedback_status IS NULL OR status = $2)
              AND ($3::timestamptz IS NULL OR created_at >= $3)
            ORDER BY created_at DESC
            "#,
            POST_COLUMNS
        ))
        .bind(company_id)
        .bind(status)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    /// Toggle a user's upvote on a post.
    ///
    /// Membership flip and count adjustment happen in one UPDATE so the
    /// `upvotes_count == cardinality(upvotes)` invariant holds under
    /// concurrent toggles by different users. Calling twice for the same user
    /// restores the original state.
    #[tracing::instrument(skip(self), fields(db.table = "feedback_posts", db.operation = "update", db.record_id = %post_id))]
    pub async fn toggle_upvote(
        &self,
        post_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<FeedbackPost>, AppError> {
        let post = sqlx::query_as::<Postgres, FeedbackPost>(&format!(
            r#"
            UPDATE feedback_posts
            SET upvotes = CASE
                    WHEN $2 = ANY(upvotes) THEN array_remove(upvotes, $2)
                    ELSE array_append(upvotes, $2)
                END,
                upvotes_count = CASE
                    WHEN $2 = ANY(upvotes) THEN upvotes_count - 1
                    ELSE upvotes_count + 1
                END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            POST_COLUMNS
        ))
        .bind(post_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// Set a post's triage status. Any status is reachable from any status.
    #[tracing::instrument(skip(self), fields(db.table = "feedback_posts", db.operation = "update", db.record_id = %post_id))]
    pub async fn update_status(
        &self,
        post_id: Uuid,
        status: FeedbackStatus,
    ) -> Result<Option<FeedbackPost>, AppError> {
        let post = sqlx::query_as::<Postgres, FeedbackPost>(&format!(
            r#"
            UPDATE feedback_posts
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            POST_COLUMNS
        ))
        .bind(post_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// Replace a post's full tag id list. Individual ids are not validated
    /// against the tags table.
    #[tracing::instrument(skip(self), fields(db.table = "feedback_posts", db.operation = "update", db.record_id = %post_id))]
    pub async fn replace_tags(
        &self,
        post_id: Uuid,
        tag_ids: Vec<Uuid>,
    ) -> Result<Option<FeedbackPost>, AppError> {
        let post = sqlx::query_as::<Postgres, FeedbackPost>(&format!(
            r#"
            UPDATE feedback_posts
            SET tags = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            POST_COLUMNS
        ))
        .bind(post_id)
        .bind(&tag_ids)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// Replace a post's full type id list. See `replace_tags`.
    #[tracing::instrument(skip(self), fields(db.table = "feedback_posts", db.operation = "update", db.record_id = %post_id))]
    pub async fn replace_types(
        &self,
        post_id: Uuid,
        type_ids: Vec<Uuid>,
    ) -> Result<Option<FeedbackPost>, AppError> {
        let post = sqlx::query_as::<Postgres, FeedbackPost>(&format!(
            r#"
            UPDATE feedback_posts
            SET types = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            POST_COLUMNS
        ))
        .bind(post_id)
        .bind(&type_ids)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }
}
