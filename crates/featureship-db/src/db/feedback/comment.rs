use featureship_core::{models::FeedbackComment, AppError};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::db::transaction::TransactionGuard;

const COMMENT_COLUMNS: &str = "id, post_id, company_id, user_id, user_name, content, created_at";

/// Repository for feedback comments.
#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add a comment and bump the parent post's comment counter.
    ///
    /// Both writes happen in one transaction, so the counter can never
    /// understate the comment count. Returns None when the post is missing.
    #[tracing::instrument(skip(self, content), fields(db.table = "feedback_comments", db.operation = "insert", db.record_id = %post_id))]
    pub async fn add_comment(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        user_name: String,
        content: String,
    ) -> Result<Option<FeedbackComment>, AppError> {
        let mut tx = TransactionGuard::begin(&self.pool).await?;

        // The post carries the company id; its absence means 404, not 500.
        let company_id = sqlx::query_scalar::<Postgres, Uuid>(
            "SELECT company_id FROM feedback_posts WHERE id = $1 FOR UPDATE",
        )
        .bind(post_id)
        .fetch_optional(&mut **tx)
        .await?;

        let Some(company_id) = company_id else {
            tx.rollback().await?;
            return Ok(None);
        };

        let comment = sqlx::query_as::<Postgres, FeedbackComment>(&format!(
            r#"
            INSERT INTO feedback_comments (post_id, company_id, user_id, user_name, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COMMENT_COLUMNS
        ))
        .bind(post_id)
        .bind(company_id)
        .bind(user_id)
        .bind(&user_name)
        .bind(content.trim())
        .fetch_one(&mut **tx)
        .await?;

        sqlx::query(
            "UPDATE feedback_posts SET comments_count = comments_count + 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(post_id)
        .execute(&mut **tx)
        .await?;

        tx.commit().await?;

        Ok(Some(comment))
    }

    /// List comments for a post, oldest first.
    #[tracing::instrument(skip(self), fields(db.table = "feedback_comments", db.operation = "select", db.record_id = %post_id))]
    pub async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<FeedbackComment>, AppError> {
        let comments = sqlx::query_as::<Postgres, FeedbackComment>(&format!(
            "SELECT {} FROM feedback_comments WHERE post_id = $1 ORDER BY created_at ASC",
            COMMENT_COLUMNS
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}
