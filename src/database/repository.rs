use sqlx::PgPool;
use thiserror::Error;

use crate::database::models::post::{CreatePost, Post, UpdatePost};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("post {0} not found")]
    NotFound(i64),

    #[error("a post titled \"{0}\" already exists")]
    DuplicateTitle(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const POST_COLUMNS: &str = "id, title, content, published_at, published";

/// CRUD over the posts table.
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, fields: CreatePost) -> Result<Post, StoreError> {
        let sql = format!(
            "INSERT INTO posts (title, content, published_at, published) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            POST_COLUMNS
        );

        sqlx::query_as::<_, Post>(&sql)
            .bind(&fields.title)
            .bind(&fields.content)
            .bind(fields.published_at)
            .bind(fields.published)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, &fields.title))
    }

    /// All posts, ordered by id for a stable listing.
    pub async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let sql = format!("SELECT {} FROM posts ORDER BY id", POST_COLUMNS);
        Ok(sqlx::query_as::<_, Post>(&sql).fetch_all(&self.pool).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Post, StoreError> {
        let sql = format!("SELECT {} FROM posts WHERE id = $1", POST_COLUMNS);
        sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    /// Partial update; a NULL bind leaves the column at its current value.
    pub async fn update(&self, id: i64, fields: UpdatePost) -> Result<Post, StoreError> {
        let sql = format!(
            "UPDATE posts SET \
                 title = COALESCE($2, title), \
                 content = COALESCE($3, content), \
                 published_at = COALESCE($4, published_at), \
                 published = COALESCE($5, published) \
             WHERE id = $1 RETURNING {}",
            POST_COLUMNS
        );

        let title = fields.title.clone();
        sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .bind(fields.title)
            .bind(fields.content)
            .bind(fields.published_at)
            .bind(fields.published)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| match title {
                Some(title) => map_unique_violation(e, &title),
                None => e.into(),
            })?
            .ok_or(StoreError::NotFound(id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

fn map_unique_violation(err: sqlx::Error, title: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::DuplicateTitle(title.to_string())
        }
        _ => StoreError::Sqlx(err),
    }
}
