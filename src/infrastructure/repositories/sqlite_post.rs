use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::post::{
    NewPost, Post, PostBody, PostId, PostReadRepository, PostSlug, PostSummary, PostTitle,
    PostWriteRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

fn map_error(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            DomainError::Conflict("slug already exists".into())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

#[derive(Clone)]
pub struct SqlitePostWriteRepository {
    pool: Arc<SqlitePool>,
}

impl SqlitePostWriteRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct SqlitePostReadRepository {
    pool: Arc<SqlitePool>,
}

impl SqlitePostReadRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

// Column names follow the persisted schema: `rezume` is the summary,
// `info` is the body.
#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    title: String,
    rezume: String,
    info: String,
    created_at: DateTime<Utc>,
    slug: String,
}

impl TryFrom<PostRow> for Post {
    type Error = DomainError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Post {
            id: PostId::new(row.id)?,
            title: PostTitle::new(row.title)?,
            summary: PostSummary::new(row.rezume)?,
            body: PostBody::new(row.info)?,
            slug: PostSlug::new(row.slug)?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl PostWriteRepository for SqlitePostWriteRepository {
    async fn insert(&self, post: NewPost) -> DomainResult<Post> {
        let NewPost {
            title,
            summary,
            body,
            slug,
            created_at,
        } = post;

        let row = sqlx::query_as::<_, PostRow>(
            "INSERT INTO posts (title, rezume, info, created_at, slug) VALUES (?, ?, ?, ?, ?) \
             RETURNING id, title, rezume, info, created_at, slug",
        )
        .bind(title.as_str())
        .bind(summary.as_str())
        .bind(body.as_str())
        .bind(created_at)
        .bind(slug.as_str())
        .fetch_one(&*self.pool)
        .await
        .map_err(map_error)?;

        Post::try_from(row)
    }

    async fn delete(&self, id: PostId) -> DomainResult<()> {
        sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(i64::from(id))
            .execute(&*self.pool)
            .await
            .map_err(map_error)?;
        Ok(())
    }
}

#[async_trait]
impl PostReadRepository for SqlitePostReadRepository {
    async fn find_by_slug(&self, slug: &PostSlug) -> DomainResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            "SELECT id, title, rezume, info, created_at, slug FROM posts WHERE slug = ?",
        )
        .bind(slug.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_error)?;

        row.map(Post::try_from).transpose()
    }

    async fn count_by_slug(&self, slug: &PostSlug) -> DomainResult<u64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM posts WHERE slug = ?")
            .bind(slug.as_str())
            .fetch_one(&*self.pool)
            .await
            .map(|count| count as u64)
            .map_err(map_error)
    }

    async fn list(&self) -> DomainResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            "SELECT id, title, rezume, info, created_at, slug FROM posts \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(map_error)?;

        rows.into_iter().map(Post::try_from).collect()
    }
}
