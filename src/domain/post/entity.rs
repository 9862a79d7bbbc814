// src/domain/post/entity.rs
use crate::domain::post::value_objects::{PostBody, PostId, PostSlug, PostSummary, PostTitle};
use chrono::{DateTime, Utc};

/// A published blog post. Slug and creation time are fixed at insert;
/// there is no update flow.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub summary: PostSummary,
    pub body: PostBody,
    pub slug: PostSlug,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: PostTitle,
    pub summary: PostSummary,
    pub body: PostBody,
    pub slug: PostSlug,
    pub created_at: DateTime<Utc>,
}
