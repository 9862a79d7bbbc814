use crate::domain::post::Post;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDto {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.into(),
            title: post.title.into(),
            summary: post.summary.into(),
            body: post.body.into(),
            slug: post.slug.into(),
            created_at: post.created_at,
        }
    }
}

/// Returned by the delete flow so the caller can show what was removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedPostDto {
    pub title: String,
    pub slug: String,
}
