// src/application/commands/posts/create.rs
use super::{PostCommandService, capability::ensure_capability};
use crate::{
    application::{
        dto::{AuthenticatedUser, PostDto},
        error::ApplicationResult,
    },
    domain::post::{NewPost, PostBody, PostSummary, PostTitle},
};
use chrono::{DateTime, Utc};

pub struct CreatePostCommand {
    pub title: String,
    pub summary: String,
    pub body: String,
    /// Explicit creation time; defaults to the clock when absent.
    pub created_at: Option<DateTime<Utc>>,
}

impl PostCommandService {
    pub async fn create_post(
        &self,
        actor: &AuthenticatedUser,
        command: CreatePostCommand,
    ) -> ApplicationResult<PostDto> {
        ensure_capability(actor, "posts", "create")?;

        let title = PostTitle::new(command.title)?;
        let summary = PostSummary::new(command.summary)?;
        let body = PostBody::new(command.body)?;
        let created_at = command.created_at.unwrap_or_else(|| self.clock.now());

        let slug = self.slug_service.generate_unique_slug(&title).await?;

        let new_post = NewPost {
            title,
            summary,
            body,
            slug,
            created_at,
        };

        // A concurrent insert can still claim the slug first; the unique
        // constraint surfaces as Conflict.
        let created = self.write_repo.insert(new_post).await?;
        Ok(created.into())
    }
}
