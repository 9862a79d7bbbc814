// src/application/commands/posts/delete.rs
use super::{PostCommandService, capability::ensure_capability};
use crate::{
    application::{
        dto::{AuthenticatedUser, DeletedPostDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::post::PostSlug,
};

pub struct DeletePostCommand {
    pub slug: String,
}

impl PostCommandService {
    pub async fn delete_post(
        &self,
        actor: &AuthenticatedUser,
        command: DeletePostCommand,
    ) -> ApplicationResult<DeletedPostDto> {
        ensure_capability(actor, "posts", "delete")?;

        let slug = PostSlug::new(command.slug)?;
        let post = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;

        self.write_repo.delete(post.id).await?;

        Ok(DeletedPostDto {
            title: post.title.into(),
            slug: post.slug.into(),
        })
    }
}
