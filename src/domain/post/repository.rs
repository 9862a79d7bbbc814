use crate::domain::errors::DomainResult;
use crate::domain::post::entity::{NewPost, Post};
use crate::domain::post::value_objects::{PostId, PostSlug};
use async_trait::async_trait;

#[async_trait]
pub trait PostWriteRepository: Send + Sync {
    /// Persist a new post. The storage-level unique constraint on the slug
    /// column is the backstop for the check-then-insert race; a collision
    /// surfaces as `DomainError::Conflict`.
    async fn insert(&self, post: NewPost) -> DomainResult<Post>;
    async fn delete(&self, id: PostId) -> DomainResult<()>;
}

#[async_trait]
pub trait PostReadRepository: Send + Sync {
    async fn find_by_slug(&self, slug: &PostSlug) -> DomainResult<Option<Post>>;
    /// Uniqueness oracle: how many stored posts carry this exact slug.
    async fn count_by_slug(&self, slug: &PostSlug) -> DomainResult<u64>;
    /// All posts, newest first.
    async fn list(&self) -> DomainResult<Vec<Post>>;
}
