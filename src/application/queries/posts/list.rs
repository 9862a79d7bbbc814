use super::PostQueryService;
use crate::application::{dto::PostDto, error::ApplicationResult};

impl PostQueryService {
    /// Every post, newest first. The listing is public.
    pub async fn list_posts(&self) -> ApplicationResult<Vec<PostDto>> {
        let posts = self.read_repo.list().await?;
        Ok(posts.into_iter().map(Into::into).collect())
    }
}
