// src/domain/post/services/mod.rs
use std::sync::Arc;

use chrono::Utc;

use crate::application::ports::util::SlugGenerator;
use crate::domain::errors::DomainResult;
use crate::domain::post::repository::PostReadRepository;
use crate::domain::post::value_objects::{PostSlug, PostTitle};

/// Domain service responsible for producing unique slugs for posts.
///
/// The generator normalizes the title; this service resolves collisions by
/// appending `-1`, `-2`, … until the uniqueness oracle reports zero matches.
/// The result is unique at the instant of the check only; the database
/// constraint remains authoritative under concurrent creation.
pub struct PostSlugService {
    read_repo: Arc<dyn PostReadRepository>,
    generator: Arc<dyn SlugGenerator>,
}

impl PostSlugService {
    pub fn new(read_repo: Arc<dyn PostReadRepository>, generator: Arc<dyn SlugGenerator>) -> Self {
        Self {
            read_repo,
            generator,
        }
    }

    pub async fn generate_unique_slug(&self, title: &PostTitle) -> DomainResult<PostSlug> {
        let base = self.generator.slugify(title.as_str());
        // An all-punctuation title normalizes to nothing; fall back to a
        // timestamped placeholder instead of rejecting the post.
        let base_slug = if base.is_empty() {
            format!("post-{}", Utc::now().timestamp())
        } else {
            base
        };

        let mut candidate = base_slug.clone();
        let mut counter = 1u64;

        loop {
            let slug = PostSlug::new(candidate)?;
            if self.read_repo.count_by_slug(&slug).await? == 0 {
                return Ok(slug);
            }
            candidate = format!("{base_slug}-{counter}");
            counter += 1;
        }
    }
}
