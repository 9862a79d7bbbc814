pub mod entity;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{NewPost, Post};
pub use repository::{PostReadRepository, PostWriteRepository};
pub use value_objects::{PostBody, PostId, PostSlug, PostSummary, PostTitle};
