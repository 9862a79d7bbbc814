pub mod auth;
pub mod posts;
pub mod users;

pub use auth::{AuthenticatedUser, SessionSubject, SessionTokenDto};
pub use posts::{DeletedPostDto, PostDto};
pub use users::{CapabilityView, UserDto, UserProfileDto};
