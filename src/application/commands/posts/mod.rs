mod capability;
mod create;
mod delete;
mod service;

pub use create::CreatePostCommand;
pub use delete::DeletePostCommand;
pub use service::PostCommandService;
