mod bootstrap;
mod login;
mod password;
mod register;
mod service;

pub use bootstrap::{ADMIN_USERNAME, BootstrapAdminCommand};
pub use login::{LoginResult, LoginUserCommand};
pub use register::RegisterUserCommand;
pub use service::UserCommandService;
