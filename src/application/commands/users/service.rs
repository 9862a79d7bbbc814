use std::sync::Arc;

use crate::application::ports::security::{PasswordHasher, SessionManager};
use crate::domain::user::UserRepository;

pub struct UserCommandService {
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) password_hasher: Arc<dyn PasswordHasher>,
    pub(super) session_manager: Arc<dyn SessionManager>,
}

impl UserCommandService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        session_manager: Arc<dyn SessionManager>,
    ) -> Self {
        Self {
            user_repo,
            password_hasher,
            session_manager,
        }
    }
}
