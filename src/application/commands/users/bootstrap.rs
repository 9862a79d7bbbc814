use super::UserCommandService;
use crate::{
    application::{dto::UserDto, error::ApplicationResult},
    domain::{
        errors::DomainError,
        user::{NewUser, PasswordHash, Role, Username},
    },
};

pub const ADMIN_USERNAME: &str = "admin";

pub struct BootstrapAdminCommand {
    pub password: String,
}

impl UserCommandService {
    /// One-time administrator bootstrap, run at startup after migrations.
    /// Idempotent: if the "admin" row already exists nothing changes and
    /// `None` is returned.
    pub async fn bootstrap_admin(
        &self,
        command: BootstrapAdminCommand,
    ) -> ApplicationResult<Option<UserDto>> {
        let username = Username::new(ADMIN_USERNAME)?;

        if self.user_repo.find_by_username(&username).await?.is_some() {
            return Ok(None);
        }

        let hashed = self.password_hasher.hash(&command.password).await?;
        let password_hash = PasswordHash::new(hashed)?;
        let new_user = NewUser::new(username, password_hash, Role::Admin);

        match self.user_repo.insert(new_user).await {
            Ok(user) => Ok(Some(user.into())),
            // Another process won the bootstrap race; the invariant of exactly
            // one admin row still holds.
            Err(DomainError::Conflict(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
