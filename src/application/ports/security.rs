// src/application/ports/security.rs
use crate::application::{
    ApplicationResult,
    dto::{AuthenticatedUser, SessionSubject, SessionTokenDto},
};
use async_trait::async_trait;

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> ApplicationResult<String>;
    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()>;
}

/// Issues and validates the opaque tokens that identify a logged-in user.
/// The route layer only ever asks two questions of the result: is the
/// request authenticated, and is the current user a superuser.
#[async_trait]
pub trait SessionManager: Send + Sync {
    async fn issue(&self, subject: SessionSubject) -> ApplicationResult<SessionTokenDto>;
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser>;
}
