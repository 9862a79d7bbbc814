#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;

use kiji::application::dto::AuthenticatedUser;
use kiji::application::error::{ApplicationError, ApplicationResult};
use kiji::application::ports::security::PasswordHasher;
use kiji::application::ports::time::Clock;
use kiji::application::services::ApplicationServices;
use kiji::domain::errors::{DomainError, DomainResult};
use kiji::domain::post::{
    NewPost, Post, PostId, PostReadRepository, PostSlug, PostWriteRepository,
};
use kiji::domain::user::{NewUser, Role, User, UserId, UserRepository, Username};
use kiji::infrastructure::security::session::HmacSessionManager;
use kiji::infrastructure::util::AsciiSlugGenerator;

pub static FIXED_NOW: Lazy<DateTime<Utc>> =
    Lazy::new(|| DateTime::from_timestamp(1_700_000_000, 0).unwrap());

pub const TEST_SECRET: &str = "test-secret-test-secret-test-secret!";

/* ------------------------------ clock ------------------------------ */

pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *FIXED_NOW
    }
}

/* -------------------------- password hashing ------------------------ */

/// Transparent stand-in for argon2 so service tests stay fast.
pub struct DummyPasswordHasher;

#[async_trait]
impl PasswordHasher for DummyPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash == format!("hashed:{password}") {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}

/* --------------------------- post store ----------------------------- */

/// Shared in-memory post table, mimicking the unique slug constraint.
#[derive(Default)]
pub struct PostStore {
    inner: Mutex<PostStoreInner>,
}

#[derive(Default)]
struct PostStoreInner {
    next_id: i64,
    posts: Vec<Post>,
}

pub struct InMemoryPostWriteRepo(pub Arc<PostStore>);
pub struct InMemoryPostReadRepo(pub Arc<PostStore>);

#[async_trait]
impl PostWriteRepository for InMemoryPostWriteRepo {
    async fn insert(&self, post: NewPost) -> DomainResult<Post> {
        let mut inner = self.0.inner.lock().unwrap();
        if inner.posts.iter().any(|p| p.slug == post.slug) {
            return Err(DomainError::Conflict("slug already exists".into()));
        }
        inner.next_id += 1;
        let stored = Post {
            id: PostId::new(inner.next_id)?,
            title: post.title,
            summary: post.summary,
            body: post.body,
            slug: post.slug,
            created_at: post.created_at,
        };
        inner.posts.push(stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: PostId) -> DomainResult<()> {
        let mut inner = self.0.inner.lock().unwrap();
        inner.posts.retain(|p| p.id != id);
        Ok(())
    }
}

#[async_trait]
impl PostReadRepository for InMemoryPostReadRepo {
    async fn find_by_slug(&self, slug: &PostSlug) -> DomainResult<Option<Post>> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.posts.iter().find(|p| &p.slug == slug).cloned())
    }

    async fn count_by_slug(&self, slug: &PostSlug) -> DomainResult<u64> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.posts.iter().filter(|p| &p.slug == slug).count() as u64)
    }

    async fn list(&self) -> DomainResult<Vec<Post>> {
        let inner = self.0.inner.lock().unwrap();
        let mut posts = inner.posts.clone();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| i64::from(b.id).cmp(&i64::from(a.id)))
        });
        Ok(posts)
    }
}

/* --------------------------- user store ----------------------------- */

#[derive(Default)]
pub struct InMemoryUserRepo {
    inner: Mutex<UserStoreInner>,
}

#[derive(Default)]
struct UserStoreInner {
    next_id: i64,
    users: Vec<User>,
}

impl InMemoryUserRepo {
    pub fn user_count(&self) -> usize {
        self.inner.lock().unwrap().users.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .users
            .iter()
            .any(|u| u.username.as_str() == new_user.username.as_str())
        {
            return Err(DomainError::Conflict("username already exists".into()));
        }
        inner.next_id += 1;
        let stored = User {
            id: UserId::new(inner.next_id)?,
            username: new_user.username,
            password_hash: new_user.password_hash,
            role: new_user.role,
        };
        inner.users.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .iter()
            .find(|u| u.username.as_str() == username.as_str())
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }
}

/* ------------------------------ actors ------------------------------ */

pub fn admin_actor() -> AuthenticatedUser {
    actor_with_role(1, "admin", Role::Admin)
}

pub fn member_actor() -> AuthenticatedUser {
    actor_with_role(2, "reader", Role::Member)
}

fn actor_with_role(id: i64, username: &str, role: Role) -> AuthenticatedUser {
    AuthenticatedUser {
        id: UserId::new(id).unwrap(),
        username: username.into(),
        capabilities: role.default_capabilities(),
        role,
        issued_at: *FIXED_NOW,
        expires_at: *FIXED_NOW + Duration::hours(1),
        session_id: "test-session".into(),
    }
}

/* ----------------------------- wiring ------------------------------- */

/// Full stack over an in-memory SQLite database: real repositories, real
/// argon2 hashing, real session tokens. The bootstrap admin logs in with
/// "admin-password".
pub async fn make_test_router() -> axum::Router {
    use kiji::application::commands::users::BootstrapAdminCommand;
    use kiji::infrastructure::database;
    use kiji::infrastructure::repositories::{
        SqlitePostReadRepository, SqlitePostWriteRepository, SqliteUserRepository,
    };
    use kiji::infrastructure::security::password::Argon2PasswordHasher;
    use kiji::infrastructure::time::SystemClock;
    use kiji::presentation::http::{routes::build_router, state::HttpState};
    use sqlx::sqlite::SqlitePoolOptions;

    // A single connection keeps the in-memory database alive and shared.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    database::run_migrations(&pool).await.expect("migrations");
    let pool = Arc::new(pool);

    let services = Arc::new(ApplicationServices::new(
        Arc::new(SqliteUserRepository::new(Arc::clone(&pool))),
        Arc::new(SqlitePostWriteRepository::new(Arc::clone(&pool))),
        Arc::new(SqlitePostReadRepository::new(Arc::clone(&pool))),
        Arc::new(Argon2PasswordHasher),
        Arc::new(HmacSessionManager::new(TEST_SECRET, 3600)),
        Arc::new(SystemClock),
        Arc::new(AsciiSlugGenerator),
    ));

    services
        .user_commands
        .bootstrap_admin(BootstrapAdminCommand {
            password: "admin-password".into(),
        })
        .await
        .expect("bootstrap admin");

    build_router(HttpState { services })
}

/// Application services over in-memory stores; the returned handles allow
/// direct inspection from tests.
pub fn make_services() -> (Arc<ApplicationServices>, Arc<PostStore>, Arc<InMemoryUserRepo>) {
    let post_store = Arc::new(PostStore::default());
    let user_repo = Arc::new(InMemoryUserRepo::default());

    let services = Arc::new(ApplicationServices::new(
        Arc::clone(&user_repo) as Arc<dyn UserRepository>,
        Arc::new(InMemoryPostWriteRepo(Arc::clone(&post_store))),
        Arc::new(InMemoryPostReadRepo(Arc::clone(&post_store))),
        Arc::new(DummyPasswordHasher),
        Arc::new(HmacSessionManager::new(TEST_SECRET, 3600)),
        Arc::new(FixedClock),
        Arc::new(AsciiSlugGenerator),
    ));

    (services, post_store, user_repo)
}
