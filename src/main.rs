use kiji::application::{
    commands::users::BootstrapAdminCommand,
    ports::{
        security::{PasswordHasher, SessionManager},
        time::Clock,
        util::SlugGenerator,
    },
    services::ApplicationServices,
};
use kiji::config::AppConfig;
use kiji::domain::{
    post::{PostReadRepository, PostWriteRepository},
    user::UserRepository,
};
use kiji::infrastructure::{
    database,
    repositories::{SqlitePostReadRepository, SqlitePostWriteRepository, SqliteUserRepository},
    security::{password::Argon2PasswordHasher, session::HmacSessionManager},
    time::SystemClock,
    util::AsciiSlugGenerator,
};
use kiji::presentation::http::{routes::build_router, state::HttpState};

use anyhow::Result;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;
    let pool = Arc::new(pool);

    let user_repo: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(Arc::clone(&pool)));
    let post_write_repo: Arc<dyn PostWriteRepository> =
        Arc::new(SqlitePostWriteRepository::new(Arc::clone(&pool)));
    let post_read_repo: Arc<dyn PostReadRepository> =
        Arc::new(SqlitePostReadRepository::new(Arc::clone(&pool)));

    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::default());
    let session_manager: Arc<dyn SessionManager> = Arc::new(HmacSessionManager::new(
        config.session_secret(),
        config.session_ttl_secs(),
    ));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::default());
    let slugger: Arc<dyn SlugGenerator> = Arc::new(AsciiSlugGenerator::default());

    let services = Arc::new(ApplicationServices::new(
        user_repo,
        post_write_repo,
        post_read_repo,
        password_hasher,
        session_manager,
        clock,
        slugger,
    ));

    match services
        .user_commands
        .bootstrap_admin(BootstrapAdminCommand {
            password: config.admin_password().to_owned(),
        })
        .await
    {
        Ok(Some(admin)) => tracing::info!(username = %admin.username, "bootstrap admin created"),
        Ok(None) => tracing::debug!("bootstrap admin already present"),
        Err(err) => return Err(err.into()),
    }

    let state = HttpState {
        services: Arc::clone(&services),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
