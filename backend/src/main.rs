//! Server entry point: loads launch settings, selects the principal store,
//! and runs the HTTP server until shutdown.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};

use server::{ServerConfig, create_server};
use signin::domain::PasswordLoginService;
use signin::domain::ports::UserRepository;
use signin::inbound::http::health::HealthState;
use signin::inbound::http::session_config::fingerprint::key_fingerprint;
use signin::inbound::http::session_config::{BuildMode, session_settings_from_env};
use signin::inbound::http::state::HttpState;
use signin::launch::{LaunchSettings, PidFile, ThreadBounds, init_logging};
use signin::outbound::InMemoryUserRepository;
use signin::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    let settings = LaunchSettings::load_from_iter(std::env::args_os())
        .map_err(|error| io::Error::other(format!("load launch settings: {error}")))?;
    init_logging(&settings)?;

    let threads = settings.thread_bounds().map_err(io::Error::other)?;
    let bind = settings.bind_target().map_err(io::Error::other)?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    info!(fingerprint = %key_fingerprint(&session.key), "session key loaded");

    let users = build_user_repository(&settings, threads).await?;
    let login = Arc::new(PasswordLoginService::new(users.clone()));
    let config = ServerConfig::new(session, bind, threads, HttpState::new(login, users));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let _pidfile = PidFile::create(settings.pidfile())?;
    info!(environment = settings.environment(), "server started");

    let result = server.await;
    health_state.mark_draining();
    info!("server stopped");
    result
}

async fn build_user_repository(
    settings: &LaunchSettings,
    threads: ThreadBounds,
) -> io::Result<Arc<dyn UserRepository>> {
    if let Some(url) = settings.database_url.as_deref() {
        let max_size = u32::try_from(threads.max).unwrap_or(u32::MAX);
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(max_size))
            .await
            .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
        info!("using PostgreSQL principal store");
        return Ok(Arc::new(DieselUserRepository::new(pool)));
    }

    match settings.users_file.as_deref() {
        Some(path) => {
            let repo = InMemoryUserRepository::from_seed_file(path).map_err(io::Error::other)?;
            info!(path = %path.display(), users = repo.len(), "loaded principal seed file");
            Ok(Arc::new(repo))
        }
        None => {
            warn!("no APP_DATABASE_URL or APP_USERS_FILE set; every login will fail");
            Ok(Arc::new(InMemoryUserRepository::default()))
        }
    }
}
