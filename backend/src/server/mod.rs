//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::io;
use std::path::Path;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{debug, info};

use signin::Trace;
use signin::inbound::http::configure;
use signin::inbound::http::health::{HealthState, live, ready};
use signin::inbound::http::session_config::SessionSettings;
use signin::inbound::http::state::HttpState;
use signin::launch::BindTarget;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: SessionSettings,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(ready)
        .service(live)
        .service(
            web::scope("")
                .wrap(session.middleware())
                .configure(configure),
        )
        .wrap(Trace)
}

/// Construct the Actix server described by `config`.
///
/// The worker count follows the configured maximum thread count. The health
/// state is marked ready once the listener is bound.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the listener fails.
pub fn create_server(health_state: web::Data<HealthState>, config: ServerConfig) -> io::Result<Server> {
    let ServerConfig {
        session,
        bind,
        threads,
        http_state,
    } = config;
    let http_state = web::Data::new(http_state);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            session: session.clone(),
        })
    })
    .workers(threads.max);

    let server = match &bind {
        BindTarget::Unix(path) => {
            remove_stale_socket(path)?;
            server.bind_uds(path)?
        }
        BindTarget::Tcp { host, port } => server.bind((host.as_str(), *port))?,
    };

    info!(
        bind = %bind,
        min_threads = threads.min,
        max_threads = threads.max,
        "listener bound"
    );
    health_state.mark_ready();
    Ok(server.run())
}

/// Remove a socket file left behind by an earlier process.
///
/// Anything other than a socket is left alone so a typo in `APP_BIND`
/// cannot delete a regular file.
fn remove_stale_socket(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::FileTypeExt;

    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_socket() => {
            debug!(path = %path.display(), "removing stale socket");
            std::fs::remove_file(path)
        }
        Ok(_) => Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} exists and is not a socket", path.display()),
        )),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(error),
    }
}
