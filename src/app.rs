use std::io;

use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::domain::error::AppError;
use crate::infrastructure::bootstrap::build_state;
use crate::infrastructure::config::ConfigService;
use crate::interfaces::http::start_server;

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn startup_error(err: AppError) -> io::Error {
    error!(error = %err.log_detail(), "Startup failed");
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

pub fn run() -> io::Result<()> {
    let config = match ConfigService::load() {
        Ok(config) => config,
        Err(err) => {
            init_tracing("info");
            return Err(startup_error(err));
        }
    };
    init_tracing(&config.log_filter);

    let state = build_state(&config).map_err(startup_error)?;

    actix_web::rt::System::new().block_on(async move {
        let server = start_server(state.clone(), &config.server).map_err(|err| {
            error!(error = %err, host = %config.server.host, port = config.server.port, "Failed to bind HTTP server");
            err
        })?;

        state.log(
            "INFO",
            "System",
            &format!(
                "HTTP server started on {}:{}",
                config.server.host, config.server.port
            ),
        );

        server.await
    })
}
