use crate::extractors::{json_config, not_found, path_config, query_config};
use crate::middleware::{PanicRecoveryMiddleware, RequestIdMiddleware};
use crate::routes;
use crate::state::AppState;
use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use movie_catalog_core::config::ServiceConfig;
use tracing::info;

/// Preflight cache lifetime in seconds
pub const CORS_MAX_AGE: usize = 86_400;

/// CORS policy: any origin, no credentials
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS", "PATCH"])
        .allow_any_header()
        .expose_headers(vec!["X-Request-ID"])
        .max_age(CORS_MAX_AGE)
}

/// Register extractor configs and routes on an app
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .configure(routes::configure);
}

pub struct Server {
    config: ServiceConfig,
    state: web::Data<AppState>,
}

impl Server {
    pub fn new(config: ServiceConfig, state: AppState) -> Self {
        Self {
            config,
            state: web::Data::new(state),
        }
    }

    /// Serve until SIGINT/SIGTERM, then drain within the shutdown timeout
    pub async fn run(self) -> anyhow::Result<()> {
        let bind_addr = format!("{}:{}", self.config.host, self.config.port);
        info!(
            bind = %bind_addr,
            workers = self.config.workers,
            version = env!("CARGO_PKG_VERSION"),
            "Starting HTTP server"
        );

        let state = self.state.clone();
        HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(PanicRecoveryMiddleware)
                .wrap(cors())
                .wrap(RequestIdMiddleware)
                .configure(configure_app)
                .default_service(web::to(not_found))
        })
        .workers(self.config.workers)
        .shutdown_timeout(self.config.shutdown_timeout.as_secs())
        .bind(&bind_addr)?
        .run()
        .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}
