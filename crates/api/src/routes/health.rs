use crate::state::AppState;
use actix_web::{web, HttpResponse};
use movie_catalog_core::health::ServiceHealth;

pub const SERVICE_NAME: &str = "movie-catalog";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}

/// Liveness plus database status; always 200 while the process serves
async fn health(state: web::Data<AppState>) -> HttpResponse {
    let report = ServiceHealth::check(
        SERVICE_NAME,
        env!("CARGO_PKG_VERSION"),
        state.store.as_ref(),
        state.health_timeout,
    )
    .await;

    HttpResponse::Ok().json(report)
}
