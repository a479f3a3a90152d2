use crate::state::AppState;
use actix_web::{web, HttpResponse};
use movie_catalog_core::response::ApiResponse;
use movie_catalog_core::CatalogError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard/stats", web::get().to(dashboard_stats));
}

async fn dashboard_stats(state: web::Data<AppState>) -> Result<HttpResponse, CatalogError> {
    let stats = state.dashboard.stats().await?;
    Ok(
        ApiResponse::success(200, "Dashboard statistics retrieved successfully", stats)
            .into_response(),
    )
}
