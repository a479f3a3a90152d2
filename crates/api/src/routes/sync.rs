use super::lenient_int;
use crate::state::AppState;
use actix_web::{http::StatusCode, web, HttpResponse};
use movie_catalog_core::response::ApiResponse;
use movie_catalog_core::CatalogError;
use serde::Deserialize;
use tracing::info;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/sync")
            .route("/movies", web::post().to(sync_movies))
            .route("/last-log", web::get().to(last_sync_log)),
    );
}

#[derive(Debug, Default, Deserialize)]
pub struct SyncParams {
    pub pages: Option<String>,
}

/// Run a sync; a failed run answers 500 with the persisted log as `data`
async fn sync_movies(
    state: web::Data<AppState>,
    params: web::Query<SyncParams>,
) -> HttpResponse {
    let pages = lenient_int(params.pages.as_deref()).unwrap_or(1);
    info!(pages, "Sync requested");

    match state.sync.run(pages).await {
        Ok(log) => ApiResponse::success(200, "Movies synced successfully", log).into_response(),
        Err(failure) => ApiResponse::error_with_data(
            StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            "Failed to sync movies",
            failure.log,
        )
        .into_response(),
    }
}

async fn last_sync_log(state: web::Data<AppState>) -> Result<HttpResponse, CatalogError> {
    let response = match state.dashboard.last_sync_log().await? {
        Some(log) => {
            let data = serde_json::to_value(log)
                .map_err(|e| CatalogError::Internal(format!("failed to encode sync log: {}", e)))?;
            ApiResponse::success(200, "Last sync log retrieved successfully", data)
        }
        None => ApiResponse::success(200, "No sync log found", serde_json::Value::Null),
    };
    Ok(response.into_response())
}
