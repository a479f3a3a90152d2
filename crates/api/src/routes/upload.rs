use crate::state::AppState;
use actix_web::{web, HttpResponse};
use movie_catalog_core::response::ApiResponse;
use movie_catalog_core::CatalogError;
use serde::Deserialize;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/upload/presign", web::get().to(presign_upload));
}

#[derive(Debug, Default, Deserialize)]
pub struct PresignParams {
    pub filename: Option<String>,
    #[serde(rename = "contentType")]
    pub content_type: Option<String>,
}

async fn presign_upload(
    state: web::Data<AppState>,
    params: web::Query<PresignParams>,
) -> Result<HttpResponse, CatalogError> {
    let filename = params.filename.as_deref().unwrap_or_default();
    if filename.trim().is_empty() {
        return Err(CatalogError::validation("filename is required"));
    }

    let uploads = state
        .uploads
        .as_ref()
        .ok_or_else(|| CatalogError::Storage("object storage is not configured".into()))?;

    let upload = uploads
        .presign(filename, params.content_type.as_deref())
        .await?;

    Ok(ApiResponse::success(200, "Presigned URL generated successfully", upload).into_response())
}
