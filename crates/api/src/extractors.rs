//! Extractor error handlers
//!
//! Malformed bodies, query strings and path segments are answered with a 400
//! envelope instead of actix-web's plain-text defaults.

use actix_web::{web, HttpRequest, HttpResponse};
use movie_catalog_core::CatalogError;
use tracing::debug;

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        debug!(path = %req.path(), error = %err, "Rejected JSON body");
        CatalogError::validation(format!("Invalid request body: {}", err)).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| {
        debug!(path = %req.path(), error = %err, "Rejected query string");
        CatalogError::validation(format!("Invalid query parameters: {}", err)).into()
    })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| {
        debug!(path = %req.path(), error = %err, "Rejected path parameters");
        CatalogError::validation(format!("Invalid path parameters: {}", err)).into()
    })
}

/// Envelope for unmatched routes
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, CatalogError> {
    Err(CatalogError::not_found(format!(
        "Route {} {} not found",
        req.method(),
        req.path()
    )))
}
