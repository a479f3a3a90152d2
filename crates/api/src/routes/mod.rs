//! HTTP routes, mounted under `/api/v1` except `/health`

pub mod charts;
pub mod dashboard;
pub mod health;
pub mod movies;
pub mod sync;
pub mod upload;

use actix_web::web;
use movie_catalog_core::CatalogError;

pub const API_PREFIX: &str = "/api/v1";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure).service(
        web::scope(API_PREFIX)
            .configure(movies::configure)
            .configure(sync::configure)
            .configure(dashboard::configure)
            .configure(charts::configure)
            .configure(upload::configure),
    );
}

/// Lenient integer query value; unparsable input counts as absent
pub(crate) fn lenient_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse().ok())
}

pub(crate) fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Positive movie id from a path segment
pub(crate) fn parse_movie_id(raw: &str) -> Result<i64, CatalogError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| CatalogError::validation("Invalid movie ID"))
}
