//! # Movie Catalog API
//!
//! actix-web front end for the catalog: movie CRUD and listing, TMDB sync,
//! dashboard statistics, chart series, presigned image uploads and health.

pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;

pub use server::{configure_app, Server};
pub use state::AppState;
