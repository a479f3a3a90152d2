//! Application services behind the HTTP handlers

pub mod dashboard;
pub mod movie;

pub use dashboard::DashboardService;
pub use movie::{MovieInput, MovieService};
