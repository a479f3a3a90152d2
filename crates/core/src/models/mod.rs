//! Domain models for the movie catalog

pub mod dashboard;
pub mod movie;
pub mod reference;
pub mod sync_log;

pub use dashboard::{
    monthly_series, validate_chart_year, ChartData, ColumnChartData, DashboardStats,
    PieChartData, MAX_CHART_YEAR, MIN_CHART_YEAR, MONTH_LABELS,
};
pub use movie::{Movie, MovieRecord};
pub use reference::{Genre, Language};
pub use sync_log::{NewSyncLog, SyncLog, SyncStatus, SYNC_TYPE_MANUAL};
