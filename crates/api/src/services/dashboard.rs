//! Dashboard statistics and chart series

use movie_catalog_core::models::{
    validate_chart_year, ChartData, ColumnChartData, DashboardStats, PieChartData, SyncLog,
};
use movie_catalog_core::query::DateRange;
use movie_catalog_core::repository::CatalogStore;
use movie_catalog_core::Result;
use std::sync::Arc;

pub struct DashboardService {
    store: Arc<dyn CatalogStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        self.store.dashboard_stats().await
    }

    pub async fn last_sync_log(&self) -> Result<Option<SyncLog>> {
        self.store.last_sync_log().await
    }

    /// Language pie plus release-year columns
    pub async fn charts(&self, range: &DateRange) -> Result<ChartData> {
        Ok(ChartData {
            pie_chart: self.store.movies_by_language().await?,
            column_chart: self.store.movies_by_year(range).await?,
        })
    }

    pub async fn language_chart(&self) -> Result<Vec<PieChartData>> {
        self.store.movies_by_language().await
    }

    pub async fn year_chart(&self, range: &DateRange) -> Result<Vec<ColumnChartData>> {
        self.store.movies_by_year(range).await
    }

    /// Twelve monthly buckets for `year` (1900..=2100)
    pub async fn monthly_chart(&self, year: i32) -> Result<Vec<ColumnChartData>> {
        validate_chart_year(year)?;
        self.store.movies_by_month(year).await
    }
}
