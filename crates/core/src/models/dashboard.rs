//! Dashboard aggregates and chart series
//!
//! All of these are derived on request and never persisted.

use super::movie::Movie;
use crate::error::CatalogError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Earliest year accepted by the monthly chart
pub const MIN_CHART_YEAR: i32 = 1900;

/// Latest year accepted by the monthly chart
pub const MAX_CHART_YEAR: i32 = 2100;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_movies: i64,
    pub average_rating: f64,
    pub total_votes: i64,
    pub last_sync_time: Option<DateTime<Utc>>,
    pub top_rated_movies: Vec<Movie>,
    pub most_popular: Vec<Movie>,
    pub recently_added: Vec<Movie>,
}

/// Movie count for one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PieChartData {
    pub label: String,
    pub value: i64,
    pub code: String,
}

/// Movie count for one year or month bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ColumnChartData {
    pub label: String,
    pub value: i64,
}

/// Combined language and year charts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    pub pie_chart: Vec<PieChartData>,
    pub column_chart: Vec<ColumnChartData>,
}

/// Reject years outside the supported chart window
pub fn validate_chart_year(year: i32) -> Result<(), CatalogError> {
    if (MIN_CHART_YEAR..=MAX_CHART_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(CatalogError::Validation(format!("invalid year: {}", year)))
    }
}

/// Expand sparse `(month, count)` pairs into twelve labelled buckets
///
/// Months are 1-based; anything outside 1..=12 is ignored.
pub fn monthly_series(counts: &[(u32, i64)]) -> Vec<ColumnChartData> {
    let mut buckets = [0i64; 12];
    for &(month, count) in counts {
        if (1..=12).contains(&month) {
            buckets[(month - 1) as usize] += count;
        }
    }

    MONTH_LABELS
        .iter()
        .zip(buckets)
        .map(|(label, value)| ColumnChartData {
            label: (*label).to_string(),
            value,
        })
        .collect()
}
