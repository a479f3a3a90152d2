use crate::state::AppState;
use actix_web::{web, HttpResponse};
use movie_catalog_core::query::DateRange;
use movie_catalog_core::response::ApiResponse;
use movie_catalog_core::CatalogError;
use serde::Deserialize;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/charts")
            .route("", web::get().to(chart_data))
            .route("/pie", web::get().to(pie_chart))
            .route("/column", web::get().to(column_chart))
            .route("/monthly/{year}", web::get().to(monthly_chart)),
    );
}

#[derive(Debug, Default, Deserialize)]
pub struct RangeParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl RangeParams {
    fn into_range(self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

async fn chart_data(
    state: web::Data<AppState>,
    params: web::Query<RangeParams>,
) -> Result<HttpResponse, CatalogError> {
    let charts = state.dashboard.charts(&params.into_inner().into_range()).await?;
    Ok(ApiResponse::success(200, "Chart data retrieved successfully", charts).into_response())
}

async fn pie_chart(state: web::Data<AppState>) -> Result<HttpResponse, CatalogError> {
    let data = state.dashboard.language_chart().await?;
    Ok(ApiResponse::success(200, "Pie chart data retrieved successfully", data).into_response())
}

async fn column_chart(
    state: web::Data<AppState>,
    params: web::Query<RangeParams>,
) -> Result<HttpResponse, CatalogError> {
    let data = state
        .dashboard
        .year_chart(&params.into_inner().into_range())
        .await?;
    Ok(ApiResponse::success(200, "Column chart data retrieved successfully", data).into_response())
}

async fn monthly_chart(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, CatalogError> {
    let year: i32 = path
        .trim()
        .parse()
        .map_err(|_| CatalogError::validation("Invalid year format"))?;

    let data = state.dashboard.monthly_chart(year).await?;
    Ok(ApiResponse::success(200, "Monthly chart data retrieved successfully", data).into_response())
}
