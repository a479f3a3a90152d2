use super::{lenient_int, non_blank, parse_movie_id};
use crate::services::MovieInput;
use crate::state::AppState;
use actix_web::{http::StatusCode, web, HttpResponse};
use movie_catalog_core::pagination::PageRequest;
use movie_catalog_core::query::{DateRange, MovieListQuery, MovieSortField, SortOrder};
use movie_catalog_core::response::ApiResponse;
use movie_catalog_core::CatalogError;
use serde::Deserialize;
use tracing::debug;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/movies")
            .route("", web::get().to(list_movies))
            .route("", web::post().to(create_movie))
            .route("/{id}", web::get().to(get_movie))
            .route("/{id}", web::put().to(update_movie))
            .route("/{id}", web::delete().to(delete_movie)),
    );
}

/// Raw list parameters; numbers are parsed leniently
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ListParams {
    pub fn into_query(self) -> MovieListQuery {
        MovieListQuery {
            page: PageRequest::new(
                lenient_int(self.page.as_deref()),
                lenient_int(self.limit.as_deref()),
            ),
            search: non_blank(self.search),
            release_dates: DateRange::new(self.start_date, self.end_date),
            sort_by: MovieSortField::parse(self.sort_by.as_deref()),
            order: SortOrder::parse(self.order.as_deref()),
        }
    }
}

async fn list_movies(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, CatalogError> {
    let query = params.into_inner().into_query();
    debug!(?query, "List movies request");

    let (movies, meta) = state.movies.list(&query).await?;
    Ok(ApiResponse::paginated("Movies retrieved successfully", movies, meta).into_response())
}

async fn get_movie(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, CatalogError> {
    let id = parse_movie_id(&path)?;
    let movie = state.movies.get(id).await?;
    Ok(ApiResponse::success(200, "Movie retrieved successfully", movie).into_response())
}

async fn create_movie(
    state: web::Data<AppState>,
    body: web::Json<MovieInput>,
) -> Result<HttpResponse, CatalogError> {
    let movie = state.movies.create(body.into_inner()).await?;
    Ok(ApiResponse::success(
        StatusCode::CREATED.as_u16(),
        "Movie created successfully",
        movie,
    )
    .into_response())
}

async fn update_movie(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<MovieInput>,
) -> Result<HttpResponse, CatalogError> {
    let id = parse_movie_id(&path)?;
    let movie = state.movies.update(id, body.into_inner()).await?;
    Ok(ApiResponse::success(200, "Movie updated successfully", movie).into_response())
}

async fn delete_movie(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, CatalogError> {
    let id = parse_movie_id(&path)?;
    state.movies.delete(id).await?;
    Ok(ApiResponse::success(200, "Movie deleted successfully", serde_json::Value::Null)
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_fall_back_to_defaults() {
        let query = ListParams {
            page: Some("-1".into()),
            limit: Some("lots".into()),
            search: Some("   ".into()),
            sort_by: Some("budget".into()),
            order: Some("sideways".into()),
            ..ListParams::default()
        }
        .into_query();

        assert_eq!(query.page.page, 1);
        assert_eq!(query.page.limit, 20);
        assert_eq!(query.search, None);
        assert_eq!(query.sort_by, MovieSortField::UpdatedAt);
        assert_eq!(query.order, SortOrder::Desc);
    }

    #[test]
    fn test_list_params_clamp_limit() {
        let query = ListParams {
            limit: Some("500".into()),
            sort_by: Some("title".into()),
            order: Some("ASC".into()),
            ..ListParams::default()
        }
        .into_query();

        assert_eq!(query.page.limit, 100);
        assert_eq!(query.sort_by, MovieSortField::Title);
        assert_eq!(query.order, SortOrder::Asc);
    }
}
