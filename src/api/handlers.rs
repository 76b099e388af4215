use axum::Json;
use axum::extract::{Path, Query as AxumQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{debug, instrument};

use crate::search::{self, SearchQuery, SortKey, SortOrder};

use super::state::AppState;
use super::types::{
    ApiError, MovieItem, PosterFailure, PosterParams, PosterResponse, SearchParams, SearchResponse,
};

pub async fn healthz() -> &'static str {
    "ok"
}

#[instrument(skip_all)]
pub async fn search_movies(
    State(state): State<AppState>,
    AxumQuery(params): AxumQuery<SearchParams>,
) -> Json<SearchResponse> {
    let query = SearchQuery {
        q: params.q.unwrap_or_default(),
        genre: params.genre,
        sort: params.sort.as_deref().map(SortKey::parse).unwrap_or_default(),
        order: params
            .order
            .as_deref()
            .map(SortOrder::parse)
            .unwrap_or_default(),
        limit: params.limit,
        offset: params.offset,
    };

    let page = search::search(&state.catalog, &query);
    debug!(
        q = %query.q,
        total = page.total,
        returned = page.items.len(),
        "served search request"
    );

    Json(SearchResponse {
        items: page.items.iter().map(|row| MovieItem::from(*row)).collect(),
        total: page.total,
        next_offset: page.next_offset,
    })
}

#[instrument(skip_all)]
pub async fn resolve_poster(
    State(state): State<AppState>,
    AxumQuery(params): AxumQuery<PosterParams>,
) -> Response {
    let Some(title) = params.title.filter(|value| !value.trim().is_empty()) else {
        let body = PosterFailure {
            poster: None,
            error: "missing title".to_string(),
        };
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    };

    let record = state.lookup.resolve(&title, params.year).await;
    let poster = record.and_then(|record| record.poster);
    debug!(%title, year = ?params.year, found = poster.is_some(), "resolved poster");

    Json(PosterResponse {
        title,
        year: params.year,
        poster,
    })
    .into_response()
}

#[instrument(skip_all)]
pub async fn get_movie_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MovieItem>, ApiError> {
    state
        .catalog
        .get(&id)
        .map(|row| Json(MovieItem::from(row)))
        .ok_or_else(|| ApiError::not_found("movie not found"))
}
