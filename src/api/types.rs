use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::catalog::IndexRow;

use super::utils::{lenient_i64, lenient_usize};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default, deserialize_with = "lenient_usize")]
    pub limit: Option<usize>,
    #[serde(default, deserialize_with = "lenient_usize")]
    pub offset: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<MovieItem>,
    pub total: usize,
    #[serde(rename = "nextOffset")]
    pub next_offset: Option<usize>,
}

/// Wire shape of a single catalog row. `poster` stays present-but-null
/// when unresolved so clients know to fetch it on demand.
#[derive(Debug, Serialize, Deserialize)]
pub struct MovieItem {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    pub poster: Option<String>,
}

impl From<&IndexRow> for MovieItem {
    fn from(row: &IndexRow) -> Self {
        let movie = &row.movie;
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            year: movie.year,
            genres: movie.genres.clone(),
            meta: movie.meta.clone(),
            poster: movie.poster.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PosterParams {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub year: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PosterResponse {
    pub title: String,
    pub year: Option<i64>,
    pub poster: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PosterFailure {
    pub poster: Option<String>,
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(ErrorBody {
            message: self.message,
        });
        (self.status, body).into_response()
    }
}
