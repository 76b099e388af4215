use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::catalog::Catalog;
use crate::lookup::LookupClient;

use super::handlers::{get_movie_by_id, healthz, resolve_poster, search_movies};

#[derive(Clone)]
pub struct AppState {
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) lookup: Arc<LookupClient>,
}

impl AppState {
    pub fn new(catalog: Catalog, lookup: LookupClient) -> Self {
        Self {
            catalog: Arc::new(catalog),
            lookup: Arc::new(lookup),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/search", get(search_movies))
        .route("/poster", get(resolve_poster))
        .route("/movies/{id}", get(get_movie_by_id))
        .with_state(state)
}
