use crate::catalog::{Catalog, IndexRow};

pub const DEFAULT_LIMIT: usize = 30;
pub const MAX_LIMIT: usize = 100;
pub const MAX_OFFSET: usize = 1_000_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Relevance,
    Title,
    Year,
}

impl SortKey {
    /// Unknown values fall back to the default rather than erroring.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "title" => SortKey::Title,
            "year" => SortKey::Year,
            _ => SortKey::Relevance,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "desc" => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub q: String,
    pub genre: Option<String>,
    pub sort: SortKey,
    pub order: SortOrder,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug)]
pub struct SearchPage<'a> {
    pub items: Vec<&'a IndexRow>,
    pub total: usize,
    pub next_offset: Option<usize>,
}

/// Filters, ranks and paginates catalog rows. Pure in-memory
/// computation; never touches the network or the filesystem, so a
/// missing poster stays missing here.
///
/// Relevance ranking is two-tier: titles starting with the query come
/// first, titles merely containing it second, alphabetical within each
/// tier. Out-of-range `limit`/`offset` are clamped, never rejected.
pub fn search<'a>(catalog: &'a Catalog, query: &SearchQuery) -> SearchPage<'a> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = query.offset.unwrap_or(0).min(MAX_OFFSET);

    let mut pool: Vec<&IndexRow> = match query.genre.as_deref().filter(|g| !g.trim().is_empty()) {
        Some(genre) => catalog
            .genre_bucket(genre)
            .map(|indices| {
                indices
                    .iter()
                    .map(|&idx| &catalog.rows()[idx])
                    .collect()
            })
            .unwrap_or_default(),
        None => catalog.rows().iter().collect(),
    };

    let needle = query.q.trim().to_lowercase();

    let mut ranked: Vec<&IndexRow> = match query.sort {
        SortKey::Relevance if !needle.is_empty() => {
            let mut prefix: Vec<&IndexRow> = Vec::new();
            let mut substring: Vec<&IndexRow> = Vec::new();
            for row in pool {
                if row.title_lower.starts_with(&needle) {
                    prefix.push(row);
                } else if row.title_lower.contains(&needle) {
                    substring.push(row);
                }
            }
            prefix.sort_by(|a, b| a.title_lower.cmp(&b.title_lower));
            substring.sort_by(|a, b| a.title_lower.cmp(&b.title_lower));
            prefix.extend(substring);
            prefix
        }
        SortKey::Relevance | SortKey::Title => {
            pool.sort_by(|a, b| a.title_lower.cmp(&b.title_lower));
            pool
        }
        SortKey::Year => {
            pool.sort_by_key(|row| row.movie.year.unwrap_or(0));
            pool
        }
    };

    if query.order == SortOrder::Desc {
        ranked.reverse();
    }

    let total = ranked.len();
    let items: Vec<&IndexRow> = ranked
        .into_iter()
        .skip(offset)
        .take(limit)
        .collect();
    let next_offset = match offset + limit {
        next if next < total => Some(next),
        _ => None,
    };

    SearchPage {
        items,
        total,
        next_offset,
    }
}
