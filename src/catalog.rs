use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use tokio::fs;
use tracing::{debug, info};

/// A single movie record as persisted in the dataset file.
///
/// Only `id` and `title` are required; everything else is carried
/// through from ingestion. `poster: None` means "resolve later" via
/// the lookup client, never inside the search path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub meta: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub popularity: Option<f64>,
}

/// A movie plus fields precomputed once at build time so repeated
/// searches never re-lowercase or re-tokenize titles.
#[derive(Debug, Clone)]
pub struct IndexRow {
    pub movie: Movie,
    pub title_lower: String,
    pub title_tokens: Vec<String>,
}

impl IndexRow {
    fn new(movie: Movie) -> Self {
        let title_lower = movie.title.to_lowercase();
        let title_tokens = title_lower
            .split_whitespace()
            .map(String::from)
            .collect();
        Self {
            movie,
            title_lower,
            title_tokens,
        }
    }
}

/// In-memory materialization of the dataset: ordered rows, a reverse
/// index from normalized genre label to member rows, and an id lookup.
///
/// Built once at startup and shared immutably behind an `Arc`; request
/// handlers never rebuild or mutate it.
pub struct Catalog {
    rows: Vec<IndexRow>,
    genres: HashMap<String, Vec<usize>>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Reads the dataset once and builds the index.
    ///
    /// The file is line-delimited JSON by default; a file whose first
    /// non-whitespace byte is `[` is parsed as a single JSON array
    /// instead. A missing or unreadable file is fatal. Malformed JSONL
    /// lines and records without a usable title are skipped.
    pub async fn load(path: &Path) -> Result<Catalog> {
        let text = fs::read_to_string(path)
            .await
            .with_context(|| format!("reading dataset at {}", path.display()))?;

        let movies = if text.trim_start().starts_with('[') {
            serde_json::from_str::<Vec<Movie>>(&text)
                .with_context(|| format!("parsing dataset array at {}", path.display()))?
        } else {
            parse_jsonl(&text)
        };

        Ok(Catalog::from_movies(movies))
    }

    /// Builds the index structures from already-parsed records.
    ///
    /// Records with an empty title are dropped, as are records whose
    /// id was already seen (first occurrence wins).
    pub fn from_movies(movies: Vec<Movie>) -> Catalog {
        let mut rows: Vec<IndexRow> = Vec::with_capacity(movies.len());
        let mut by_id: HashMap<String, usize> = HashMap::new();
        let mut skipped_untitled = 0usize;
        let mut skipped_duplicates = 0usize;

        for movie in movies {
            if movie.title.trim().is_empty() {
                skipped_untitled += 1;
                continue;
            }
            if by_id.contains_key(&movie.id) {
                skipped_duplicates += 1;
                continue;
            }
            by_id.insert(movie.id.clone(), rows.len());
            rows.push(IndexRow::new(movie));
        }

        let mut genres: HashMap<String, Vec<usize>> = HashMap::new();
        for (row_idx, row) in rows.iter().enumerate() {
            for genre in &row.movie.genres {
                let label = normalize_genre(genre);
                if label.is_empty() {
                    continue;
                }
                genres.entry(label).or_default().push(row_idx);
            }
        }

        info!(
            row_count = rows.len(),
            genre_count = genres.len(),
            skipped_untitled,
            skipped_duplicates,
            "built catalog index"
        );

        Catalog {
            rows,
            genres,
            by_id,
        }
    }

    pub fn rows(&self) -> &[IndexRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn genre_count(&self) -> usize {
        self.genres.len()
    }

    /// Row indices carrying the given genre, under case-insensitive
    /// trimmed comparison. Unknown labels yield `None`.
    pub fn genre_bucket(&self, label: &str) -> Option<&[usize]> {
        self.genres
            .get(&normalize_genre(label))
            .map(Vec::as_slice)
    }

    pub fn get(&self, id: &str) -> Option<&IndexRow> {
        self.by_id.get(id).map(|&idx| &self.rows[idx])
    }
}

pub fn normalize_genre(label: &str) -> String {
    label.trim().to_lowercase()
}

fn parse_jsonl(text: &str) -> Vec<Movie> {
    let mut movies = Vec::new();
    let mut bad_lines = 0usize;
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Movie>(line) {
            Ok(movie) => movies.push(movie),
            Err(err) => {
                bad_lines += 1;
                debug!(error = %err, "skipping malformed dataset line");
            }
        }
    }
    if bad_lines > 0 {
        info!(bad_lines, "skipped malformed dataset lines");
    }
    movies
}

/// Dataset ids arrive as strings or bare numbers depending on which
/// ingestion script produced the file; both map to the string form.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;

    impl serde::de::Visitor<'_> for Visitor {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or number id")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(Visitor)
}
