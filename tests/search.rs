use filmmuse::catalog::{Catalog, Movie};
use filmmuse::search::{SearchQuery, SortKey, SortOrder, search};

fn movie(json: serde_json::Value) -> Movie {
    serde_json::from_value(json).expect("valid movie fixture")
}

fn scenario_catalog() -> Catalog {
    Catalog::from_movies(vec![
        movie(serde_json::json!({
            "id": "1", "title": "Inception", "year": 2010, "genres": ["Sci-Fi"]
        })),
        movie(serde_json::json!({
            "id": "2", "title": "Insomnia", "year": 2002, "genres": ["Thriller"]
        })),
        movie(serde_json::json!({
            "id": "3", "title": "The Departed", "year": 2006, "genres": ["Crime"]
        })),
    ])
}

fn titles<'a>(page: &filmmuse::search::SearchPage<'a>) -> Vec<&'a str> {
    page.items
        .iter()
        .map(|row| row.movie.title.as_str())
        .collect()
}

#[test]
fn prefix_matches_rank_alphabetically() {
    let catalog = scenario_catalog();
    let page = search(
        &catalog,
        &SearchQuery {
            q: "in".to_string(),
            ..Default::default()
        },
    );
    assert_eq!(titles(&page), ["Inception", "Insomnia"]);
    assert_eq!(page.total, 2);
}

#[test]
fn prefix_tier_precedes_substring_tier() {
    let catalog = Catalog::from_movies(vec![
        movie(serde_json::json!({"id": "1", "title": "No Way Up"})),
        movie(serde_json::json!({"id": "2", "title": "Upgrade"})),
        movie(serde_json::json!({"id": "3", "title": "Up"})),
        movie(serde_json::json!({"id": "4", "title": "The Departed"})),
    ]);
    let page = search(
        &catalog,
        &SearchQuery {
            q: "up".to_string(),
            ..Default::default()
        },
    );

    // Tier 1 (prefix) alphabetical, then tier 2 (substring only);
    // non-matching titles are excluded entirely.
    assert_eq!(titles(&page), ["Up", "Upgrade", "No Way Up"]);
    assert_eq!(page.total, 3);
}

#[test]
fn desc_reverses_the_final_ordering() {
    let catalog = Catalog::from_movies(vec![
        movie(serde_json::json!({"id": "1", "title": "No Way Up"})),
        movie(serde_json::json!({"id": "2", "title": "Upgrade"})),
        movie(serde_json::json!({"id": "3", "title": "Up"})),
    ]);
    let asc = search(
        &catalog,
        &SearchQuery {
            q: "up".to_string(),
            ..Default::default()
        },
    );
    let desc = search(
        &catalog,
        &SearchQuery {
            q: "up".to_string(),
            order: SortOrder::Desc,
            ..Default::default()
        },
    );

    let mut reversed = titles(&asc);
    reversed.reverse();
    assert_eq!(titles(&desc), reversed);
}

#[test]
fn empty_query_sorts_alphabetically() {
    let catalog = scenario_catalog();
    let page = search(&catalog, &SearchQuery::default());
    assert_eq!(titles(&page), ["Inception", "Insomnia", "The Departed"]);
}

#[test]
fn title_sort_matches_relevance_with_empty_query() {
    let catalog = scenario_catalog();
    let by_title = search(
        &catalog,
        &SearchQuery {
            sort: SortKey::Title,
            ..Default::default()
        },
    );
    let by_relevance = search(&catalog, &SearchQuery::default());
    assert_eq!(titles(&by_title), titles(&by_relevance));
}

#[test]
fn explicit_sort_keys_ignore_query_text() {
    let catalog = scenario_catalog();
    let page = search(
        &catalog,
        &SearchQuery {
            q: "ins".to_string(),
            sort: SortKey::Title,
            ..Default::default()
        },
    );

    // Text matching only narrows the pool under relevance; an explicit
    // sort key returns the whole pool in that order.
    assert_eq!(titles(&page), ["Inception", "Insomnia", "The Departed"]);
    assert_eq!(page.total, 3);
}

#[test]
fn year_sort_treats_missing_year_as_zero() {
    let catalog = Catalog::from_movies(vec![
        movie(serde_json::json!({"id": "1", "title": "Inception", "year": 2010})),
        movie(serde_json::json!({"id": "2", "title": "Undated"})),
        movie(serde_json::json!({"id": "3", "title": "Insomnia", "year": 2002})),
    ]);
    let page = search(
        &catalog,
        &SearchQuery {
            sort: SortKey::Year,
            ..Default::default()
        },
    );
    assert_eq!(titles(&page), ["Undated", "Insomnia", "Inception"]);

    let desc = search(
        &catalog,
        &SearchQuery {
            sort: SortKey::Year,
            order: SortOrder::Desc,
            ..Default::default()
        },
    );
    assert_eq!(titles(&desc), ["Inception", "Insomnia", "Undated"]);
}

#[test]
fn genre_filter_is_case_insensitive_and_trimmed() {
    let catalog = scenario_catalog();
    let page = search(
        &catalog,
        &SearchQuery {
            genre: Some(" thriller ".to_string()),
            ..Default::default()
        },
    );
    assert_eq!(titles(&page), ["Insomnia"]);
}

#[test]
fn unknown_genre_yields_empty_result_not_error() {
    let catalog = scenario_catalog();
    let page = search(
        &catalog,
        &SearchQuery {
            genre: Some("Western".to_string()),
            ..Default::default()
        },
    );
    assert!(page.items.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.next_offset, None);
}

#[test]
fn pagination_reports_total_and_next_offset() {
    let catalog = scenario_catalog();
    let page = search(
        &catalog,
        &SearchQuery {
            limit: Some(1),
            offset: Some(0),
            ..Default::default()
        },
    );
    assert_eq!(titles(&page), ["Inception"]);
    assert_eq!(page.total, 3);
    assert_eq!(page.next_offset, Some(1));

    let last = search(
        &catalog,
        &SearchQuery {
            limit: Some(1),
            offset: Some(2),
            ..Default::default()
        },
    );
    assert_eq!(titles(&last), ["The Departed"]);
    assert_eq!(last.next_offset, None);
}

#[test]
fn out_of_range_parameters_are_clamped() {
    let catalog = scenario_catalog();

    let zero_limit = search(
        &catalog,
        &SearchQuery {
            limit: Some(0),
            ..Default::default()
        },
    );
    assert_eq!(zero_limit.items.len(), 1);

    let huge_limit = search(
        &catalog,
        &SearchQuery {
            limit: Some(10_000),
            ..Default::default()
        },
    );
    assert_eq!(huge_limit.items.len(), 3);

    let beyond_end = search(
        &catalog,
        &SearchQuery {
            offset: Some(50),
            ..Default::default()
        },
    );
    assert!(beyond_end.items.is_empty());
    assert_eq!(beyond_end.total, 3);
    assert_eq!(beyond_end.next_offset, None);
}

#[test]
fn unknown_sort_and_order_values_fall_back_to_defaults() {
    assert_eq!(SortKey::parse("bogus"), SortKey::Relevance);
    assert_eq!(SortKey::parse("TITLE"), SortKey::Title);
    assert_eq!(SortOrder::parse("sideways"), SortOrder::Asc);
    assert_eq!(SortOrder::parse("DESC"), SortOrder::Desc);
}

#[test]
fn items_never_exceed_limit() {
    let movies: Vec<Movie> = (0..250)
        .map(|n| {
            movie(serde_json::json!({
                "id": n.to_string(),
                "title": format!("Movie {n:03}"),
                "genres": ["Drama"]
            }))
        })
        .collect();
    let catalog = Catalog::from_movies(movies);

    let page = search(
        &catalog,
        &SearchQuery {
            q: "movie".to_string(),
            limit: Some(100),
            offset: Some(40),
            ..Default::default()
        },
    );
    assert_eq!(page.total, 250);
    assert_eq!(page.items.len(), 100);
    assert_eq!(page.next_offset, Some(140));
}
