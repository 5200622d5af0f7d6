//! OpenSearch query builders.
//!
//! Each `SearchQuery` variant maps to exactly one request body. The result
//! window is fixed and always included in the body.

use serde_json::{json, Value};

use docsearch_shared::{SearchQuery, SEARCH_WINDOW_FROM, SEARCH_WINDOW_SIZE};

/// Build a complete search request body for `query`.
pub fn build_search_body(query: &SearchQuery) -> Value {
    let query = match query {
        SearchQuery::PhrasePrefix { field, term } => build_phrase_prefix_query(field, term),
        SearchQuery::GeoDistance {
            field,
            origin,
            distance,
        } => build_geo_distance_query(field, distance, origin.lat, origin.lon),
    };

    json!({
        "from": SEARCH_WINDOW_FROM,
        "size": SEARCH_WINDOW_SIZE,
        "query": query
    })
}

/// Match documents whose `field` starts with `term` as a phrase.
fn build_phrase_prefix_query(field: &str, term: &str) -> Value {
    json!({
        "match_phrase_prefix": {
            field: {
                "query": term
            }
        }
    })
}

/// Match documents whose geo-point `field` is within `distance` of (`lat`, `lon`).
fn build_geo_distance_query(field: &str, distance: &str, lat: f64, lon: f64) -> Value {
    json!({
        "geo_distance": {
            "distance": distance,
            field: {
                "lat": lat,
                "lon": lon
            }
        }
    })
}
