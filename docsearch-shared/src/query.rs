//! Search query shapes.
//!
//! Only two query shapes are supported: a phrase-prefix text match and a
//! geo-distance match. Both are executed with the same fixed result window.

use serde::{Deserialize, Serialize};

/// Offset of the first hit returned by every search.
pub const SEARCH_WINDOW_FROM: u64 = 0;

/// Maximum number of hits returned by every search.
pub const SEARCH_WINDOW_SIZE: u64 = 10;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A query against a single document field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchQuery {
    /// Matches documents whose `field` begins with `term` as a whole phrase.
    PhrasePrefix { field: String, term: String },

    /// Matches documents whose geo-point `field` lies within `distance` of `origin`.
    ///
    /// `distance` carries a number and a unit (e.g. `"10km"`) and is passed to
    /// the engine verbatim.
    GeoDistance {
        field: String,
        origin: GeoPoint,
        distance: String,
    },
}

impl SearchQuery {
    /// Create a phrase-prefix query.
    pub fn phrase_prefix(field: impl Into<String>, term: impl Into<String>) -> Self {
        Self::PhrasePrefix {
            field: field.into(),
            term: term.into(),
        }
    }

    /// Create a geo-distance query anchored at (`lat`, `lon`).
    pub fn geo_distance(
        field: impl Into<String>,
        distance: impl Into<String>,
        lat: f64,
        lon: f64,
    ) -> Self {
        Self::GeoDistance {
            field: field.into(),
            origin: GeoPoint::new(lat, lon),
            distance: distance.into(),
        }
    }

    /// The document field this query targets.
    pub fn field(&self) -> &str {
        match self {
            Self::PhrasePrefix { field, .. } | Self::GeoDistance { field, .. } => field,
        }
    }
}
