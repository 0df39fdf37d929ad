//! Normalization from raw Places API shapes to [`nearby_core::NormalizedPlace`].
//!
//! Normalization is total: every missing field maps to a default and no
//! input is rejected.

use std::collections::HashSet;

use nearby_core::{distance_meters, Coordinate, NormalizedPlace, Rating, Review};

use crate::types::{RawGeometry, RawPhoto, RawPlace, RawPlaceDetail, RawReview};

/// Extended detail attached to a place during enrichment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailAdditions {
    pub reviews: Vec<Review>,
    pub external_url: Option<String>,
}

/// Normalizes one nearby-search result relative to the search `origin`.
#[must_use]
pub fn normalize(raw: RawPlace, origin: Coordinate) -> NormalizedPlace {
    let coordinate = raw.geometry.as_ref().and_then(RawGeometry::coordinate);

    NormalizedPlace {
        id: raw.place_id,
        name: raw.name,
        rating: Rating::from(raw.rating),
        rating_count: raw.user_ratings_total.unwrap_or(0),
        photo_ref: first_photo_ref(&raw.photos),
        coordinate,
        vicinity: pick_vicinity(raw.vicinity, raw.formatted_address),
        distance_meters: distance_meters(origin, coordinate),
    }
}

/// Normalizes a page of results, keeping the first occurrence of each place ID.
#[must_use]
pub fn normalize_all(raws: Vec<RawPlace>, origin: Coordinate) -> Vec<NormalizedPlace> {
    let mut seen = HashSet::new();
    raws.into_iter()
        .filter(|raw| {
            let fresh = seen.insert(raw.place_id.clone());
            if !fresh {
                tracing::debug!(place_id = %raw.place_id, "dropping duplicate place in result set");
            }
            fresh
        })
        .map(|raw| normalize(raw, origin))
        .collect()
}

/// Builds a place from a detail record, used when only the ID is known.
///
/// `place_id` wins over any ID in the detail body so the caller's identity
/// key is preserved. Without an `origin` the distance is infinite.
#[must_use]
pub fn normalize_detail(
    place_id: &str,
    detail: &RawPlaceDetail,
    origin: Option<Coordinate>,
) -> NormalizedPlace {
    let coordinate = detail.geometry.as_ref().and_then(RawGeometry::coordinate);
    let distance = origin.map_or(f64::INFINITY, |o| distance_meters(o, coordinate));

    NormalizedPlace {
        id: place_id.to_owned(),
        name: detail.name.clone().unwrap_or_default(),
        rating: Rating::from(detail.rating),
        rating_count: detail.user_ratings_total.unwrap_or(0),
        photo_ref: first_photo_ref(&detail.photos),
        coordinate,
        vicinity: pick_vicinity(detail.vicinity.clone(), detail.formatted_address.clone()),
        distance_meters: distance,
    }
}

/// Extracts the enrichment fields (reviews, canonical URL) from a detail record.
#[must_use]
pub fn detail_additions(detail: RawPlaceDetail) -> DetailAdditions {
    DetailAdditions {
        reviews: detail.reviews.into_iter().map(normalize_review).collect(),
        external_url: detail.url.filter(|u| !u.is_empty()),
    }
}

fn normalize_review(raw: RawReview) -> Review {
    Review {
        author_name: raw.author_name.unwrap_or_default(),
        rating: raw.rating,
        text: raw.text.unwrap_or_default(),
    }
}

fn first_photo_ref(photos: &[RawPhoto]) -> Option<String> {
    photos
        .first()
        .and_then(|p| p.photo_reference.clone())
        .filter(|r| !r.is_empty())
}

/// Nearby search fills `vicinity`; text/detail lookups may only carry a
/// formatted address.
fn pick_vicinity(vicinity: Option<String>, formatted_address: Option<String>) -> String {
    vicinity
        .filter(|v| !v.is_empty())
        .or(formatted_address)
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
