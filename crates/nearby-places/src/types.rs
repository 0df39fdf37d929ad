//! Wire types for the Google Places web service.
//!
//! Every field the provider may omit is an `Option` or defaults to empty;
//! defaulting into the canonical model happens in [`crate::normalize`].

use nearby_core::Coordinate;
use serde::Deserialize;

/// Parameters for a nearby search.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyRequest {
    pub coordinate: Coordinate,
    pub radius_meters: u32,
    /// Provider place type, e.g. `"cafe"`.
    pub category: String,
    pub open_now_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPhoto {
    #[serde(default)]
    pub photo_reference: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawLatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawGeometry {
    #[serde(default)]
    pub location: Option<RawLatLng>,
}

/// One entry of a nearby-search `results` array.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPlace {
    pub place_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub photos: Vec<RawPhoto>,
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawReview {
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub text: Option<String>,
}

/// The `result` object of a place-details response.
///
/// Only the requested `fields` are present, so everything is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlaceDetail {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub photos: Vec<RawPhoto>,
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub reviews: Vec<RawReview>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<RawPlace>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaceDetailsResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<RawPlaceDetail>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl RawGeometry {
    pub(crate) fn coordinate(&self) -> Option<Coordinate> {
        self.location.map(|l| Coordinate::new(l.lat, l.lng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_place_tolerates_missing_optional_fields() {
        let raw: RawPlace = serde_json::from_value(serde_json::json!({
            "place_id": "abc"
        }))
        .unwrap();
        assert_eq!(raw.place_id, "abc");
        assert!(raw.name.is_empty());
        assert!(raw.rating.is_none());
        assert!(raw.photos.is_empty());
        assert!(raw.geometry.is_none());
    }

    #[test]
    fn raw_place_requires_place_id() {
        let result = serde_json::from_value::<RawPlace>(serde_json::json!({ "name": "x" }));
        assert!(result.is_err());
    }

    #[test]
    fn detail_parses_reviews_and_url() {
        let detail: RawPlaceDetail = serde_json::from_value(serde_json::json!({
            "url": "https://maps.google.com/?cid=1",
            "reviews": [{ "author_name": "Ann", "rating": 5, "text": "Great" }]
        }))
        .unwrap();
        assert_eq!(detail.url.as_deref(), Some("https://maps.google.com/?cid=1"));
        assert_eq!(detail.reviews.len(), 1);
        assert_eq!(detail.reviews[0].rating, Some(5.0));
    }
}
