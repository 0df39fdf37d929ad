use serde::{Serialize, Serializer};

use crate::geo::Coordinate;

/// A place rating as reported by the provider.
///
/// Providers omit the rating for places nobody has rated yet; that case is
/// kept distinct from a numeric zero and serializes as the string `"N/A"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    Score(f64),
    NotAvailable,
}

impl Rating {
    /// Numeric value for filtering. `None` for `"N/A"` and for NaN scores.
    #[must_use]
    pub fn numeric(self) -> Option<f64> {
        match self {
            Rating::Score(v) if !v.is_nan() => Some(v),
            _ => None,
        }
    }

    /// Numeric value for ordering, where anything non-numeric counts as zero.
    #[must_use]
    pub fn sort_value(self) -> f64 {
        self.numeric().unwrap_or(0.0)
    }

    #[must_use]
    pub fn label(self) -> String {
        match self.numeric() {
            Some(v) => format!("{v:.1}"),
            None => "N/A".to_string(),
        }
    }
}

impl From<Option<f64>> for Rating {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Rating::NotAvailable, Rating::Score)
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rating::Score(v) => serializer.serialize_f64(*v),
            Rating::NotAvailable => serializer.serialize_str("N/A"),
        }
    }
}

/// A search result in canonical form. Every field is populated; absent
/// provider data has already been replaced with defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedPlace {
    /// Provider place ID. Unique within one result set.
    pub id: String,
    pub name: String,
    pub rating: Rating,
    pub rating_count: u32,
    /// Provider photo reference. The presentation layer substitutes a
    /// placeholder image when this is `None`.
    pub photo_ref: Option<String>,
    pub coordinate: Option<Coordinate>,
    pub vicinity: String,
    /// Distance from the search origin; `f64::INFINITY` if unknown.
    pub distance_meters: f64,
}

/// A single user review attached to a place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub author_name: String,
    pub rating: Option<f64>,
    pub text: String,
}

/// A [`NormalizedPlace`] plus the extended detail fetched during enrichment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedPlace {
    #[serde(flatten)]
    pub place: NormalizedPlace,
    pub reviews: Vec<Review>,
    pub external_url: Option<String>,
}

impl DetailedPlace {
    /// Wraps a place with empty enrichment, used when detail is unavailable.
    #[must_use]
    pub fn without_detail(place: NormalizedPlace) -> Self {
        Self {
            place,
            reviews: Vec::new(),
            external_url: None,
        }
    }

    /// Stand-in for a saved place whose detail could not be fetched.
    #[must_use]
    pub fn placeholder(id: &str) -> Self {
        Self::without_detail(NormalizedPlace {
            id: id.to_owned(),
            name: id.to_owned(),
            rating: Rating::NotAvailable,
            rating_count: 0,
            photo_ref: None,
            coordinate: None,
            vicinity: String::new(),
            distance_meters: f64::INFINITY,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.place.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_score_is_not_numeric() {
        assert_eq!(Rating::Score(f64::NAN).numeric(), None);
        assert_eq!(Rating::NotAvailable.numeric(), None);
        assert_eq!(Rating::Score(4.2).numeric(), Some(4.2));
    }

    #[test]
    fn sort_value_treats_missing_as_zero() {
        assert!(Rating::NotAvailable.sort_value().abs() < f64::EPSILON);
    }

    #[test]
    fn rating_serializes_sentinel_for_missing() {
        assert_eq!(
            serde_json::to_string(&Rating::NotAvailable).unwrap(),
            "\"N/A\""
        );
        assert_eq!(serde_json::to_string(&Rating::Score(4.5)).unwrap(), "4.5");
    }

    #[test]
    fn detailed_place_flattens_base_fields() {
        let detailed = DetailedPlace::placeholder("abc");
        let json = serde_json::to_value(&detailed).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["rating"], "N/A");
        assert!(json["reviews"].as_array().unwrap().is_empty());
        assert!(json["external_url"].is_null());
    }
}
