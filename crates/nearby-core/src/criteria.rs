use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ordering applied to filtered search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Distance,
    #[default]
    Rating,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "distance" => Ok(SortKey::Distance),
            "rating" => Ok(SortKey::Rating),
            other => Err(format!(
                "unknown sort key \"{other}\" (expected name, distance or rating)"
            )),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Name => write!(f, "name"),
            SortKey::Distance => write!(f, "distance"),
            SortKey::Rating => write!(f, "rating"),
        }
    }
}

/// User-selected parameters for one search run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Provider place type, e.g. `"cafe"`.
    pub category: String,
    pub radius_meters: u32,
    /// Inclusive lower bound on numeric rating.
    pub min_rating: f64,
    pub open_now_only: bool,
    pub sort_key: SortKey,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            category: "cafe".to_string(),
            radius_meters: 1500,
            min_rating: 0.0,
            open_now_only: false,
            sort_key: SortKey::Rating,
        }
    }
}
