use nearby_core::{Coordinate, DetailedPlace};
use serde::Serialize;

/// Upper bound on map markers drawn for one result set.
pub const MAX_MARKERS: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub rating_label: String,
    pub vicinity: String,
}

/// Markers for the leading [`MAX_MARKERS`] results. Places inside that
/// window without a coordinate are skipped, not replaced by later ones.
#[must_use]
pub fn map_markers(places: &[DetailedPlace]) -> Vec<MapMarker> {
    places
        .iter()
        .take(MAX_MARKERS)
        .filter_map(|p| {
            let coordinate = p.place.coordinate?;
            Some(MapMarker {
                id: p.place.id.clone(),
                name: p.place.name.clone(),
                coordinate,
                rating_label: p.place.rating.label(),
                vicinity: p.place.vicinity.clone(),
            })
        })
        .collect()
}
