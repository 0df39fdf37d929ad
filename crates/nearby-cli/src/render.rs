//! Terminal and JSON presentation of places.

use nearby_core::{Coordinate, DetailedPlace};
use nearby_discovery::MapMarker;
use nearby_places::{directions_url, photo_url};
use serde::Serialize;

const PHOTO_MAX_WIDTH: u32 = 400;
const NAME_WIDTH: usize = 32;

/// A place plus the links and saved flag shown next to it.
#[derive(Debug, Serialize)]
pub(crate) struct PlaceView<'a> {
    #[serde(flatten)]
    pub place: &'a DetailedPlace,
    pub saved: bool,
    pub photo_url: Option<String>,
    pub directions_url: String,
}

impl<'a> PlaceView<'a> {
    pub(crate) fn new(
        place: &'a DetailedPlace,
        saved: bool,
        places_base_url: &str,
        api_key: &str,
    ) -> Self {
        let photo_url = place
            .place
            .photo_ref
            .as_deref()
            .and_then(|r| photo_url(places_base_url, r, PHOTO_MAX_WIDTH, api_key));
        Self {
            place,
            saved,
            photo_url,
            directions_url: directions_url(&place.place.name, &place.place.id),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchReport<'a> {
    pub generation: u64,
    pub origin: Coordinate,
    pub location_from_cache: bool,
    pub places: Vec<PlaceView<'a>>,
    pub markers: Vec<MapMarker>,
}

/// Human-readable distance: meters below one kilometer, else kilometers.
pub(crate) fn fmt_distance(meters: f64) -> String {
    if !meters.is_finite() {
        return "\u{2014}".to_string();
    }
    if meters < 1000.0 {
        format!("{meters:.0} m")
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width - 3).collect::<String>())
    } else {
        text.to_string()
    }
}

pub(crate) fn print_table(views: &[PlaceView<'_>]) {
    let header = format!(
        "{:<3}{:<8}{:<10}{:<w$}  ID",
        "",
        "RATING",
        "DISTANCE",
        "NAME",
        w = NAME_WIDTH
    );
    println!("{header}");
    for view in views {
        let place = &view.place.place;
        let rating = format!("{} ({})", place.rating.label(), place.rating_count);
        println!(
            "{:<3}{:<8}{:<10}{:<w$}  {}",
            if view.saved { "*" } else { "" },
            rating,
            fmt_distance(place.distance_meters),
            truncate(&place.name, NAME_WIDTH),
            place.id,
            w = NAME_WIDTH
        );
        if !place.vicinity.is_empty() {
            println!("{:<21}{}", "", place.vicinity);
        }
        if let Some(review) = view.place.reviews.first() {
            println!("{:<21}\"{}\"", "", truncate(&review.text, 60));
        }
    }
}
