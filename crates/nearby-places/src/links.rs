//! Outbound links shown next to a place: photo and directions.

use reqwest::Url;

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/search/";

/// Places photo endpoint URL for a photo reference.
///
/// Returns `None` if `places_base_url` cannot be parsed.
#[must_use]
pub fn photo_url(
    places_base_url: &str,
    photo_ref: &str,
    max_width: u32,
    api_key: &str,
) -> Option<String> {
    let base = Url::parse(&format!("{}/", places_base_url.trim_end_matches('/'))).ok()?;
    let mut url = base.join("photo").ok()?;
    url.query_pairs_mut()
        .append_pair("maxwidth", &max_width.to_string())
        .append_pair("photo_reference", photo_ref)
        .append_pair("key", api_key);
    Some(url.to_string())
}

/// Maps search link that opens the place by name and ID.
#[must_use]
pub fn directions_url(name: &str, place_id: &str) -> String {
    let mut url = Url::parse(DIRECTIONS_BASE).expect("constant URL parses");
    url.query_pairs_mut()
        .append_pair("api", "1")
        .append_pair("query", name)
        .append_pair("query_place_id", place_id);
    url.to_string()
}
