//! Clients and schema for the third-party place and geolocation providers.
//!
//! Raw provider shapes never leave this crate un-normalized: callers receive
//! [`RawPlace`]/[`RawPlaceDetail`] only to hand them to [`normalize`].

pub mod client;
pub mod error;
pub mod geolocate;
pub mod links;
pub mod normalize;
pub mod types;

pub use client::{GooglePlacesClient, ENRICH_FIELDS, REHYDRATE_FIELDS};
pub use error::PlacesError;
pub use geolocate::IpGeolocator;
pub use links::{directions_url, photo_url};
pub use normalize::{detail_additions, normalize, normalize_all, normalize_detail, DetailAdditions};
pub use types::{NearbyRequest, RawPlace, RawPlaceDetail, RawReview};
