//! HTTP client for the Google Places web service.
//!
//! Wraps `reqwest` with API key handling, typed response envelopes and
//! provider status checking. `OK` and `ZERO_RESULTS` are successes; every
//! other status surfaces as [`PlacesError::Status`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::PlacesError;
use crate::types::{
    NearbyRequest, NearbySearchResponse, PlaceDetailsResponse, RawPlace, RawPlaceDetail,
};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Detail fields requested when enriching search results.
pub const ENRICH_FIELDS: &[&str] = &["place_id", "reviews", "url"];

/// Detail fields requested when rebuilding a saved place from its ID alone.
pub const REHYDRATE_FIELDS: &[&str] = &[
    "place_id",
    "name",
    "rating",
    "user_ratings_total",
    "photos",
    "geometry",
    "vicinity",
    "formatted_address",
    "reviews",
    "url",
];

/// Client for the Places nearby-search and place-details endpoints.
///
/// Use [`GooglePlacesClient::new`] for production or
/// [`GooglePlacesClient::with_base_url`] to point at a mock server in tests.
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl GooglePlacesClient {
    /// Creates a client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`PlacesError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends the endpoint
        // instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Base URL the client resolves endpoints against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Runs a nearby search around `request.coordinate`.
    ///
    /// A `ZERO_RESULTS` status yields an empty vector.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Status`] for any provider status other than `OK` or `ZERO_RESULTS`.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match the expected shape.
    pub async fn nearby_search(
        &self,
        request: &NearbyRequest,
    ) -> Result<Vec<RawPlace>, PlacesError> {
        let location = format!("{},{}", request.coordinate.lat, request.coordinate.lng);
        let radius = request.radius_meters.to_string();
        let mut params = vec![
            ("location", location.as_str()),
            ("radius", radius.as_str()),
            ("type", request.category.as_str()),
        ];
        if request.open_now_only {
            params.push(("opennow", "true"));
        }

        let url = self.build_url("nearbysearch/json", &params)?;
        let body = self.request_json(&url).await?;
        let envelope: NearbySearchResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("nearbysearch(type={})", request.category),
                source: e,
            })?;

        match envelope.status.as_str() {
            "OK" => {
                tracing::debug!(
                    count = envelope.results.len(),
                    category = %request.category,
                    "nearby search returned results"
                );
                Ok(envelope.results)
            }
            "ZERO_RESULTS" => Ok(Vec::new()),
            _ => Err(PlacesError::Status {
                status: envelope.status,
                message: envelope.error_message.unwrap_or_default(),
            }),
        }
    }

    /// Fetches place details restricted to `fields`.
    ///
    /// Returns `Ok(None)` when the provider reports `NOT_FOUND` or
    /// `ZERO_RESULTS`, or omits the `result` object.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Status`] for any other non-`OK` provider status.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match the expected shape.
    pub async fn get_details(
        &self,
        place_id: &str,
        fields: &[&str],
    ) -> Result<Option<RawPlaceDetail>, PlacesError> {
        let fields = fields.join(",");
        let url = self.build_url(
            "details/json",
            &[("place_id", place_id), ("fields", fields.as_str())],
        )?;
        let body = self.request_json(&url).await?;
        let envelope: PlaceDetailsResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("details(place_id={place_id})"),
                source: e,
            })?;

        match envelope.status.as_str() {
            "OK" => Ok(envelope.result),
            "NOT_FOUND" | "ZERO_RESULTS" => Ok(None),
            _ => Err(PlacesError::Status {
                status: envelope.status,
                message: envelope.error_message.unwrap_or_default(),
            }),
        }
    }

    /// Builds an endpoint URL with the API key and percent-encoded parameters.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status and parses the body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, PlacesError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: redact_key(url),
            source: e,
        })
    }
}

/// URL rendered for error context with the API key removed.
fn redact_key(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "key")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
