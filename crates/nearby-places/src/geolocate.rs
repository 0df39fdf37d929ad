//! Approximate geolocation from the caller's public IP address.
//!
//! Used by the CLI where no device positioning API exists. The service is
//! expected to answer with an `ip-api.com` style body:
//! `{"status": "success", "lat": 47.6, "lon": -122.3}` or
//! `{"status": "fail", "message": "private range"}`.

use std::time::Duration;

use nearby_core::{Coordinate, LocationError};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    message: Option<String>,
}

pub struct IpGeolocator {
    client: Client,
    url: String,
}

impl IpGeolocator {
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the HTTP client cannot be constructed.
    pub fn new(url: &str, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }

    /// Looks up the current position, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// - [`LocationError::PermissionDenied`] on HTTP 401/403.
    /// - [`LocationError::Timeout`] if the request exceeds `timeout`.
    /// - [`LocationError::PositionUnavailable`] for any other failure.
    pub async fn locate(&self, timeout: Duration) -> Result<Coordinate, LocationError> {
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        let classify = |e: reqwest::Error| {
            if e.is_timeout() {
                LocationError::Timeout { timeout_ms }
            } else {
                LocationError::PositionUnavailable(e.to_string())
            }
        };

        let response = self
            .client
            .get(&self.url)
            .timeout(timeout)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LocationError::PermissionDenied);
        }
        if !status.is_success() {
            return Err(LocationError::PositionUnavailable(format!(
                "geolocation service returned HTTP {status}"
            )));
        }

        let body: IpLookupResponse = response.json().await.map_err(classify)?;
        if body.status != "success" {
            return Err(LocationError::PositionUnavailable(
                body.message.unwrap_or(body.status),
            ));
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinate::new(lat, lon)),
            _ => Err(LocationError::PositionUnavailable(
                "geolocation response missing coordinates".to_string(),
            )),
        }
    }
}
