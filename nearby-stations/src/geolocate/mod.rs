//! Current-position lookup via the Google Geolocation API.
//!
//! Used when no station id is given on the command line. The position is
//! estimated from the caller's IP address.

mod error;

pub use error::GeolocateError;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Coordinate;

/// Default endpoint for the Geolocation API.
const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/geolocation/v1/geolocate";

/// Request body: let the API fall back to IP-based location.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeolocateRequest {
    consider_ip: bool,
}

/// Response body.
#[derive(Debug, Clone, Deserialize)]
pub struct GeolocateResponse {
    pub location: LatLng,
    /// Accuracy radius in metres
    #[serde(default)]
    pub accuracy: Option<f64>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for Coordinate {
    fn from(value: LatLng) -> Self {
        Coordinate::new(value.lat, value.lng)
    }
}

/// Configuration for the geolocation client.
#[derive(Debug, Clone)]
pub struct GeolocationConfig {
    /// API key, passed as the `key` query parameter
    pub api_key: String,
    /// Endpoint URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeolocationConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Client for the Geolocation API.
#[derive(Debug, Clone)]
pub struct GeolocationClient {
    http: reqwest::Client,
    config: GeolocationConfig,
}

impl GeolocationClient {
    pub fn new(config: GeolocationConfig) -> Result<Self, GeolocateError> {
        if config.api_key.is_empty() {
            return Err(GeolocateError::NotConfigured(
                "GOOGLE_MAPS_API_KEY is not set".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// Estimate the current position.
    pub async fn locate(&self) -> Result<Coordinate, GeolocateError> {
        let response = self
            .http
            .post(&self.config.base_url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&GeolocateRequest { consider_ip: true })
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(GeolocateError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeolocateError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let parsed = parse_response(&body)?;
        debug!(
            lat = parsed.location.lat,
            lng = parsed.location.lng,
            accuracy = ?parsed.accuracy,
            "geolocated"
        );

        Ok(parsed.location.into())
    }
}

fn parse_response(body: &str) -> Result<GeolocateResponse, GeolocateError> {
    serde_json::from_str(body).map_err(|e| GeolocateError::Json {
        message: e.to_string(),
    })
}
