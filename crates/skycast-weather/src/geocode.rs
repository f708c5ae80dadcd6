//! Reverse geocoding: convert coordinates to the nearest UK postcode.
//! Uses postcodes.io - free, no API key required.

use reqwest::Client;
use serde::Deserialize;
use skycast_core::{GeocodeConfig, LocationError, NetworkError, ReqwestErrorExt};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::types::{Coordinates, LocationIdentifier};

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct PostcodesResponse {
    status: u16,
    #[serde(default)]
    result: Option<Vec<PostcodeResult>>,
}

#[derive(Debug, Deserialize)]
struct PostcodeResult {
    postcode: String,
}

/// Client for the `GET /postcodes?lon=&lat=` reverse lookup.
#[derive(Debug, Clone)]
pub struct PostcodeLookup {
    client: Arc<Client>,
    base_url: String,
}

impl PostcodeLookup {
    pub fn new(base_url: &str) -> Result<Self, LocationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| LocationError::Network(e.into_network_error()))?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &GeocodeConfig) -> Result<Self, LocationError> {
        Self::new(&config.base_url)
    }

    fn lookup_url(&self, coords: Coordinates) -> Result<Url, LocationError> {
        Url::parse_with_params(
            &format!("{}/postcodes", self.base_url),
            &[
                ("lon", coords.longitude.to_string()),
                ("lat", coords.latitude.to_string()),
            ],
        )
        .map_err(|e| LocationError::Network(NetworkError::ConnectionFailed(e.to_string())))
    }

    /// Return the postcode nearest to `coords`.
    ///
    /// A non-200 status (HTTP or in the body) and an empty result list are both
    /// reported as `PostcodeNotFound`; transport failures as `Network`.
    pub async fn postcode_for(
        &self,
        coords: Coordinates,
    ) -> Result<LocationIdentifier, LocationError> {
        let url = self.lookup_url(coords)?;
        tracing::debug!(
            "Looking up postcode for {}, {}",
            coords.latitude,
            coords.longitude
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LocationError::Network(e.into_network_error()))?;

        if !response.status().is_success() {
            tracing::debug!("Postcode lookup returned status {}", response.status());
            return Err(LocationError::PostcodeNotFound);
        }

        let body: PostcodesResponse = response.json().await.map_err(|e| {
            tracing::debug!("Postcode lookup parse error: {}", e);
            LocationError::PostcodeNotFound
        })?;

        if body.status != 200 {
            tracing::debug!("Postcode lookup body status {}", body.status);
            return Err(LocationError::PostcodeNotFound);
        }

        let postcode = body
            .result
            .and_then(|results| results.into_iter().next())
            .map(|r| r.postcode)
            .ok_or(LocationError::PostcodeNotFound)?;

        tracing::info!("Reverse geocoded to: {}", postcode);
        Ok(LocationIdentifier::new(postcode))
    }
}
