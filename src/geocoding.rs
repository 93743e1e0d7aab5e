use crate::errors::AppError;
use reqwest::Client;
use serde::Deserialize;

/// Coordinates as returned by the geocoding provider. Either field may be
/// absent; deciding what absence means is the caller's business.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GeocodeResponse {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Client for the external address-to-coordinates API.
///
/// One GET per lookup, no retries, no result caching, and no timeout
/// beyond the HTTP client's default. The base URL is injected so tests
/// can point the client at a local mock server.
#[derive(Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
}

impl GeocodingClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Resolves a free-text address to coordinates.
    ///
    /// The address goes out percent-encoded as the `address` query
    /// parameter. Transport failures, non-2xx statuses, and unparseable
    /// bodies all surface as `Unexpected`; a parsed body with missing
    /// coordinates is returned as-is.
    pub async fn geocode(&self, address: &str) -> Result<GeocodeResponse, AppError> {
        let url = reqwest::Url::parse_with_params(&self.base_url, &[("address", address)])
            .map_err(|e| AppError::Unexpected(format!("Failed to build geocoding URL: {}", e)))?;

        tracing::debug!("Geocoding address: {}", address);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Unexpected(format!("Geocoding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::Unexpected(format!(
                "Geocoding service returned status {}",
                status
            )));
        }

        let coordinates = response.json::<GeocodeResponse>().await.map_err(|e| {
            AppError::Unexpected(format!("Failed to parse geocoding response: {}", e))
        })?;

        Ok(coordinates)
    }
}
