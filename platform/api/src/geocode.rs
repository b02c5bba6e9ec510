use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::{client::execute, error::ApiResult};

pub const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Reverse geocoding against a Google-compatible `geocode/json` endpoint.
#[derive(Clone)]
pub struct Geocoder {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl std::fmt::Debug for Geocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Geocoder")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    formatted_address: Option<String>,
}

impl GeocodeResponse {
    fn first_address(self) -> Option<String> {
        if self.status != "OK" {
            return None;
        }
        self.results
            .into_iter()
            .next()
            .and_then(|result| result.formatted_address)
    }
}

impl Geocoder {
    pub fn new(http: reqwest::Client, endpoint: Url, api_key: impl Into<String>) -> Self {
        Self {
            http,
            endpoint,
            api_key: api_key.into(),
        }
    }

    pub fn request_url(&self, latitude: f64, longitude: f64) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("latlng", &format!("{latitude},{longitude}"))
            .append_pair("key", &self.api_key);
        url
    }

    /// Formatted address of the first result, `None` when the service found nothing.
    #[instrument(name = "api.reverse_geocode", skip(self))]
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> ApiResult<Option<String>> {
        let url = self.request_url(latitude, longitude);
        let response: Option<GeocodeResponse> = execute(self.http.get(url)).await?;
        Ok(response.and_then(GeocodeResponse::first_address))
    }
}
