use anyhow::Result;
use serde::Deserialize;

use crate::config::GeocodingConfig;
use crate::models::LocationInfo;

/// Reverse geocoding. Implementations never fail the caller.
#[async_trait::async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, lat: f64, lng: f64) -> LocationInfo;
}

#[derive(Debug, Deserialize)]
struct OpenCageResponse {
    #[serde(default)]
    results: Vec<OpenCageResult>,
}

#[derive(Debug, Deserialize)]
struct OpenCageResult {
    #[serde(default)]
    components: AddressComponents,
}

#[derive(Debug, Default, Deserialize)]
struct AddressComponents {
    country: Option<String>,
    state: Option<String>,
    region: Option<String>,
    county: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
}

impl AddressComponents {
    fn into_location(self) -> LocationInfo {
        let first = |candidates: [Option<String>; 4]| {
            candidates.into_iter().flatten().find(|v| !v.is_empty())
        };

        let country = self
            .country
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| LocationInfo::UNKNOWN_COUNTRY.to_string());
        let region = first([self.state, self.region, self.county, None])
            .unwrap_or_else(|| LocationInfo::UNKNOWN_REGION.to_string());
        let city = first([self.city, self.town, self.village, self.municipality]);

        LocationInfo { country, region, city }
    }
}

/// OpenCage reverse geocoding client
pub struct OpenCageClient {
    config: GeocodingConfig,
    client: reqwest::Client,
}

impl OpenCageClient {
    pub fn new(config: GeocodingConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    async fn lookup(&self, api_key: &str, lat: f64, lng: f64) -> Result<LocationInfo> {
        let query = format!("{},{}", lat, lng);

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("key", api_key),
                ("q", query.as_str()),
                ("language", "en"),
                ("pretty", "0"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenCage API error ({}): {}", status, error_text);
        }

        let body: OpenCageResponse = response.json().await?;
        Ok(location_from_response(body))
    }
}

fn location_from_response(body: OpenCageResponse) -> LocationInfo {
    match body.results.into_iter().next() {
        Some(result) => result.components.into_location(),
        None => {
            log::warn!("🌍 Geocoding returned no results");
            LocationInfo::unknown()
        }
    }
}

#[async_trait::async_trait]
impl Geocoder for OpenCageClient {
    async fn resolve(&self, lat: f64, lng: f64) -> LocationInfo {
        let Some(api_key) = self.config.api_key.as_deref() else {
            log::debug!("🌍 Geocoding disabled, using placeholder location for ({}, {})", lat, lng);
            return LocationInfo::unknown();
        };

        match self.lookup(api_key, lat, lng).await {
            Ok(info) => {
                log::debug!(
                    "🌍 Resolved ({}, {}) to {} / {} / {:?}",
                    lat, lng, info.country, info.region, info.city
                );
                info
            }
            Err(e) => {
                log::warn!("⚠️ Reverse geocoding failed for ({}, {}): {}", lat, lng, e);
                LocationInfo::unknown()
            }
        }
    }
}
