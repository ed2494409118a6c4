use serde::Deserialize;

use crate::core::config::GeocodingConfig;
use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::GeocodedAddressDto;

/// Nominatim `/reverse` response
#[derive(Debug, Deserialize)]
pub struct NominatimReverseResponse {
    pub display_name: Option<String>,
    pub address: Option<NominatimAddress>,
    /// Set instead of an address when nothing is found ("Unable to geocode")
    pub error: Option<String>,
}

/// Nominatim address components
#[derive(Debug, Default, Deserialize)]
pub struct NominatimAddress {
    pub house_number: Option<String>,
    pub road: Option<String>,
    pub neighbourhood: Option<String>,
    pub suburb: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub country_code: Option<String>,
}

impl NominatimAddress {
    /// Get city, falling back to town or village
    pub fn get_city(&self) -> Option<String> {
        self.city
            .clone()
            .or_else(|| self.town.clone())
            .or_else(|| self.village.clone())
    }

    /// Street line: "<house number> <road>, <suburb or neighbourhood>"
    pub fn street_line(&self) -> Option<String> {
        let street = match (&self.house_number, &self.road) {
            (Some(number), Some(road)) => Some(format!("{} {}", number, road)),
            (None, Some(road)) => Some(road.clone()),
            _ => None,
        };
        let area = self.suburb.clone().or_else(|| self.neighbourhood.clone());

        match (street, area) {
            (Some(s), Some(a)) => Some(format!("{}, {}", s, a)),
            (Some(s), None) => Some(s),
            (None, a) => a,
        }
    }
}

impl NominatimReverseResponse {
    pub fn into_dto(self) -> Option<GeocodedAddressDto> {
        if self.error.is_some() {
            return None;
        }
        let address = self.address.unwrap_or_default();

        Some(GeocodedAddressDto {
            display_name: self.display_name,
            address: address.street_line(),
            city: address.get_city(),
            state: address.state.clone(),
            postal_code: address.postcode.clone(),
            country_code: address.country_code.clone(),
        })
    }
}

/// Reverse geocoding through a Nominatim-compatible endpoint
pub struct GeocodingService {
    client: reqwest::Client,
    base_url: String,
}

impl GeocodingService {
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Resolve coordinates to an address. `Ok(None)` when the provider has no match.
    pub async fn reverse(&self, lat: f64, lon: f64) -> Result<Option<GeocodedAddressDto>> {
        let url = format!(
            "{}/reverse?format=json&addressdetails=1&lat={}&lon={}",
            self.base_url,
            urlencoding::encode(&lat.to_string()),
            urlencoding::encode(&lon.to_string())
        );

        tracing::debug!("Reverse geocoding: ({}, {}) -> {}", lat, lon, url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Geocoding request failed: {}", e))
        })?;

        if !response.status().is_success() {
            tracing::warn!("Geocoding provider returned status: {}", response.status());
            return Ok(None);
        }

        let body: NominatimReverseResponse = response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse geocoding response: {}", e))
        })?;

        Ok(body.into_dto())
    }

    /// Like [`Self::reverse`], but any failure degrades to `None`.
    pub async fn reverse_best_effort(&self, lat: f64, lon: f64) -> Option<GeocodedAddressDto> {
        match self.reverse(lat, lon).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Reverse geocoding failed, falling back to manual entry: {}", e);
                None
            }
        }
    }
}
