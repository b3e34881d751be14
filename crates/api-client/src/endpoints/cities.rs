//! City endpoints
//!
//! - List the supported-city catalog
//! - Get one city with its zones, pins and tips
//! - Save and unsave a city for the signed-in user

use crate::client::SafeSusClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{CitiesResponse, CityDetail, CityDetailResponse, SaveCityRequest, SuccessResponse};
use safesus_city::{CityCatalog, SupportedCity};
use tracing::debug;

/// Cities API interface
#[derive(Clone)]
pub struct CitiesApi {
    client: SafeSusClient,
}

impl CitiesApi {
    /// Create a new cities API interface
    pub(crate) fn new(client: SafeSusClient) -> Self {
        Self { client }
    }

    /// List every city, in catalog order
    ///
    /// GET /cities (cached)
    pub async fn list(&self) -> ApiResult<Vec<SupportedCity>> {
        let response: CitiesResponse = self.client.get_cached(&["cities"], &[]).await?;
        debug!(count = response.cities.len(), "Loaded city catalog");
        Ok(response.cities)
    }

    /// Load the city catalog used for matching
    pub async fn catalog(&self) -> ApiResult<CityCatalog> {
        self.list().await.map(CityCatalog::new)
    }

    /// Get a city with its zones, pins and tips
    ///
    /// GET /city/{slug} (cached)
    pub async fn get(&self, slug: &str) -> ApiResult<CityDetail> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(ApiError::invalid_input("City slug cannot be empty"));
        }

        let response: CityDetailResponse = self.client.get_cached(&["city", slug], &[]).await?;
        Ok(response.city)
    }

    /// Save a city for the current user
    ///
    /// POST /save
    pub async fn save(&self, city_id: i64) -> ApiResult<SuccessResponse> {
        let body = save_request(city_id)?;
        self.client.post(&["save"], Some(&body)).await
    }

    /// Remove a saved city
    ///
    /// DELETE /save
    pub async fn unsave(&self, city_id: i64) -> ApiResult<SuccessResponse> {
        let body = save_request(city_id)?;
        self.client.delete(&["save"], Some(&body)).await
    }
}

fn save_request(city_id: i64) -> ApiResult<SaveCityRequest> {
    if city_id <= 0 {
        return Err(ApiError::invalid_input("Invalid city ID"));
    }
    Ok(SaveCityRequest { city_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn api() -> CitiesApi {
        // Points at a closed port; validation must fail before any request.
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:9/api");
        SafeSusClient::with_config(config).unwrap().cities()
    }

    #[test]
    fn test_save_rejects_non_positive_ids() {
        for id in [0, -1] {
            let err = tokio_test::block_on(api().save(id)).unwrap_err();
            assert!(matches!(err, ApiError::InvalidInput(_)));

            let err = tokio_test::block_on(api().unsave(id)).unwrap_err();
            assert!(matches!(err, ApiError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_get_rejects_blank_slug() {
        let err = tokio_test::block_on(api().get("  ")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }
}
