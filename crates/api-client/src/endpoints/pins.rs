//! Pin endpoints

use crate::client::SafeSusClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{SubmitPinRequest, SubmitPinResponse};

/// Pins API interface
#[derive(Clone)]
pub struct PinsApi {
    client: SafeSusClient,
}

impl PinsApi {
    /// Create a new pins API interface
    pub(crate) fn new(client: SafeSusClient) -> Self {
        Self { client }
    }

    /// Report a location-specific incident
    ///
    /// POST /submit-pin
    pub async fn submit(&self, request: &SubmitPinRequest) -> ApiResult<SubmitPinResponse> {
        if request.title.trim().is_empty() {
            return Err(ApiError::invalid_input("Missing required fields: title and location are required"));
        }
        match request.location {
            Some(point) if point.coordinate().is_valid() => {}
            Some(_) => return Err(ApiError::invalid_input("Invalid pin location")),
            None => {
                return Err(ApiError::invalid_input("Missing required fields: title and location are required"));
            }
        }

        self.client.post(&["submit-pin"], Some(request)).await
    }
}
