//! Waitlist endpoints

use crate::client::SafeSusClient;
use crate::error::ApiResult;
use crate::models::WaitlistCountResponse;

/// Waitlist API interface
#[derive(Clone)]
pub struct WaitlistApi {
    client: SafeSusClient,
}

impl WaitlistApi {
    /// Create a new waitlist API interface
    pub(crate) fn new(client: SafeSusClient) -> Self {
        Self { client }
    }

    /// Number of people on the waitlist
    ///
    /// GET /waitlist-count (cached)
    pub async fn count(&self) -> ApiResult<u64> {
        let response: WaitlistCountResponse = self.client.get_cached(&["waitlist-count"], &[]).await?;
        Ok(response.count)
    }
}
