//! Tip endpoints

use crate::client::SafeSusClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{SearchTipsResponse, SubmitTipRequest, SubmitTipResponse, Tip, TipsResponse};

/// Default number of recent tips
pub const DEFAULT_RECENT_LIMIT: u32 = 5;

/// Default number of featured tips
pub const DEFAULT_FEATURED_LIMIT: u32 = 20;

/// Minimum search query length after trimming
pub const MIN_QUERY_LEN: usize = 2;

/// Tips API interface
#[derive(Clone)]
pub struct TipsApi {
    client: SafeSusClient,
}

impl TipsApi {
    /// Create a new tips API interface
    pub(crate) fn new(client: SafeSusClient) -> Self {
        Self { client }
    }

    /// Most recent tips across all cities
    ///
    /// GET /recent-tips?limit (cached)
    pub async fn recent(&self, limit: u32) -> ApiResult<Vec<Tip>> {
        let response: TipsResponse = self
            .client
            .get_cached(&["recent-tips"], &limit_query(limit))
            .await?;
        Ok(response.tips)
    }

    /// Editorially featured tips
    ///
    /// GET /featured-tips?limit (cached)
    pub async fn featured(&self, limit: u32) -> ApiResult<Vec<Tip>> {
        let response: TipsResponse = self
            .client
            .get_cached(&["featured-tips"], &limit_query(limit))
            .await?;
        Ok(response.tips)
    }

    /// Full-text search over tips
    ///
    /// GET /search-tips?q
    pub async fn search(&self, query: &str) -> ApiResult<Vec<Tip>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Err(ApiError::invalid_input(format!(
                "Search query must be at least {MIN_QUERY_LEN} characters"
            )));
        }

        let response: SearchTipsResponse = self
            .client
            .get(&["search-tips"], &[("q", query.to_string())])
            .await?;
        Ok(response.results)
    }

    /// Submit a tip for moderation
    ///
    /// POST /submit-tip
    pub async fn submit(&self, request: &SubmitTipRequest) -> ApiResult<SubmitTipResponse> {
        validate_submission(request)?;
        self.client.post(&["submit-tip"], Some(request)).await
    }
}

/// A zero limit leaves the choice to the server.
fn limit_query(limit: u32) -> Vec<(&'static str, String)> {
    if limit == 0 {
        Vec::new()
    } else {
        vec![("limit", limit.to_string())]
    }
}

fn validate_submission(request: &SubmitTipRequest) -> ApiResult<()> {
    if request.city_id <= 0 || request.title.trim().is_empty() || request.summary.trim().is_empty() {
        return Err(ApiError::invalid_input(
            "Missing required fields: city_id, title, and summary are required",
        ));
    }
    if request.location.is_some_and(|p| !p.coordinate().is_valid()) {
        return Err(ApiError::invalid_input("Invalid tip location"));
    }
    Ok(())
}
