use async_trait::async_trait;
use serde_json::Value;

use crate::error::Error;
use crate::types::QueryParams;

/// Issues authenticated GET requests against the API.
///
/// Every endpoint method funnels through one of these two calls.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// GETs `url` and returns the decoded JSON body of a 2xx response.
    async fn get_json(&self, url: &str, query: &QueryParams) -> Result<Value, Error>;

    /// GETs `url` without following redirects and returns the `Location` of
    /// the redirect response. `None` when the API answered without
    /// redirecting.
    async fn get_redirect_location(
        &self,
        url: &str,
        query: &QueryParams,
    ) -> Result<Option<String>, Error>;
}
