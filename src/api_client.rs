use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, LOCATION};
use reqwest::redirect::Policy;
use serde_json::Value;

use crate::client::Dispatcher;
use crate::error::{Error, HttpError, JSONError};
use crate::types::QueryParams;

pub const API_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// reqwest backed [`Dispatcher`].
///
/// Holds two clients sharing the same default headers: one follows redirects
/// for JSON endpoints, the other stops at the first redirect so its
/// `Location` can be read.
#[derive(Clone, Debug)]
pub struct ReqwestDispatcher {
    client: reqwest::Client,
    no_redirect_client: reqwest::Client,
}

impl ReqwestDispatcher {
    pub fn new(api_key: &str) -> Result<Self, Error> {
        Self::with_timeout(api_key, None)
    }

    pub fn with_timeout(api_key: &str, timeout: Option<Duration>) -> Result<Self, Error> {
        let mut key = HeaderValue::from_str(api_key).map_err(|_| Error::InvalidApiKey)?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("application/json"));
        headers.insert(API_KEY_HEADER, key);

        Ok(Self {
            client: build_client(headers.clone(), timeout, Policy::default())?,
            no_redirect_client: build_client(headers, timeout, Policy::none())?,
        })
    }
}

fn build_client(
    headers: HeaderMap,
    timeout: Option<Duration>,
    policy: Policy,
) -> Result<reqwest::Client, Error> {
    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .redirect(policy);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

async fn send(
    client: &reqwest::Client,
    url: &str,
    query: &QueryParams,
) -> Result<reqwest::Response, Error> {
    let mut request = client.get(url);
    if !query.is_empty() {
        request = request.query(query);
    }

    tracing::debug!(url, ?query, "GET");
    let response = request.send().await?;
    tracing::debug!(url = %response.url(), status = %response.status(), "response");

    Ok(response)
}

async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("failed to read error body from {}: {}", url, e);
            String::new()
        }
    };
    tracing::warn!("API error {} from {}: {}", status, url, body);

    Err(HttpError::new(status.as_u16(), url, body).into())
}

#[async_trait]
impl Dispatcher for ReqwestDispatcher {
    async fn get_json(&self, url: &str, query: &QueryParams) -> Result<Value, Error> {
        let response = send(&self.client, url, query).await?;
        let response = error_for_status(response).await?;

        let url = response.url().to_string();
        let body = response.text().await?;

        Ok(serde_json::from_str(&body).map_err(|e| JSONError::new(url, e))?)
    }

    async fn get_redirect_location(
        &self,
        url: &str,
        query: &QueryParams,
    ) -> Result<Option<String>, Error> {
        let response = send(&self.no_redirect_client, url, query).await?;

        let status = response.status();
        if status.is_redirection() {
            let Some(value) = response.headers().get(LOCATION) else {
                tracing::warn!(url, %status, "redirect without a location");
                return Ok(None);
            };
            return match value.to_str() {
                Ok(location) => Ok(Some(location.to_owned())),
                Err(e) => {
                    tracing::warn!(url, %status, location = ?value, "unreadable location: {}", e);
                    Ok(None)
                }
            };
        }

        error_for_status(response).await?;
        tracing::debug!(url, "no redirect");

        Ok(None)
    }
}
