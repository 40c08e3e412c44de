use super::types::*;
use super::Fetcher;
use crate::config::ProbeConfig;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONNECTION};
use reqwest::{redirect, Client};
use std::time::Duration;

/// [`Fetcher`] over reqwest.
///
/// Every request gets a fresh client with an empty pool, so no connection is
/// ever reused. With [`Redirects::Return`] the redirect policy is `none` and a
/// 3xx comes back as the outcome instead of being followed.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    timeout: Duration,
    user_agent: Option<String>,
}

impl ReqwestFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            user_agent: None,
        }
    }

    pub fn from_config(cfg: &ProbeConfig) -> Self {
        Self {
            timeout: cfg.timeout(),
            user_agent: cfg.user_agent.clone(),
        }
    }

    fn build_client(&self, redirects: Redirects) -> Result<Client, FetchError> {
        let policy = match redirects {
            Redirects::Return => redirect::Policy::none(),
            Redirects::Follow => redirect::Policy::limited(MAX_REDIRECTS),
        };
        let mut builder = Client::builder()
            .redirect(policy)
            .pool_max_idle_per_host(0)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .timeout(self.timeout);

        if let Some(ua) = &self.user_agent {
            builder = builder.user_agent(ua.as_str());
        }

        builder
            .build()
            .map_err(|e| FetchError::Network(format!("failed to build client: {e}")))
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    fn name(&self) -> &'static str {
        "reqwest"
    }

    async fn get(
        &self,
        url: &str,
        body: BodyMode,
        redirects: Redirects,
    ) -> Result<HttpReply, FetchError> {
        let client = self.build_client(redirects)?;

        let response = client
            .get(url)
            .header(CONNECTION, HeaderValue::from_static("close"))
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if body == BodyMode::Skip || status != 200 {
            return Ok(HttpReply::new(status, None));
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::BodyRead(e.to_string()))?;
        Ok(HttpReply::new(status, Some(text)))
    }
}
