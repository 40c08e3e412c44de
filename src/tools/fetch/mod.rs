//! HTTP Probe

mod client;

pub mod types;

pub use client::ReqwestFetcher;
pub use types::*;

use crate::config::Markers;
use crate::tools::extract::inspect_page;
use async_trait::async_trait;

/// Transport seam under the probes: one GET, no retries.
///
/// Implementations must honour both [`BodyMode`] and [`Redirects`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    fn name(&self) -> &'static str;
    async fn get(
        &self,
        url: &str,
        body: BodyMode,
        redirects: Redirects,
    ) -> Result<HttpReply, FetchError>;
}

/// Probe a product detail page.
///
/// A 200 page is scanned for the soft-404 marker (reported as 404) and
/// otherwise for the model name.
pub async fn probe_page(fetcher: &dyn Fetcher, url: &str, markers: &Markers) -> ProbeOutcome {
    page_outcome(fetcher.get(url, BodyMode::ReadIfOk, Redirects::Return).await, markers)
}

/// Probe a product image. The body is never read.
pub async fn probe_image(fetcher: &dyn Fetcher, url: &str) -> ProbeOutcome {
    image_outcome(fetcher.get(url, BodyMode::Skip, Redirects::Return).await)
}

/// Turn a detail page reply into a [`ProbeOutcome`].
pub fn page_outcome(reply: Result<HttpReply, FetchError>, markers: &Markers) -> ProbeOutcome {
    let reply = match reply {
        Ok(reply) => reply,
        Err(e) => return ProbeOutcome::failed(e),
    };
    if reply.status != 200 {
        return ProbeOutcome::with_status(ProbeStatus::Http(reply.status));
    }

    let content = inspect_page(reply.body_str(), markers);
    if content.not_found {
        return ProbeOutcome::with_status(ProbeStatus::NOT_FOUND);
    }
    ProbeOutcome {
        status: ProbeStatus::OK,
        model_name: content.model_name,
        failure: None,
    }
}

pub fn image_outcome(reply: Result<HttpReply, FetchError>) -> ProbeOutcome {
    match reply {
        Ok(reply) => ProbeOutcome::with_status(ProbeStatus::Http(reply.status)),
        Err(e) => ProbeOutcome::failed(e),
    }
}
