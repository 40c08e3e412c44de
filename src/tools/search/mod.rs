//! Search Verifier


use crate::config::Markers;
use crate::tools::fetch::*;
use serde::Serialize;

/// Whether the search listing shows the code: 200 for a hit, 404 for a miss,
/// otherwise the transport status or sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub status: ProbeStatus,
    #[serde(skip)]
    pub failure: Option<String>,
}

impl SearchOutcome {
    pub fn with_status(status: ProbeStatus) -> Self {
        Self {
            status,
            failure: None,
        }
    }

    pub fn failed(err: FetchError) -> Self {
        Self {
            status: err.status(),
            failure: Some(err.to_string()),
        }
    }

    pub fn is_hit(&self) -> bool {
        self.status.is_ok()
    }
}

/// Run the catalog search for `code` and check the listing.
///
/// Unlike the page and image probes, redirects are followed here so a
/// canonical-URL hop still lands on the listing.
pub async fn probe_search(
    fetcher: &dyn Fetcher,
    url: &str,
    code: &str,
    markers: &Markers,
) -> SearchOutcome {
    search_outcome(
        fetcher.get(url, BodyMode::ReadIfOk, Redirects::Follow).await,
        code,
        markers,
    )
}

pub fn search_outcome(
    reply: Result<HttpReply, FetchError>,
    code: &str,
    markers: &Markers,
) -> SearchOutcome {
    match reply {
        Ok(reply) => SearchOutcome::with_status(verify_search(
            ProbeStatus::Http(reply.status),
            reply.body.as_deref(),
            code,
            &markers.search_hit,
        )),
        Err(e) => SearchOutcome::failed(e),
    }
}

/// Non-200 statuses pass through untouched; a 200 becomes a hit or a miss
/// depending on the listing content.
pub fn verify_search(
    status: ProbeStatus,
    body: Option<&str>,
    code: &str,
    list_marker: &str,
) -> ProbeStatus {
    if !status.is_ok() {
        return status;
    }
    if listing_contains(body.unwrap_or_default(), code, list_marker) {
        ProbeStatus::OK
    } else {
        ProbeStatus::NOT_FOUND
    }
}

/// The listing is populated and links to `/<code>` somewhere.
pub fn listing_contains(body: &str, code: &str, list_marker: &str) -> bool {
    body.contains(list_marker) && body.contains(&format!("/{code}"))
}
