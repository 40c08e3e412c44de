use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Outcome status of one probe: an HTTP status, or a sentinel for a failed
/// request (`-1`) or an unreadable body (`-2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "i32")]
pub enum ProbeStatus {
    Http(u16),
    NetworkError,
    BodyReadError,
}

impl ProbeStatus {
    pub const OK: ProbeStatus = ProbeStatus::Http(200);
    pub const NOT_FOUND: ProbeStatus = ProbeStatus::Http(404);

    pub fn is_ok(self) -> bool {
        self == Self::OK
    }

    /// Numeric form used in reports: the HTTP code, `-1` or `-2`.
    pub fn code(self) -> i32 {
        match self {
            Self::Http(status) => i32::from(status),
            Self::NetworkError => -1,
            Self::BodyReadError => -2,
        }
    }
}

impl From<ProbeStatus> for i32 {
    fn from(status: ProbeStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Whether a fetch should read the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMode {
    /// Never read the body (image probes).
    Skip,
    /// Read the body only when the status is 200.
    ReadIfOk,
}

/// What to do with a 3xx response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirects {
    /// Return the 3xx itself (page and image probes).
    Return,
    /// Follow up to [`MAX_REDIRECTS`] hops (search probes).
    Follow,
}

pub const MAX_REDIRECTS: usize = 10;

/// Raw response as seen by the probe layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Option<String>,
}

impl HttpReply {
    pub fn new(status: u16, body: Option<String>) -> Self {
        Self { status, body }
    }

    pub fn body_str(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, DNS, TLS or timeout failure before a response arrived.
    #[error("network error: {0}")]
    Network(String),
    /// A response arrived but its body could not be read.
    #[error("body read error: {0}")]
    BodyRead(String),
}

impl FetchError {
    pub fn status(&self) -> ProbeStatus {
        match self {
            Self::Network(_) => ProbeStatus::NetworkError,
            Self::BodyRead(_) => ProbeStatus::BodyReadError,
        }
    }
}

/// Result of a page or image probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    pub status: ProbeStatus,
    /// Model name, only ever set for a live detail page.
    pub model_name: Option<String>,
    /// Transport error detail behind a sentinel status.
    #[serde(skip)]
    pub failure: Option<String>,
}

impl ProbeOutcome {
    pub fn with_status(status: ProbeStatus) -> Self {
        Self {
            status,
            model_name: None,
            failure: None,
        }
    }

    pub fn failed(err: FetchError) -> Self {
        Self {
            status: err.status(),
            model_name: None,
            failure: Some(err.to_string()),
        }
    }
}
