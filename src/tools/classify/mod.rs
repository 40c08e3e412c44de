//! Anomaly Classifier


use crate::tools::fetch::{ProbeOutcome, ProbeStatus};
use crate::tools::search::SearchOutcome;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Normal,
    /// Detail page gone or redirected while the image is still served.
    DiscontinuedOrRedirected,
    /// Page and image live, but the code is missing from search.
    OutOfStockOrHidden,
}

impl Classification {
    pub fn is_anomaly(self) -> bool {
        self != Self::Normal
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::DiscontinuedOrRedirected => "discontinued/redirected",
            Self::OutOfStockOrHidden => "out of stock/hidden",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify one code from its three probe statuses.
///
/// Only two patterns are flagged; every other combination is `Normal`.
pub fn classify(page: ProbeStatus, image: ProbeStatus, search: ProbeStatus) -> Classification {
    if !page.is_ok() && image.is_ok() {
        Classification::DiscontinuedOrRedirected
    } else if page.is_ok() && image.is_ok() && !search.is_ok() {
        Classification::OutOfStockOrHidden
    } else {
        Classification::Normal
    }
}

/// Everything observed for one code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSignals {
    pub page: ProbeOutcome,
    pub image: ProbeOutcome,
    pub search: SearchOutcome,
}

impl ProductSignals {
    pub fn classification(&self) -> Classification {
        classify(self.page.status, self.image.status, self.search.status)
    }

    /// Model name from the detail page, empty when none was found.
    pub fn model_name(&self) -> &str {
        self.page.model_name.as_deref().unwrap_or_default()
    }
}
