use crate::config::SiteUrls;
use crate::tools::classify::{Classification, ProductSignals};
use crate::tools::fetch::ProbeStatus;
use crate::tools::sequence::ProductCode;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Everything reported for one code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeReport {
    pub code: ProductCode,
    pub urls: SiteUrls,
    pub signals: ProductSignals,
    pub classification: Classification,
}

impl CodeReport {
    pub fn new(code: ProductCode, urls: SiteUrls, signals: ProductSignals) -> Self {
        let classification = signals.classification();
        Self {
            code,
            urls,
            signals,
            classification,
        }
    }
}

/// Flat JSON shape of a [`CodeReport`].
#[derive(Debug, Serialize)]
pub struct ReportRecord<'a> {
    pub code: String,
    pub page: ProbeStatus,
    pub image: ProbeStatus,
    pub search: ProbeStatus,
    pub model: &'a str,
    pub classification: Classification,
    pub urls: &'a SiteUrls,
}

impl<'a> From<&'a CodeReport> for ReportRecord<'a> {
    fn from(report: &'a CodeReport) -> Self {
        Self {
            code: report.code.to_string(),
            page: report.signals.page.status,
            image: report.signals.image.status,
            search: report.signals.search.status,
            model: report.signals.model_name(),
            classification: report.classification,
            urls: &report.urls,
        }
    }
}
