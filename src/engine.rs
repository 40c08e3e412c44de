use crate::config::ProbeConfig;
use crate::error::*;
use crate::log::ActivityLogger;
use crate::tools::classify::{Classification, ProductSignals};
use crate::tools::fetch::{probe_image, probe_page, Fetcher};
use crate::tools::report::{CodeReport, Reporter};
use crate::tools::search::probe_search;
use crate::tools::sequence::{CodeRange, ProductCode};
use serde::Serialize;
use std::io::Write;

/// Totals for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: u64,
    pub normal: u64,
    pub discontinued: u64,
    pub hidden: u64,
}

impl RunSummary {
    pub fn record(&mut self, classification: Classification) {
        self.total += 1;
        match classification {
            Classification::Normal => self.normal += 1,
            Classification::DiscontinuedOrRedirected => self.discontinued += 1,
            Classification::OutOfStockOrHidden => self.hidden += 1,
        }
    }
}

/// Drives the per-code pipeline, strictly one request at a time.
pub struct Engine<'a> {
    pub fetcher: &'a dyn Fetcher,
    pub config: &'a ProbeConfig,
    pub logger: &'a ActivityLogger,
}

impl<'a> Engine<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, config: &'a ProbeConfig, logger: &'a ActivityLogger) -> Self {
        Self {
            fetcher,
            config,
            logger,
        }
    }

    /// Probe page, image and search for one code, in that order.
    pub async fn check(&self, code: &ProductCode) -> CodeReport {
        let code_str = code.to_string();
        let urls = self.config.urls_for(&code_str);
        let markers = &self.config.markers;

        let page = probe_page(self.fetcher, &urls.page, markers).await;
        self.log_failure(&code_str, "page", page.failure.as_deref());

        let image = probe_image(self.fetcher, &urls.image).await;
        self.log_failure(&code_str, "image", image.failure.as_deref());

        let search = probe_search(self.fetcher, &urls.search, &code_str, markers).await;
        self.log_failure(&code_str, "search", search.failure.as_deref());

        CodeReport::new(code.clone(), urls, ProductSignals { page, image, search })
    }

    /// Check every code in `range` and emit each report as soon as it is ready.
    ///
    /// Probe failures never stop the run; only a failing output sink does.
    pub async fn run<W: Write>(&self, range: &CodeRange, reporter: &mut Reporter<W>) -> Result<RunSummary> {
        let first = range.start().to_string();
        let last = range.last().map(|c| c.to_string()).unwrap_or_else(|| first.clone());
        let _ = self.logger.info(
            None,
            "run_start",
            Some(&format!(
                "{first}..{last} ({} codes, fetcher {})",
                range.count(),
                self.fetcher.name()
            )),
        );

        let delay = self.config.delay();
        let mut summary = RunSummary::default();
        for (idx, code) in range.iter().enumerate() {
            if idx > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let report = self.check(&code).await;
            summary.record(report.classification);
            reporter.emit(&report)?;
        }

        let _ = self.logger.info(
            None,
            "run_end",
            Some(&format!(
                "{} checked, {} discontinued/redirected, {} out of stock/hidden",
                summary.total, summary.discontinued, summary.hidden
            )),
        );
        Ok(summary)
    }

    fn log_failure(&self, code: &str, probe: &str, failure: Option<&str>) {
        if let Some(detail) = failure {
            let _ = self
                .logger
                .error(Some(code), "probe_failed", Some(&format!("{probe}: {detail}")));
        }
    }
}
