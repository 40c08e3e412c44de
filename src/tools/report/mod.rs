//! Reporter
//!
//! One `code:page:image:search:model` line per code, plus an alert block for
//! each anomaly. `--format json` swaps both for one JSON object per line.


pub mod types;

pub use types::*;

use crate::error::Result;
use crate::tools::classify::Classification;
use std::io::Write;

pub struct Reporter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn emit(&mut self, report: &CodeReport) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out, "{}", format_line(report))?;
                if let Some(alert) = format_alert(report) {
                    write!(self.out, "{alert}")?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, &ReportRecord::from(report))?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// `code:page:image:search:model`, model empty when unknown.
pub fn format_line(report: &CodeReport) -> String {
    let signals = &report.signals;
    format!(
        "{}:{}:{}:{}:{}",
        report.code,
        signals.page.status,
        signals.image.status,
        signals.search.status,
        signals.model_name()
    )
}

/// Alert block for an anomaly, `None` for a normal code. The search URL is
/// only listed for hidden items.
pub fn format_alert(report: &CodeReport) -> Option<String> {
    let urls = &report.urls;
    match report.classification {
        Classification::Normal => None,
        Classification::DiscontinuedOrRedirected => Some(format!(
            "--detected ({})\n{}\n{}\n--\n",
            report.classification, urls.page, urls.image
        )),
        Classification::OutOfStockOrHidden => Some(format!(
            "--detected ({})\n{}\n{}\nsearch: {}\n--\n",
            report.classification, urls.page, urls.image, urls.search
        )),
    }
}
