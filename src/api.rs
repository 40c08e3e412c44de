use crate::config::ProbeConfig;
use crate::engine::{Engine, RunSummary};
use crate::error::*;
use crate::log::ActivityLogger;
use crate::tools::fetch::{Fetcher, ReqwestFetcher};
use crate::tools::report::{CodeReport, OutputFormat, Reporter};
use crate::tools::sequence::{code_range, CodeRange, ProductCode};
use std::io::Write;

/* ------------ public facade ------------ */

/// Validate `start`, then probe `count` codes over the network and write the
/// reports to `out`.
///
/// A bad start code fails here, before any request is sent.
pub async fn probe_range<W: Write>(
    start: &str,
    count: u64,
    config: &ProbeConfig,
    logger: &ActivityLogger,
    out: W,
    format: OutputFormat,
) -> Result<RunSummary> {
    let range = code_range(start, count, config.code_width)?;
    let fetcher = ReqwestFetcher::from_config(config);
    probe_range_with(&fetcher, &range, config, logger, out, format).await
}

/// Same as [`probe_range`] over any [`Fetcher`].
pub async fn probe_range_with<W: Write>(
    fetcher: &dyn Fetcher,
    range: &CodeRange,
    config: &ProbeConfig,
    logger: &ActivityLogger,
    out: W,
    format: OutputFormat,
) -> Result<RunSummary> {
    let mut reporter = Reporter::new(out, format);
    Engine::new(fetcher, config, logger)
        .run(range, &mut reporter)
        .await
}

/// Probe a single code and return its report without printing anything.
pub async fn check_code(
    fetcher: &dyn Fetcher,
    code: &str,
    config: &ProbeConfig,
    logger: &ActivityLogger,
) -> Result<CodeReport> {
    let code = ProductCode::parse(code, config.code_width)?;
    Ok(Engine::new(fetcher, config, logger).check(&code).await)
}
