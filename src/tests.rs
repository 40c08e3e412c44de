//! Tests

#[cfg(test)]
mod tests {
    use crate::api::{check_code, probe_range, probe_range_with};
    use crate::config::ProbeConfig;
    use crate::log::ActivityLogger;
    use crate::tools::fetch::{BodyMode, FetchError, Fetcher, HttpReply, ProbeStatus, Redirects};
    use crate::tools::report::OutputFormat;
    use crate::tools::sequence::code_range;
    use crate::{Classification, ProbeError, RunSummary};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    /// Replays canned replies by URL; unknown URLs fail as network errors.
    #[derive(Default)]
    struct ReplayFetcher {
        replies: HashMap<String, Result<HttpReply, FetchError>>,
        requests: Mutex<Vec<(String, BodyMode, Redirects)>>,
    }

    impl ReplayFetcher {
        fn reply(mut self, url: String, status: u16, body: &str) -> Self {
            self.replies
                .insert(url, Ok(HttpReply::new(status, Some(body.to_string()))));
            self
        }

        fn fail(mut self, url: String, err: FetchError) -> Self {
            self.replies.insert(url, Err(err));
            self
        }

        fn requests(&self) -> Vec<(String, BodyMode, Redirects)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetcher for ReplayFetcher {
        fn name(&self) -> &'static str {
            "replay"
        }

        async fn get(
            &self,
            url: &str,
            body: BodyMode,
            redirects: Redirects,
        ) -> Result<HttpReply, FetchError> {
            self.requests
                .lock()
                .unwrap()
                .push((url.to_string(), body, redirects));
            let reply = self
                .replies
                .get(url)
                .cloned()
                .unwrap_or_else(|| Err(FetchError::Network(format!("no replay for {url}"))))?;
            let keep_body = body == BodyMode::ReadIfOk && reply.status == 200;
            Ok(HttpReply::new(reply.status, reply.body.filter(|_| keep_body)))
        }
    }

    const LIST: &str = r#"<ul class="itemList4">           <li>"#;

    fn product_page(model: &str) -> String {
        format!(r#"<script type="application/ld+json">{{"description": "モデル…{model}&lt;br&gt;着丈70cm"}}</script>"#)
    }

    fn search_page(code: &str) -> String {
        format!(r#"<html>{LIST}<a href="/Form/Product/ProductDetail.aspx?pid=/{code}">x</a></li></ul></html>"#)
    }

    /// Live and listed, live but unlisted, and a soft-404 page with a live image.
    fn catalog(cfg: &ProbeConfig) -> ReplayFetcher {
        let a = cfg.urls_for("ab00100");
        let b = cfg.urls_for("ab00101");
        let c = cfg.urls_for("ab00102");
        ReplayFetcher::default()
            .reply(a.page, 200, &product_page("ModelA"))
            .reply(a.image, 200, "JPEG")
            .reply(a.search, 200, &search_page("ab00100"))
            .reply(b.page, 200, &product_page("ModelB"))
            .reply(b.image, 200, "JPEG")
            .reply(b.search, 200, "<html>0 results</html>")
            .reply(c.page, 200, "<p>商品が見つかりません</p>")
            .reply(c.image, 200, "JPEG")
            .reply(c.search, 200, "<html>0 results</html>")
    }

    fn quiet_logger() -> ActivityLogger {
        ActivityLogger::file_only(std::env::temp_dir().join(format!(
            "skuprobe-tests-{}.log",
            std::process::id()
        )))
    }

    async fn run_text(fetcher: &ReplayFetcher, start: &str, count: u64, cfg: &ProbeConfig) -> (String, RunSummary) {
        let range = code_range(start, count, cfg.code_width).unwrap();
        let mut out = Vec::new();
        let summary = probe_range_with(fetcher, &range, cfg, &quiet_logger(), &mut out, OutputFormat::Text)
            .await
            .unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[tokio::test]
    async fn two_codes_give_two_report_lines() {
        let cfg = ProbeConfig::default();
        let fetcher = catalog(&cfg);
        let (out, summary) = run_text(&fetcher, "ab00100", 2, &cfg).await;

        let report_lines: Vec<&str> = out
            .lines()
            .filter(|l| l.starts_with("ab001"))
            .collect();
        assert_eq!(report_lines, ["ab00100:200:200:200:ModelA", "ab00101:200:200:404:ModelB"]);
        for line in &report_lines {
            assert_eq!(line.split(':').count(), 5);
        }
        assert_eq!(summary.total, 2);
        assert_eq!(summary.hidden, 1);
    }

    #[tokio::test]
    async fn anomalies_print_alert_blocks_in_order() {
        let cfg = ProbeConfig::default();
        let fetcher = catalog(&cfg);
        let (out, summary) = run_text(&fetcher, "ab00100", 3, &cfg).await;

        let b = cfg.urls_for("ab00101");
        let c = cfg.urls_for("ab00102");
        let expected = format!(
            "ab00100:200:200:200:ModelA\n\
             ab00101:200:200:404:ModelB\n\
             --detected (out of stock/hidden)\n{}\n{}\nsearch: {}\n--\n\
             ab00102:404:200:404:\n\
             --detected (discontinued/redirected)\n{}\n{}\n--\n",
            b.page, b.image, b.search, c.page, c.image
        );
        assert_eq!(out, expected);
        assert_eq!(
            summary,
            RunSummary {
                total: 3,
                normal: 1,
                discontinued: 1,
                hidden: 1
            }
        );
    }

    #[tokio::test]
    async fn probes_run_page_image_search_per_code() {
        let cfg = ProbeConfig::default();
        let fetcher = catalog(&cfg);
        run_text(&fetcher, "ab00100", 2, &cfg).await;

        let a = cfg.urls_for("ab00100");
        let b = cfg.urls_for("ab00101");
        assert_eq!(
            fetcher.requests(),
            vec![
                (a.page, BodyMode::ReadIfOk, Redirects::Return),
                (a.image, BodyMode::Skip, Redirects::Return),
                (a.search, BodyMode::ReadIfOk, Redirects::Follow),
                (b.page, BodyMode::ReadIfOk, Redirects::Return),
                (b.image, BodyMode::Skip, Redirects::Return),
                (b.search, BodyMode::ReadIfOk, Redirects::Follow),
            ]
        );
    }

    #[tokio::test]
    async fn failed_probes_degrade_and_run_continues() {
        let cfg = ProbeConfig::default();
        let a = cfg.urls_for("ab00100");
        let fetcher = ReplayFetcher::default()
            .fail(a.page, FetchError::Network("timed out".into()))
            .reply(a.image, 200, "JPEG")
            .fail(a.search, FetchError::BodyRead("eof".into()));
        // ab00101 has no replies at all: every probe is a network error
        let (out, summary) = run_text(&fetcher, "ab00100", 2, &cfg).await;

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ab00100:-1:200:-2:");
        assert_eq!(lines[1], "--detected (discontinued/redirected)");
        assert_eq!(lines.last().copied(), Some("ab00101:-1:-1:-1:"));
        assert_eq!(summary.total, 2);
        assert_eq!(summary.discontinued, 1);
        assert_eq!(summary.normal, 1);
    }

    #[tokio::test]
    async fn redirected_page_is_discontinued() {
        let cfg = ProbeConfig::default();
        let a = cfg.urls_for("ab00100");
        let fetcher = ReplayFetcher::default()
            .reply(a.page, 302, "")
            .reply(a.image, 200, "JPEG")
            .reply(a.search, 200, &search_page("ab00100"));

        let report = check_code(&fetcher, "ab00100", &cfg, &quiet_logger()).await.unwrap();
        assert_eq!(report.signals.page.status, ProbeStatus::Http(302));
        assert_eq!(report.classification, Classification::DiscontinuedOrRedirected);
    }

    #[tokio::test]
    async fn replayed_responses_give_identical_reports() {
        let cfg = ProbeConfig::default();
        let fetcher = catalog(&cfg);
        let first = check_code(&fetcher, "ab00101", &cfg, &quiet_logger()).await.unwrap();
        let second = check_code(&fetcher, "ab00101", &cfg, &quiet_logger()).await.unwrap();
        assert_eq!(first, second);

        let (out1, _) = run_text(&fetcher, "ab00100", 3, &cfg).await;
        let (out2, _) = run_text(&fetcher, "ab00100", 3, &cfg).await;
        assert_eq!(out1, out2);
    }

    #[tokio::test]
    async fn json_output_has_one_object_per_code() {
        let cfg = ProbeConfig::default();
        let fetcher = catalog(&cfg);
        let range = code_range("ab00100", 3, cfg.code_width).unwrap();
        let mut out = Vec::new();
        probe_range_with(&fetcher, &range, &cfg, &quiet_logger(), &mut out, OutputFormat::Json)
            .await
            .unwrap();

        let records: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["classification"], "normal");
        assert_eq!(records[2]["page"], 404);
        assert_eq!(records[2]["model"], "");
    }

    #[tokio::test]
    async fn delay_is_applied_between_codes() {
        let cfg = ProbeConfig {
            delay_ms: 30,
            ..ProbeConfig::default()
        };
        let fetcher = catalog(&cfg);
        let started = Instant::now();
        run_text(&fetcher, "ab00100", 3, &cfg).await;
        assert!(started.elapsed() >= Duration::from_millis(60));
    }

    #[tokio::test]
    async fn bad_start_code_fails_before_any_request() {
        let cfg = ProbeConfig::default();
        let err = probe_range("1234", 5, &cfg, &quiet_logger(), Vec::new(), OutputFormat::Text)
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::CodeTooShort { .. }));

        let fetcher = catalog(&cfg);
        let err = check_code(&fetcher, "ab0010x", &cfg, &quiet_logger())
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::NonNumericSuffix(_)));
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn custom_width_is_respected() {
        let cfg = ProbeConfig {
            code_width: 3,
            ..ProbeConfig::default()
        };
        let fetcher = ReplayFetcher::default();
        let (out, _) = run_text(&fetcher, "zz998", 3, &cfg).await;
        let codes: Vec<&str> = out
            .lines()
            .filter_map(|l| l.split(':').next())
            .filter(|c| c.starts_with("zz"))
            .collect();
        assert_eq!(codes, ["zz998", "zz999", "zz1000"]);
    }
}
