//! Site Configuration
//!
//! Every URL template and content marker the probes rely on lives here, so a
//! test (or a JSON file passed with `--config`) can swap them without touching
//! the probe code.

use crate::error::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Placeholder substituted with the product code in every URL template.
pub const CODE_PLACEHOLDER: &str = "{code}";

pub const DEFAULT_CODE_WIDTH: usize = 5;
/// Digits in `u64::MAX`; wider suffixes cannot be counted.
pub const MAX_CODE_WIDTH: usize = 20;
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// URL templates for the three probes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlTemplates {
    pub page: String,
    pub image: String,
    pub search: String,
}

impl Default for UrlTemplates {
    fn default() -> Self {
        Self {
            page: "https://d-rw.com/Form/Product/ProductDetail.aspx?pid={code}".into(),
            image: "https://d-rw.com/Contents/ProductImages/0/{code}_LL.jpg".into(),
            search: "https://d-rw.com/Form/Product/ProductList.aspx?shop=0&cat=&dpcnt=51&img=2&sort=10&swrd={code}&udns=2&fpfl=0&sfl=0&pno=1".into(),
        }
    }
}

/// Fixed text markers scanned for in page and search bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Soft-404 text shown on a detail page for a missing product.
    pub not_found: String,
    /// Opening of the JSON-LD description value.
    pub description: String,
    /// Label preceding the model name inside the description.
    pub model: String,
    /// Escaped `<br>`; anything after it is not part of the model name.
    pub line_break: String,
    /// Start of a populated search result list.
    pub search_hit: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            not_found: "商品が見つかりません".into(),
            description: r#""description": ""#.into(),
            model: "モデル…".into(),
            line_break: "&lt;br&gt;".into(),
            search_hit: r#"<ul class="itemList4">           <li>"#.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Width of the zero-padded numeric suffix of every code.
    pub code_width: usize,
    pub timeout_ms: u64,
    pub user_agent: Option<String>,
    /// Pause between codes; zero means back to back.
    pub delay_ms: u64,
    pub urls: UrlTemplates,
    pub markers: Markers,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            code_width: DEFAULT_CODE_WIDTH,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: None,
            delay_ms: 0,
            urls: UrlTemplates::default(),
            markers: Markers::default(),
        }
    }
}

impl ProbeConfig {
    /// Load a config from a JSON file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let cfg: ProbeConfig = serde_json::from_str(&raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.code_width == 0 || self.code_width > MAX_CODE_WIDTH {
            return Err(ProbeError::invalid_config(format!(
                "code_width must be between 1 and {MAX_CODE_WIDTH}"
            )));
        }
        if self.timeout_ms == 0 {
            return Err(ProbeError::invalid_config("timeout_ms must be positive"));
        }
        for (name, template) in [
            ("page", &self.urls.page),
            ("image", &self.urls.image),
            ("search", &self.urls.search),
        ] {
            validate_template(name, template)?;
        }
        let m = &self.markers;
        for (name, marker) in [
            ("not_found", &m.not_found),
            ("description", &m.description),
            ("model", &m.model),
            ("line_break", &m.line_break),
            ("search_hit", &m.search_hit),
        ] {
            if marker.is_empty() {
                return Err(ProbeError::invalid_config(format!("{name} marker is empty")));
            }
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn urls_for(&self, code: &str) -> SiteUrls {
        SiteUrls {
            page: fill(&self.urls.page, code),
            image: fill(&self.urls.image, code),
            search: fill(&self.urls.search, code),
        }
    }
}

fn validate_template(name: &str, template: &str) -> Result<()> {
    if !template.contains(CODE_PLACEHOLDER) {
        return Err(ProbeError::invalid_config(format!(
            "{name} url template is missing {CODE_PLACEHOLDER}"
        )));
    }
    Url::parse(&fill(template, "ab00000")).map_err(|e| {
        ProbeError::invalid_config(format!("{name} url template is not a valid url: {e}"))
    })?;
    Ok(())
}

fn fill(template: &str, code: &str) -> String {
    template.replace(CODE_PLACEHOLDER, code)
}

/// The three URLs probed for one code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteUrls {
    pub page: String,
    pub image: String,
    pub search: String,
}
