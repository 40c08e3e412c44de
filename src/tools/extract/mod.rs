//! Content Extractor
//!
//! Plain substring scanning over the raw detail page. Only the first match of
//! each marker counts, and a missing marker is a valid page state that yields
//! no model name rather than an error.


use crate::config::Markers;

/// What a 200 detail page says about its product.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageContent {
    /// The page is the site's "product not found" page served with a 200.
    pub not_found: bool,
    pub model_name: Option<String>,
}

/// Inspect a detail page body: soft-404 check first, model name second.
pub fn inspect_page(body: &str, markers: &Markers) -> PageContent {
    if is_not_found(body, &markers.not_found) {
        return PageContent {
            not_found: true,
            model_name: None,
        };
    }
    PageContent {
        not_found: false,
        model_name: extract_model_name(body, markers),
    }
}

pub fn is_not_found(body: &str, marker: &str) -> bool {
    body.contains(marker)
}

/// Extract the model name from the embedded description.
///
/// Steps, each returning `None` when its marker is absent:
/// 1. skip past the description marker
/// 2. skip past the model label that follows it
/// 3. take everything up to the next `"`
///
/// The capture is cut at the first escaped line break, then trimmed.
///
/// # Examples
/// ```
/// use skuprobe::config::Markers;
/// use skuprobe::tools::extract::extract_model_name;
///
/// let body = r#""description": "モデル…ModelX&lt;br&gt;TAIL""#;
/// assert_eq!(extract_model_name(body, &Markers::default()).as_deref(), Some("ModelX"));
/// ```
pub fn extract_model_name(body: &str, markers: &Markers) -> Option<String> {
    let description = after(body, &markers.description)?;
    let labelled = after(description, &markers.model)?;
    let (raw, _) = labelled.split_once('"')?;
    let name = match raw.split_once(markers.line_break.as_str()) {
        Some((head, _)) => head,
        None => raw,
    };
    Some(name.trim().to_string())
}

/// Text following the first occurrence of `marker`.
fn after<'a>(haystack: &'a str, marker: &str) -> Option<&'a str> {
    haystack
        .find(marker)
        .map(|idx| &haystack[idx + marker.len()..])
}
