use url::form_urlencoded;

/// Default screenshot service used when a project has no preview image
pub const DEFAULT_SCREENSHOT_SERVICE: &str = "https://s.wordpress.com/mshots/v1/";

/// Prefix `https://` unless the value already carries an http(s) scheme.
/// Missing or blank input yields `None` so no broken link gets rendered.
pub fn normalize_url(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }
    if has_http_scheme(raw) {
        Some(raw.to_string())
    } else {
        Some(format!("https://{}", raw))
    }
}

fn has_http_scheme(raw: &str) -> bool {
    let lower = raw
        .get(..8)
        .unwrap_or(raw)
        .to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Screenshot URL for a website, built from its normalized form
pub fn screenshot_url(service: &str, website: Option<&str>) -> Option<String> {
    let normalized = normalize_url(website)?;
    let encoded: String = form_urlencoded::byte_serialize(normalized.as_bytes()).collect();
    Some(format!("{}{}?w=1200", service, encoded))
}
