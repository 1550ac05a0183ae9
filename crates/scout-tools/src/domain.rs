//! Domain normalization for search allowlists.

use url::Url;

/// Extract the bare registrable host from a URL-ish string.
///
/// Strips the scheme and a leading `www.`. Inputs without a scheme are
/// accepted. Fail-open: anything that cannot be parsed as a URL is returned
/// unchanged, so this never errors.
pub fn extract_domain(raw: &str) -> String {
    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    };

    match Url::parse(&candidate) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
            None => raw.to_string(),
        },
        Err(_) => raw.to_string(),
    }
}
