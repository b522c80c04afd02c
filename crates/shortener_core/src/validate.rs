use url::Url;

/// Structural check equivalent to a required `type="url"` input control.
///
/// Accepts absolute URLs with a scheme and a host; everything else (including
/// the empty string) is rejected. No reachability or policy checks happen here.
pub fn is_well_formed_url(raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return false;
    }
    match Url::parse(trimmed) {
        Ok(url) => url.has_host(),
        Err(_) => false,
    }
}
