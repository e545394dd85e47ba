use crate::error::AuditError;
use url::Url;

/// Parses `raw` and requires both a scheme and a host.
pub fn validate_url(raw: &str) -> Result<Url, AuditError> {
    let url = Url::parse(raw.trim()).map_err(|e| AuditError::InvalidInput(format!("{}: {}", raw, e)))?;

    if url.scheme().is_empty() || url.host_str().map_or(true, str::is_empty) {
        return Err(AuditError::InvalidInput(format!("{}: missing host", raw)));
    }
    Ok(url)
}

/// `{scheme}://{host}[:port]/{path}` for a resource at the site root.
pub fn root_resource(url: &Url, path: &str) -> Option<String> {
    let origin = url.origin();
    if !origin.is_tuple() {
        return None;
    }
    Some(format!("{}/{}", origin.ascii_serialization(), path.trim_start_matches('/')))
}

pub fn is_https(url: &Url) -> bool {
    url.scheme().eq_ignore_ascii_case("https")
}
