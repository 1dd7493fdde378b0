use bindstats_domain::TransportError;
use reqwest::Url;

/// Joins `path` below the base URL's own path.
///
/// Empty and `.` segments are dropped, so no double slashes appear. `..`
/// removes the previous segment of `path` but can never climb above the base
/// path. The base URL's query string is kept.
pub fn resolve_endpoint(base_url: &str, path: &str) -> Result<Url, TransportError> {
    let invalid = |reason: String| TransportError::InvalidEndpoint {
        url: base_url.to_string(),
        reason,
    };

    let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }

    let mut segments: Vec<String> = url
        .path_segments()
        .ok_or_else(|| invalid("URL cannot be a base".to_string()))?
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    let root_len = segments.len();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.len() == root_len {
                    return Err(invalid(format!("path {path:?} escapes the base URL")));
                }
                segments.pop();
            }
            s => segments.push(s.to_string()),
        }
    }

    url.set_path(&format!("/{}", segments.join("/")));
    Ok(url)
}
