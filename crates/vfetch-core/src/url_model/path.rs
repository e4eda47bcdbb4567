//! Last path segment of a URL.

/// Returns the final `/`-separated segment of the URL path, or `None` when it
/// is empty (root URL, trailing slash).
///
/// Parsed with `url::Url` when possible so fragments and the authority are
/// never mistaken for a name; otherwise the raw text after the last `/` is used.
pub fn url_basename(url: &str) -> Option<String> {
    let segment = match url::Url::parse(url) {
        Ok(parsed) if !parsed.cannot_be_a_base() => {
            parsed.path().rsplit('/').next().unwrap_or("").to_string()
        }
        _ => {
            let no_fragment = url.split('#').next().unwrap_or("");
            no_fragment.rsplit('/').next().unwrap_or("").to_string()
        }
    };
    if segment.is_empty() {
        None
    } else {
        Some(segment)
    }
}
