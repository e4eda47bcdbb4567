//! Local filename derivation for fetched URLs.
//!
//! A name is either supplied by the caller or taken from the last URL path
//! segment. URLs carrying query or assignment characters (`?`, `=`) do not
//! yield a trustworthy basename, so they require an explicit name.

mod path;
mod sanitize;

pub use path::url_basename;
pub use sanitize::sanitize_filename;

/// True if a filename cannot safely be inferred from `url`.
pub fn is_ambiguous(url: &str) -> bool {
    url.contains('?') || url.contains('=')
}

/// Resolve the local filename for `url`.
///
/// A non-empty `explicit` name always wins (after sanitizing). Otherwise the
/// URL basename is used, unless the URL is ambiguous. Returns `None` when no
/// usable name results.
pub fn resolve_filename(url: &str, explicit: Option<&str>) -> Option<String> {
    if let Some(name) = explicit.map(str::trim).filter(|n| !n.is_empty()) {
        return sanitize_filename(name);
    }
    if is_ambiguous(url) {
        return None;
    }
    url_basename(url).and_then(|b| sanitize_filename(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_from_plain_url() {
        assert_eq!(
            resolve_filename("https://example.com/releases/zlib-1.3.tar.gz", None).as_deref(),
            Some("zlib-1.3.tar.gz")
        );
    }

    #[test]
    fn query_or_assignment_requires_explicit_name() {
        assert_eq!(resolve_filename("http://host/download?id=1", None), None);
        assert_eq!(resolve_filename("http://host/get/a=b", None), None);
        assert_eq!(
            resolve_filename("http://host/download?id=1", Some("pkg.zip")).as_deref(),
            Some("pkg.zip")
        );
    }

    #[test]
    fn empty_explicit_name_falls_back_to_url() {
        assert_eq!(
            resolve_filename("https://example.com/a.zip", Some("  ")).as_deref(),
            Some("a.zip")
        );
        assert_eq!(resolve_filename("http://host/download?id=1", Some("")), None);
    }

    #[test]
    fn trailing_slash_yields_nothing() {
        assert_eq!(resolve_filename("https://example.com/dir/", None), None);
        assert_eq!(resolve_filename("https://example.com", None), None);
    }

    #[test]
    fn explicit_name_is_sanitized() {
        assert_eq!(
            resolve_filename("https://example.com/x", Some("../../etc/passwd")).as_deref(),
            Some("_.._etc_passwd")
        );
        assert_eq!(resolve_filename("https://example.com/x", Some("..")), None);
    }
}
