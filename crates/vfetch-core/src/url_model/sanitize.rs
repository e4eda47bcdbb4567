//! Filesystem-safe filename sanitization.

/// Maximum filename length in bytes (Linux NAME_MAX).
const NAME_MAX: usize = 255;

/// Makes a candidate filename safe to join onto a directory.
///
/// - Replaces NUL, `/`, `\` and control characters with `_`
/// - Trims surrounding whitespace and leading/trailing dots
/// - Limits length to 255 bytes on a char boundary
///
/// Returns `None` when nothing usable remains (empty, `.` or `..`).
pub fn sanitize_filename(name: &str) -> Option<String> {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced.trim().trim_matches('.');

    let mut take = trimmed.len().min(NAME_MAX);
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    let out = &trimmed[..take];

    if out.is_empty() || out == "." || out == ".." {
        None
    } else {
        Some(out.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_separators() {
        assert_eq!(sanitize_filename("a/b\\c.txt").as_deref(), Some("a_b_c.txt"));
    }

    #[test]
    fn trims_dots_and_spaces() {
        assert_eq!(
            sanitize_filename("  ..file.txt..  ").as_deref(),
            Some("file.txt")
        );
    }

    #[test]
    fn keeps_inner_spaces_and_unicode() {
        assert_eq!(
            sanitize_filename("release notes ü.pdf").as_deref(),
            Some("release notes ü.pdf")
        );
    }

    #[test]
    fn control_chars() {
        assert_eq!(
            sanitize_filename("file\x00name\n.txt").as_deref(),
            Some("file_name_.txt")
        );
    }

    #[test]
    fn reserved_and_empty() {
        assert_eq!(sanitize_filename(""), None);
        assert_eq!(sanitize_filename("..."), None);
        assert_eq!(sanitize_filename("   "), None);
    }

    #[test]
    fn truncates_on_char_boundary() {
        let long = "é".repeat(200); // 400 bytes
        let out = sanitize_filename(&long).unwrap();
        assert!(out.len() <= NAME_MAX);
        assert_eq!(out.len(), 254);
    }
}
