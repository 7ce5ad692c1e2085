//! Nested template detection

/// Separator between the segments of a nested template identifier
pub const TEMPLATE_SEPARATOR: char = '/';

/// Whether a template identifier addresses a nested location (`group/name`)
pub fn is_nested(identifier: &str) -> bool {
    identifier.contains(TEMPLATE_SEPARATOR)
}

/// The wrapper directory of a nested identifier: everything before the last separator
///
/// Returns `None` for flat identifiers.
pub fn wrapper_dir(identifier: &str) -> Option<&str> {
    identifier
        .rfind(TEMPLATE_SEPARATOR)
        .map(|idx| &identifier[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_nested() {
        assert!(is_nested("group/tmpl"));
        assert!(is_nested("@scope/admin"));
        assert!(is_nested("a/b/c"));
        assert!(!is_nested("xx-template"));
        assert!(!is_nested(""));
    }

    #[test]
    fn test_wrapper_dir() {
        assert_eq!(wrapper_dir("group/tmpl"), Some("group"));
        assert_eq!(wrapper_dir("@scope/admin"), Some("@scope"));
        assert_eq!(wrapper_dir("a/b/c"), Some("a/b"));
        assert_eq!(wrapper_dir("tmpl"), None);
    }
}
