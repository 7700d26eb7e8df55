//! Parse field annotation metadata.
//!
//! An annotation is a comma-separated list: the first element is an optional explicit external name (or the
//! exclusion sentinel `-`), the remaining elements are the labels (projections) the field belongs to.
//!
//! ```rust
//! use vtag::tag::{NameSpec, TagSpec};
//!
//! let spec = TagSpec::parse("name,list,detail");
//! assert_eq!(spec.name, NameSpec::Explicit("name"));
//! assert!(spec.matches(&["detail"]));
//! assert!(!spec.matches(&["name"]));
//! ```

/// Annotation key read when a configuration does not name one.
pub const DEFAULT_TAG_KEY: &str = "vtag";

/// First-element value that removes a field from every projection.
pub const EXCLUDE_SENTINEL: &str = "-";

/// Separator between a prefix and a nested name.
pub const PATH_SEPARATOR: &str = ".";

/// What the first annotation element says about the field's external name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSpec<'a> {
    /// No explicit name; the encoder (or the raw field name) decides.
    Default,
    Explicit(&'a str),
    Excluded,
}

/// A parsed annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSpec<'a> {
    pub name: NameSpec<'a>,
    pub labels: Vec<&'a str>,
}

impl<'a> TagSpec<'a> {
    /// Parse a raw annotation string.
    ///
    /// ## Notes
    /// - A missing annotation should be passed as `""`; it parses to a default name with no labels, which never
    ///   matches any request.
    /// - Elements are not trimmed.
    pub fn parse(raw: &'a str) -> Self {
        let mut parts = raw.split(',');
        let name = match parts.next() {
            Some(EXCLUDE_SENTINEL) => NameSpec::Excluded,
            Some("") | None => NameSpec::Default,
            Some(explicit) => NameSpec::Explicit(explicit),
        };
        Self {
            name,
            labels: parts.collect(),
        }
    }

    pub fn is_excluded(&self) -> bool {
        self.name == NameSpec::Excluded
    }

    /// Check whether the field's labels intersect the requested label set.
    pub fn matches(&self, requested: &[&str]) -> bool {
        self.labels.iter().any(|label| requested.contains(label))
    }
}

/// Join a prefix and a name with [`PATH_SEPARATOR`]; an empty prefix yields the name unchanged.
pub fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}{PATH_SEPARATOR}{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_name_with_labels() {
        let spec = TagSpec::parse(",list,detail");
        assert_eq!(spec.name, NameSpec::Default);
        assert_eq!(spec.labels, ["list", "detail"]);
    }

    #[test]
    fn test_parse_exclusion_sentinel() {
        let spec = TagSpec::parse("-,list");
        assert!(spec.is_excluded());
        // Labels are still parsed; callers check exclusion first.
        assert!(spec.matches(&["list"]));
    }

    #[test]
    fn test_missing_annotation_never_matches() {
        let spec = TagSpec::parse("");
        assert_eq!(spec.name, NameSpec::Default);
        assert!(spec.labels.is_empty());
        assert!(!spec.matches(&["list", "detail"]));
    }

    #[test]
    fn test_explicit_name_is_not_a_label() {
        let spec = TagSpec::parse("list");
        assert_eq!(spec.name, NameSpec::Explicit("list"));
        assert!(!spec.matches(&["list"]));
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "age"), "age");
        assert_eq!(join_path("ext", "dd"), "ext.dd");
        assert_eq!(join_path("a.b", "c"), "a.b.c");
    }
}
