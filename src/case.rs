//! Convert mixed-case identifiers to lowercase underscore-separated form.
//!
//! ## Notes
//! - Only ASCII letters take part in boundary detection and lowercasing; every other character is copied through.
//! - An uppercase run stays together (`"DD"` -> `"dd"`, `"HTTPServer"` -> `"http_server"`).
//! - Underscores are never doubled, and purely alphabetic input never gains a leading or trailing underscore.

/// Convert `ident` to underscore case.
///
/// ## Parameters
/// - `ident`: identifier in camel/Pascal/mixed case.
///
/// ## Returns
/// - (`String`): the lowercase, underscore-separated form.
///
/// ## Examples
/// ```rust
/// use vtag::case::to_underscore_case;
///
/// assert_eq!(to_underscore_case("HelloWorld"), "hello_world");
/// assert_eq!(to_underscore_case("ID"), "id");
/// ```
pub fn to_underscore_case(ident: &str) -> String {
    let mut chars = ident.chars();
    let Some(mut last) = chars.next() else {
        return String::new();
    };
    let mut out = String::with_capacity(ident.len() + 4);
    // Tracks the last *raw* character written, or '_' right after an inserted boundary.
    let mut last_written: Option<char> = None;

    for (idx, c) in chars.enumerate().map(|(i, c)| (i + 1, c)) {
        if c.is_ascii_lowercase() && last.is_ascii_uppercase() && idx != 1 && last_written != Some('_') {
            // End of an uppercase run: "HTTPServer" splits before the 'S'.
            out.push('_');
        }
        out.push(last.to_ascii_lowercase());
        last_written = Some(last);
        if last.is_ascii_lowercase() && c.is_ascii_uppercase() {
            out.push('_');
            last_written = Some('_');
        }
        last = c;
    }
    out.push(last.to_ascii_lowercase());
    out
}
