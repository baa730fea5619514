//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped in a single URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Join a base URL and a path without doubling or dropping slashes
///
/// # Examples
/// ```ignore
/// full_url("https://example.com/", "/blog") // -> "https://example.com/blog"
/// full_url("https://example.com", "")      // -> "https://example.com"
/// ```
pub fn full_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

/// Absolute URL of a post: base + route + slug
///
/// # Examples
/// ```ignore
/// post_url("https://example.com", "/blog/", "hello") // -> "https://example.com/blog/hello"
/// ```
pub fn post_url(base: &str, route: &str, slug: &str) -> String {
    let route = route.trim_matches('/');
    let slug = encode_segment(slug);

    if route.is_empty() {
        full_url(base, &slug)
    } else {
        full_url(base, &format!("{}/{}", route, slug))
    }
}

/// Percent-encode a single path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}
