//! URL helpers for storage namespaces.

/// Join a child name onto a directory URL with a single `/` separator.
///
/// An absolute `name` replaces the base, as with `Path::join`.
pub fn join_url(base: &str, name: &str) -> String {
    if name.starts_with('/') || base.is_empty() {
        return name.to_string();
    }
    if base.ends_with('/') {
        format!("{base}{name}")
    } else {
        format!("{base}/{name}")
    }
}
