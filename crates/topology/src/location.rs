//! Network location paths.
//!
//! A network location is a `/`-separated path from the cluster root to a
//! rack, e.g. `/dc1/rack7`. The root itself is the empty string.

use crate::error::{Error, Result};

/// Path separator between levels of the hierarchy.
pub const SEPARATOR: char = '/';

/// Location of the cluster root.
pub const ROOT: &str = "";

/// Strips trailing separators; `"/"` collapses to the root.
///
/// Does not validate. Use [`validate`] before inserting into a tree.
pub fn normalize(location: &str) -> String {
    location.trim_end_matches(SEPARATOR).to_string()
}

/// Checks that `location` is the root or an absolute path without empty
/// components.
pub fn validate(location: &str) -> Result<()> {
    if location == ROOT {
        return Ok(());
    }
    if !location.starts_with(SEPARATOR) {
        return Err(Error::InvalidArgument(format!(
            "network location must be absolute: {:?}",
            location
        )));
    }
    if components(location).any(str::is_empty) {
        return Err(Error::InvalidArgument(format!(
            "network location has an empty component: {:?}",
            location
        )));
    }
    Ok(())
}

/// Checks that `name` can be used as a single path component.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(SEPARATOR) {
        return Err(Error::InvalidArgument(format!("invalid node name: {:?}", name)));
    }
    Ok(())
}

/// Iterates the components of a location, root first.
///
/// The root yields nothing.
pub fn components(location: &str) -> impl Iterator<Item = &str> {
    let trimmed = location.strip_prefix(SEPARATOR).unwrap_or(location);
    trimmed
        .split(SEPARATOR)
        .filter(move |_| !location.is_empty())
}

/// Number of levels between the root and the end of `location`.
pub fn depth(location: &str) -> usize {
    components(location).count()
}

/// Joins a parent location and a child name into the child's full path.
pub fn join(location: &str, name: &str) -> String {
    format!("{}{}{}", location, SEPARATOR, name)
}

/// Splits a full path into `(location, name)` at the last separator.
pub fn split(path: &str) -> (String, String) {
    let path = normalize(path);
    match path.rfind(SEPARATOR) {
        Some(idx) => (path[..idx].to_string(), path[idx + 1..].to_string()),
        None => (ROOT.to_string(), path),
    }
}

/// True if `path` is `scope` itself or lies beneath it.
pub fn is_within(path: &str, scope: &str) -> bool {
    let scope = scope.trim_end_matches(SEPARATOR);
    if scope.is_empty() {
        return true;
    }
    match path.strip_prefix(scope) {
        Some(rest) => rest.is_empty() || rest.starts_with(SEPARATOR),
        None => false,
    }
}
