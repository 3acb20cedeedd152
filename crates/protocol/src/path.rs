//! Workspace-relative path helpers.

/// Normalise separators to `/` and drop leading `./` segments.
#[must_use]
pub fn normalize_relative_path(raw: &str) -> String {
    let mut value = raw.trim().replace('\\', "/");
    while let Some(rest) = value.strip_prefix("./") {
        value = rest.to_string();
    }
    value
}

/// Final path component
#[must_use]
pub fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Whether one path is a `/`-aligned suffix of the other.
///
/// A leading `/` on either side is ignored, so `/src/auth.ts` and
/// `src/auth.ts` both match `lib/src/auth.ts`.
#[must_use]
pub fn is_path_suffix_match(candidate: &str, filter: &str) -> bool {
    let candidate = candidate.trim_start_matches('/');
    let filter = filter.trim_start_matches('/');
    if candidate.is_empty() || filter.is_empty() {
        return false;
    }
    candidate == filter
        || ends_with_segment(candidate, filter)
        || ends_with_segment(filter, candidate)
}

fn ends_with_segment(path: &str, suffix: &str) -> bool {
    path.len() > suffix.len()
        && path.ends_with(suffix)
        && path.as_bytes().get(path.len() - suffix.len() - 1) == Some(&b'/')
}
