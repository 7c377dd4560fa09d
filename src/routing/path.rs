//! Path joining and route index keys.
//!
//! # Responsibilities
//! - Canonicalize `base + relative` into one absolute path
//! - Keep a trailing `/` when the relative path asked for one
//! - Derive the `"METHOD /path"` key used by every route index
//!
//! # Design Decisions
//! - Purely lexical: nothing here touches the router or the filesystem
//! - Route parameters (`{id}`, `{*rest}`) are ordinary segments
//! - Registration and lookup go through the same `route_key`, so keys agree
//!   however deeply the owning group is nested

/// Lexically canonicalize a slash-separated path.
///
/// Repeated separators collapse, `.` segments vanish and `..` removes the
/// segment before it. A rooted path never climbs above `/`. The trailing
/// separator is dropped, and an empty result becomes `.` (or `/` when rooted).
pub fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Join a group base path with a path relative to it.
///
/// An empty `relative_path` returns `base_path` untouched. Otherwise the two
/// are joined and cleaned, and a trailing `/` on `relative_path` survives the
/// cleaning: `/admin` + `/x/` is `/admin/x/`, while `/admin` + `/x` is `/admin/x`.
pub fn join_paths(base_path: &str, relative_path: &str) -> String {
    if relative_path.is_empty() {
        return base_path.to_string();
    }

    let mut joined = if base_path.is_empty() {
        clean_path(relative_path)
    } else {
        clean_path(&format!("{base_path}/{relative_path}"))
    };

    if relative_path.ends_with('/') && !joined.ends_with('/') {
        joined.push('/');
    }
    joined
}

/// Build the index key for a route: `"<METHOD> <absolute path>"`.
///
/// At lookup time pass `""` as `base_path` and the fully resolved route
/// template as `relative_path`.
pub fn route_key(method: &str, base_path: &str, relative_path: &str) -> String {
    format!("{} {}", method, join_paths(base_path, relative_path))
}
