//! Request path resolution.
//!
//! Maps URL paths onto filesystem paths confined to the server root.
//! Resolution is purely lexical so that rejected paths never touch the
//! filesystem.

use std::path::{Component, Path, PathBuf};

/// Resolve a percent-decoded URL path against the server root.
///
/// A single leading `/` is stripped, then components are applied lexically:
/// `..` pops (possibly above the root), `.` is skipped. Returns `None` when
/// the result is neither the root itself nor strictly beneath it. The
/// comparison is component-wise, so a sibling directory sharing the root's
/// name as a prefix (`/srv/app2` vs `/srv/app`) is rejected.
pub(crate) fn resolve_request_path(root: &Path, url_path: &str) -> Option<PathBuf> {
    let relative = url_path.strip_prefix('/').unwrap_or(url_path);

    let mut resolved = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::ParentDir => {
                resolved.pop();
            }
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if resolved.starts_with(root) {
        Some(resolved)
    } else {
        None
    }
}
