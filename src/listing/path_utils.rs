use std::borrow::Cow;
use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::domain::BasePath;

/// Encoded in a path segment: everything but ASCII alphanumerics and `-_.!~*'()`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Map a decoded request path onto the filesystem below `root`.
///
/// The base path is stripped first, then the remaining segments are
/// normalised lexically: `.` is dropped and `..` removes the previous
/// segment but never climbs above `root`. No symlinks are resolved.
///
/// Returns `None` if the request path is not under the base path.
pub(crate) fn resolve_path(root: &Path, base_path: &BasePath, decoded: &str) -> Option<PathBuf> {
    let relative = base_path.strip(decoded)?;

    let mut segments: Vec<&str> = Vec::new();
    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut resolved = root.to_path_buf();
    resolved.extend(segments);
    Some(resolved)
}

/// Parent of `dir` when it is still inside `root`.
///
/// `None` at the root itself, so the root listing never links upwards.
pub(crate) fn parent_within_root(dir: &Path, root: &Path) -> Option<PathBuf> {
    if dir == root {
        return None;
    }
    let parent = dir.parent()?;
    parent.starts_with(root).then(|| parent.to_path_buf())
}

/// Decode a percent-encoded URI path. Invalid UTF-8 is replaced rather than
/// rejected.
pub(crate) fn percent_decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

/// Percent-encode a single entry name for use in an href.
pub(crate) fn encode_path_segment(s: &str) -> Cow<'_, str> {
    utf8_percent_encode(s, PATH_SEGMENT).into()
}
