//! Path validation
//!
//! Turns client-supplied paths into `RelativePath`s that cannot leave the storage root.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Directory under the root that holds in-flight writes; never listed or addressable.
pub const STAGING_DIR: &str = ".litebox-staging";

/// A path below the storage root, made only of plain name segments.
///
/// The only way to build one is through [`sanitize`] (or by extending an
/// existing one with [`RelativePath::join`]), so joining it onto the root can
/// never produce a path outside of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RelativePath {
    segments: Vec<String>,
}

impl RelativePath {
    /// The storage root itself.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether this path lies in the store's staging area.
    pub fn is_reserved(&self) -> bool {
        self.segments.first().is_some_and(|s| s == STAGING_DIR)
    }

    /// Last segment, `None` for the root.
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Extend with a raw path; the extension is sanitized on its own so it
    /// cannot climb back out of `self`.
    pub fn join(&self, raw: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(sanitize(raw).segments);
        Self { segments }
    }

    /// Resolve against the storage root.
    pub fn to_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        path.extend(&self.segments);
        path
    }

    /// Slash-separated form, empty for the root.
    pub fn as_string(&self) -> String {
        self.segments.join("/")
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.as_string())
    }
}

/// Normalize a raw path and clamp it inside the storage root.
///
/// Both `/` and `\` separate segments. `.` and empty segments are dropped,
/// `..` pops the previous segment and is discarded when there is nothing left
/// to pop. Never fails: the worst case is the root.
pub fn sanitize(raw: &str) -> RelativePath {
    let mut segments: Vec<String> = Vec::new();

    for segment in raw.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            name if is_plain_name(name) => segments.push(name.to_string()),
            _ => {}
        }
    }

    RelativePath { segments }
}

/// Final segment of a sanitized name, for storing an uploaded file.
pub fn sanitize_name(raw: &str) -> Option<String> {
    sanitize(raw).file_name().map(str::to_string)
}

// Anything the platform would parse as more than one normal component
// (drive prefixes, embedded NULs and the like) is not a name.
fn is_plain_name(segment: &str) -> bool {
    if segment.contains('\0') {
        return false;
    }
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
