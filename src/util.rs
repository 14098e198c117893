use std::path::Path;

/// Returns `path` relative to `root` for log messages, or `path` itself when
/// it lies outside `root`.
pub fn relative<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}
