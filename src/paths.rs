//! Path Helpers - Textual Normalization
//!
//! Paths written into results and manifests use forward slashes so that
//! output is identical across platforms. Nothing here touches the disk.

use std::path::Path;

/// Normalize separators for display.
///
/// Backslashes become `/`, then each `//` collapses to `/` in a single
/// pass, then one leading `./` is dropped. `..` segments are kept.
pub fn clean_path(input: &str) -> String {
    let result = input.replace('\\', "/").replace("//", "/");
    match result.strip_prefix("./") {
        Some(stripped) => stripped.to_string(),
        None => result,
    }
}

/// File name without its final extension, e.g. `widget` for `dir/widget.xml`.
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Directory containing `path`; empty for a bare file name.
pub fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backslashes_converted_then_collapsed() {
        assert_eq!(clean_path(".\\a\\\\b"), "a/b");
        assert_eq!(clean_path("dir\\file.svg"), "dir/file.svg");
    }

    #[test]
    fn test_collapse_is_single_pass() {
        assert_eq!(clean_path("a///b"), "a//b");
        assert_eq!(clean_path("a////b"), "a//b");
    }

    #[test]
    fn test_leading_dot_slash_stripped_once() {
        assert_eq!(clean_path("./widget.xml"), "widget.xml");
        assert_eq!(clean_path("../widget.xml"), "../widget.xml");
        assert_eq!(clean_path("a/./b"), "a/./b");
    }

    #[test]
    fn test_idempotent_on_normal_paths() {
        for p in [".\\a\\\\b", "./x/y", "c:\\temp\\w.xml", "plain", "a//b/", ""] {
            let once = clean_path(p);
            assert_eq!(clean_path(&once), once, "input {p:?}");
        }
    }

    #[test]
    fn test_base_name_and_parent() {
        assert_eq!(base_name(Path::new("dir/widget.xml")), "widget");
        assert_eq!(base_name(Path::new("archive.tar.xml")), "archive.tar");
        assert_eq!(parent_dir(Path::new("widget.xml")), Path::new(""));
        assert_eq!(parent_dir(Path::new("dir/widget.xml")), Path::new("dir"));
    }
}
