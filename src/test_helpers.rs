//! Shared test utilities: a small fixture site and file helpers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let site = setup_site();
//! let report = build(site.path(), &BuildConfig::default(), ProcessOptions::default()).unwrap();
//! assert_eq!(read_file(&site.path().join("index.html")), "...");
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =========================================================================
// Fixture setup
// =========================================================================

/// A site exercising every outcome:
///
/// ```text
/// _includes/header.html   "HEADER"
/// _includes/footer.html   "FOOTER"
/// index.html              both markers        → modified
/// about.html              unknown marker      → unchanged
/// plain.html              no marker           → skipped
/// pages/contact.html      header marker       → modified
/// pages/blog/post.html    footer marker       → modified
/// assets/widget.html      matches no pattern
/// ```
pub fn setup_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_file(root, "_includes/header.html", "HEADER");
    write_file(root, "_includes/footer.html", "FOOTER");
    write_file(
        root,
        "index.html",
        "<header><!-- @include header --></header>\n<main>home</main>\n<footer><!-- @include footer --></footer>\n",
    );
    write_file(root, "about.html", "<!-- @include missing -->");
    write_file(root, "plain.html", "<p>plain</p>");
    write_file(root, "pages/contact.html", "<!-- @include header -->contact");
    write_file(root, "pages/blog/post.html", "<!-- @include footer -->");
    write_file(root, "assets/widget.html", "<!-- @include header -->");
    tmp
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Read a file as UTF-8. Panics with the path on failure.
pub fn read_file(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("reading {}: {e}", path.display()))
}
