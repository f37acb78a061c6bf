//! Console output for a build.
//!
//! Log-style and meant for humans, not for parsing:
//!
//! ```text
//! Loaded 2 includes: footer, header
//!   Shadowed: _includes/header.htm (header from _includes/header.html)
//!   Built: index.html
//!   Built: pages/about.html
//!
//! Processed 2 files.
//! ```
//!
//! Lines are printed as the build progresses: the include line once includes
//! are loaded, each `Built:` line right after its page is written, and the
//! count at the end. A build that aborts halfway has still listed every page
//! it rewrote.
//!
//! Each `format_*` function is pure and returns lines for testability; the
//! `print_*` wrappers write them to stdout.

use crate::includes::Includes;
use crate::process::{BuildEvent, BuildReport, FileOutcome, FileReport};
use std::path::Path;

/// Display a path with forward slashes regardless of platform.
fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// The include summary line plus one line per shadowed include file.
pub fn format_includes(includes: &Includes, root: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Loaded {} includes: {}",
        includes.len(),
        includes.names().join(", ")
    )];
    for s in includes.shadowed() {
        let rel = |p: &Path| display_path(p.strip_prefix(root).unwrap_or(p));
        lines.push(format!(
            "  Shadowed: {} ({} from {})",
            rel(&s.path),
            s.name,
            rel(&s.winner)
        ));
    }
    lines
}

/// A line for a modified page; nothing for pages left alone.
pub fn format_file(file: &FileReport, dry_run: bool) -> Option<String> {
    if file.outcome != FileOutcome::Modified {
        return None;
    }
    let verb = if dry_run { "Would build" } else { "Built" };
    Some(format!("  {}: {}", verb, display_path(&file.path)))
}

/// Lines for one progress event.
pub fn format_event(event: &BuildEvent<'_>, root: &Path, dry_run: bool) -> Vec<String> {
    match event {
        BuildEvent::IncludesLoaded(includes) => format_includes(includes, root),
        BuildEvent::FileProcessed(file) => format_file(file, dry_run).into_iter().collect(),
    }
}

/// The closing count of modified pages.
pub fn format_summary(report: &BuildReport) -> Vec<String> {
    let summary = if report.dry_run {
        "Would process"
    } else {
        "Processed"
    };
    vec![
        String::new(),
        format!("{} {} files.", summary, report.modified().len()),
    ]
}

pub fn print_event(event: &BuildEvent<'_>, root: &Path, dry_run: bool) {
    for line in format_event(event, root, dry_run) {
        println!("{}", line);
    }
}

pub fn print_summary(report: &BuildReport) {
    for line in format_summary(report) {
        println!("{}", line);
    }
}
