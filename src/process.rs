//! Target discovery and in-place rewriting.
//!
//! The build runs in three steps, strictly in sequence:
//!
//! ```text
//! 1. Load     _includes/*.html        →  Includes
//! 2. Discover root + patterns         →  sorted, de-duplicated page list
//! 3. Rewrite  each page, one by one   →  FileOutcome per page
//! ```
//!
//! ## Write policy
//!
//! A page is written only when expansion changed it. Pages without the marker
//! prefix are read once and never opened for writing, so builds leave no
//! mtime churn on untouched files.
//!
//! ## Failure
//!
//! The first error aborts the build. Include errors surface before any page
//! is touched; page errors leave pages rewritten earlier in the run as they
//! are. There is no rollback.

use crate::config::{BuildConfig, ConfigError};
use crate::includes::{self, IncludeError, Includes};
use crate::marker;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("Unknown include {names:?} referenced in {path}")]
    UnknownMarker { path: PathBuf, names: Vec<String> },
}

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Include error: {0}")]
    Include(#[from] IncludeError),
    #[error("{0}")]
    Process(#[from] ProcessError),
}

/// Per-run switches that are not part of the site config.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// Fail on markers naming no known include.
    pub strict: bool,
    /// Compute outcomes without writing anything.
    pub dry_run: bool,
}

/// What happened to one target page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// No marker prefix in the page; not expanded.
    Skipped,
    /// Markers present but expansion produced identical text.
    Unchanged,
    /// Content changed and was written (or would be, in a dry run).
    Modified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Path relative to the site root.
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

/// Progress reported while a build runs, before it finishes or aborts.
#[derive(Debug, Clone, Copy)]
pub enum BuildEvent<'a> {
    /// Includes are loaded; no page has been touched yet.
    IncludesLoaded(&'a Includes),
    /// One page is done (and written, if it was modified).
    FileProcessed(&'a FileReport),
}

/// Everything a build did, in processing order.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub includes: Includes,
    pub files: Vec<FileReport>,
    pub dry_run: bool,
}

impl BuildReport {
    /// Relative paths of pages that were (or would be) rewritten.
    pub fn modified(&self) -> Vec<&Path> {
        self.files
            .iter()
            .filter(|f| f.outcome == FileOutcome::Modified)
            .map(|f| f.path.as_path())
            .collect()
    }
}

/// Find every target page under `root`.
///
/// Returns paths relative to `root`, sorted and de-duplicated. Anything under
/// the include directory is excluded even if a pattern matches it.
///
/// Symlinks are followed, to files and to directories alike. Hidden files and
/// directories only match a pattern that names the leading dot literally.
pub fn discover_targets(root: &Path, config: &BuildConfig) -> Result<Vec<PathBuf>, BuildError> {
    let patterns = config.compiled_patterns()?;
    let options = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };
    let includes_dir = root.join(&config.includes_dir);

    let mut targets = BTreeSet::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.path() != includes_dir);
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // A directory link back into its own ancestry has nothing new below it.
            Err(e) if e.loop_ancestor().is_some() => continue,
            Err(source) => {
                return Err(ProcessError::Walk {
                    path: root.to_path_buf(),
                    source,
                }
                .into());
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if relative.starts_with(&config.includes_dir) {
            continue;
        }
        if patterns
            .iter()
            .any(|p| p.matches_path_with(relative, options))
        {
            targets.insert(relative.to_path_buf());
        }
    }

    Ok(targets.into_iter().collect())
}

/// Expand markers in one page and rewrite it if the text changed.
pub fn process_file(
    path: &Path,
    includes: &Includes,
    options: ProcessOptions,
) -> Result<FileOutcome, ProcessError> {
    let content = fs::read_to_string(path).map_err(|source| ProcessError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if !marker::contains_marker(&content) {
        return Ok(FileOutcome::Skipped);
    }

    let expansion = marker::expand(&content, includes);
    if options.strict && !expansion.unknown.is_empty() {
        return Err(ProcessError::UnknownMarker {
            path: path.to_path_buf(),
            names: expansion.unknown,
        });
    }

    if expansion.content == content {
        return Ok(FileOutcome::Unchanged);
    }

    if !options.dry_run {
        fs::write(path, &expansion.content).map_err(|source| ProcessError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(FileOutcome::Modified)
}

/// Run the whole build for the site at `root`.
///
/// `options.strict` is combined with `config.strict`; either enables it.
pub fn build(
    root: &Path,
    config: &BuildConfig,
    options: ProcessOptions,
) -> Result<BuildReport, BuildError> {
    build_with_events(root, config, options, |_| {})
}

/// [`build`], reporting progress to `on_event` as it happens.
///
/// Each page's event fires right after that page is written, so a caller
/// printing events has already reported every rewritten page when a later
/// page aborts the build.
pub fn build_with_events(
    root: &Path,
    config: &BuildConfig,
    options: ProcessOptions,
    mut on_event: impl FnMut(BuildEvent<'_>),
) -> Result<BuildReport, BuildError> {
    config.validate()?;
    let options = ProcessOptions {
        strict: options.strict || config.strict,
        ..options
    };

    let includes = includes::load_includes(&root.join(&config.includes_dir), &config.extensions)?;
    on_event(BuildEvent::IncludesLoaded(&includes));
    let targets = discover_targets(root, config)?;

    let mut files = Vec::with_capacity(targets.len());
    for relative in targets {
        let outcome = process_file(&root.join(&relative), &includes, options)?;
        let report = FileReport {
            path: relative,
            outcome,
        };
        on_event(BuildEvent::FileProcessed(&report));
        files.push(report);
    }

    Ok(BuildReport {
        includes,
        files,
        dry_run: options.dry_run,
    })
}
