//! Include loading.
//!
//! Reads every fragment in the include directory into an [`Includes`] map
//! keyed by file stem: `_includes/header.html` becomes the include `header`,
//! spliced in wherever a page says `<!-- @include header -->`.
//!
//! The directory is read flat (subdirectories and dotfiles are ignored) and a
//! missing directory simply yields an empty map. Any accepted file that cannot
//! be read as UTF-8 text aborts the load; there is no partial map.
//!
//! ## Shared names
//!
//! `header.htm` and `header.html` both claim the name `header`. The winner is
//! decided by the configured extension order (earlier wins), never by
//! directory iteration order. Losers are kept in
//! [`Includes::shadowed`] so the build can report them.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IncludeError {
    #[error("Failed to read include directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read include {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A named HTML fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    pub name: String,
    pub content: String,
    pub source_path: PathBuf,
}

/// An include file that lost a name collision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shadowed {
    pub name: String,
    pub path: PathBuf,
    /// The file that supplies `name` instead.
    pub winner: PathBuf,
}

/// Include name → fragment. Iterates in name order.
#[derive(Debug, Clone, Default)]
pub struct Includes {
    map: BTreeMap<String, Include>,
    shadowed: Vec<Shadowed>,
}

impl Includes {
    /// Build a map directly from `(name, content)` pairs.
    pub fn from_pairs<N, C>(pairs: impl IntoIterator<Item = (N, C)>) -> Self
    where
        N: Into<String>,
        C: Into<String>,
    {
        let map = pairs
            .into_iter()
            .map(|(name, content)| {
                let name = name.into();
                let include = Include {
                    source_path: PathBuf::from(&name),
                    name: name.clone(),
                    content: content.into(),
                };
                (name, include)
            })
            .collect();
        Self {
            map,
            shadowed: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Include> {
        self.map.get(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Include names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.map.keys().map(String::as_str).collect()
    }

    pub fn shadowed(&self) -> &[Shadowed] {
        &self.shadowed
    }
}

/// A candidate file with its tie-break rank.
struct Candidate {
    name: String,
    path: PathBuf,
    ext_rank: usize,
}

/// Load every include file directly inside `dir`.
///
/// `extensions` lists accepted extensions without the dot, in priority order;
/// matching is case-sensitive. Every accepted file is read, including those
/// that lose a name collision, so a broken fragment always fails the load.
pub fn load_includes(dir: &Path, extensions: &[String]) -> Result<Includes, IncludeError> {
    if !dir.is_dir() {
        return Ok(Includes::default());
    }

    let read_dir_err = |source| IncludeError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let path = entry.map_err(read_dir_err)?.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext_rank) = extension_rank(&path, extensions) else {
            continue;
        };
        let Some(name) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        candidates.push(Candidate {
            name,
            path,
            ext_rank,
        });
    }

    // Best candidate for each name comes first.
    candidates.sort_by(|a, b| a.name.cmp(&b.name).then(a.ext_rank.cmp(&b.ext_rank)));

    let mut loaded = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let content = fs::read_to_string(&candidate.path).map_err(|source| IncludeError::Read {
            path: candidate.path.clone(),
            source,
        })?;
        loaded.push((candidate, content));
    }

    let mut includes = Includes::default();
    for (candidate, content) in loaded {
        if let Some(winner) = includes.map.get(&candidate.name) {
            includes.shadowed.push(Shadowed {
                name: candidate.name,
                path: candidate.path,
                winner: winner.source_path.clone(),
            });
            continue;
        }
        includes.map.insert(
            candidate.name.clone(),
            Include {
                name: candidate.name,
                content,
                source_path: candidate.path,
            },
        );
    }

    Ok(includes)
}

/// Position of the path's extension in `extensions`, if accepted.
fn extension_rank(path: &Path, extensions: &[String]) -> Option<usize> {
    let ext = path.extension()?.to_str()?;
    extensions.iter().position(|e| e == ext)
}
