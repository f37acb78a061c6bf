//! # html-include
//!
//! A static-site build step that splices shared HTML fragments into pages.
//! A page containing `<!-- @include header -->` gets that marker replaced by
//! the contents of `_includes/header.html`, and the page is rewritten in place.
//!
//! # Pipeline
//!
//! ```text
//! 1. Load      _includes/   →  Includes         (name → fragment)
//! 2. Discover  site root    →  target pages     (glob patterns, sorted)
//! 3. Rewrite   each page    →  BuildReport      (write only what changed)
//! ```
//!
//! Everything runs sequentially on the calling thread with blocking I/O.
//! The first error aborts the run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `include.toml` loading, defaults, validation |
//! | [`includes`] | Include directory loader and the `Includes` map |
//! | [`marker`] | Marker syntax and single-pass expansion |
//! | [`process`] | Target discovery, per-page rewrite, whole-site build |
//! | [`output`] | Console output formatting |
//!
//! # Design Decisions
//!
//! ## One Level Of Inclusion
//!
//! Expansion scans the page once. Fragment text is inserted verbatim and is
//! not scanned again, so a marker inside an include survives into the page.
//! The result never depends on the order includes are applied in.
//!
//! ## Unknown Markers Pass Through
//!
//! A marker naming no include is left in the page as-is. Set
//! `strict = true` (or pass `--strict`) to make it a build error instead.
//!
//! ## Deterministic Output
//!
//! Includes are keyed in a sorted map, targets are sorted and de-duplicated,
//! and shared include names are resolved by extension order rather than by
//! directory iteration order. Two runs over the same tree produce the same
//! files and the same report.

pub mod config;
pub mod includes;
pub mod marker;
pub mod output;
pub mod process;

#[cfg(test)]
pub(crate) mod test_helpers;
