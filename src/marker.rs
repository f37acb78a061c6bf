//! Include marker syntax and expansion.
//!
//! A marker is the literal token `<!-- @include NAME -->`. Matching is exact:
//! case-sensitive, single spaces, no trimming. Expansion is one pass over the
//! page text; fragment content is inserted as-is and never rescanned, so a
//! marker inside an include stays in the output untouched.

use crate::includes::Includes;

pub const MARKER_PREFIX: &str = "<!-- @include ";
pub const MARKER_SUFFIX: &str = " -->";

/// Cheap pre-check: pages without the prefix are not expanded at all.
pub fn contains_marker(content: &str) -> bool {
    content.contains(MARKER_PREFIX)
}

/// Result of expanding one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub content: String,
    /// Names of markers with no matching include, first appearance order.
    pub unknown: Vec<String>,
}

/// Replace every known marker in `content` with its include's content.
pub fn expand(content: &str, includes: &Includes) -> Expansion {
    let mut out = String::with_capacity(content.len());
    let mut unknown: Vec<String> = Vec::new();
    let mut rest = content;

    while let Some(start) = rest.find(MARKER_PREFIX) {
        out.push_str(&rest[..start]);
        let after_prefix = &rest[start + MARKER_PREFIX.len()..];

        let Some(name_len) = after_prefix.find(MARKER_SUFFIX) else {
            // No closing token anywhere after this point
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let name = &after_prefix[..name_len];

        match includes.get(name) {
            Some(include) => {
                out.push_str(&include.content);
                rest = &after_prefix[name_len + MARKER_SUFFIX.len()..];
            }
            None => {
                if is_marker_name(name) && !unknown.iter().any(|u| u == name) {
                    unknown.push(name.to_string());
                }
                // Resume right after the prefix; a real marker may start inside.
                out.push_str(MARKER_PREFIX);
                rest = after_prefix;
            }
        }
    }
    out.push_str(rest);

    Expansion {
        content: out,
        unknown,
    }
}

/// Whether a captured name looks like something a marker author meant,
/// as opposed to a stray prefix whose "name" swallowed other markup.
fn is_marker_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(MARKER_PREFIX) && !name.contains('\n')
}
