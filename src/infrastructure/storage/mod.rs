pub mod memory;

pub use memory::InMemoryTagStore;

use crate::domain::TagPath;

/// Browse prefix as stored; an empty prefix matches every provider
pub(crate) fn canonical_prefix(prefix: &str) -> String {
    if prefix.is_empty() {
        String::new()
    } else {
        TagPath::new(prefix).canonical()
    }
}

/// Whether `path` lies under `prefix` on whole segments: `[default]X`
/// matches `[default]X` and `[default]X/...` but not `[default]XY`.
/// Both arguments are canonical.
pub(crate) fn in_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => {
            rest.is_empty() || prefix.is_empty() || prefix.ends_with(']') || rest.starts_with('/')
        }
        None => false,
    }
}
