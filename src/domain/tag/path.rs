//! Tag paths and name sanitization

use std::fmt;

use serde::{Deserialize, Serialize};

use super::TagValue;

/// Provider used when a path carries no `[provider]` prefix
pub const DEFAULT_PROVIDER: &str = "default";

/// Maximum length of a sanitized path segment, in characters
pub const MAX_SEGMENT_LEN: usize = 50;

/// Placeholder for names that sanitize to nothing
pub const EMPTY_NAME_PLACEHOLDER: &str = "Unknown";

const INVALID_CHARS: [char; 12] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|', ' ', '-', '.'];

/// Turn a human-provided name into a single tag path segment.
///
/// Invalid characters become underscores, runs of underscores collapse to
/// one, leading/trailing underscores are trimmed and the result is capped at
/// [`MAX_SEGMENT_LEN`] characters. Distinct names that reduce to the same
/// segment are not disambiguated.
pub fn sanitize_tag_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        let ch = if INVALID_CHARS.contains(&ch) { '_' } else { ch };
        if ch == '_' && out.ends_with('_') {
            continue;
        }
        out.push(ch);
    }

    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        return EMPTY_NAME_PLACEHOLDER.to_string();
    }

    trimmed.chars().take(MAX_SEGMENT_LEN).collect()
}

/// Slash-delimited path of a tag, optionally prefixed by `[provider]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TagPath(String);

impl TagPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into().trim_end_matches('/').to_string())
    }

    /// Append one already-sanitized segment (may itself contain `/`)
    pub fn child(&self, segment: &str) -> Self {
        if self.0.is_empty() || self.0.ends_with(']') {
            Self(format!("{}{}", self.0, segment))
        } else {
            Self(format!("{}/{}", self.0, segment))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Provider name and the provider-relative path
    pub fn provider(&self) -> (&str, &str) {
        if let Some(rest) = self.0.strip_prefix('[') {
            if let Some(end) = rest.find(']') {
                return (&rest[..end], &rest[end + 1..]);
            }
        }
        (DEFAULT_PROVIDER, &self.0)
    }

    /// Path with an explicit provider prefix, used as the storage key
    pub fn canonical(&self) -> String {
        let (provider, path) = self.provider();
        format!("[{}]{}", provider, path)
    }

    /// Split into the parent folder path (with provider) and the tag name
    pub fn split_parent(&self) -> (String, &str) {
        let (provider, path) = self.provider();
        match path.rsplit_once('/') {
            Some((folder, name)) => (format!("[{}]{}", provider, folder), name),
            None => (format!("[{}]", provider), path),
        }
    }
}

impl fmt::Display for TagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One (path, value) pair of the flattened output
#[derive(Debug, Clone, PartialEq)]
pub struct TagWrite {
    pub path: TagPath,
    pub value: TagValue,
}

impl TagWrite {
    pub fn new(path: TagPath, value: impl Into<TagValue>) -> Self {
        Self {
            path,
            value: value.into(),
        }
    }
}
