//! Item-type name normalisation.
//!
//! The source names item types with spaces (`"Part Document"`), while every
//! URL this adapter produces uses a dot in place of each space
//! (`Part.Document`). Incoming path segments may additionally be
//! percent-encoded (`Part%20Document`). [`ItemTypeName`] holds the canonical
//! source form and is the only place where the two spellings are converted.

use std::fmt;

/// An item type name in its canonical (space-separated) source form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemTypeName(String);

impl ItemTypeName {
    /// Build from a name exactly as the source reports it.
    pub fn from_source(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Build from a URL path segment: percent-decode, then map `.` to space.
    ///
    /// A segment that is not valid percent-encoding is used verbatim.
    pub fn from_url_segment(segment: &str) -> Self {
        let decoded = urlencoding::decode(segment)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| segment.to_string());
        Self(decoded.replace('.', " "))
    }

    /// The canonical name, as used in source queries (`"Part Document"`).
    pub fn source_name(&self) -> &str {
        &self.0
    }

    /// The URL-safe name (`"Part.Document"`).
    pub fn url_name(&self) -> String {
        url_safe(&self.0)
    }
}

impl fmt::Display for ItemTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Map every space to a dot. Also used for property names in IRIs.
pub fn url_safe(name: &str) -> String {
    name.replace(' ', ".")
}
