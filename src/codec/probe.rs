// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structural probes: key-path presence checks on a [`RawObject`].

use std::fmt;

use serde_json::{Map, Value};

use super::raw::RawObject;

/// A dotted key path such as `boot_volume_attachment.volume.source_snapshot`.
///
/// The path exists when every intermediate segment holds a JSON object and
/// the last segment is present as a key. The value under the last key is not
/// inspected, so `{}` and `null` both count; a `null` intermediate does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPath(&'static [&'static str]);

impl KeyPath {
    /// Build a path from its segments.
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty. Paths are static table data, so this
    /// only fires while the tables are being written.
    #[must_use]
    pub const fn new(segments: &'static [&'static str]) -> Self {
        assert!(!segments.is_empty(), "key path needs at least one segment");
        Self(segments)
    }

    /// Number of segments; deeper paths are more specific.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn segments(&self) -> &'static [&'static str] {
        self.0
    }

    /// Whether the path exists in `raw`.
    #[must_use]
    pub fn exists_in(&self, raw: &RawObject) -> bool {
        let (last, parents) = match self.0.split_last() {
            Some(split) => split,
            None => return false,
        };
        let mut current: &Map<String, Value> = raw.as_map();
        for segment in parents {
            match current.get(*segment) {
                Some(Value::Object(next)) => current = next,
                _ => return false,
            }
        }
        current.contains_key(*last)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}
