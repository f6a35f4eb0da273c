//! Final per-platform output of a pipeline run.

use crate::Platform;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Mapping from platform to its final rewritten text.
///
/// Created fresh for every submission and populated once all sequences
/// complete. Serializes as an object keyed by [`Platform::output_key`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    outputs: BTreeMap<Platform, String>,
}

impl RunResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the final text for a platform, returning any previous value.
    pub fn insert(&mut self, platform: Platform, text: String) -> Option<String> {
        self.outputs.insert(platform, text)
    }

    /// Final text for a platform.
    pub fn get(&self, platform: Platform) -> Option<&str> {
        self.outputs.get(&platform).map(String::as_str)
    }

    /// Number of platforms with output.
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// True when no platform produced output (e.g. empty input).
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Platforms present in the result.
    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.outputs.keys().copied()
    }

    /// Iterate over (platform, text) pairs in platform order.
    pub fn iter(&self) -> impl Iterator<Item = (Platform, &str)> {
        self.outputs.iter().map(|(p, t)| (*p, t.as_str()))
    }

    /// Converts to a string-keyed map using the platform output keys.
    pub fn into_keyed_map(self) -> BTreeMap<String, String> {
        self.outputs
            .into_iter()
            .map(|(p, t)| (p.output_key().to_string(), t))
            .collect()
    }
}

impl FromIterator<(Platform, String)> for RunResult {
    fn from_iter<I: IntoIterator<Item = (Platform, String)>>(iter: I) -> Self {
        Self {
            outputs: iter.into_iter().collect(),
        }
    }
}

impl Serialize for RunResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.outputs.len()))?;
        for (platform, text) in &self.outputs {
            map.serialize_entry(platform.output_key(), text)?;
        }
        map.end()
    }
}
