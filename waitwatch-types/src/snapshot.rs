//! Snapshot - the raw payload of a single fetch.

use serde::Deserialize;
use serde_json::{Map, Value};

/// A point-in-time mapping of hospital name to reported wait time.
///
/// Decoded directly from the endpoint's JSON object. Values are kept as raw
/// JSON so that `null`, empty strings and anything unexpected survive until
/// normalization decides how to record them. Entries iterate in the order
/// the endpoint returned them.
///
/// # Example
///
/// ```rust
/// use waitwatch_types::Snapshot;
///
/// let snapshot: Snapshot =
///     serde_json::from_str(r#"{"General Hospital": "2 hr 12 min", "St. Mary's": null}"#)
///         .unwrap();
///
/// let names: Vec<&str> = snapshot.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, ["General Hospital", "St. Mary's"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: Map<String, Value>,
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for constructing snapshots.
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::new()
    }

    /// Number of hospitals in the snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the snapshot is empty (no hospitals).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the raw value reported for a hospital.
    pub fn get(&self, hospital: &str) -> Option<&Value> {
        self.entries.get(hospital)
    }

    /// Iterate over all hospitals in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl From<Map<String, Value>> for Snapshot {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}

impl FromIterator<(String, Value)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Builder for constructing `Snapshot` instances.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    entries: Map<String, Value>,
}

impl SnapshotBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hospital with a reported wait time.
    pub fn entry(mut self, hospital: impl Into<String>, wait_time: impl Into<String>) -> Self {
        self.entries
            .insert(hospital.into(), Value::String(wait_time.into()));
        self
    }

    /// Add a hospital reported as `null`.
    pub fn missing(mut self, hospital: impl Into<String>) -> Self {
        self.entries.insert(hospital.into(), Value::Null);
        self
    }

    /// Add a hospital with an arbitrary JSON value.
    pub fn value(mut self, hospital: impl Into<String>, value: Value) -> Self {
        self.entries.insert(hospital.into(), value);
        self
    }

    /// Build the snapshot.
    pub fn build(self) -> Snapshot {
        Snapshot {
            entries: self.entries,
        }
    }
}
