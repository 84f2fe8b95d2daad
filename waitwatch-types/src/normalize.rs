//! Flattening a snapshot into rows.

use serde_json::Value;

use crate::{Row, Snapshot, NOT_AVAILABLE};

/// Turn a snapshot into one row per hospital, all stamped with `timestamp`.
///
/// Rows come out in the snapshot's source order. This never fails: a
/// hospital without data is recorded as [`NOT_AVAILABLE`].
///
/// # Example
///
/// ```rust
/// use waitwatch_types::{normalize, Row, Snapshot};
///
/// let snapshot = Snapshot::builder()
///     .entry("General Hospital", "2 hr 12 min")
///     .missing("St. Mary's")
///     .build();
///
/// let rows = normalize(&snapshot, "2024-01-01 10:00:00");
/// assert_eq!(
///     rows,
///     vec![
///         Row::new("2024-01-01 10:00:00", "General Hospital", "2 hr 12 min"),
///         Row::new("2024-01-01 10:00:00", "St. Mary's", "Not available"),
///     ]
/// );
/// ```
pub fn normalize(snapshot: &Snapshot, timestamp: &str) -> Vec<Row> {
    snapshot
        .iter()
        .map(|(hospital, value)| Row::new(timestamp, hospital, wait_time(value)))
        .collect()
}

/// Render a reported value as the wait time to record.
///
/// `null` and `""` become [`NOT_AVAILABLE`], strings are kept verbatim and
/// any other JSON value is recorded as its compact JSON text.
///
/// Only an absent reading counts as missing. `0`, `false`, `[]` and `{}` are
/// values the endpoint actually reported, so they are recorded as `"0"`,
/// `"false"`, `"[]"` and `"{}"` rather than collapsed into the sentinel.
pub fn wait_time(value: &Value) -> String {
    match value {
        Value::Null => NOT_AVAILABLE.to_string(),
        Value::String(s) if s.is_empty() => NOT_AVAILABLE.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
