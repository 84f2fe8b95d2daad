//! Row - one timestamped wait time observation.

/// Column headers, in the order [`Row::fields`] returns values.
pub const HEADERS: [&str; 3] = ["Timestamp", "Hospital Name", "Wait Time"];

/// A single observation: when it was collected, for which hospital, and
/// the wait time that was reported.
///
/// Rows are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row {
    timestamp: String,
    hospital: String,
    wait_time: String,
}

impl Row {
    /// Create a row.
    ///
    /// `timestamp` is expected in `YYYY-MM-DD HH:MM:SS` form.
    pub fn new(
        timestamp: impl Into<String>,
        hospital: impl Into<String>,
        wait_time: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            hospital: hospital.into(),
            wait_time: wait_time.into(),
        }
    }

    /// When the snapshot containing this row was collected.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// The hospital this row describes.
    pub fn hospital(&self) -> &str {
        &self.hospital
    }

    /// The reported wait time, or [`NOT_AVAILABLE`](crate::NOT_AVAILABLE).
    pub fn wait_time(&self) -> &str {
        &self.wait_time
    }

    /// All fields in [`HEADERS`] order.
    pub fn fields(&self) -> [&str; 3] {
        [&self.timestamp, &self.hospital, &self.wait_time]
    }
}
