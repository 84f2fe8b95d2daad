//! # waitwatch-types
//!
//! Core types for collecting emergency-room wait times. This crate defines
//! the data that flows through one collection cycle:
//!
//! ```text
//! Snapshot ──normalize(timestamp)──▶ Vec<Row> ──append──▶ Dataset
//! ```
//!
//! - **[`Snapshot`]**: the raw payload of one fetch, hospital name to wait
//!   time, in the order the endpoint returned it
//! - **[`Row`]**: one timestamped observation for one hospital
//! - **[`Dataset`]**: every row collected during a run, in collection order
//!
//! Nothing in here performs I/O; fetching and persisting live in the
//! `waitwatch` crate.
//!
//! ## Example
//!
//! ```rust
//! use waitwatch_types::{normalize, Dataset, Snapshot, NOT_AVAILABLE};
//!
//! let snapshot = Snapshot::builder()
//!     .entry("General Hospital", "2 hr 12 min")
//!     .missing("St. Mary's")
//!     .build();
//!
//! let mut dataset = Dataset::new();
//! dataset.append(normalize(&snapshot, "2024-01-01 10:00:00"));
//!
//! assert_eq!(dataset.len(), 2);
//! assert_eq!(dataset.rows()[1].wait_time(), NOT_AVAILABLE);
//! ```

mod dataset;
mod normalize;
mod row;
mod snapshot;

pub use dataset::*;
pub use normalize::*;
pub use row::*;
pub use snapshot::*;

/// Placeholder recorded when the endpoint reports no wait time for a hospital.
pub const NOT_AVAILABLE: &str = "Not available";
