//! Snapshot sources.
//!
//! A source produces one [`Snapshot`] per call to
//! [`fetch`](SnapshotSource::fetch). The production source is
//! [`HttpSource`]; tests drive the collector with scripted sources.

mod error;
mod http;

pub use error::FetchError;
pub use http::{HttpSource, HttpSourceBuilder, DEFAULT_TIMEOUT};

use std::fmt::Debug;

use waitwatch_types::Snapshot;

/// Trait for fetching wait time snapshots.
///
/// # Example
///
/// ```rust,no_run
/// use waitwatch::{HttpSource, SnapshotSource};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let source = HttpSource::builder()
///         .endpoint("https://howlongwilliwait.com/sample.json")
///         .build()?;
///
///     let snapshot = source.fetch().await?;
///     println!("Got {} hospitals", snapshot.len());
///     Ok(())
/// }
/// ```
#[allow(async_fn_in_trait)]
pub trait SnapshotSource: Debug {
    /// Perform a single fetch.
    ///
    /// Implementations must not retry; a failed fetch is reported as
    /// [`FetchError`] and the caller decides what to do with the cycle.
    async fn fetch(&self) -> Result<Snapshot, FetchError>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}

impl<S: SnapshotSource> SnapshotSource for &S {
    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        (**self).fetch().await
    }

    fn description(&self) -> &str {
        (**self).description()
    }
}
