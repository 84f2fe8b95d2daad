//! Persistence sinks for the collected dataset.
//!
//! A sink receives the whole [`Dataset`] on every flush and replaces its
//! previous output with it. The file always mirrors the dataset at the
//! last successful flush; it is never a log of changes.

mod xlsx;

pub use xlsx::{XlsxSink, SHEET_NAME};

use std::fmt::Debug;
use std::path::PathBuf;

use thiserror::Error;
use waitwatch_types::Dataset;

/// What a flush did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// The dataset was empty; nothing was written.
    Empty,
    /// The output was rewritten with this many rows.
    Written { rows: usize },
}

/// Errors writing the dataset out. These are fatal to a run.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The spreadsheet could not be built.
    #[error("failed to build spreadsheet: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The output file could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset has more rows than a worksheet can hold.
    #[error("dataset has {rows} rows, more than a worksheet can hold")]
    TooManyRows { rows: usize },
}

/// Destination for the accumulated dataset.
#[allow(async_fn_in_trait)]
pub trait Sink: Debug {
    /// Replace the sink's output with `dataset`.
    ///
    /// An empty dataset returns [`FlushOutcome::Empty`] without touching
    /// any existing output.
    async fn flush(&mut self, dataset: &Dataset) -> Result<FlushOutcome, PersistError>;

    /// Returns a human-readable description of the sink.
    fn description(&self) -> &str;
}

impl<K: Sink> Sink for &mut K {
    async fn flush(&mut self, dataset: &Dataset) -> Result<FlushOutcome, PersistError> {
        (**self).flush(dataset).await
    }

    fn description(&self) -> &str {
        (**self).description()
    }
}
