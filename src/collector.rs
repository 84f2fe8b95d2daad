//! The collection loop.
//!
//! Each cycle runs fetch → normalize → append → flush. A failed fetch skips
//! the rest of its cycle but still counts toward the schedule; a failed
//! flush ends the run.
//!
//! ```text
//! Idle ─▶ Fetching ─┬─ Success ─▶ normalize, append, flush ─┐
//!            ▲      └─ Failed  ─▶ log and skip ─────────────┤
//!            │                                              ▼
//!            └──────────────── Waiting ◀──── more cycles? ──┴─▶ Done
//! ```

use std::time::Duration;

use tracing::{debug, info, warn};

use waitwatch_types::{normalize, Dataset};

use crate::clock::{format_timestamp, Clock};
use crate::duration::format_duration;
use crate::sink::{FlushOutcome, PersistError, Sink};
use crate::source::{FetchError, SnapshotSource};

/// How long a run lasts and how far apart its cycles are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    total_duration: Duration,
    interval: Duration,
}

impl Schedule {
    /// Create a schedule.
    pub fn new(total_duration: Duration, interval: Duration) -> Self {
        Self {
            total_duration,
            interval,
        }
    }

    /// Wall-clock budget for the run.
    pub fn total_duration(&self) -> Duration {
        self.total_duration
    }

    /// Time slept between cycles.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of cycles: `floor(total_duration / interval)`.
    ///
    /// A zero interval yields zero cycles.
    pub fn iteration_count(&self) -> u64 {
        if self.interval.is_zero() {
            return 0;
        }
        (self.total_duration.as_nanos() / self.interval.as_nanos()) as u64
    }
}

/// Result of a single cycle.
#[derive(Debug)]
pub enum CycleOutcome {
    /// The snapshot was collected and appended.
    Collected {
        /// Rows added to the dataset by this cycle.
        rows: usize,
        /// What the sink did with the updated dataset.
        flush: FlushOutcome,
    },
    /// The fetch failed; the dataset is unchanged.
    Failed(FetchError),
}

/// Summary of a finished run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Cycles attempted.
    pub iterations: u64,
    /// Cycles whose fetch succeeded.
    pub successes: u64,
    /// Cycles whose fetch failed.
    pub failures: u64,
    /// Every row collected.
    pub dataset: Dataset,
}

/// Polls a source on a schedule and persists everything it collects.
///
/// # Example
///
/// ```rust,no_run
/// use waitwatch::{Collector, CollectorConfig, HttpSource, SystemClock, XlsxSink};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> anyhow::Result<()> {
///     let config = CollectorConfig::default();
///     let source = HttpSource::builder()
///         .endpoint(&config.url)
///         .timeout(config.timeout)
///         .build()?;
///
///     let sink = XlsxSink::new(&config.output);
///
///     let report = Collector::new(config.schedule(), source, sink, SystemClock)
///         .run()
///         .await?;
///
///     println!("Collected {} rows", report.dataset.len());
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Collector<S, K, C> {
    schedule: Schedule,
    source: S,
    sink: K,
    clock: C,
}

impl<S, K, C> Collector<S, K, C>
where
    S: SnapshotSource,
    K: Sink,
    C: Clock,
{
    /// Create a collector.
    pub fn new(schedule: Schedule, source: S, sink: K, clock: C) -> Self {
        Self {
            schedule,
            source,
            sink,
            clock,
        }
    }

    /// The collector's schedule.
    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Run every scheduled cycle and return what was collected.
    ///
    /// Fetch failures are logged and skipped. The first persistence error
    /// aborts the run.
    pub async fn run(mut self) -> Result<RunReport, PersistError> {
        let total = self.schedule.iteration_count();
        let interval = self.schedule.interval();

        info!(
            "Starting data collection for {} ({} cycles)",
            format_duration(self.schedule.total_duration()),
            total
        );
        info!("Collection interval: {}", format_duration(interval));
        info!("Source: {}", self.source.description());
        info!("Output: {}", self.sink.description());

        let mut report = RunReport::default();

        for iteration in 1..=total {
            info!("Iteration {}/{}", iteration, total);

            match self.run_cycle(&mut report.dataset).await? {
                CycleOutcome::Collected { .. } => report.successes += 1,
                CycleOutcome::Failed(_) => report.failures += 1,
            }
            report.iterations += 1;

            if iteration < total {
                info!(
                    "Waiting {} until next collection...",
                    format_duration(interval)
                );
                self.clock.sleep(interval).await;
            }
        }

        info!(
            successes = report.successes,
            failures = report.failures,
            "Data collection completed! Final data saved to {} ({} records)",
            self.sink.description(),
            report.dataset.len()
        );

        Ok(report)
    }

    /// Run one fetch → normalize → append → flush cycle against `dataset`.
    pub async fn run_cycle(
        &mut self,
        dataset: &mut Dataset,
    ) -> Result<CycleOutcome, PersistError> {
        info!("Collecting data at {}", format_timestamp(self.clock.now()));

        let snapshot = match self.source.fetch().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "Failed to fetch data");
                return Ok(CycleOutcome::Failed(err));
            }
        };

        let timestamp = format_timestamp(self.clock.now());
        let rows = dataset.append(normalize(&snapshot, &timestamp));
        info!("Successfully collected data for {} hospitals", rows);

        let flush = self.sink.flush(dataset).await?;
        match flush {
            FlushOutcome::Written { rows: total } => {
                info!(
                    "Data saved to {} (total records: {})",
                    self.sink.description(),
                    total
                );
            }
            FlushOutcome::Empty => info!("No data to save"),
        }
        debug!(?flush, "cycle complete");

        Ok(CycleOutcome::Collected { rows, flush })
    }
}
