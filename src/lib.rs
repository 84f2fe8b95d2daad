//! # waitwatch
//!
//! Collects hospital emergency-room wait times on a fixed schedule and keeps
//! a spreadsheet of every observation for later analysis.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          Collector                            │
//! │  ┌─────────┐   ┌───────────┐   ┌─────────┐   ┌─────────────┐  │
//! │  │ source  │──▶│ normalize │──▶│ Dataset │──▶│    sink     │  │
//! │  │ (fetch) │   │  (types)  │   │ (append)│   │ (xlsx file) │  │
//! │  └─────────┘   └───────────┘   └─────────┘   └─────────────┘  │
//! │       ▲                                                       │
//! │       └──────────── clock (sleep between cycles) ─────────────┘
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: [`SnapshotSource`] trait and the [`HttpSource`] that
//!   polls the JSON endpoint
//! - **[`sink`]**: [`Sink`] trait and the [`XlsxSink`] that rewrites the
//!   workbook after each successful cycle
//! - **[`clock`]**: [`Clock`] trait with a real [`SystemClock`] and a
//!   virtual [`ManualClock`](clock::ManualClock)
//! - **[`collector`]**: the [`Collector`] loop and its [`Schedule`]
//! - **[`settings`]**: layered configuration ([`CollectorConfig`])
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Full run: 72 hours at 30-minute intervals
//! waitwatch
//!
//! # Demo: two snapshots five minutes apart
//! waitwatch --demo
//!
//! # Custom schedule
//! waitwatch --duration 6h --interval 15m --output waits.xlsx
//! ```
//!
//! ### As a library
//!
//! ```rust,no_run
//! use waitwatch::{Collector, CollectorConfig, HttpSource, SystemClock, XlsxSink};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = CollectorConfig::default();
//! let source = HttpSource::builder().endpoint(&config.url).build()?;
//! let sink = XlsxSink::new(&config.output);
//!
//! let report = Collector::new(config.schedule(), source, sink, SystemClock)
//!     .run()
//!     .await?;
//! println!("{} rows", report.dataset.len());
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod collector;
pub mod duration;
pub mod logging;
pub mod preview;
pub mod settings;
pub mod sink;
pub mod source;

// Re-export main types for convenience
pub use clock::{Clock, SystemClock};
pub use collector::{Collector, CycleOutcome, RunReport, Schedule};
pub use settings::{CollectorConfig, Overrides, Preset, SettingsError};
pub use sink::{FlushOutcome, PersistError, Sink, XlsxSink};
pub use source::{FetchError, HttpSource, SnapshotSource};
pub use waitwatch_types::{normalize, Dataset, Row, Snapshot, NOT_AVAILABLE};
