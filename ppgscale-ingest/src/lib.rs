//! UDP Ingest for IMU + PPG Sensor Nodes
//!
//! ## Overview
//!
//! Sensor nodes stream one datagram per sample over UDP. This crate receives
//! those datagrams, records every one of them to a CSV capture file and, as
//! a side channel, feeds parsed samples through a sliding feature window so
//! the scaled model inputs can be watched live in the logs.
//!
//! ## Why UDP?
//!
//! The node samples at tens of Hz and a lost sample is cheaper than a
//! stalled one:
//! - No connection state on the node
//! - No retransmission delaying newer samples
//! - Any host on the network can listen
//!
//! ## Data Flow
//!
//! ```text
//! node ──UDP──▶ UdpIngest ──▶ SampleSink (CsvRecorder)
//!                  │
//!                  └──▶ MotionSample::parse ──▶ FeatureWindow ──▶ normalized features (log)
//! ```
//!
//! Datagrams that are not valid UTF-8 are dropped. Datagrams that decode
//! but do not parse as a sample are still recorded verbatim; only the
//! feature path skips them.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ppgscale_ingest::{config::IngestConfig, recorder::CsvRecorder, server::UdpIngest};
//!
//! # async fn example() -> Result<(), ppgscale_ingest::IngestError> {
//! let config = IngestConfig::default().with_port(5005);
//! let recorder = CsvRecorder::create(&config.out_dir)?;
//! let ingest = UdpIngest::bind(config, recorder).await?;
//!
//! let stats = ingest
//!     .run_until(async { let _ = tokio::signal::ctrl_c().await; })
//!     .await?;
//! println!("{} rows written", stats.rows_written);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod recorder;
pub mod server;

pub use config::IngestConfig;
pub use recorder::CsvRecorder;
pub use server::UdpIngest;

use ppgscale_core::SampleError;
use thiserror::Error;

/// Common ingest errors
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid sample: {0}")]
    Sample(#[from] SampleError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Destination for received rows
///
/// `fields` are the datagram's comma-separated fields exactly as received.
pub trait SampleSink {
    /// Store one row
    fn record(&mut self, server_time: &str, fields: &[&str]) -> Result<(), IngestError>;

    /// Push buffered rows to durable storage
    fn flush(&mut self) -> Result<(), IngestError> {
        Ok(())
    }
}

/// Counters kept by the ingest loop
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IngestStats {
    /// Datagrams received, valid or not
    pub datagrams_received: u64,
    /// Payload bytes received
    pub bytes_received: u64,
    /// Rows handed to the sink
    pub rows_written: u64,
    /// Rows the sink failed to store
    pub write_errors: u64,
    /// Datagrams dropped because they were not UTF-8
    pub decode_errors: u64,
    /// Recorded rows that did not parse as a sample
    pub parse_errors: u64,
    /// Feature vectors produced
    pub feature_vectors: u64,
}
