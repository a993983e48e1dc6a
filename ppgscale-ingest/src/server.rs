//! UDP receive loop
//!
//! `UdpIngest` owns the socket, the sink and the feature window. The loop
//! is a single task, so none of them need locking.
//!
//! Per datagram:
//! 1. Decode UTF-8; failures are logged and dropped
//! 2. Record the trimmed, comma-split fields with the server receive time;
//!    a failed write is logged and counted, and the loop keeps listening
//! 3. Parse a `MotionSample`; on success it enters the feature window and,
//!    every `window_size` samples once the window is full, the normalized
//!    feature vector is logged

use std::future::Future;
use std::net::SocketAddr;

use chrono::Local;
use log::{debug, info, warn};
use ppgscale_core::constants::MAX_FEATURE_WINDOW;
use ppgscale_core::{FeatureVector, FeatureWindow, MotionSample};
use tokio::net::UdpSocket;

use crate::config::IngestConfig;
use crate::recorder::SERVER_TIME_FORMAT;
use crate::{IngestError, IngestStats, SampleSink};

/// UDP ingest server
pub struct UdpIngest<S> {
    socket: UdpSocket,
    sink: S,
    window: FeatureWindow<MAX_FEATURE_WINDOW>,
    buffer_size: usize,
    stats: IngestStats,
    last_features: Option<FeatureVector>,
}

impl<S: SampleSink> UdpIngest<S> {
    /// Validate `config` and bind its socket
    pub async fn bind(config: IngestConfig, sink: S) -> Result<Self, IngestError> {
        config.validate()?;
        let socket = UdpSocket::bind(config.bind_addr()).await?;
        info!("Listening on UDP {}", socket.local_addr()?);

        Ok(Self {
            socket,
            sink,
            window: FeatureWindow::new().with_limit(config.window_size),
            buffer_size: config.buffer_size,
            stats: IngestStats::default(),
            last_features: None,
        })
    }

    /// Address actually bound (resolves port 0)
    pub fn local_addr(&self) -> Result<SocketAddr, IngestError> {
        Ok(self.socket.local_addr()?)
    }

    /// Counters so far
    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    /// Most recent normalized feature vector, if a window has completed
    pub fn last_features(&self) -> Option<&FeatureVector> {
        self.last_features.as_ref()
    }

    /// The sink rows are written to
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Receive until `shutdown` completes, then flush the sink
    ///
    /// Socket errors and a failed final flush are returned. Per-row sink
    /// errors only bump `write_errors`.
    pub async fn run_until<F>(mut self, shutdown: F) -> Result<IngestStats, IngestError>
    where
        F: Future<Output = ()>,
    {
        let mut buf = vec![0u8; self.buffer_size];
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                received = self.socket.recv_from(&mut buf) => {
                    let (len, peer) = received?;
                    self.handle_datagram(&buf[..len], peer)?;
                }
            }
        }

        self.sink.flush()?;
        info!(
            "Stopped: {} datagrams, {} rows, {} write errors, {} decode errors, {} parse errors",
            self.stats.datagrams_received,
            self.stats.rows_written,
            self.stats.write_errors,
            self.stats.decode_errors,
            self.stats.parse_errors,
        );
        Ok(self.stats)
    }

    /// Process one datagram payload
    pub fn handle_datagram(&mut self, payload: &[u8], peer: SocketAddr) -> Result<(), IngestError> {
        self.stats.datagrams_received += 1;
        self.stats.bytes_received += payload.len() as u64;

        let text = match std::str::from_utf8(payload) {
            Ok(text) => text,
            Err(e) => {
                self.stats.decode_errors += 1;
                warn!("Parse error from {}: {} -> {:?}", peer, e, payload);
                return Ok(());
            }
        };

        let line = text.trim();
        let fields: Vec<&str> = line.split(',').collect();
        let server_time = Local::now().format(SERVER_TIME_FORMAT).to_string();
        match self.sink.record(&server_time, &fields) {
            Ok(()) => {
                self.stats.rows_written += 1;
                info!("Got from {}: {}", peer, line);
            }
            Err(e) => {
                self.stats.write_errors += 1;
                warn!("Write error for row from {}: {}", peer, e);
            }
        }

        match MotionSample::parse(line) {
            Ok(sample) => self.observe(sample),
            Err(e) => {
                self.stats.parse_errors += 1;
                warn!("Sample from {} recorded but not parsed: {}", peer, e);
            }
        }
        Ok(())
    }

    fn observe(&mut self, sample: MotionSample) {
        self.window.push(sample);
        if !self.window.is_ready() || self.window.total_pushed() % self.window.limit() as u64 != 0 {
            return;
        }

        match self.window.extract() {
            Ok(features) => {
                let scaled = features.normalized_clamped();
                debug!("Features {:?} -> scaled {:?}", features.as_array(), scaled.as_array());
                self.stats.feature_vectors += 1;
                self.last_features = Some(scaled);
            }
            Err(e) => warn!("Feature extraction failed: {}", e),
        }
    }
}
