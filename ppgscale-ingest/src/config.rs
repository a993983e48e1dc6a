//! Ingest configuration
//!
//! Defaults reproduce the bench setup: listen on every interface, port 5005,
//! 1KB datagrams, captures under `./udp_data`. A JSON file may override any
//! subset of fields; missing fields keep their defaults.
//!
//! ```json
//! { "port": 6000, "out_dir": "/var/lib/ppg", "window_size": 100 }
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use ppgscale_core::constants::{DEFAULT_FEATURE_WINDOW, MAX_FEATURE_WINDOW, MIN_FEATURE_SAMPLES};
use serde::{Deserialize, Serialize};

use crate::IngestError;

/// Default UDP port the nodes send to
pub const DEFAULT_PORT: u16 = 5005;

/// Default receive buffer; datagrams longer than this are truncated
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Default capture directory
pub const DEFAULT_OUT_DIR: &str = "./udp_data";

/// Ingest server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Address to bind
    pub bind_ip: IpAddr,
    /// UDP port
    pub port: u16,
    /// Receive buffer size in bytes
    pub buffer_size: usize,
    /// Directory capture files are written to
    pub out_dir: PathBuf,
    /// Samples per feature window
    pub window_size: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            bind_ip: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            buffer_size: DEFAULT_BUFFER_SIZE,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            window_size: DEFAULT_FEATURE_WINDOW,
        }
    }
}

impl IngestConfig {
    /// Load from a JSON file, filling missing fields with defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Set the bind address
    pub fn with_bind_ip(mut self, ip: IpAddr) -> Self {
        self.bind_ip = ip;
        self
    }

    /// Set the UDP port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the receive buffer size
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Set the capture directory
    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    /// Set the feature window length
    pub fn with_window_size(mut self, samples: usize) -> Self {
        self.window_size = samples;
        self
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_ip, self.port)
    }

    /// Reject configurations the server cannot run with
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.buffer_size == 0 {
            return Err(IngestError::Config("buffer_size must be at least 1 byte".into()));
        }
        if !(MIN_FEATURE_SAMPLES..=MAX_FEATURE_WINDOW).contains(&self.window_size) {
            return Err(IngestError::Config(format!(
                "window_size {} outside [{}, {}]",
                self.window_size, MIN_FEATURE_SAMPLES, MAX_FEATURE_WINDOW
            )));
        }
        Ok(())
    }
}
