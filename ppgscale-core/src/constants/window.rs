//! Feature Window Sizing
//!
//! Limits for the sliding window that turns raw samples into features.
//! The sensor node streams one sample per datagram, so window sizes are
//! expressed in samples rather than milliseconds.

/// Minimum samples needed before a standard deviation means anything.
pub const MIN_FEATURE_SAMPLES: usize = 2;

/// Default window length used by the ingest server.
///
/// At the node's nominal 50 Hz rate this is one second of data.
pub const DEFAULT_FEATURE_WINDOW: usize = 50;

/// Largest window the ingest server will allocate.
///
/// 256 samples * 32 bytes per sample = 8KB, fixed at compile time.
pub const MAX_FEATURE_WINDOW: usize = 256;

/// Longest channel name kept in an `UnknownChannel` error.
///
/// Longer names are truncated; the canonical names are at most 10 bytes.
pub const MAX_CHANNEL_NAME_LEN: usize = 32;
