//! Core scaling engine for PPGScale
//!
//! Min-max scaler bounds for the seven features a wrist-worn IMU + PPG node
//! produces, plus the windowed feature extraction that produces them.
//! Designed to run both on the host and on the node itself.
//!
//! Key constraints:
//! - `no_std` without the `std` feature
//! - No heap allocation anywhere
//! - Bounds are immutable `static` data, safe to read from any thread
//!
//! ```no_run
//! use ppgscale_core::{get_bound, ScalerError};
//!
//! // Rescale a windowed IR mean for the model
//! match get_bound("IR_mean") {
//!     Ok(bound) => { let _scaled = bound.normalize(91000.0); }
//!     Err(ScalerError::UnknownChannel { .. }) => {} // Not a calibrated channel
//!     Err(_) => {}
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

// Optional logging, compiled out without the `log` feature
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

pub mod channel;
pub mod constants;
pub mod errors;
pub mod features;
pub mod sample;
pub mod scaler;

// Public API
pub use channel::Channel;
pub use errors::{ScalerError, ScalerResult};
pub use features::{FeatureError, FeatureVector, FeatureWindow};
pub use sample::{MotionSample, SampleError};
pub use scaler::{get_bound, ScalerBound, SCALER_TABLE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
