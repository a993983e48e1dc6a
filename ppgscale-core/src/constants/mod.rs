//! Constants for PPGScale Core
//!
//! Centralized numeric values used throughout the crate. Scaler bounds are
//! kept as individually named items so firmware-style code can reference
//! them directly; `crate::scaler::SCALER_TABLE` gathers the same values into
//! a lookup table keyed by channel.
//!
//! ## Organization
//!
//! - **Scaler**: min/max calibration bounds per feature channel
//! - **Window**: feature window sizing and related limits

/// Min/max calibration bounds for each feature channel.
pub mod scaler;

/// Feature window sizes and limits.
pub mod window;

pub use scaler::{
    IR_MEAN_MIN, IR_MEAN_MAX,
    ACCEL_X_STD_MIN, ACCEL_X_STD_MAX,
    ACCEL_Y_STD_MIN, ACCEL_Y_STD_MAX,
    ACCEL_Z_STD_MIN, ACCEL_Z_STD_MAX,
    GYRO_X_STD_MIN, GYRO_X_STD_MAX,
    GYRO_Y_STD_MIN, GYRO_Y_STD_MAX,
    GYRO_Z_STD_MIN, GYRO_Z_STD_MAX,
};

pub use window::{
    MIN_FEATURE_SAMPLES, DEFAULT_FEATURE_WINDOW, MAX_FEATURE_WINDOW,
    MAX_CHANNEL_NAME_LEN,
};
