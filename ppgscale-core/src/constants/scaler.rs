//! Min-Max Scaler Bounds
//!
//! Calibration bounds for the seven features fed to the downstream model.
//! Each feature is rescaled into `[0, 1]` with:
//!
//! ```text
//! x_norm = (x - MIN) / (MAX - MIN)
//! ```
//!
//! The bounds are opaque calibration constants. Units follow the sensor
//! that produced the raw feature:
//! - `IR_MEAN_*`: mean raw infrared count from the PPG front-end
//! - `ACCEL*_STD_*`: standard deviation of one accelerometer axis
//! - `GYRO*_STD_*`: standard deviation of one gyroscope axis
//!
//! Every pair satisfies `MIN < MAX`.

// Literals are kept exactly as calibrated, even where they carry more
// digits than an f32 can hold.
#![allow(clippy::excessive_precision)]

// ===== PPG (INFRARED) =====

/// Lower bound of the windowed infrared mean.
pub const IR_MEAN_MIN: f32 = 84404.2;

/// Upper bound of the windowed infrared mean.
pub const IR_MEAN_MAX: f32 = 98791.36;

// ===== ACCELEROMETER =====

/// Lower bound of the X-axis acceleration standard deviation.
pub const ACCEL_X_STD_MIN: f32 = 0.016391747550371264;
/// Upper bound of the X-axis acceleration standard deviation.
pub const ACCEL_X_STD_MAX: f32 = 1.2035406269903506;

/// Lower bound of the Y-axis acceleration standard deviation.
pub const ACCEL_Y_STD_MIN: f32 = 0.01674808548303175;
/// Upper bound of the Y-axis acceleration standard deviation.
pub const ACCEL_Y_STD_MAX: f32 = 1.45481964040992;

/// Lower bound of the Z-axis acceleration standard deviation.
pub const ACCEL_Z_STD_MIN: f32 = 0.015284566044990422;
/// Upper bound of the Z-axis acceleration standard deviation.
pub const ACCEL_Z_STD_MAX: f32 = 0.9990398606989143;

// ===== GYROSCOPE =====

/// Lower bound of the X-axis angular rate standard deviation.
pub const GYRO_X_STD_MIN: f32 = 0.00682375801662015;
/// Upper bound of the X-axis angular rate standard deviation.
pub const GYRO_X_STD_MAX: f32 = 1.1534812974961794;

/// Lower bound of the Y-axis angular rate standard deviation.
pub const GYRO_Y_STD_MIN: f32 = 0.002749693860510768;
/// Upper bound of the Y-axis angular rate standard deviation.
pub const GYRO_Y_STD_MAX: f32 = 0.38653191435679213;

/// Lower bound of the Z-axis angular rate standard deviation.
pub const GYRO_Z_STD_MIN: f32 = 0.002822359701688338;
/// Upper bound of the Z-axis angular rate standard deviation.
pub const GYRO_Z_STD_MAX: f32 = 0.5330640827579088;
