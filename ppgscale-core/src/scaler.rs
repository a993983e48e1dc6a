//! Min-Max Scaler Bound Table
//!
//! ## Overview
//!
//! Every feature the downstream model consumes was min-max normalized at
//! training time. To reproduce that scaling on new data, each channel keeps
//! the `(min, max)` pair observed during calibration:
//!
//! ```text
//! normalize:    y = (x - min) / (max - min)
//! denormalize:  x = min + y * (max - min)
//! ```
//!
//! A reading equal to `min` maps to exactly `0.0` and a reading equal to
//! `max` maps to exactly `1.0`. Readings outside the calibration range map
//! outside `[0, 1]`; use `normalize_clamped` when the consumer cannot cope
//! with that.
//!
//! ## Table Layout
//!
//! `SCALER_TABLE` is a `static` array indexed by `Channel::index()`. It is
//! immutable and `Sync`, so any number of threads may read it at once.
//!
//! | Channel     | min                  | max                |
//! |-------------|----------------------|--------------------|
//! | IR_mean     | 84404.2              | 98791.36           |
//! | AccelX_std  | 0.016391747550371264 | 1.2035406269903506 |
//! | AccelY_std  | 0.01674808548303175  | 1.45481964040992   |
//! | AccelZ_std  | 0.015284566044990422 | 0.9990398606989143 |
//! | GyroX_std   | 0.00682375801662015  | 1.1534812974961794 |
//! | GyroY_std   | 0.002749693860510768 | 0.38653191435679213|
//! | GyroZ_std   | 0.002822359701688338 | 0.5330640827579088 |
//!
//! ## Usage
//!
//! ```rust
//! use ppgscale_core::{get_bound, scaler::bound, Channel};
//!
//! let ir = get_bound("IR_mean")?;
//! assert_eq!(ir.as_pair(), (84404.2, 98791.36));
//! assert_eq!(ir.normalize(84404.2), 0.0);
//!
//! // Typed access never fails
//! let gyro_z = bound(Channel::GyroZStd);
//! assert!(gyro_z.min < gyro_z.max);
//! # Ok::<(), ppgscale_core::ScalerError>(())
//! ```

use crate::channel::Channel;
use crate::constants::scaler::*;
use crate::errors::{ScalerError, ScalerResult};

/// Calibrated `(min, max)` range of one channel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalerBound {
    /// Channel this bound belongs to
    pub channel: Channel,
    /// Smallest calibrated value
    pub min: f32,
    /// Largest calibrated value
    pub max: f32,
}

impl ScalerBound {
    const fn new(channel: Channel, min: f32, max: f32) -> Self {
        Self { channel, min, max }
    }

    /// Bound as a plain `(min, max)` pair
    pub const fn as_pair(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// Width of the calibrated range
    pub fn range(&self) -> f32 {
        self.max - self.min
    }

    /// Whether `x` lies inside the calibrated range (inclusive)
    pub fn contains(&self, x: f32) -> bool {
        x >= self.min && x <= self.max
    }

    /// Rescale a raw value into the unit range
    ///
    /// Values outside `[min, max]` land outside `[0, 1]`. Non-finite input
    /// propagates as non-finite output.
    pub fn normalize(&self, x: f32) -> f32 {
        (x - self.min) / self.range()
    }

    /// Like `normalize`, but rejects NaN and infinities
    pub fn try_normalize(&self, x: f32) -> ScalerResult<f32> {
        if !x.is_finite() {
            return Err(ScalerError::InvalidValue);
        }
        Ok(self.normalize(x))
    }

    /// Rescale into `[0, 1]`, saturating at the ends
    ///
    /// NaN input yields `0.0`.
    pub fn normalize_clamped(&self, x: f32) -> f32 {
        let y = self.normalize(x);
        if y.is_nan() {
            log_warn!("{}: NaN reading clamped to 0", self.channel.name());
            return 0.0;
        }
        if !(0.0..=1.0).contains(&y) {
            log_debug!(
                "{}: reading {} outside [{}, {}], clamped",
                self.channel.name(), x, self.min, self.max
            );
        }
        y.clamp(0.0, 1.0)
    }

    /// Map a normalized value back to the raw scale
    pub fn denormalize(&self, y: f32) -> f32 {
        self.min + y * self.range()
    }
}

/// All scaler bounds, indexed by `Channel::index()`
pub static SCALER_TABLE: [ScalerBound; Channel::COUNT] = [
    ScalerBound::new(Channel::IrMean, IR_MEAN_MIN, IR_MEAN_MAX),
    ScalerBound::new(Channel::AccelXStd, ACCEL_X_STD_MIN, ACCEL_X_STD_MAX),
    ScalerBound::new(Channel::AccelYStd, ACCEL_Y_STD_MIN, ACCEL_Y_STD_MAX),
    ScalerBound::new(Channel::AccelZStd, ACCEL_Z_STD_MIN, ACCEL_Z_STD_MAX),
    ScalerBound::new(Channel::GyroXStd, GYRO_X_STD_MIN, GYRO_X_STD_MAX),
    ScalerBound::new(Channel::GyroYStd, GYRO_Y_STD_MIN, GYRO_Y_STD_MAX),
    ScalerBound::new(Channel::GyroZStd, GYRO_Z_STD_MIN, GYRO_Z_STD_MAX),
];

/// Bound for a known channel
pub fn bound(channel: Channel) -> ScalerBound {
    SCALER_TABLE[channel.index()]
}

/// Look up a bound by canonical channel name
///
/// Fails with `ScalerError::UnknownChannel` for any name outside the seven
/// defined channels.
pub fn get_bound(channel_name: &str) -> ScalerResult<ScalerBound> {
    let channel = Channel::from_name(channel_name).map_err(|err| {
        log_debug!("Scaler lookup for unknown channel '{}'", channel_name);
        err
    })?;
    Ok(bound(channel))
}

/// Iterate over every bound in table order
pub fn iter() -> impl Iterator<Item = &'static ScalerBound> {
    SCALER_TABLE.iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    #[allow(clippy::excessive_precision)]
    fn literal_values() {
        let expected: [(&str, f32, f32); Channel::COUNT] = [
            ("IR_mean", 84404.2, 98791.36),
            ("AccelX_std", 0.016391747550371264, 1.2035406269903506),
            ("AccelY_std", 0.01674808548303175, 1.45481964040992),
            ("AccelZ_std", 0.015284566044990422, 0.9990398606989143),
            ("GyroX_std", 0.00682375801662015, 1.1534812974961794),
            ("GyroY_std", 0.002749693860510768, 0.38653191435679213),
            ("GyroZ_std", 0.002822359701688338, 0.5330640827579088),
        ];

        for (name, min, max) in expected {
            let bound = get_bound(name).unwrap();
            assert_eq!(bound.min.to_bits(), min.to_bits(), "{name} min");
            assert_eq!(bound.max.to_bits(), max.to_bits(), "{name} max");
            assert_eq!(bound.channel.name(), name);
        }
    }

    #[test]
    fn min_below_max() {
        for bound in iter() {
            assert!(bound.min < bound.max, "{}", bound.channel);
        }
    }

    #[test]
    fn table_order_matches_channels() {
        for (bound, channel) in SCALER_TABLE.iter().zip(Channel::ALL) {
            assert_eq!(bound.channel, channel);
        }
    }

    #[test]
    fn unknown_channel() {
        assert_eq!(
            get_bound("Temperature"),
            Err(ScalerError::unknown_channel("Temperature"))
        );
        assert!(get_bound("").is_err());
    }

    #[test]
    fn endpoints_map_to_unit_range() {
        for bound in iter() {
            assert_eq!(bound.normalize(bound.min), 0.0, "{}", bound.channel);
            assert_eq!(bound.normalize(bound.max), 1.0, "{}", bound.channel);
        }
    }

    #[test]
    fn repeated_lookups_identical() {
        for channel in Channel::ALL {
            let first = get_bound(channel.name()).unwrap();
            for _ in 0..10 {
                assert_eq!(get_bound(channel.name()).unwrap(), first);
            }
        }
    }

    #[test]
    fn clamped_normalization() {
        let ir = bound(Channel::IrMean);
        assert_eq!(ir.normalize_clamped(0.0), 0.0);
        assert_eq!(ir.normalize_clamped(1.0e6), 1.0);
        assert_eq!(ir.normalize_clamped(f32::NAN), 0.0);
        assert!(ir.normalize(1.0e6) > 1.0);
    }

    #[test]
    fn try_normalize_rejects_non_finite() {
        let accel = bound(Channel::AccelXStd);
        assert_eq!(accel.try_normalize(f32::NAN), Err(ScalerError::InvalidValue));
        assert_eq!(accel.try_normalize(f32::INFINITY), Err(ScalerError::InvalidValue));
        assert!(accel.try_normalize(0.5).is_ok());
    }

    #[test]
    fn contains_is_inclusive() {
        let gyro = bound(Channel::GyroYStd);
        assert!(gyro.contains(gyro.min));
        assert!(gyro.contains(gyro.max));
        assert!(!gyro.contains(gyro.max * 2.0));
    }

    proptest! {
        #[test]
        fn normalize_denormalize_inverse(idx in 0usize..Channel::COUNT, t in 0.0f32..=1.0) {
            let bound = SCALER_TABLE[idx];
            let x = bound.denormalize(t);
            let back = bound.normalize(x);
            prop_assert!((back - t).abs() < 1e-3, "t={} back={}", t, back);
        }

        #[test]
        fn in_range_values_stay_in_unit_interval(idx in 0usize..Channel::COUNT, t in 0.0f32..=1.0) {
            let bound = SCALER_TABLE[idx];
            let x = bound.min + t * (bound.max - bound.min);
            if bound.contains(x) {
                let y = bound.normalize(x);
                prop_assert!((0.0..=1.0).contains(&y));
            }
        }
    }
}
