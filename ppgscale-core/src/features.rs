//! Windowed Feature Extraction
//!
//! ## Overview
//!
//! The scaler bounds describe seven window-level features, not raw samples.
//! This module turns a sliding window of `MotionSample`s into exactly those
//! features, in channel order:
//!
//! | Channel     | Feature                                      |
//! |-------------|----------------------------------------------|
//! | IR_mean     | mean of `ir` over the window                 |
//! | AccelX_std  | population std deviation of `accel[0]`       |
//! | AccelY_std  | population std deviation of `accel[1]`       |
//! | AccelZ_std  | population std deviation of `accel[2]`       |
//! | GyroX_std   | population std deviation of `gyro[0]`        |
//! | GyroY_std   | population std deviation of `gyro[1]`        |
//! | GyroZ_std   | population std deviation of `gyro[2]`        |
//!
//! ## Numerics
//!
//! Raw IR counts sit around 9e4, so sums are accumulated in `f64` and the
//! variance uses the two-pass formula (mean first, then squared deviations)
//! to avoid the cancellation of `E[x²] - E[x]²`. Results are narrowed to
//! `f32` to match the scaler table.
//!
//! ## Memory
//!
//! The window is a `heapless::Deque` sized at compile time; `with_limit`
//! shortens the effective window at runtime without reallocating.
//!
//! ```rust
//! use ppgscale_core::{Channel, FeatureWindow, MotionSample};
//!
//! let mut window: FeatureWindow<8> = FeatureWindow::new();
//! for i in 0..8u32 {
//!     let t = i as f32;
//!     window.push(MotionSample { esp_ms: i * 20, accel: [t, 0.0, 1.0], gyro: [0.0; 3], ir: 90000.0 });
//! }
//! let features = window.extract()?;
//! assert_eq!(features.get(Channel::IrMean), 90000.0);
//! assert_eq!(features.get(Channel::AccelYStd), 0.0);
//!
//! let scaled = features.normalized();
//! assert!(scaled.get(Channel::IrMean) > 0.0);
//! # Ok::<(), ppgscale_core::features::FeatureError>(())
//! ```

use heapless::Deque;
use thiserror_no_std::Error;

use crate::channel::Channel;
use crate::constants::MIN_FEATURE_SAMPLES;
use crate::sample::MotionSample;
use crate::scaler::{ScalerBound, SCALER_TABLE};

/// Feature extraction errors
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum FeatureError {
    /// Not enough samples in the window
    #[error("Insufficient data: need {required}, have {available}")]
    InsufficientData {
        /// Minimum number of samples needed
        required: usize,
        /// Samples currently held
        available: usize,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for FeatureError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InsufficientData { required, available } =>
                defmt::write!(fmt, "Need {} samples, have {}", required, available),
        }
    }
}

/// One value per channel, in `Channel::ALL` order
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureVector {
    values: [f32; Channel::COUNT],
}

impl FeatureVector {
    /// Wrap values already in channel order
    pub const fn from_array(values: [f32; Channel::COUNT]) -> Self {
        Self { values }
    }

    /// Value of one channel
    pub fn get(&self, channel: Channel) -> f32 {
        self.values[channel.index()]
    }

    /// Values in channel order, ready to feed a model
    pub const fn as_array(&self) -> &[f32; Channel::COUNT] {
        &self.values
    }

    /// `(channel, value)` pairs in channel order
    pub fn iter(&self) -> impl Iterator<Item = (Channel, f32)> + '_ {
        Channel::ALL.iter().copied().zip(self.values.iter().copied())
    }

    /// Min-max normalize every channel with its scaler bound
    pub fn normalized(&self) -> Self {
        self.map_with_bounds(|bound, x| bound.normalize(x))
    }

    /// Normalize and saturate every channel into `[0, 1]`
    pub fn normalized_clamped(&self) -> Self {
        self.map_with_bounds(|bound, x| bound.normalize_clamped(x))
    }

    /// Undo `normalized`
    pub fn denormalized(&self) -> Self {
        self.map_with_bounds(|bound, y| bound.denormalize(y))
    }

    fn map_with_bounds(&self, f: impl Fn(&ScalerBound, f32) -> f32) -> Self {
        let mut values = self.values;
        for (value, bound) in values.iter_mut().zip(SCALER_TABLE.iter()) {
            *value = f(bound, *value);
        }
        Self { values }
    }
}

/// Sliding window of samples, oldest first
#[derive(Debug, Clone)]
pub struct FeatureWindow<const N: usize> {
    samples: Deque<MotionSample, N>,
    limit: usize,
    total_pushed: u64,
}

impl<const N: usize> FeatureWindow<N> {
    const CAPACITY_OK: () = assert!(
        N >= MIN_FEATURE_SAMPLES,
        "FeatureWindow capacity must be at least MIN_FEATURE_SAMPLES"
    );

    /// Empty window holding up to `N` samples
    ///
    /// `N` below `MIN_FEATURE_SAMPLES` fails to compile.
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CAPACITY_OK;
        Self {
            samples: Deque::new(),
            limit: N,
            total_pushed: 0,
        }
    }

    /// Shorten the effective window
    ///
    /// Clamped to `MIN_FEATURE_SAMPLES..=N`.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(MIN_FEATURE_SAMPLES).min(N);
        self
    }

    /// Effective window length
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Samples currently held
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no samples are held
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// True once the effective window is full
    pub fn is_ready(&self) -> bool {
        self.samples.len() >= self.limit
    }

    /// Samples pushed since creation or the last `clear`
    pub fn total_pushed(&self) -> u64 {
        self.total_pushed
    }

    /// Add a sample, evicting the oldest when the window is full
    pub fn push(&mut self, sample: MotionSample) {
        while self.samples.len() >= self.limit && self.samples.pop_front().is_some() {}
        // limit <= N, so the pop above always leaves room
        let _ = self.samples.push_back(sample);
        self.total_pushed += 1;
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.samples.clear();
        self.total_pushed = 0;
    }

    /// Iterate samples oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &MotionSample> {
        self.samples.iter()
    }

    /// Compute the seven channel features over the current window
    pub fn extract(&self) -> Result<FeatureVector, FeatureError> {
        let count = self.samples.len();
        if count < MIN_FEATURE_SAMPLES {
            return Err(FeatureError::InsufficientData {
                required: MIN_FEATURE_SAMPLES,
                available: count,
            });
        }

        let n = count as f64;
        let mut sums = [0.0f64; Channel::COUNT];
        for sample in self.samples.iter() {
            for (sum, x) in sums.iter_mut().zip(raw_channels(sample)) {
                *sum += x as f64;
            }
        }
        let means = sums.map(|s| s / n);

        let mut squared = [0.0f64; Channel::COUNT];
        for sample in self.samples.iter() {
            for ((acc, x), mean) in squared.iter_mut().zip(raw_channels(sample)).zip(means) {
                let d = x as f64 - mean;
                *acc += d * d;
            }
        }

        let mut values = [0.0f32; Channel::COUNT];
        values[Channel::IrMean.index()] = means[Channel::IrMean.index()] as f32;
        for channel in &Channel::ALL[1..] {
            let i = channel.index();
            values[i] = libm::sqrt(squared[i] / n) as f32;
        }

        Ok(FeatureVector::from_array(values))
    }
}

impl<const N: usize> Default for FeatureWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-sample source value of each channel, in channel order
fn raw_channels(sample: &MotionSample) -> [f32; Channel::COUNT] {
    [
        sample.ir,
        sample.accel[0], sample.accel[1], sample.accel[2],
        sample.gyro[0], sample.gyro[1], sample.gyro[2],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample(ir: f32, accel: [f32; 3], gyro: [f32; 3]) -> MotionSample {
        MotionSample { esp_ms: 0, accel, gyro, ir }
    }

    #[test]
    fn needs_two_samples() {
        let mut window: FeatureWindow<4> = FeatureWindow::new();
        assert_eq!(
            window.extract(),
            Err(FeatureError::InsufficientData { required: 2, available: 0 })
        );
        window.push(sample(90000.0, [0.0; 3], [0.0; 3]));
        assert_eq!(
            window.extract(),
            Err(FeatureError::InsufficientData { required: 2, available: 1 })
        );
    }

    #[test]
    fn mean_and_population_std() {
        let mut window: FeatureWindow<4> = FeatureWindow::new();
        // AccelX alternates 1, -1 -> population std 1
        // GyroZ is 2, 4, 4, 4 -> mean 3.5, var 0.75
        window.push(sample(90000.0, [1.0, 0.0, 0.0], [0.0, 0.0, 2.0]));
        window.push(sample(90002.0, [-1.0, 0.0, 0.0], [0.0, 0.0, 4.0]));
        window.push(sample(90004.0, [1.0, 0.0, 0.0], [0.0, 0.0, 4.0]));
        window.push(sample(90006.0, [-1.0, 0.0, 0.0], [0.0, 0.0, 4.0]));

        let f = window.extract().unwrap();
        assert_eq!(f.get(Channel::IrMean), 90003.0);
        assert_eq!(f.get(Channel::AccelXStd), 1.0);
        assert_eq!(f.get(Channel::AccelYStd), 0.0);
        assert!((f.get(Channel::GyroZStd) - 0.75f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn oldest_sample_evicted() {
        let mut window: FeatureWindow<3> = FeatureWindow::new();
        for ir in [1.0, 2.0, 3.0, 4.0, 5.0] {
            window.push(sample(ir, [0.0; 3], [0.0; 3]));
        }
        assert_eq!(window.len(), 3);
        assert_eq!(window.total_pushed(), 5);
        let irs: Vec<f32> = window.iter().map(|s| s.ir).collect();
        assert_eq!(irs, vec![3.0, 4.0, 5.0]);
        assert_eq!(window.extract().unwrap().get(Channel::IrMean), 4.0);
    }

    #[test]
    fn runtime_limit() {
        let mut window: FeatureWindow<16> = FeatureWindow::new().with_limit(4);
        assert_eq!(window.limit(), 4);
        for i in 0..10 {
            window.push(sample(i as f32, [0.0; 3], [0.0; 3]));
            assert!(window.len() <= 4);
        }
        assert!(window.is_ready());

        assert_eq!(FeatureWindow::<16>::new().with_limit(0).limit(), MIN_FEATURE_SAMPLES);
        assert_eq!(FeatureWindow::<16>::new().with_limit(100).limit(), 16);
    }

    #[test]
    fn smallest_capacity_extracts() {
        let mut window: FeatureWindow<MIN_FEATURE_SAMPLES> = FeatureWindow::new();
        window.push(sample(1.0, [0.0; 3], [0.0; 3]));
        window.push(sample(3.0, [0.0; 3], [0.0; 3]));
        window.push(sample(5.0, [0.0; 3], [0.0; 3]));
        assert_eq!(window.len(), MIN_FEATURE_SAMPLES);
        assert_eq!(window.extract().unwrap().get(Channel::IrMean), 4.0);
    }

    #[test]
    fn clear_resets() {
        let mut window: FeatureWindow<4> = FeatureWindow::new();
        window.push(sample(1.0, [0.0; 3], [0.0; 3]));
        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.total_pushed(), 0);
    }

    #[test]
    fn normalized_uses_table() {
        let mut raw = [0.0f32; Channel::COUNT];
        for (value, bound) in raw.iter_mut().zip(SCALER_TABLE.iter()) {
            *value = bound.max;
        }
        let scaled = FeatureVector::from_array(raw).normalized();
        for (_, y) in scaled.iter() {
            assert_eq!(y, 1.0);
        }
    }

    #[test]
    fn clamped_vector() {
        let scaled = FeatureVector::from_array([0.0; Channel::COUNT]).normalized_clamped();
        for (channel, y) in scaled.iter() {
            assert!((0.0..=1.0).contains(&y), "{channel}");
        }
        // IR 0 is far below the calibrated range
        assert_eq!(scaled.get(Channel::IrMean), 0.0);
    }

    proptest! {
        #[test]
        fn std_features_non_negative(
            values in prop::collection::vec((-10.0f32..10.0, 80000.0f32..100000.0), 2..32)
        ) {
            let mut window: FeatureWindow<32> = FeatureWindow::new();
            for (a, ir) in &values {
                window.push(sample(*ir, [*a, *a * 0.5, 0.0], [*a, 0.0, -*a]));
            }
            let f = window.extract().unwrap();
            for channel in &Channel::ALL[1..] {
                prop_assert!(f.get(*channel) >= 0.0);
            }
            let ir = f.get(Channel::IrMean);
            prop_assert!((80000.0..=100000.0).contains(&ir));
        }
    }
}
