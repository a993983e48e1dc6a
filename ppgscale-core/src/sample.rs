//! Raw IMU + PPG samples as sent by the sensor node
//!
//! The node emits one UTF-8 datagram per sample, eight comma-separated
//! fields in a fixed order:
//!
//! ```text
//! ESP_ms,AccelX,AccelY,AccelZ,GyroX,GyroY,GyroZ,IR
//! 123456,0.012,-0.981,0.104,0.51,-0.02,0.33,91234
//! ```
//!
//! `ESP_ms` is the node's `millis()` counter (wraps after ~49 days), the
//! IMU axes are floats in the node's native units and `IR` is the raw
//! infrared count from the PPG front-end.

use core::fmt;
use core::str::FromStr;

use thiserror_no_std::Error;

/// Number of fields in one datagram
pub const SAMPLE_FIELD_COUNT: usize = 8;

/// Sample parsing errors
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SampleError {
    /// Wrong number of comma-separated fields
    #[error("Expected {expected} fields, found {found}")]
    FieldCount {
        /// Fields a sample must have
        expected: usize,
        /// Fields actually present
        found: usize,
    },

    /// Field is not a number
    #[error("Field {field} is not a number")]
    InvalidField {
        /// Column name of the offending field
        field: &'static str,
    },

    /// Field parsed but is NaN or infinite
    #[error("Field {field} is not finite")]
    InvalidValue {
        /// Column name of the offending field
        field: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for SampleError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::FieldCount { expected, found } =>
                defmt::write!(fmt, "Expected {} fields, found {}", expected, found),
            Self::InvalidField { field } =>
                defmt::write!(fmt, "Field {=str} not a number", field),
            Self::InvalidValue { field } =>
                defmt::write!(fmt, "Field {=str} not finite", field),
        }
    }
}

/// One decoded sample
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionSample {
    /// Node uptime in milliseconds
    pub esp_ms: u32,
    /// Acceleration X, Y, Z
    pub accel: [f32; 3],
    /// Angular rate X, Y, Z
    pub gyro: [f32; 3],
    /// Raw infrared count
    pub ir: f32,
}

impl MotionSample {
    /// Column names in datagram order
    pub const CSV_FIELDS: [&'static str; SAMPLE_FIELD_COUNT] = [
        "ESP_ms",
        "AccelX", "AccelY", "AccelZ",
        "GyroX", "GyroY", "GyroZ",
        "IR",
    ];

    /// Parse one datagram payload
    ///
    /// Surrounding whitespace on the line and on each field is ignored.
    pub fn parse(line: &str) -> Result<Self, SampleError> {
        let mut fields = [""; SAMPLE_FIELD_COUNT];
        let mut found = 0;
        for field in line.trim().split(',') {
            if found < SAMPLE_FIELD_COUNT {
                fields[found] = field.trim();
            }
            found += 1;
        }

        if found != SAMPLE_FIELD_COUNT {
            return Err(SampleError::FieldCount { expected: SAMPLE_FIELD_COUNT, found });
        }

        let esp_ms = fields[0]
            .parse::<u32>()
            .map_err(|_| SampleError::InvalidField { field: Self::CSV_FIELDS[0] })?;

        let mut values = [0.0f32; SAMPLE_FIELD_COUNT - 1];
        for (i, slot) in values.iter_mut().enumerate() {
            *slot = parse_float(fields[i + 1], Self::CSV_FIELDS[i + 1])?;
        }

        Ok(Self {
            esp_ms,
            accel: [values[0], values[1], values[2]],
            gyro: [values[3], values[4], values[5]],
            ir: values[6],
        })
    }
}

fn parse_float(text: &str, field: &'static str) -> Result<f32, SampleError> {
    let value = text
        .parse::<f32>()
        .map_err(|_| SampleError::InvalidField { field })?;
    if !value.is_finite() {
        return Err(SampleError::InvalidValue { field });
    }
    Ok(value)
}

impl FromStr for MotionSample {
    type Err = SampleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Formats the sample back into datagram form
impl fmt::Display for MotionSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{},{}",
            self.esp_ms,
            self.accel[0], self.accel[1], self.accel[2],
            self.gyro[0], self.gyro[1], self.gyro[2],
            self.ir,
        )
    }
}
