//! Feature channel identities
//!
//! A channel is one named, sensor-derived quantity with its own scaler
//! bound. The canonical names match the column names the model was trained
//! on (`IR_mean`, `AccelX_std`, ...) and are matched case-sensitively.

use core::fmt;
use core::str::FromStr;

use crate::errors::{ScalerError, ScalerResult};

/// One of the seven feature channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    /// Mean infrared count over the window
    #[cfg_attr(feature = "serde", serde(rename = "IR_mean"))]
    IrMean,
    /// Standard deviation of X-axis acceleration
    #[cfg_attr(feature = "serde", serde(rename = "AccelX_std"))]
    AccelXStd,
    /// Standard deviation of Y-axis acceleration
    #[cfg_attr(feature = "serde", serde(rename = "AccelY_std"))]
    AccelYStd,
    /// Standard deviation of Z-axis acceleration
    #[cfg_attr(feature = "serde", serde(rename = "AccelZ_std"))]
    AccelZStd,
    /// Standard deviation of X-axis angular rate
    #[cfg_attr(feature = "serde", serde(rename = "GyroX_std"))]
    GyroXStd,
    /// Standard deviation of Y-axis angular rate
    #[cfg_attr(feature = "serde", serde(rename = "GyroY_std"))]
    GyroYStd,
    /// Standard deviation of Z-axis angular rate
    #[cfg_attr(feature = "serde", serde(rename = "GyroZ_std"))]
    GyroZStd,
}

impl Channel {
    /// Number of channels
    pub const COUNT: usize = 7;

    /// All channels in table (and model input) order
    pub const ALL: [Channel; Self::COUNT] = [
        Channel::IrMean,
        Channel::AccelXStd,
        Channel::AccelYStd,
        Channel::AccelZStd,
        Channel::GyroXStd,
        Channel::GyroYStd,
        Channel::GyroZStd,
    ];

    /// Canonical channel name
    pub const fn name(self) -> &'static str {
        match self {
            Channel::IrMean => "IR_mean",
            Channel::AccelXStd => "AccelX_std",
            Channel::AccelYStd => "AccelY_std",
            Channel::AccelZStd => "AccelZ_std",
            Channel::GyroXStd => "GyroX_std",
            Channel::GyroYStd => "GyroY_std",
            Channel::GyroZStd => "GyroZ_std",
        }
    }

    /// Position of this channel in `ALL` and in the scaler table
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Resolve a canonical name, failing with `UnknownChannel`
    pub fn from_name(name: &str) -> ScalerResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|channel| channel.name() == name)
            .ok_or_else(|| ScalerError::unknown_channel(name))
    }
}

impl FromStr for Channel {
    type Err = ScalerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Channel {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.name())
    }
}
