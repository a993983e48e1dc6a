//! Error Types for Scaler Lookups
//!
//! The scaler table is static data, so there is very little that can go
//! wrong: a caller can ask for a channel that does not exist, or hand a
//! non-finite reading to a normalization routine that refuses them.
//!
//! Errors stay small and allocation-free so they can be returned from
//! firmware hot paths. The offending channel name is copied into a bounded
//! `heapless::String` (truncated at `MAX_CHANNEL_NAME_LEN` bytes) so the
//! error owns its context without borrowing from the caller.
//!
//! ```rust
//! use ppgscale_core::{get_bound, ScalerError};
//!
//! match get_bound("Temperature") {
//!     Ok(bound) => { let _ = bound.normalize(1.0); }
//!     Err(ScalerError::UnknownChannel { name }) => {
//!         assert_eq!(name.as_str(), "Temperature");
//!     }
//!     Err(_) => {}
//! }
//! ```

use thiserror_no_std::Error;

use crate::constants::MAX_CHANNEL_NAME_LEN;

/// Owned, bounded copy of a channel name
pub type ChannelName = heapless::String<MAX_CHANNEL_NAME_LEN>;

/// Result type for scaler operations
pub type ScalerResult<T> = Result<T, ScalerError>;

/// Scaler errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScalerError {
    /// Requested channel is not one of the seven known channels
    #[error("Unknown channel: {name}")]
    UnknownChannel {
        /// The name that was looked up (possibly truncated)
        name: ChannelName,
    },

    /// Reading is NaN or infinite and cannot be rescaled
    #[error("Invalid value: not a finite number")]
    InvalidValue,
}

impl ScalerError {
    /// Build an `UnknownChannel` error, truncating the name at a char boundary
    pub fn unknown_channel(name: &str) -> Self {
        let mut owned = ChannelName::new();
        for ch in name.chars() {
            if owned.push(ch).is_err() {
                break;
            }
        }
        Self::UnknownChannel { name: owned }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ScalerError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::UnknownChannel { name } =>
                defmt::write!(fmt, "Unknown channel: {=str}", name.as_str()),
            Self::InvalidValue =>
                defmt::write!(fmt, "Invalid value"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_channel_keeps_name() {
        let err = ScalerError::unknown_channel("Temperature");
        assert_eq!(
            err,
            ScalerError::UnknownChannel { name: ChannelName::try_from("Temperature").unwrap() }
        );
    }

    #[test]
    fn unknown_channel_truncates_long_names() {
        let long = "x".repeat(MAX_CHANNEL_NAME_LEN + 10);
        match ScalerError::unknown_channel(&long) {
            ScalerError::UnknownChannel { name } => assert_eq!(name.len(), MAX_CHANNEL_NAME_LEN),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // 3-byte chars: 10 fit in 30 bytes, the 11th would overflow 32
        let wide = "€".repeat(12);
        match ScalerError::unknown_channel(&wide) {
            ScalerError::UnknownChannel { name } => {
                assert_eq!(name.len(), 30);
                assert!(wide.starts_with(name.as_str()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn display_names_channel() {
        let err = ScalerError::unknown_channel("Temperature");
        assert_eq!(err.to_string(), "Unknown channel: Temperature");
    }
}
