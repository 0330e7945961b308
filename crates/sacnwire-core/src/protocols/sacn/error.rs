use std::fmt;

use thiserror::Error;

/// Which PDU a structural check failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Root,
    Framing,
    Data,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layer::Root => "root",
            Layer::Framing => "framing",
            Layer::Data => "data",
        };
        f.write_str(name)
    }
}

/// Errors returned by the strict sACN decoding APIs.
///
/// # Examples
/// ```
/// use sacnwire_core::SacnError;
///
/// let err = SacnError::InvalidStartCode { value: 1 };
/// assert!(err.to_string().contains("invalid start code"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SacnError {
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("{layer} layer length mismatch: declared {declared}, expected {expected}")]
    LengthMismatch {
        layer: Layer,
        declared: usize,
        expected: usize,
    },
    #[error("invalid property value count: {count}")]
    InvalidPropertyValueCount { count: u16 },
    #[error("invalid ACN PID")]
    InvalidAcnPid,
    #[error("invalid root vector: {value}")]
    InvalidRootVector { value: u32 },
    #[error("invalid framing vector: {value}")]
    InvalidFramingVector { value: u32 },
    #[error("invalid DMP vector: {value}")]
    InvalidDmpVector { value: u8 },
    #[error("invalid DMP address type: {value:#04x}")]
    InvalidAddressType { value: u8 },
    #[error("invalid start code: {value}")]
    InvalidStartCode { value: u8 },
}
