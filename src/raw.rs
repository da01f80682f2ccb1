use crate::size::parse_size;
use crate::{CanonicalSize, GovernorError, Result};
use serde::{Deserialize, Serialize};

/// Memory limit value as exchanged with a `LimitStore`
///
/// Either a plain integer (bytes, `-1` for unlimited) or size notation such
/// as `"512M"`. Converted to `CanonicalSize` as soon as it crosses the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLimitValue {
    Int(i64),
    Text(String),
}

/// Integer marker for an unlimited memory limit
pub const MEMORY_UNLIMITED: i64 = -1;

/// Seconds value meaning "no time limit"
pub const TIME_UNLIMITED: u64 = 0;

impl RawLimitValue {
    /// Decode using the memory convention (`-1` means unlimited)
    pub fn to_canonical(&self) -> Result<CanonicalSize> {
        match self {
            Self::Int(MEMORY_UNLIMITED) => Ok(CanonicalSize::Unlimited),
            Self::Int(n) => u64::try_from(*n)
                .map(CanonicalSize::Finite)
                .map_err(|_| GovernorError::malformed_size(n.to_string(), "negative byte count")),
            Self::Text(s) => parse_size(s),
        }
    }

    /// Encode using the memory convention: `-1` for unlimited, size notation otherwise
    pub fn from_canonical(size: CanonicalSize) -> Self {
        match size {
            CanonicalSize::Unlimited => Self::Int(MEMORY_UNLIMITED),
            finite => Self::Text(finite.to_string()),
        }
    }
}

/// Decode a time limit in seconds (`0` means unlimited)
pub fn time_to_canonical(seconds: u64) -> CanonicalSize {
    match seconds {
        TIME_UNLIMITED => CanonicalSize::Unlimited,
        n => CanonicalSize::Finite(n),
    }
}

/// Encode a time limit in seconds
pub fn time_from_canonical(size: CanonicalSize) -> u64 {
    size.as_finite().unwrap_or(TIME_UNLIMITED)
}

impl std::fmt::Display for RawLimitValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for RawLimitValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawLimitValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for RawLimitValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for RawLimitValue {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl From<u32> for RawLimitValue {
    fn from(n: u32) -> Self {
        Self::Int(n.into())
    }
}

impl From<u64> for RawLimitValue {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => Self::Int(n),
            // Too large for the integer form, keep it as bare bytes text
            Err(_) => Self::Text(n.to_string()),
        }
    }
}
