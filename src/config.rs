use crate::raw::time_to_canonical;
use crate::{CanonicalSize, RawLimitValue, Result};
use serde::{Deserialize, Serialize};

/// Administrator ceiling for the memory limit
///
/// Keeps the value in the representation it was set with, next to its parsed
/// form. Defaults to no ceiling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLimitMax {
    raw: Option<RawLimitValue>,
    ceiling: Option<CanonicalSize>,
}

impl MemoryLimitMax {
    /// Build a ceiling, validating the value (`None` means no ceiling)
    pub fn new(value: Option<RawLimitValue>) -> Result<Self> {
        let ceiling = value.as_ref().map(RawLimitValue::to_canonical).transpose()?;
        Ok(Self { raw: value, ceiling })
    }

    /// Replace the ceiling. On error the previous value is kept.
    pub fn set(&mut self, value: Option<RawLimitValue>) -> Result<()> {
        *self = Self::new(value)?;
        Ok(())
    }

    /// The value as it was set
    pub fn get(&self) -> Option<&RawLimitValue> {
        self.raw.as_ref()
    }

    /// Effective ceiling; `Unlimited` when none is configured
    pub fn ceiling(&self) -> CanonicalSize {
        self.ceiling.unwrap_or(CanonicalSize::Unlimited)
    }
}

/// Administrator ceiling for the execution time limit, in seconds
///
/// `Some(0)` and `None` both leave the time limit unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeLimitMax {
    seconds: Option<u64>,
}

impl TimeLimitMax {
    pub fn new(seconds: Option<u64>) -> Self {
        Self { seconds }
    }

    pub fn set(&mut self, seconds: Option<u64>) {
        self.seconds = seconds;
    }

    pub fn get(&self) -> Option<u64> {
        self.seconds
    }

    pub fn ceiling(&self) -> CanonicalSize {
        self.seconds
            .map(time_to_canonical)
            .unwrap_or(CanonicalSize::Unlimited)
    }
}

/// Ceiling configuration for a governor
///
/// ```json
/// { "memory_limit_max": "512M", "time_limit_max": 7200 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GovernorConfig {
    /// Memory ceiling (size notation or bytes, `-1` for none)
    pub memory_limit_max: Option<RawLimitValue>,
    /// Time ceiling in seconds (`0` for none)
    pub time_limit_max: Option<u64>,
}

impl GovernorConfig {
    /// Decode a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate and split into per-resource ceilings
    pub fn into_ceilings(self) -> Result<(MemoryLimitMax, TimeLimitMax)> {
        Ok((
            MemoryLimitMax::new(self.memory_limit_max)?,
            TimeLimitMax::new(self.time_limit_max),
        ))
    }
}
