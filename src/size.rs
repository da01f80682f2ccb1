use crate::{GovernorError, Result};

pub const KB: u64 = 1024;
pub const MB: u64 = KB * 1024;
pub const GB: u64 = MB * 1024;

/// Normalized magnitude used for every limit comparison
///
/// Memory limits count bytes, time limits count seconds. `Unlimited` sorts
/// above every finite value, so the derived ordering is the comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanonicalSize {
    Finite(u64),
    Unlimited,
}

impl CanonicalSize {
    pub fn finite(value: u64) -> Self {
        Self::Finite(value)
    }

    /// Returns true for the unlimited sentinel
    pub fn is_unlimited(&self) -> bool {
        matches!(self, Self::Unlimited)
    }

    /// Get the finite magnitude, if any
    pub fn as_finite(&self) -> Option<u64> {
        match self {
            Self::Finite(n) => Some(*n),
            Self::Unlimited => None,
        }
    }
}

impl std::fmt::Display for CanonicalSize {
    /// Writes the canonical text form: the largest unit that divides evenly.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Unlimited => write!(f, "unlimited"),
            Self::Finite(0) => write!(f, "0"),
            Self::Finite(n) if n % GB == 0 => write!(f, "{}G", n / GB),
            Self::Finite(n) if n % MB == 0 => write!(f, "{}M", n / MB),
            Self::Finite(n) if n % KB == 0 => write!(f, "{}K", n / KB),
            Self::Finite(n) => write!(f, "{}", n),
        }
    }
}

impl std::str::FromStr for CanonicalSize {
    type Err = GovernorError;

    fn from_str(s: &str) -> Result<Self> {
        parse_size(s)
    }
}

/// Parse a human-readable size such as `512M`, `109600K`, `1g`, `4096`,
/// `-1` or `unlimited`
pub fn parse_size(input: &str) -> Result<CanonicalSize> {
    let trimmed = input.trim();

    if trimmed == "-1" || trimmed.eq_ignore_ascii_case("unlimited") {
        return Ok(CanonicalSize::Unlimited);
    }

    let malformed = |reason: &str| GovernorError::malformed_size(input, reason);

    let Some(last) = trimmed.chars().last() else {
        return Err(malformed("empty size"));
    };

    let (digits, multiplier) = match last.to_ascii_uppercase() {
        'K' => (&trimmed[..trimmed.len() - 1], KB),
        'M' => (&trimmed[..trimmed.len() - 1], MB),
        'G' => (&trimmed[..trimmed.len() - 1], GB),
        c if c.is_ascii_digit() => (trimmed, 1),
        _ => return Err(malformed("unknown unit suffix")),
    };

    if digits.is_empty() {
        return Err(malformed("missing magnitude"));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed("magnitude must be a non-negative integer"));
    }

    digits
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .map(CanonicalSize::Finite)
        .ok_or_else(|| malformed("magnitude out of range"))
}
