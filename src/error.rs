use thiserror::Error;

/// Result type alias for governor operations
pub type Result<T> = std::result::Result<T, GovernorError>;

/// Errors raised while parsing or configuring limits
///
/// A host refusing to change the time limit is not an error; it is reported
/// as `false` from the time-limit increase.
#[derive(Error, Debug)]
pub enum GovernorError {
    /// Memory size matched none of the accepted notations
    #[error("malformed size {input:?}: {reason}")]
    MalformedSize { input: String, reason: String },

    /// Configuration could not be decoded
    #[error("invalid governor configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl GovernorError {
    pub(crate) fn malformed_size(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSize {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if a size could not be parsed
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedSize { .. })
    }

    /// Returns true if this came from configuration decoding
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
