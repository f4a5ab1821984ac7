//! Contract error types for the settings container
//!
//! Every failure is raised where it is detected and carries structured
//! fields so callers can branch on the kind of problem.

use super::model::ValueKind;

/// Error returned by an encoder when a value has no textual representation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("maximum nesting depth of {max_depth} exceeded")]
    DepthExceeded { max_depth: usize },

    #[error("{0}")]
    Serialization(String),

    /// Refused by a custom encoder
    #[error("{0}")]
    Rejected(String),
}

/// Settings container errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A value could not be encoded and was not stored
    #[error("Failed to encode setting '{name}' ({kind}): {source}")]
    Validation {
        /// Setting name
        name: String,
        /// Shape of the rejected value
        kind: ValueKind,
        /// Encoder failure
        #[source]
        source: EncodingError,
    },

    /// A required setting is absent
    #[error("Setting '{name}' is not available")]
    MissingKey {
        /// Setting name
        name: String,
    },

    /// A setting cannot be read as nested settings
    #[error("Cannot get {name} as settings: {kind}")]
    NotSettings {
        /// Setting name
        name: String,
        /// Shape of the stored value
        kind: ValueKind,
    },

    /// The canonical document could not be encoded
    #[error("Failed to encode settings document: {0}")]
    Encoding(#[from] EncodingError),
}
