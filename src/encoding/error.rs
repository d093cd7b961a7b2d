//! Error types for encoding operations.

use thiserror::Error;

/// Result type for encoding operations.
pub type EncodingResult<T> = Result<T, EncodingError>;

/// Errors that can occur during encoding operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Invalid field value that cannot be encoded.
    #[error("Invalid field value: {field} = {value}")]
    InvalidFieldValue {
        /// Name of the field with invalid value.
        field: &'static str,
        /// String representation of the invalid value.
        value: String,
    },

    /// A flag announces a field that is not set.
    #[error("Missing required field: {field}")]
    MissingRequiredField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// Value exceeds the maximum allowed for its bit width.
    #[error("Value too large for field {field}: {actual_value} > {max_value} (max)")]
    ValueTooLarge {
        /// Name of the field.
        field: &'static str,
        /// Maximum allowed value.
        max_value: u64,
        /// Actual value provided.
        actual_value: u64,
    },

    /// A label has no entry in the lookup table it must be encoded through.
    #[error("No code for {field} label {label:?}")]
    UnresolvedLabel {
        /// Name of the field.
        field: &'static str,
        /// The label that could not be resolved.
        label: String,
    },

    /// The descriptor tag has no body encoder.
    #[error("Cannot encode splice descriptor with tag 0x{0:02x}")]
    UnsupportedDescriptorTag(u8),
}

impl EncodingError {
    /// Renames the field a primitive writer error refers to.
    pub(crate) fn for_field(self, field: &'static str) -> Self {
        match self {
            EncodingError::InvalidFieldValue { value, .. } => {
                EncodingError::InvalidFieldValue { field, value }
            }
            EncodingError::ValueTooLarge {
                max_value,
                actual_value,
                ..
            } => EncodingError::ValueTooLarge {
                field,
                max_value,
                actual_value,
            },
            other => other,
        }
    }
}
