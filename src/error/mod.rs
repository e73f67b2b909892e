// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

#[allow(clippy::result_large_err)]
#[derive(Debug, Error)]
pub enum VpcError {
    /// Top-level input is not a JSON object (or not JSON at all).
    #[error("Malformed input for {family}: {reason}")]
    MalformedInput { family: &'static str, reason: String },

    /// A present field holds a value of the wrong type for the variant being decoded.
    #[error("Field type error in {family}/{variant}: field `{field}`: {source}")]
    FieldType {
        family: &'static str,
        variant: &'static str,
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Encode error for field `{field}`: {reason}")]
    Encode { field: String, reason: String },

    /// Only raised by dispatch tables built without a generic fallback.
    #[error("No variant of {family} matches the input")]
    AmbiguousVariant { family: &'static str },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl VpcError {
    /// Whether an HTTP layer may retry the call that produced this error.
    ///
    /// Codec errors indicate a contract mismatch between client and server,
    /// never a transient failure. Config and validation errors need a caller
    /// fix. None of the current variants are retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            VpcError::MalformedInput { .. }
            | VpcError::FieldType { .. }
            | VpcError::Encode { .. }
            | VpcError::AmbiguousVariant { .. }
            | VpcError::Config(_)
            | VpcError::Validation(_) => false,
        }
    }

    /// Whether this error was produced by the JSON codec.
    #[must_use]
    pub fn is_codec_error(&self) -> bool {
        matches!(
            self,
            VpcError::MalformedInput { .. }
                | VpcError::FieldType { .. }
                | VpcError::Encode { .. }
                | VpcError::AmbiguousVariant { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, VpcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_message_names_everything() {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = VpcError::FieldType {
            family: "SecurityGroupRule",
            variant: "SecurityGroupRuleTcpUdp",
            field: "port_min".to_string(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("SecurityGroupRule/SecurityGroupRuleTcpUdp"));
        assert!(msg.contains("`port_min`"));
        assert!(err.is_codec_error());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_config_error_is_not_codec_error() {
        let err = VpcError::Config("missing".to_string());
        assert!(!err.is_codec_error());
        assert!(!err.is_retryable());
        assert!(!VpcError::Validation("version".to_string()).is_retryable());
        assert!(!VpcError::AmbiguousVariant { family: "Shape" }.is_retryable());
        assert_eq!(err.to_string(), "Configuration error: missing");
    }
}
