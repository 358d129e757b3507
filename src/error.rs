//! Core error types and result handling
//!
//! All failures surface synchronously through [`NseError`]; nothing is
//! retried or suppressed inside the library. Two disjoint sub-taxonomies
//! live in the same enum:
//!
//! - **Command/device errors** — produced by validation, response parsing,
//!   or an `ERROR` result envelope from the appliance.
//! - **Connection errors** — produced by the HTTP transport (probe failure,
//!   refused, timeout, unresolvable host). The response interpreter never
//!   converts one kind into the other.

use thiserror::Error;

use crate::value::ValueError;

/// Result type alias used throughout the crate.
pub type NseResult<T> = Result<T, NseError>;

/// Unified error type for NSE command construction, execution and
/// response interpretation.
#[derive(Debug, Error)]
pub enum NseError {
    /// A required attribute or element was not bound before serialization.
    #[error("{command}: required field {field} is missing")]
    FieldMissing {
        /// Command type the field belongs to
        command: String,
        /// Schema name of the missing field
        field: String,
    },

    /// A bound value was rejected by the field's type constructor.
    #[error("{command}: invalid value for field {field}: {source}")]
    FieldInvalid {
        /// Command type the field belongs to
        command: String,
        /// Schema name of the offending field
        field: String,
        /// The underlying value-level rejection
        #[source]
        source: ValueError,
    },

    /// A command was requested for a type name with no registered schema.
    /// This is a programmer error, not a runtime input error.
    #[error("unknown command type: {0}")]
    UnknownCommand(String),

    /// The XML writer failed while encoding a request. Not reachable when
    /// writing to an in-memory buffer, but propagated rather than masked.
    #[error("failed to encode request: {message}")]
    RequestEncode {
        /// What the XML writer reported
        message: String,
    },

    /// The response body could not be parsed as a USG envelope.
    #[error("failed to parse device response: {message}")]
    ResponseParse {
        /// What went wrong while reading the envelope
        message: String,
    },

    /// The device answered with `RESULT="ERROR"`.
    #[error("device error {code}: {description}")]
    Device {
        /// Numeric error code from the `ERROR_NUM` attribute
        code: u16,
        /// Device-supplied description, or the static table fallback
        description: String,
    },

    /// An operation that needs an open connection was called before `open()`.
    #[error("not connected to {host}")]
    NotConnected {
        /// Configured device host
        host: String,
    },

    /// Auto-probe was requested and the device did not accept a TCP
    /// connection within the probe window.
    #[error("probe of {host}:{port} failed")]
    Probe {
        /// Configured device host
        host: String,
        /// Configured device port
        port: u16,
    },

    /// The HTTP request did not complete within the configured timeout.
    #[error("connection to {host} timed out")]
    ConnectTimeout {
        /// Configured device host
        host: String,
    },

    /// The device actively refused the connection.
    #[error("connection to {host} refused")]
    ConnectRefused {
        /// Configured device host
        host: String,
    },

    /// Any other transport-level failure (DNS, TLS, broken body read).
    #[error("transport error: {message}")]
    Transport {
        /// Transport-level failure description
        message: String,
    },
}

impl NseError {
    /// Create a [`NseError::FieldMissing`] error.
    pub fn field_missing(command: &str, field: &str) -> Self {
        NseError::FieldMissing {
            command: command.to_string(),
            field: field.to_string(),
        }
    }

    /// Create a [`NseError::FieldInvalid`] error wrapping a value rejection.
    pub fn field_invalid(command: &str, field: &str, source: ValueError) -> Self {
        NseError::FieldInvalid {
            command: command.to_string(),
            field: field.to_string(),
            source,
        }
    }

    /// Create a [`NseError::ResponseParse`] error.
    pub fn response_parse(message: impl Into<String>) -> Self {
        NseError::ResponseParse {
            message: message.into(),
        }
    }

    /// Create a [`NseError::Transport`] error.
    pub fn transport(message: impl Into<String>) -> Self {
        NseError::Transport {
            message: message.into(),
        }
    }

    /// True for errors raised by the connection layer rather than by
    /// command validation or the device itself.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            NseError::NotConnected { .. }
                | NseError::Probe { .. }
                | NseError::ConnectTimeout { .. }
                | NseError::ConnectRefused { .. }
                | NseError::Transport { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_carry_structured_detail() {
        let err = NseError::field_missing("RADIUS_LOGIN", "SUB_USER_NAME");
        match err {
            NseError::FieldMissing { command, field } => {
                assert_eq!(command, "RADIUS_LOGIN");
                assert_eq!(field, "SUB_USER_NAME");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_device_error_display() {
        let err = NseError::Device {
            code: 201,
            description: "Unknown user name".to_string(),
        };
        assert_eq!(err.to_string(), "device error 201: Unknown user name");
        assert!(!err.is_connection_error());
    }

    #[test]
    fn test_connection_taxonomy_is_disjoint() {
        assert!(NseError::ConnectTimeout {
            host: "10.0.0.1".into()
        }
        .is_connection_error());
        assert!(!NseError::response_parse("truncated").is_connection_error());
    }
}
