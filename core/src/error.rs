//! Error types for service resolution, request building and transport.
//!
//! # Design
//! Only failures the caller can act on are `Err`s from the builder: a
//! service id that does not resolve, an option of the wrong type, a body
//! that will not serialize, or a response that was asked to be parsed as
//! JSON and is not JSON. Transport failures are reported by clients as
//! `TransportError` but the builder folds them into an ordinary response
//! (status 0, message as body), so `call` never fails because the network
//! did.

use std::fmt;

use thiserror::Error;

/// Errors returned by `RequestService` and `RequestBuilder`.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The registry could not produce a handle for the service id.
    #[error("service `{id}` could not be resolved: {source}")]
    ServiceResolution {
        id: String,
        #[source]
        source: RegistryError,
    },

    /// A recognized call option carried a value of the wrong type.
    #[error("Invalid option type for {key} value must be a {expected}")]
    InvalidOption { key: String, expected: OptionKind },

    /// The value given to `set_json` could not be serialized.
    #[error("request body could not be serialized to JSON: {0}")]
    Serialization(#[source] serde_json::Error),

    /// `parse_response` was requested but the response text is not JSON.
    #[error("response body (status {status}) is not valid JSON: {source}")]
    ResponseParse {
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Value type a call option must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Boolean,
    Number,
}

impl OptionKind {
    pub fn matches(self, value: &serde_json::Value) -> bool {
        match self {
            OptionKind::Boolean => value.is_boolean(),
            OptionKind::Number => value.is_number(),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Boolean => f.write_str("boolean"),
            OptionKind::Number => f.write_str("number"),
        }
    }
}

/// Errors raised by a `ServiceRegistry`.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no service registered under `{0}`")]
    UnknownService(String),

    #[error("service `{id}` is misconfigured: {reason}")]
    InvalidService { id: String, reason: String },

    #[error("service configuration could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("service configuration is not valid JSON: {0}")]
    Config(#[from] serde_json::Error),
}

/// Errors raised by an `HttpClient` when no response was obtained.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),

    /// The request could not be put on the wire (bad header name, bad url).
    #[error("request could not be sent: {0}")]
    InvalidRequest(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_option_message() {
        let err = RequestError::InvalidOption {
            key: "timeout".to_string(),
            expected: OptionKind::Number,
        };
        assert_eq!(
            err.to_string(),
            "Invalid option type for timeout value must be a number"
        );
    }

    #[test]
    fn option_kind_matches_json_types() {
        assert!(OptionKind::Boolean.matches(&serde_json::json!(true)));
        assert!(!OptionKind::Boolean.matches(&serde_json::json!("true")));
        assert!(OptionKind::Number.matches(&serde_json::json!(1.5)));
        assert!(!OptionKind::Number.matches(&serde_json::json!(null)));
    }

    #[test]
    fn resolution_error_keeps_source() {
        let err = RequestError::ServiceResolution {
            id: "missing".to_string(),
            source: RegistryError::UnknownService("missing".to_string()),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("missing"));
    }
}
