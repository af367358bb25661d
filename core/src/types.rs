//! Call options and the normalized response returned by `call`.
//!
//! # Design
//! `CallOptions` is the typed form. Callers holding loosely typed options
//! (configuration, scripts) go through `CallOptions::from_value`, which
//! checks the four recognized keys and ignores everything else.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::error::{OptionKind, RequestError};

const OPTION_RULES: &[(&str, OptionKind)] = &[
    ("parseResponse", OptionKind::Boolean),
    ("sendAsMultiPart", OptionKind::Boolean),
    ("followRedirect", OptionKind::Boolean),
    ("timeout", OptionKind::Number),
];

/// Per-call behavior switches. All off by default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallOptions {
    /// Parse the response text as JSON.
    pub parse_response: bool,
    /// Send the multipart entries instead of the body text.
    pub send_as_multi_part: bool,
    /// Ask the client to follow redirects.
    pub follow_redirect: bool,
    /// Overrides the service profile timeout.
    pub timeout: Option<Duration>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse_response(mut self, parse: bool) -> Self {
        self.parse_response = parse;
        self
    }

    pub fn send_as_multi_part(mut self, multi_part: bool) -> Self {
        self.send_as_multi_part = multi_part;
        self
    }

    pub fn follow_redirect(mut self, follow: bool) -> Self {
        self.follow_redirect = follow;
        self
    }

    /// A zero duration leaves the service profile timeout in place.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate and convert untyped options such as
    /// `{"parseResponse": true, "timeout": 5000}`.
    ///
    /// Unknown keys are ignored and anything that is not an object means
    /// "no options". `timeout` is in milliseconds; zero or negative values
    /// are treated as absent, and a value too large for a `Duration` is
    /// rejected as an invalid option.
    pub fn from_value(value: &Value) -> Result<Self, RequestError> {
        let Some(map) = value.as_object() else {
            return Ok(Self::default());
        };

        for (key, expected) in OPTION_RULES {
            if let Some(option) = map.get(*key) {
                if !expected.matches(option) {
                    return Err(RequestError::InvalidOption {
                        key: key.to_string(),
                        expected: *expected,
                    });
                }
            }
        }

        let flag = |key: &str| map.get(key).and_then(Value::as_bool).unwrap_or(false);
        let timeout = map
            .get("timeout")
            .and_then(Value::as_f64)
            .filter(|millis| millis.is_finite() && *millis > 0.0)
            .map(|millis| {
                Duration::try_from_secs_f64(millis / 1000.0).map_err(|_| {
                    RequestError::InvalidOption {
                        key: "timeout".to_string(),
                        expected: OptionKind::Number,
                    }
                })
            })
            .transpose()?;

        Ok(Self {
            parse_response: flag("parseResponse"),
            send_as_multi_part: flag("sendAsMultiPart"),
            follow_redirect: flag("followRedirect"),
            timeout,
        })
    }
}

/// Response body as handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Text(String),
    Json(Value),
}

impl ResponseBody {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            ResponseBody::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }
}

/// Normalized result of `RequestBuilder::call`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallResponse {
    /// HTTP status, or 0 when no response was received.
    pub status: u16,
    pub body: ResponseBody,
    pub headers: HashMap<String, Vec<String>>,
}

impl CallResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First value of a response header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }
}
