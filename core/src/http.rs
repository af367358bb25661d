//! Plain-data HTTP exchange types passed to and from an `HttpClient`.
//!
//! # Design
//! The builder never talks to the network itself. It renders one
//! `HttpRequest` value, hands it to the client collaborator, and gets an
//! `HttpResponse` value back. Everything the client needs to know (verb,
//! url, headers, timeout, redirect policy, body or multipart set) travels in
//! that single value, so a client is a pure function from request to
//! response as far as this crate is concerned.
//!
//! `HttpResponse` keeps the two text channels a host client exposes: the
//! regular response text and a separate error text. `response_text` decides
//! which one the caller sees.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::content_type::ContentType;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request header value. Numbers are kept as numbers until the request is
/// rendered so `Content-Length` reads back as the length it was set to.
///
/// Any Rust integer or float converts into one. Non-finite floats have no
/// JSON number form and are kept as their text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Text(text) => f.write_str(text),
            HeaderValue::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::Text(value.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        HeaderValue::Text(value)
    }
}

impl From<&String> for HeaderValue {
    fn from(value: &String) -> Self {
        HeaderValue::Text(value.clone())
    }
}

impl From<ContentType> for HeaderValue {
    fn from(value: ContentType) -> Self {
        HeaderValue::Text(value.value())
    }
}

macro_rules! integer_header {
    ($($ty:ty),+) => {
        $(impl From<$ty> for HeaderValue {
            fn from(value: $ty) -> Self {
                HeaderValue::Number(value.into())
            }
        })+
    };
}

integer_header!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl From<f64> for HeaderValue {
    fn from(value: f64) -> Self {
        match serde_json::Number::from_f64(value) {
            Some(number) => HeaderValue::Number(number),
            None => HeaderValue::Text(value.to_string()),
        }
    }
}

impl From<f32> for HeaderValue {
    fn from(value: f32) -> Self {
        HeaderValue::from(f64::from(value))
    }
}

/// Content of a single multipart entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartContent {
    Text(String),
    Bytes(Vec<u8>),
}

impl PartContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PartContent::Text(text) => text.as_bytes(),
            PartContent::Bytes(bytes) => bytes,
        }
    }
}

/// One `multipart/form-data` entry. The builder only sequences these; the
/// client decides how they go over the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPart {
    pub name: String,
    pub content: PartContent,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
    pub encoding: Option<String>,
}

impl RequestPart {
    /// A plain form field.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: PartContent::Text(value.into()),
            content_type: None,
            file_name: None,
            encoding: None,
        }
    }

    /// A file upload.
    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            content: PartContent::Bytes(bytes),
            content_type: Some(content_type.into()),
            file_name: Some(file_name.into()),
            encoding: None,
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }
}

/// What goes after the headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Text(String),
    MultiPart(Vec<RequestPart>),
}

/// An HTTP request described as plain data.
///
/// Built by `RequestBuilder::call` and handed to an `HttpClient`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    pub timeout: Duration,
    /// `false` leaves the client's own redirect policy in place.
    pub follow_redirects: bool,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data, as produced by an
/// `HttpClient`.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, Vec<String>>,
    /// Regular response text; `None` when the client could not produce it.
    pub text: Option<String>,
    /// Text from the client's error channel, if it has one.
    pub error_text: Option<String>,
}

impl HttpResponse {
    pub fn new(status: u16, text: impl Into<String>) -> Self {
        Self {
            status,
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    pub fn error_text(mut self, text: impl Into<String>) -> Self {
        self.error_text = Some(text.into());
        self
    }

    /// The text the caller gets back: the regular text when it is non-empty,
    /// else the error text when there is one, else whatever regular text
    /// there was.
    pub fn response_text(&self) -> String {
        match (&self.text, &self.error_text) {
            (Some(text), _) if !text.is_empty() => text.clone(),
            (_, Some(error)) => error.clone(),
            (text, None) => text.clone().unwrap_or_default(),
        }
    }
}
