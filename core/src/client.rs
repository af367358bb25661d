//! HTTP client collaborator.
//!
//! # Design
//! `HttpClient` is the only place network I/O happens. The builder renders
//! an `HttpRequest`, calls `send` once, and normalizes whatever comes back.
//! A client reports a status it received as `Ok`, even 4xx/5xx; `Err` is
//! reserved for "no response at all".
//!
//! `UreqClient` (feature `ureq`) is the bundled blocking implementation.

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one request. No retries; one call, one attempt.
pub trait HttpClient {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<C: HttpClient + ?Sized> HttpClient for Box<C> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::blocking::UreqClient;

#[cfg(feature = "ureq")]
mod blocking {
    use std::borrow::Cow;
    use std::collections::HashMap;

    use uuid::Uuid;

    use crate::error::TransportError;
    use crate::http::{HttpRequest, HttpResponse, RequestBody, RequestPart};

    use super::HttpClient;

    const DEFAULT_MAX_REDIRECTS: u32 = 10;
    const DEFAULT_BODY_LIMIT: u64 = 10 * 1024 * 1024;

    /// Blocking client backed by a fresh `ureq` agent per request, so the
    /// per-request timeout and redirect policy never leak between calls.
    ///
    /// Redirects are not followed unless the request asks for it. Response
    /// bodies are read up to `body_limit` bytes and decoded lossily, so a
    /// binary payload still comes back with its status.
    #[derive(Debug, Clone)]
    pub struct UreqClient {
        max_redirects: u32,
        body_limit: u64,
    }

    impl Default for UreqClient {
        fn default() -> Self {
            Self {
                max_redirects: DEFAULT_MAX_REDIRECTS,
                body_limit: DEFAULT_BODY_LIMIT,
            }
        }
    }

    impl UreqClient {
        pub fn new() -> Self {
            Self::default()
        }

        /// Redirect hops allowed when a request opts into following them.
        pub fn max_redirects(mut self, max_redirects: u32) -> Self {
            self.max_redirects = max_redirects;
            self
        }

        /// Largest response body read, in bytes. Defaults to 10 MiB.
        pub fn body_limit(mut self, body_limit: u64) -> Self {
            self.body_limit = body_limit;
            self
        }

        fn agent(&self, request: &HttpRequest) -> ureq::Agent {
            let redirects = if request.follow_redirects {
                self.max_redirects
            } else {
                0
            };
            ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(Some(request.timeout))
                .max_redirects(redirects)
                .build()
                .new_agent()
        }
    }

    impl HttpClient for UreqClient {
        fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            let agent = self.agent(request);
            let multi_part = matches!(request.body, RequestBody::MultiPart(_));

            let mut builder = ureq::http::Request::builder()
                .method(request.method.as_str())
                .uri(request.url.as_str());
            for (name, value) in &request.headers {
                // the multipart encoder owns both of these
                if multi_part
                    && (name.eq_ignore_ascii_case("content-type")
                        || name.eq_ignore_ascii_case("content-length"))
                {
                    continue;
                }
                builder = builder.header(name.as_str(), value.as_str());
            }

            let result = match &request.body {
                RequestBody::Text(text) if text.is_empty() => {
                    agent.run(builder.body(()).map_err(invalid_request)?)
                }
                RequestBody::Text(text) => {
                    agent.run(builder.body(text.as_bytes()).map_err(invalid_request)?)
                }
                RequestBody::MultiPart(parts) => {
                    let boundary = format!("----requests-{}", Uuid::new_v4().simple());
                    let body = encode_multipart(parts, &boundary);
                    let request = builder
                        .header(
                            "Content-Type",
                            format!("multipart/form-data; boundary={boundary}"),
                        )
                        .body(body)
                        .map_err(invalid_request)?;
                    agent.run(request)
                }
            };

            let mut response = match result {
                Ok(response) => response,
                Err(ureq::Error::Timeout(_)) => return Err(TransportError::Timeout),
                Err(err) => return Err(TransportError::Connection(err.to_string())),
            };

            let mut headers: HashMap<String, Vec<String>> = HashMap::new();
            for (name, value) in response.headers() {
                headers
                    .entry(name.as_str().to_string())
                    .or_default()
                    .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
            }

            let status = response.status().as_u16();
            let read = response
                .body_mut()
                .with_config()
                .limit(self.body_limit)
                .read_to_vec();
            let (text, error_text) = match read {
                Ok(bytes) => (Some(String::from_utf8_lossy(&bytes).into_owned()), None),
                Err(err) => (None, Some(err.to_string())),
            };

            Ok(HttpResponse {
                status,
                headers,
                text,
                error_text,
            })
        }
    }

    fn invalid_request(err: ureq::http::Error) -> TransportError {
        TransportError::InvalidRequest(err.to_string())
    }

    /// Render parts as a `multipart/form-data` body delimited by `boundary`.
    pub(crate) fn encode_multipart(parts: &[RequestPart], boundary: &str) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());

            let mut disposition = format!(
                "Content-Disposition: form-data; name=\"{}\"",
                escape_disposition(&part.name)
            );
            if let Some(file_name) = &part.file_name {
                disposition.push_str(&format!(
                    "; filename=\"{}\"",
                    escape_disposition(file_name)
                ));
            }
            body.extend_from_slice(disposition.as_bytes());
            body.extend_from_slice(b"\r\n");

            let content_type = match (&part.content_type, &part.encoding) {
                (Some(content_type), Some(encoding)) => {
                    Some(format!("{content_type}; charset={encoding}"))
                }
                (Some(content_type), None) => Some(content_type.clone()),
                (None, Some(encoding)) => Some(format!("text/plain; charset={encoding}")),
                (None, None) => None,
            };
            if let Some(content_type) = content_type {
                body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
            }

            body.extend_from_slice(b"\r\n");
            body.extend_from_slice(part.content.as_bytes());
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        body
    }

    /// Percent-encode the characters that would end a quoted parameter or
    /// the header line, as browsers do for form field and file names.
    fn escape_disposition(value: &str) -> Cow<'_, str> {
        if !value.contains(['"', '\r', '\n']) {
            return Cow::Borrowed(value);
        }
        Cow::Owned(
            value
                .replace('"', "%22")
                .replace('\r', "%0D")
                .replace('\n', "%0A"),
        )
    }

}
