//! Fluent request builder.
//!
//! # Design
//! A `RequestBuilder` is bound to one verb, one service handle and one
//! resource path for its whole life. Everything else (query params,
//! headers, body, multipart entries) is private per-instance state that
//! `call` moves out before it touches the client, so the builder is empty
//! again after every call regardless of how the exchange went.
//!
//! Option validation happens before that move: a rejected option leaves the
//! accumulated state in place.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::client::HttpClient;
use crate::content_type::ContentType;
use crate::error::RequestError;
use crate::http::{HeaderValue, HttpMethod, HttpRequest, RequestBody, RequestPart};
use crate::registry::ServiceHandle;
use crate::types::{CallOptions, CallResponse, ResponseBody};

const CONTENT_TYPE: &str = "Content-Type";
const CONTENT_LENGTH: &str = "Content-Length";

#[derive(Debug, Default)]
struct RequestState {
    params: Vec<String>,
    headers: HashMap<String, HeaderValue>,
    multi_parts: Vec<RequestPart>,
    body: String,
}

impl RequestState {
    fn set_body(&mut self, body: String, content_type: String) {
        self.headers
            .insert(CONTENT_TYPE.to_string(), HeaderValue::Text(content_type));
        self.headers
            .insert(CONTENT_LENGTH.to_string(), HeaderValue::from(body.len()));
        self.body = body;
    }
}

/// Accumulates one logical request against a service.
#[derive(Debug)]
pub struct RequestBuilder<C> {
    method: HttpMethod,
    service: Arc<ServiceHandle>,
    resource: String,
    client: Arc<C>,
    state: RequestState,
}

impl<C: HttpClient> RequestBuilder<C> {
    pub fn new(
        method: HttpMethod,
        service: Arc<ServiceHandle>,
        resource: impl Into<String>,
        client: Arc<C>,
    ) -> Self {
        Self {
            method,
            service,
            resource: resource.into(),
            client,
            state: RequestState::default(),
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Append `key=value` to the query string. Nothing is URL-encoded and
    /// repeated keys are all sent.
    pub fn add_query_param(mut self, key: impl Display, value: impl Display) -> Self {
        self.state.params.push(format!("{key}={value}"));
        self
    }

    /// `"?a=1&b=2"`, or `""` without params.
    pub fn query_params(&self) -> String {
        if self.state.params.is_empty() {
            return String::new();
        }
        format!("?{}", self.state.params.join("&"))
    }

    /// Service base url, resource path and query string, concatenated.
    pub fn url(&self) -> String {
        format!("{}{}{}", self.service.url(), self.resource, self.query_params())
    }

    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<HeaderValue>) -> Self {
        self.state.headers.insert(name.into(), value.into());
        self
    }

    /// Merge headers into the current set; existing names are overwritten,
    /// the rest are kept.
    pub fn set_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<HeaderValue>,
    {
        self.state.headers.extend(
            headers
                .into_iter()
                .map(|(name, value)| (name.into(), value.into())),
        );
        self
    }

    /// Snapshot of the current headers.
    pub fn headers(&self) -> HashMap<String, HeaderValue> {
        self.state.headers.clone()
    }

    pub fn add_multi_part(mut self, part: RequestPart) -> Self {
        self.state.multi_parts.push(part);
        self
    }

    pub fn multi_parts(&self) -> &[RequestPart] {
        &self.state.multi_parts
    }

    /// Serialize `body` as the request body and set `Content-Type:
    /// application/json` plus its `Content-Length`.
    pub fn set_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, RequestError> {
        let json = serde_json::to_string(body).map_err(RequestError::Serialization)?;
        self.state.set_body(json, ContentType::JSON.value());
        Ok(self)
    }

    /// Use `body` verbatim with the given `Content-Type`; `Content-Length` is
    /// set to its byte length.
    pub fn set_body(mut self, body: impl Into<String>, content_type: impl Into<String>) -> Self {
        self.state.set_body(body.into(), content_type.into());
        self
    }

    pub fn body(&self) -> &str {
        &self.state.body
    }

    /// Validate loosely typed options, then `call`.
    pub fn call_with(&mut self, options: &Value) -> Result<CallResponse, RequestError> {
        let options = CallOptions::from_value(options)?;
        self.call(&options)
    }

    /// Send the request once and normalize the response.
    ///
    /// Transport failures are not errors: they come back with status 0 and
    /// the failure message as the text body. The only `Err` is a
    /// `ResponseParse` when `parse_response` is set and the response text is
    /// not JSON.
    pub fn call(&mut self, options: &CallOptions) -> Result<CallResponse, RequestError> {
        let url = self.url();
        let state = std::mem::take(&mut self.state);

        let body = if options.send_as_multi_part {
            RequestBody::MultiPart(state.multi_parts)
        } else {
            RequestBody::Text(state.body)
        };
        let request = HttpRequest {
            method: self.method,
            url,
            headers: state
                .headers
                .into_iter()
                .map(|(name, value)| (name, value.to_string()))
                .collect(),
            body,
            timeout: options
                .timeout
                .filter(|timeout| !timeout.is_zero())
                .unwrap_or(self.service.profile().timeout),
            follow_redirects: options.follow_redirect,
        };

        tracing::debug!(
            service = self.service.id(),
            method = %request.method,
            url = %request.url,
            timeout_ms = request.timeout.as_millis() as u64,
            "sending request"
        );

        let response = match self.client.send(&request) {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    service = self.service.id(),
                    method = %request.method,
                    url = %request.url,
                    error = %err,
                    "request failed"
                );
                return Ok(CallResponse {
                    status: 0,
                    body: ResponseBody::Text(err.to_string()),
                    headers: HashMap::new(),
                });
            }
        };

        tracing::debug!(
            service = self.service.id(),
            status = response.status,
            "received response"
        );

        let text = response.response_text();
        let body = if options.parse_response {
            let json = serde_json::from_str(&text).map_err(|source| RequestError::ResponseParse {
                status: response.status,
                body: text.clone(),
                source,
            })?;
            ResponseBody::Json(json)
        } else {
            ResponseBody::Text(text)
        };

        Ok(CallResponse {
            status: response.status,
            body,
            headers: response.headers,
        })
    }
}
