//! Verify the builder and content types against JSON test vectors stored in
//! `test-vectors/`.
//!
//! Each builder vector describes builder inputs, the request the client is
//! expected to receive, a simulated client response and the normalized
//! result. Headers are compared as maps so ordering never matters.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use requests_core::{
    ContentType, HttpClient, HttpMethod, HttpRequest, HttpResponse, RequestBody, RequestService,
    ResponseBody, ServiceHandle, TransportError,
};
use serde_json::Value;

/// Remembers the request it was given and answers with a fixed response.
struct CannedClient {
    response: HttpResponse,
    sent: RefCell<Option<HttpRequest>>,
}

impl HttpClient for CannedClient {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        *self.sent.borrow_mut() = Some(request.clone());
        Ok(self.response.clone())
    }
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

fn optional_text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

#[test]
fn builder_test_vectors() {
    let raw = include_str!("../../test-vectors/builder.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let base_url = vectors["base_url"].as_str().unwrap();
    let timeout = Duration::from_millis(vectors["timeout_ms"].as_u64().unwrap());

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let simulated = &case["response"];
        let client = CannedClient {
            response: HttpResponse {
                status: simulated["status"].as_u64().unwrap() as u16,
                headers: HashMap::new(),
                text: optional_text(&simulated["text"]),
                error_text: optional_text(&simulated["error_text"]),
            },
            sent: RefCell::new(None),
        };
        let service = RequestService::from_handle(
            ServiceHandle::new("shop", base_url).timeout(timeout),
            &client,
        );

        let mut builder = service.request(
            parse_method(case["method"].as_str().unwrap()),
            case["resource"].as_str().unwrap(),
        );
        for (key, value) in pairs(&case["params"]) {
            builder = builder.add_query_param(key, value);
        }
        builder = builder.set_headers(pairs(&case["headers"]));
        if let Some(json) = case.get("json") {
            builder = builder.set_json(json).unwrap();
        }
        if let Some(raw) = case.get("raw") {
            builder = builder.set_body(
                raw["body"].as_str().unwrap(),
                raw["content_type"].as_str().unwrap(),
            );
        }

        let response = builder.call_with(&case["options"]).unwrap();

        // Verify the request handed to the client
        let expected_req = &case["expected_request"];
        let sent = client.sent.borrow().clone().unwrap();
        assert_eq!(sent.url, expected_req["url"].as_str().unwrap(), "{name}: url");
        let sent_headers: HashMap<String, String> = sent.headers.into_iter().collect();
        let expected_headers: HashMap<String, String> =
            serde_json::from_value(expected_req["headers"].clone()).unwrap();
        assert_eq!(sent_headers, expected_headers, "{name}: headers");
        assert_eq!(
            sent.body,
            RequestBody::Text(expected_req["body"].as_str().unwrap().to_string()),
            "{name}: body"
        );
        assert_eq!(
            sent.timeout,
            Duration::from_millis(expected_req["timeout_ms"].as_u64().unwrap()),
            "{name}: timeout"
        );
        assert_eq!(
            sent.follow_redirects,
            expected_req["follow_redirects"].as_bool().unwrap(),
            "{name}: follow_redirects"
        );

        // Verify the normalized response
        let expected_resp = &case["expected_response"];
        assert_eq!(
            response.status as u64,
            expected_resp["status"].as_u64().unwrap(),
            "{name}: status"
        );
        let expected_body = match &expected_resp["body"] {
            Value::String(text) => ResponseBody::Text(text.clone()),
            other => ResponseBody::Json(other.clone()),
        };
        assert_eq!(response.body, expected_body, "{name}: response body");

        // State is gone after the call
        assert!(builder.headers().is_empty(), "{name}: headers reset");
        assert_eq!(builder.query_params(), "", "{name}: params reset");
        assert_eq!(builder.body(), "", "{name}: body reset");
    }
}

// ---------------------------------------------------------------------------
// Content types
// ---------------------------------------------------------------------------

#[test]
fn content_type_test_vectors() {
    let raw = include_str!("../../test-vectors/content_types.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let cases = vectors["cases"].as_array().unwrap();
    assert_eq!(cases.len(), ContentType::registry().count());
    for case in cases {
        let name = case["name"].as_str().unwrap();
        let content_type = ContentType::lookup(name).unwrap_or_else(|| panic!("{name}: missing"));
        assert_eq!(content_type.value(), case["value"].as_str().unwrap(), "{name}");
    }

    for case in vectors["encoded"].as_array().unwrap() {
        let content_type = ContentType::custom(
            case["type"].as_str().unwrap(),
            case["subtype"].as_str().unwrap(),
        );
        assert_eq!(
            content_type.value_encoded(case["encoding"].as_str().unwrap()),
            case["value"].as_str().unwrap()
        );
    }
}
