//! Fluent HTTP request builder over a named-service registry.
//!
//! # Overview
//! `RequestService` resolves a service id (base url plus timeout profile)
//! through a `ServiceRegistry` and hands out one `RequestBuilder` per
//! request. The builder accumulates query params, headers, a body or a set
//! of multipart entries, then `call` renders a plain-data `HttpRequest`,
//! passes it to an `HttpClient` and returns a normalized `CallResponse`.
//!
//! # Design
//! - Registry and client are traits; `StaticRegistry` and `UreqClient`
//!   (feature `ureq`) are the bundled implementations.
//! - One attempt per `call`. No retries, pooling or redirect handling of our
//!   own; that is the client's business.
//! - Blocking and single-threaded per builder. Builders are owned by their
//!   caller; the service handle is shared read-only.
//!
//! ```no_run
//! use requests_core::{CallOptions, ContentType, RequestService, StaticRegistry};
//!
//! let registry = StaticRegistry::from_env()?;
//! let orders = RequestService::connect("orders.api", &registry)?;
//! let response = orders
//!     .post("/v1/orders")
//!     .add_query_param("dryRun", true)
//!     .add_header("Accept", ContentType::JSON)
//!     .set_json(&serde_json::json!({"sku": "A-1", "qty": 2}))?
//!     .call(&CallOptions::new().parse_response(true))?;
//! println!("{} {:?}", response.status, response.body);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod client;
pub mod content_type;
pub mod error;
pub mod http;
pub mod registry;
pub mod service;
pub mod types;

pub use builder::RequestBuilder;
#[cfg(feature = "ureq")]
pub use client::UreqClient;
pub use client::HttpClient;
pub use content_type::ContentType;
pub use error::{OptionKind, RegistryError, RequestError, TransportError};
pub use http::{HeaderValue, HttpMethod, HttpRequest, HttpResponse, PartContent, RequestBody, RequestPart};
pub use registry::{ServiceHandle, ServiceProfile, ServiceRegistry, StaticRegistry};
pub use service::RequestService;
pub use types::{CallOptions, CallResponse, ResponseBody};
