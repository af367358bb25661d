//! Entry point: a resolved service plus per-verb builder constructors.
//!
//! # Design
//! Resolution happens once, in `RequestService::new`, and a failure is an
//! `Err` the caller has to handle before any builder exists. The resolved
//! handle and the client are shared by every builder through `Arc`; neither
//! is mutated after construction.

use std::sync::Arc;

use crate::builder::RequestBuilder;
use crate::client::HttpClient;
use crate::error::RequestError;
use crate::http::HttpMethod;
use crate::registry::{ServiceHandle, ServiceRegistry};

/// Builder factory for one named service.
#[derive(Debug)]
pub struct RequestService<C> {
    service: Arc<ServiceHandle>,
    client: Arc<C>,
}

impl<C> Clone for RequestService<C> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: HttpClient> RequestService<C> {
    /// Resolve `service_id` through `registry`.
    pub fn new<R>(service_id: &str, registry: &R, client: C) -> Result<Self, RequestError>
    where
        R: ServiceRegistry + ?Sized,
    {
        let handle = registry.create_service(service_id).map_err(|source| {
            tracing::warn!(service = service_id, error = %source, "service resolution failed");
            RequestError::ServiceResolution {
                id: service_id.to_string(),
                source,
            }
        })?;
        Ok(Self::from_handle(handle, client))
    }

    /// Wrap an already resolved handle.
    pub fn from_handle(handle: ServiceHandle, client: C) -> Self {
        Self {
            service: Arc::new(handle),
            client: Arc::new(client),
        }
    }

    pub fn service(&self) -> &ServiceHandle {
        &self.service
    }

    pub fn request(&self, method: HttpMethod, resource: &str) -> RequestBuilder<C> {
        RequestBuilder::new(
            method,
            Arc::clone(&self.service),
            resource,
            Arc::clone(&self.client),
        )
    }

    /// GET, usually to retrieve a resource.
    pub fn get(&self, resource: &str) -> RequestBuilder<C> {
        self.request(HttpMethod::Get, resource)
    }

    /// POST, usually to create a resource.
    pub fn post(&self, resource: &str) -> RequestBuilder<C> {
        self.request(HttpMethod::Post, resource)
    }

    /// PUT, usually to replace a resource.
    pub fn put(&self, resource: &str) -> RequestBuilder<C> {
        self.request(HttpMethod::Put, resource)
    }

    /// PATCH, usually to update part of a resource.
    pub fn patch(&self, resource: &str) -> RequestBuilder<C> {
        self.request(HttpMethod::Patch, resource)
    }

    /// DELETE, usually to remove a resource.
    pub fn delete(&self, resource: &str) -> RequestBuilder<C> {
        self.request(HttpMethod::Delete, resource)
    }
}

#[cfg(feature = "ureq")]
impl RequestService<crate::client::UreqClient> {
    /// Resolve `service_id` and talk to it with the bundled `ureq` client.
    pub fn connect<R>(service_id: &str, registry: &R) -> Result<Self, RequestError>
    where
        R: ServiceRegistry + ?Sized,
    {
        Self::new(service_id, registry, crate::client::UreqClient::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RegistryError, TransportError};
    use crate::http::{HttpRequest, HttpResponse};
    use crate::registry::StaticRegistry;

    struct NoopClient;

    impl HttpClient for NoopClient {
        fn send(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            Ok(HttpResponse::new(204, ""))
        }
    }

    fn registry() -> StaticRegistry {
        StaticRegistry::new().register(ServiceHandle::new("catalog", "http://catalog.local"))
    }

    #[test]
    fn unresolvable_service_is_an_error() {
        let result = RequestService::new("missing", &registry(), NoopClient);
        match result {
            Err(RequestError::ServiceResolution { id, source }) => {
                assert_eq!(id, "missing");
                assert!(matches!(source, RegistryError::UnknownService(_)));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected resolution failure"),
        }
    }

    #[test]
    fn verb_constructors_bind_method_and_resource() {
        let service = RequestService::new("catalog", &registry(), NoopClient).unwrap();
        let cases = [
            (service.get("/items"), HttpMethod::Get),
            (service.post("/items"), HttpMethod::Post),
            (service.put("/items"), HttpMethod::Put),
            (service.patch("/items"), HttpMethod::Patch),
            (service.delete("/items"), HttpMethod::Delete),
        ];
        for (builder, method) in cases {
            assert_eq!(builder.method(), method);
            assert_eq!(builder.resource(), "/items");
            assert_eq!(builder.url(), "http://catalog.local/items");
        }
    }

    #[test]
    fn builders_are_independent() {
        let service = RequestService::new("catalog", &registry(), NoopClient).unwrap();
        let first = service.get("/a").add_header("X", "1");
        let second = service.get("/b");
        assert_eq!(first.headers().len(), 1);
        assert!(second.headers().is_empty());
    }

    #[test]
    fn dyn_registry_and_boxed_client() {
        let registry: Box<dyn ServiceRegistry> = Box::new(registry());
        let client: Box<dyn HttpClient> = Box::new(NoopClient);
        let service = RequestService::new("catalog", registry.as_ref(), client).unwrap();
        let response = service.delete("/items/1").call(&Default::default()).unwrap();
        assert_eq!(response.status, 204);
    }
}
