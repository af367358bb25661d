//! Service registry: turns a service id into a base url and a timeout
//! profile.
//!
//! # Design
//! The registry is a trait so a host environment can plug in its own
//! service catalogue. `StaticRegistry` is the bundled implementation, filled
//! in code or from a JSON document:
//!
//! ```json
//! { "services": { "orders.api": { "url": "https://orders.example.com", "timeout_ms": 5000 } } }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::RegistryError;

/// Environment variable naming the service configuration file read by
/// `StaticRegistry::from_env`.
pub const SERVICES_ENV: &str = "REQUESTS_SERVICES";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Resolves service ids to handles.
pub trait ServiceRegistry {
    fn create_service(&self, service_id: &str) -> Result<ServiceHandle, RegistryError>;
}

/// Connection profile attached to a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceProfile {
    pub timeout: Duration,
}

impl Default for ServiceProfile {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// A resolved service. Read-only once built; builders share it through an
/// `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceHandle {
    id: String,
    url: String,
    profile: ServiceProfile,
}

impl ServiceHandle {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            profile: ServiceProfile::default(),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.profile.timeout = timeout;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Base url; resource paths are appended to it verbatim.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn profile(&self) -> &ServiceProfile {
        &self.profile
    }
}

#[derive(Debug, Deserialize)]
struct ServicesConfig {
    #[serde(default)]
    services: HashMap<String, ServiceDefinition>,
}

#[derive(Debug, Deserialize)]
struct ServiceDefinition {
    url: String,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT.as_millis() as u64
}

/// A fixed set of services.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    services: HashMap<String, ServiceHandle>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, handle: ServiceHandle) -> Self {
        self.services.insert(handle.id.clone(), handle);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        let config: ServicesConfig = serde_json::from_str(json)?;
        let services = config
            .services
            .into_iter()
            .map(|(id, definition)| {
                let handle = ServiceHandle::new(id.clone(), definition.url)
                    .timeout(Duration::from_millis(definition.timeout_ms));
                (id, handle)
            })
            .collect();
        Ok(Self { services })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load the file named by `REQUESTS_SERVICES`; an unset variable gives
    /// an empty registry.
    pub fn from_env() -> Result<Self, RegistryError> {
        match std::env::var_os(SERVICES_ENV) {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl ServiceRegistry for StaticRegistry {
    fn create_service(&self, service_id: &str) -> Result<ServiceHandle, RegistryError> {
        let handle = self
            .services
            .get(service_id)
            .ok_or_else(|| RegistryError::UnknownService(service_id.to_string()))?;
        if handle.url.trim().is_empty() {
            return Err(RegistryError::InvalidService {
                id: service_id.to_string(),
                reason: "url is empty".to_string(),
            });
        }
        Ok(handle.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_service_resolves() {
        let registry = StaticRegistry::new()
            .register(ServiceHandle::new("orders", "http://orders.local").timeout(Duration::from_secs(5)));
        let handle = registry.create_service("orders").unwrap();
        assert_eq!(handle.url(), "http://orders.local");
        assert_eq!(handle.profile().timeout, Duration::from_secs(5));
    }

    #[test]
    fn unknown_service_fails() {
        let err = StaticRegistry::new().create_service("nope").unwrap_err();
        assert!(matches!(err, RegistryError::UnknownService(id) if id == "nope"));
    }

    #[test]
    fn empty_url_is_rejected() {
        let registry = StaticRegistry::new().register(ServiceHandle::new("blank", " "));
        let err = registry.create_service("blank").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidService { .. }));
    }

    #[test]
    fn json_config_with_default_timeout() {
        let registry = StaticRegistry::from_json_str(
            r#"{"services": {
                "a": {"url": "http://a.local", "timeout_ms": 1200},
                "b": {"url": "http://b.local"}
            }}"#,
        )
        .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.create_service("a").unwrap().profile().timeout,
            Duration::from_millis(1200)
        );
        assert_eq!(registry.create_service("b").unwrap().profile().timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn malformed_json_config() {
        let err = StaticRegistry::from_json_str(r#"{"services": {"a": {}}}"#).unwrap_err();
        assert!(matches!(err, RegistryError::Config(_)));
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("services.json");
        std::fs::write(&path, r#"{"services": {"files": {"url": "http://files.local"}}}"#).unwrap();
        let registry = StaticRegistry::from_path(&path).unwrap();
        assert_eq!(registry.create_service("files").unwrap().id(), "files");
    }

    #[test]
    fn missing_config_file() {
        let err = StaticRegistry::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, RegistryError::Io(_)));
    }
}
