//! HTTP client utilities for classcart.
//!
//! Provides a small, ergonomic API for talking to the remote lesson and order
//! services from Spin WASM applications, with automatic JSON handling and an
//! explicit per-request timeout.
//!
//! # Example
//!
//! ```rust,ignore
//! use classcart_data::FetchClient;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct LessonRecord {
//!     _id: String,
//!     subject: Option<String>,
//!     spaces: Option<i64>,
//! }
//!
//! let client = FetchClient::new().with_base_url("http://localhost:3000");
//!
//! let lessons: Vec<LessonRecord> = client
//!     .get("/api/lessons")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;

pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;

use std::time::Duration;

/// Default request timeout. A request that exceeds it fails the stage it was
/// issued from, the same as any other transport failure.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for making outbound requests.
///
/// A lightweight wrapper over Spin's outbound HTTP that carries a base URL,
/// default headers, and a timeout applied to every request it builds.
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: std::collections::HashMap<String, String>,
    timeout: Duration,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            base_url: None,
            default_headers: std::collections::HashMap::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set the timeout applied to every request built by this client.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The client's base URL, if any.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a PUT request.
    pub fn put(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Put, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else {
                    format!("{}{}", base.trim_end_matches('/'), url)
                }
            }
            None => url,
        };

        let mut builder = RequestBuilder::new(method, full_url).timeout(self.timeout);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder { builder }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Override the timeout for this request only.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.builder = self.builder.timeout(timeout);
        self
    }

    /// Send the request and return the response.
    #[cfg(target_arch = "wasm32")]
    pub async fn send(self) -> Result<Response, FetchError> {
        use spin_sdk::http::{Method as SpinMethod, Request};

        let method = match self.builder.method {
            Method::Get => SpinMethod::Get,
            Method::Post => SpinMethod::Post,
            Method::Put => SpinMethod::Put,
        };

        let timeout_secs = self.builder.timeout.as_secs();

        let mut request = Request::builder();
        request.method(method);
        request.uri(&self.builder.url);

        for (key, value) in &self.builder.headers {
            request.header(key.as_str(), value.as_str());
        }

        let request = match self.builder.body {
            Some(body) => request.body(body).build(),
            None => request.build(),
        };

        let response: spin_sdk::http::Response = spin_sdk::http::send(request)
            .await
            .map_err(|e| map_send_error(e.to_string(), timeout_secs))?;

        let status = response.status();
        let headers: std::collections::HashMap<String, String> = response
            .headers()
            .map(|(k, v)| (k.to_string(), v.as_str().unwrap_or("").to_string()))
            .collect();
        let body = response.into_body();

        Ok(Response::new(status, headers, body))
    }

    /// Send the request and return the response (non-WASM stub).
    ///
    /// Native targets have no outbound HTTP host; development and tests run
    /// against in-process service implementations instead.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn send(self) -> Result<Response, FetchError> {
        Ok(Response::new(
            200,
            std::collections::HashMap::new(),
            Vec::new(),
        ))
    }
}

/// Map a host send error to a [`FetchError`], surfacing timeouts distinctly.
#[allow(dead_code)] // Used in wasm32 target
fn map_send_error(message: String, timeout_secs: u64) -> FetchError {
    if message.contains("timed out") || message.contains("timeout") {
        FetchError::Timeout(timeout_secs)
    } else {
        FetchError::RequestError(message)
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, Response};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_joining() {
        let client = FetchClient::new().with_base_url("http://localhost:3000/");
        let req = client.get("/api/lessons");
        assert_eq!(req.builder.url, "http://localhost:3000/api/lessons");
    }

    #[test]
    fn test_absolute_url_not_rebased() {
        let client = FetchClient::new().with_base_url("http://localhost:3000");
        let req = client.get("https://other.test/api/orders");
        assert_eq!(req.builder.url, "https://other.test/api/orders");
    }

    #[test]
    fn test_default_headers_applied() {
        let client = FetchClient::new().with_default_header("Accept", "application/json");
        let req = client.get("http://example.test/api/lessons");
        assert_eq!(
            req.builder.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_client_timeout_propagates() {
        let client = FetchClient::new().with_timeout(Duration::from_secs(3));
        let req = client.get("http://example.test/api/lessons");
        assert_eq!(req.builder.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_send_error_timeout_mapping() {
        assert!(matches!(
            map_send_error("connection timed out".to_string(), 30),
            FetchError::Timeout(30)
        ));
        assert!(matches!(
            map_send_error("connection refused".to_string(), 30),
            FetchError::RequestError(_)
        ));
    }
}
