//! HTTP client utilities for the catalog API.
//!
//! Provides a small builder API over [`reqwest`] with automatic JSON and
//! multipart handling. Responses are fully buffered so callers can inspect
//! the status before deciding how to decode the body.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_data::{FetchClient, MultipartForm};
//!
//! let client = FetchClient::new().with_base_url("http://localhost:3001");
//!
//! // GET with query parameters
//! let products: serde_json::Value = client
//!     .get("/catalog/products")
//!     .query_pairs([("page".to_string(), "1".to_string())])
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//!
//! // POST multipart
//! let form = MultipartForm::new().text("nombre", "Cafe");
//! client.post("/catalog/product").multipart(form).send().await?;
//! ```

mod error;
mod request;
mod response;

use std::collections::HashMap;
use std::time::Duration;

pub use error::FetchError;
pub use request::{Body, Method, MultipartForm, Part, RequestBuilder};
pub use response::Response;

/// HTTP client for making outbound requests.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct FetchClient {
    inner: reqwest::Client,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    timeout: Option<Duration>,
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
            inner: reqwest::Client::new(),
            base_url: None,
            default_headers: HashMap::new(),
            timeout: None,
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

    /// Apply a per-request timeout. No timeout is applied by default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a PATCH request.
    pub fn patch(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Patch, url)
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

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            client: self.inner.clone(),
            timeout: self.timeout,
            builder,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    client: reqwest::Client,
    timeout: Option<Duration>,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Append several query parameters.
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.builder = self.builder.query_pairs(pairs);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Set the request body as a multipart form.
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.builder = self.builder.multipart(form);
        self
    }

    /// The underlying request description.
    pub fn request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and buffer the response.
    ///
    /// Non-2xx statuses are returned as a normal [`Response`]; use
    /// [`Response::error_for_status`] to turn them into errors.
    pub async fn send(self) -> Result<Response, FetchError> {
        let url = self.builder.full_url()?;
        let RequestBuilder {
            method,
            headers,
            body,
            ..
        } = self.builder;

        tracing::debug!(method = method.as_str(), url = %url, "sending request");

        let mut request = self.client.request(method.to_reqwest(), url.clone());
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        request = match body {
            None => request,
            Some(Body::Bytes(bytes)) => request.body(bytes),
            Some(Body::Multipart(form)) => request.multipart(form.into_reqwest()?),
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(status, url = %url, bytes = body.len(), "received response");

        Ok(Response::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_prepended() {
        let client = FetchClient::new().with_base_url("http://localhost:3001/");
        let req = client.get("/catalog/families");
        assert_eq!(req.request().url, "http://localhost:3001/catalog/families");
    }

    #[test]
    fn test_absolute_url_bypasses_base() {
        let client = FetchClient::new().with_base_url("http://localhost:3001");
        let req = client.get("https://images.example.com/a.png");
        assert_eq!(req.request().url, "https://images.example.com/a.png");
    }

    #[test]
    fn test_default_headers_are_applied() {
        let client = FetchClient::new().with_default_header("Accept", "application/json");
        let req = client.post("http://localhost/x");
        assert_eq!(req.request().header_value("accept"), Some("application/json"));
        assert_eq!(req.request().method(), Method::Post);
    }

    #[test]
    fn test_catalog_methods() {
        let client = FetchClient::new().with_base_url("http://localhost:3001");
        let cases = [
            (client.get("/catalog/families"), Method::Get, "GET"),
            (client.post("/catalog/product"), Method::Post, "POST"),
            (client.patch("/catalog/product/7"), Method::Patch, "PATCH"),
        ];
        for (req, method, name) in cases {
            assert_eq!(req.request().method(), method);
            assert_eq!(method.as_str(), name);
        }
    }

    #[tokio::test]
    async fn test_send_to_unreachable_host_is_transport_error() {
        // Port 9 (discard) on localhost is closed on test machines.
        let client = FetchClient::new().with_base_url("http://127.0.0.1:9");
        let err = client.get("/catalog/families").send().await.unwrap_err();
        assert!(err.is_transport(), "unexpected error: {:?}", err);
    }

    #[tokio::test]
    async fn test_send_with_invalid_url_fails_before_network() {
        let client = FetchClient::new();
        let err = client.get("/relative/without/base").send().await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }
}
