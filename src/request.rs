//! Per-endpoint request specifications.
//!
//! A [`RequestSpec`] is built explicitly per call site. There is no runtime
//! registration or reflection: an endpoint is a function that returns a
//! `RequestSpec`, checked by the compiler like any other code.

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use std::collections::HashMap;

/// Everything needed to issue one HTTP request.
///
/// The body, if any, is serialized eagerly when the spec is built, so
/// issuing the request cannot fail on an encode path.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// The HTTP method (GET, POST, etc.).
    pub method: Method,

    /// The request path (relative to the client's base URL).
    pub path: String,

    /// Additional headers for this request.
    pub headers: HeaderMap,

    /// Query parameters for this request.
    pub query_params: HashMap<String, String>,

    /// The JSON request body, already serialized.
    pub body: Option<serde_json::Value>,
}

impl RequestSpec {
    /// Creates a new `RequestSpec` with the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            query_params: HashMap::new(),
            body: None,
        }
    }

    /// Adds a header to the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, crate::Error> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| crate::Error::Configuration(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| crate::Error::Configuration(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Adds a query parameter to the request.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    /// Adds multiple query parameters to the request.
    pub fn with_query_params(
        mut self,
        params: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        self.query_params.extend(params);
        self
    }

    /// Sets a JSON body, serializing it immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized to JSON.
    pub fn with_json_body<B: Serialize>(mut self, body: &B) -> Result<Self, crate::Error> {
        let value = serde_json::to_value(body)
            .map_err(|e| crate::Error::Serialization(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }
}

impl Default for RequestSpec {
    fn default() -> Self {
        Self::new(Method::GET, "")
    }
}
