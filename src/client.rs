//! HTTP client that resolves every call to a [`CallOutcome`].
//!
//! The [`Client`] type is the main entry point for making HTTP requests.
//! Use [`ClientBuilder`] to configure and create clients. Each invocation
//! performs the request exactly once; retry policy, if any, belongs to the
//! caller.

use crate::{
    cancel::CancelToken,
    decode::{Decoder, Json},
    outcome::{CallOutcome, FaultKind},
    request::RequestSpec,
    Error, Result,
};
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// An HTTP client that reports every call as a typed [`CallOutcome`].
///
/// The client is designed to be reused across multiple requests. It maintains
/// a connection pool and configuration that applies to all requests.
/// Concurrent invocations share nothing mutable; the client itself is a
/// cheap clone.
///
/// # Examples
///
/// ```no_run
/// use verdict::{CallOutcome, Client};
/// use serde::{Deserialize, Serialize};
/// use std::time::Duration;
///
/// #[derive(Serialize)]
/// struct CreateUser {
///     name: String,
///     email: String,
/// }
///
/// #[derive(Deserialize)]
/// struct User {
///     id: u64,
///     name: String,
///     email: String,
/// }
///
/// # async fn example() -> Result<(), verdict::Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")?
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// // GET request
/// if let CallOutcome::Success { value, .. } = client.get::<User>("/users/123").await {
///     println!("User: {}", value.name);
/// }
///
/// // POST request
/// let new_user = CreateUser {
///     name: "Alice".to_string(),
///     email: "alice@example.com".to_string(),
/// };
/// match client.post::<_, User>("/users", &new_user).await {
///     CallOutcome::Success { value, .. } => println!("Created user {}", value.id),
///     CallOutcome::HttpFailure { status, .. } => eprintln!("server said {status}"),
///     CallOutcome::TransportFailure { fault, message } => {
///         eprintln!("{fault} fault: {message}")
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: Url,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

/// The wire-level result of one attempt, with the body already drained.
///
/// Reading the body into this snapshot is the single point where the
/// response stream is consumed; every branch of [`resolve`] works on the
/// snapshot, so the stream is read (and released) exactly once per
/// invocation.
struct RawReply {
    status: StatusCode,
    headers: HeaderMap,
    body: std::result::Result<String, String>,
}

impl Client {
    /// Creates a new `ClientBuilder` for configuring a client.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use verdict::Client;
    ///
    /// # async fn example() -> Result<(), verdict::Error> {
    /// let client = Client::builder()
    ///     .base_url("https://api.example.com")?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Issues one request and resolves it to a [`CallOutcome`].
    ///
    /// This is the main entry point. The request is performed at most once;
    /// no fault escapes as a panic or a `Result` error — connect failures,
    /// timeouts, unreadable bodies, and decode failures all land in a
    /// variant of the outcome.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use verdict::{Client, Json, RequestSpec};
    /// use http::Method;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct SearchResults {
    ///     results: Vec<String>,
    /// }
    ///
    /// # async fn example() -> Result<(), verdict::Error> {
    /// let client = Client::builder()
    ///     .base_url("https://api.example.com")?
    ///     .build()?;
    ///
    /// let spec = RequestSpec::new(Method::GET, "/search").with_query_param("q", "rust");
    /// let outcome = client.invoke::<SearchResults, _>(spec, Json).await;
    /// if let Some(found) = outcome.as_success() {
    ///     println!("{} results", found.results.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn invoke<T, D>(&self, spec: RequestSpec, decoder: D) -> CallOutcome<T>
    where
        D: Decoder<T>,
    {
        let start = Instant::now();

        let reply = match self.perform(&spec).await {
            Ok(reply) => reply,
            Err(message) => {
                tracing::warn!(
                    error = %message,
                    method = %spec.method,
                    path = %spec.path,
                    "Transport fault before a status was obtained"
                );
                return CallOutcome::TransportFailure {
                    fault: FaultKind::Network,
                    message,
                };
            }
        };

        resolve(reply, &decoder, start.elapsed())
    }

    /// Like [`invoke`](Client::invoke), but races the call against a
    /// [`CancelToken`].
    ///
    /// If the token fires first, the in-flight request is aborted and the
    /// outcome is `TransportFailure { fault: Cancelled, .. }` — the call
    /// never hangs and its outcome is never silently dropped. A token that
    /// fires after completion is a no-op.
    pub async fn invoke_with_cancel<T, D>(
        &self,
        spec: RequestSpec,
        decoder: D,
        cancel: CancelToken,
    ) -> CallOutcome<T>
    where
        D: Decoder<T>,
    {
        let method = spec.method.clone();
        let path = spec.path.clone();

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(
                    method = %method,
                    path = %path,
                    "Call cancelled by caller"
                );
                CallOutcome::TransportFailure {
                    fault: FaultKind::Cancelled,
                    message: "call cancelled by caller".to_string(),
                }
            }
            outcome = self.invoke(spec, decoder) => outcome,
        }
    }

    /// Executes the single attempt and drains the body into a [`RawReply`].
    async fn perform(&self, spec: &RequestSpec) -> std::result::Result<RawReply, String> {
        // Build the full URL
        let mut url = self.inner.base_url.clone();
        url.set_path(&spec.path);

        // Add query parameters
        for (key, value) in &spec.query_params {
            url.query_pairs_mut().append_pair(key, value);
        }

        tracing::debug!(
            method = %spec.method,
            url = %url,
            "Executing HTTP request"
        );

        // Build the request
        let mut request = self.inner.http_client.request(spec.method.clone(), url);

        // Add default headers
        for (name, value) in &self.inner.default_headers {
            request = request.header(name, value);
        }

        // Add request-specific headers
        for (name, value) in &spec.headers {
            request = request.header(name, value);
        }

        // Add timeout if configured
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        // Add body if provided (already serialized by RequestSpec)
        if let Some(body) = &spec.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| describe_fault(&e))?;

        let status = response.status();
        let headers = response.headers().clone();
        // The one and only read of the body stream. reqwest releases the
        // connection when the read completes or the response is dropped.
        let body = response.text().await.map_err(|e| e.to_string());

        Ok(RawReply {
            status,
            headers,
            body,
        })
    }

    /// Makes a GET request, decoding the body as JSON.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use verdict::Client;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct User { name: String }
    ///
    /// # async fn example() -> Result<(), verdict::Error> {
    /// let client = Client::builder()
    ///     .base_url("https://api.example.com")?
    ///     .build()?;
    ///
    /// if let Some(user) = client.get::<User>("/users/123").await.success() {
    ///     println!("User: {}", user.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get<T>(&self, path: impl Into<String>) -> CallOutcome<T>
    where
        T: DeserializeOwned,
    {
        self.invoke(RequestSpec::new(Method::GET, path), Json).await
    }

    /// Makes a POST request with a JSON body, decoding the response as JSON.
    pub async fn post<B, T>(&self, path: impl Into<String>, body: &B) -> CallOutcome<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body).await
    }

    /// Makes a PUT request with a JSON body, decoding the response as JSON.
    pub async fn put<B, T>(&self, path: impl Into<String>, body: &B) -> CallOutcome<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, body).await
    }

    /// Makes a PATCH request with a JSON body, decoding the response as JSON.
    pub async fn patch<B, T>(&self, path: impl Into<String>, body: &B) -> CallOutcome<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.send_json(Method::PATCH, path, body).await
    }

    /// Makes a DELETE request, decoding the body as JSON.
    pub async fn delete<T>(&self, path: impl Into<String>) -> CallOutcome<T>
    where
        T: DeserializeOwned,
    {
        self.invoke(RequestSpec::new(Method::DELETE, path), Json)
            .await
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        path: impl Into<String>,
        body: &B,
    ) -> CallOutcome<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        // Convenience signatures have no error channel, so an encode failure
        // is folded into the outcome rather than returned separately.
        let spec = match RequestSpec::new(method, path).with_json_body(body) {
            Ok(spec) => spec,
            Err(e) => {
                return CallOutcome::TransportFailure {
                    fault: FaultKind::Decode,
                    message: format!("request body encoding failed: {e}"),
                }
            }
        };
        self.invoke(spec, Json).await
    }
}

/// Maps a completed attempt to its outcome.
///
/// Pure over the [`RawReply`] snapshot: every branch is reachable in a unit
/// test without a socket. The decoder runs under `catch_unwind` so a
/// panicking decoder degrades to a decode fault instead of unwinding
/// through the caller.
fn resolve<T, D>(reply: RawReply, decoder: &D, latency: Duration) -> CallOutcome<T>
where
    D: Decoder<T>,
{
    let RawReply {
        status,
        headers,
        body,
    } = reply;

    if !status.is_success() {
        let raw_error_body = match body {
            Ok(text) => Some(text),
            Err(read_error) => {
                tracing::warn!(
                    status = status.as_u16(),
                    error = %read_error,
                    "Error body could not be read"
                );
                None
            }
        };

        if status.is_client_error() {
            tracing::error!(
                status = status.as_u16(),
                latency_ms = latency.as_millis(),
                "Client error (4xx)"
            );
        } else {
            tracing::warn!(
                status = status.as_u16(),
                latency_ms = latency.as_millis(),
                "Non-2xx response"
            );
        }

        return CallOutcome::HttpFailure {
            status,
            raw_error_body,
        };
    }

    let raw = match body {
        Ok(text) => text,
        Err(read_error) => {
            tracing::warn!(
                status = status.as_u16(),
                error = %read_error,
                "Response body read failed after a 2xx status"
            );
            return CallOutcome::TransportFailure {
                fault: FaultKind::Network,
                message: format!("response body read failed: {read_error}"),
            };
        }
    };

    match panic::catch_unwind(AssertUnwindSafe(|| decoder.decode(&raw))) {
        Ok(Ok(value)) => {
            tracing::info!(
                status = status.as_u16(),
                latency_ms = latency.as_millis(),
                "Received HTTP response"
            );
            CallOutcome::Success {
                value,
                status,
                headers,
            }
        }
        Ok(Err(decode_error)) => {
            tracing::error!(
                error = %decode_error,
                raw_response = %raw,
                "Failed to decode response body"
            );
            CallOutcome::TransportFailure {
                fault: FaultKind::Decode,
                message: decode_error,
            }
        }
        Err(_) => {
            tracing::error!("Decoder panicked");
            CallOutcome::TransportFailure {
                fault: FaultKind::Decode,
                message: "decoder panicked".to_string(),
            }
        }
    }
}

/// Describes a reqwest error for the `TransportFailure` message.
fn describe_fault(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("request timed out: {e}")
    } else if e.is_connect() {
        format!("connection failed: {e}")
    } else {
        format!("network error: {e}")
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use verdict::ClientBuilder;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), verdict::Error> {
/// let client = ClientBuilder::new()
///     .base_url("https://api.example.com")?
///     .timeout(Duration::from_secs(30))
///     .default_header("User-Agent", "my-app/1.0")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<Url>,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            base_url: None,
            default_headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Sets the base URL for all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the per-request timeout. A request that exceeds it resolves to
    /// `TransportFailure { fault: Network, .. }`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if no base URL was provided or if the underlying
    /// HTTP client cannot be constructed.
    pub fn build(self) -> Result<Client> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Configuration("Base URL is required".to_string()))?;

        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                default_headers: self.default_headers,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
