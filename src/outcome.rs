//! The typed outcome of a single HTTP call.
//!
//! [`CallOutcome`] replaces the usual `Result`-of-exceptions shape with a
//! closed, exhaustively matchable set of three variants: the call succeeded
//! and the body decoded, the server answered with a non-2xx status, or the
//! call never completed (network fault, undecodable body, or cancellation).

use http::{HeaderMap, StatusCode};

/// The outcome of exactly one network invocation.
///
/// Every call resolves to exactly one of these variants; the resolving code
/// never panics and never returns an error through a separate channel, so a
/// `match` over `CallOutcome` is guaranteed to cover everything that can
/// happen to a request.
///
/// # Examples
///
/// ```no_run
/// use verdict::{CallOutcome, Client, FaultKind};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// # async fn example() -> Result<(), verdict::Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")?
///     .build()?;
///
/// match client.get::<User>("/users/123").await {
///     CallOutcome::Success { value, status, .. } => {
///         println!("{} ({})", value.name, status);
///     }
///     CallOutcome::HttpFailure { status, raw_error_body } => {
///         eprintln!("server said {}: {:?}", status, raw_error_body);
///     }
///     CallOutcome::TransportFailure { fault: FaultKind::Cancelled, .. } => {
///         eprintln!("caller gave up");
///     }
///     CallOutcome::TransportFailure { fault, message } => {
///         eprintln!("{fault} failure: {message}");
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub enum CallOutcome<T> {
    /// The request completed with a 2xx status and the body decoded into `T`.
    Success {
        /// The decoded response payload.
        value: T,
        /// The HTTP status code (always in the 2xx range).
        status: StatusCode,
        /// The response headers.
        headers: HeaderMap,
    },

    /// The request completed with a status outside the 2xx range.
    ///
    /// The error body is captured best-effort: if reading it from the wire
    /// fails, `raw_error_body` is `None` and the outcome is still an
    /// `HttpFailure` with the observed status.
    HttpFailure {
        /// The HTTP status code.
        status: StatusCode,
        /// The raw error body, if it could be read.
        raw_error_body: Option<String>,
    },

    /// The request never completed, or a 2xx body could not be decoded.
    TransportFailure {
        /// What class of fault prevented a usable response.
        fault: FaultKind,
        /// A human-readable description of the fault.
        message: String,
    },
}

/// The class of fault behind a [`CallOutcome::TransportFailure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// The transport failed before a usable response was obtained: DNS,
    /// connect, TLS, timeout, or stream I/O.
    Network,
    /// The response arrived with a 2xx status but the body could not be
    /// decoded into the expected type.
    Decode,
    /// The caller cancelled the call before it completed.
    Cancelled,
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FaultKind::Network => "network",
            FaultKind::Decode => "decode",
            FaultKind::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

impl<T> CallOutcome<T> {
    /// Returns `true` if this outcome is a [`CallOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Success { .. })
    }

    /// Returns `true` if this outcome is a [`CallOutcome::HttpFailure`].
    pub fn is_http_failure(&self) -> bool {
        matches!(self, CallOutcome::HttpFailure { .. })
    }

    /// Returns `true` if this outcome is a [`CallOutcome::TransportFailure`].
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, CallOutcome::TransportFailure { .. })
    }

    /// Returns the HTTP status code if the request completed.
    ///
    /// This is `Some` for `Success` and `HttpFailure`, `None` for
    /// `TransportFailure` (no status was ever observed).
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CallOutcome::Success { status, .. } => Some(*status),
            CallOutcome::HttpFailure { status, .. } => Some(*status),
            CallOutcome::TransportFailure { .. } => None,
        }
    }

    /// Returns the fault kind if the request never produced a usable response.
    pub fn fault(&self) -> Option<FaultKind> {
        match self {
            CallOutcome::TransportFailure { fault, .. } => Some(*fault),
            _ => None,
        }
    }

    /// Returns the raw error body if the server answered with a non-2xx
    /// status and the body could be read.
    pub fn raw_error_body(&self) -> Option<&str> {
        match self {
            CallOutcome::HttpFailure {
                raw_error_body: Some(body),
                ..
            } => Some(body),
            _ => None,
        }
    }

    /// Consumes the outcome, returning the decoded value if it succeeded.
    pub fn success(self) -> Option<T> {
        match self {
            CallOutcome::Success { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Returns a reference to the decoded value if the call succeeded.
    pub fn as_success(&self) -> Option<&T> {
        match self {
            CallOutcome::Success { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Maps the decoded value to a different type, leaving the failure
    /// variants untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// # use verdict::CallOutcome;
    /// # use http::{HeaderMap, StatusCode};
    /// let outcome = CallOutcome::Success {
    ///     value: 42,
    ///     status: StatusCode::OK,
    ///     headers: HeaderMap::new(),
    /// };
    ///
    /// let stringified = outcome.map(|n| n.to_string());
    /// assert_eq!(stringified.success(), Some("42".to_string()));
    /// ```
    pub fn map<U, F>(self, f: F) -> CallOutcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            CallOutcome::Success {
                value,
                status,
                headers,
            } => CallOutcome::Success {
                value: f(value),
                status,
                headers,
            },
            CallOutcome::HttpFailure {
                status,
                raw_error_body,
            } => CallOutcome::HttpFailure {
                status,
                raw_error_body,
            },
            CallOutcome::TransportFailure { fault, message } => {
                CallOutcome::TransportFailure { fault, message }
            }
        }
    }

    /// Bridges the outcome into a `Result` for callers that prefer `?`.
    ///
    /// Both failure variants collapse into [`CallFailure`]; the success
    /// metadata (status, headers) is dropped.
    pub fn into_result(self) -> Result<T, CallFailure> {
        match self {
            CallOutcome::Success { value, .. } => Ok(value),
            CallOutcome::HttpFailure {
                status,
                raw_error_body,
            } => Err(CallFailure::Http {
                status,
                raw_error_body,
            }),
            CallOutcome::TransportFailure { fault, message } => {
                Err(CallFailure::Transport { fault, message })
            }
        }
    }
}

/// The failure half of [`CallOutcome::into_result`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum CallFailure {
    /// The server answered with a non-2xx status.
    #[error("HTTP error {status}: {}", .raw_error_body.as_deref().unwrap_or("<unreadable body>"))]
    Http {
        /// The HTTP status code.
        status: StatusCode,
        /// The raw error body, if it could be read.
        raw_error_body: Option<String>,
    },

    /// The request never produced a usable response.
    #[error("{fault} fault: {message}")]
    Transport {
        /// What class of fault prevented a usable response.
        fault: FaultKind,
        /// A human-readable description of the fault.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success() -> CallOutcome<u32> {
        CallOutcome::Success {
            value: 7,
            status: StatusCode::OK,
            headers: HeaderMap::new(),
        }
    }

    #[test]
    fn accessors_on_success() {
        let outcome = success();
        assert!(outcome.is_success());
        assert_eq!(outcome.status(), Some(StatusCode::OK));
        assert_eq!(outcome.fault(), None);
        assert_eq!(outcome.as_success(), Some(&7));
        assert_eq!(outcome.success(), Some(7));
    }

    #[test]
    fn accessors_on_http_failure() {
        let outcome: CallOutcome<u32> = CallOutcome::HttpFailure {
            status: StatusCode::NOT_FOUND,
            raw_error_body: Some("missing".to_string()),
        };
        assert!(outcome.is_http_failure());
        assert_eq!(outcome.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(outcome.raw_error_body(), Some("missing"));
        assert_eq!(outcome.success(), None);
    }

    #[test]
    fn accessors_on_transport_failure() {
        let outcome: CallOutcome<u32> = CallOutcome::TransportFailure {
            fault: FaultKind::Network,
            message: "connection refused".to_string(),
        };
        assert!(outcome.is_transport_failure());
        assert_eq!(outcome.status(), None);
        assert_eq!(outcome.fault(), Some(FaultKind::Network));
        assert_eq!(outcome.raw_error_body(), None);
    }

    #[test]
    fn map_preserves_failures() {
        let outcome: CallOutcome<u32> = CallOutcome::HttpFailure {
            status: StatusCode::BAD_REQUEST,
            raw_error_body: None,
        };
        let mapped = outcome.map(|n| n.to_string());
        assert_eq!(mapped.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(mapped.raw_error_body(), None);
    }

    #[test]
    fn into_result_bridges_both_failure_variants() {
        assert_eq!(success().into_result().unwrap(), 7);

        let http: CallOutcome<u32> = CallOutcome::HttpFailure {
            status: StatusCode::IM_A_TEAPOT,
            raw_error_body: Some("short and stout".to_string()),
        };
        match http.into_result() {
            Err(CallFailure::Http { status, .. }) => {
                assert_eq!(status, StatusCode::IM_A_TEAPOT)
            }
            other => panic!("expected Http failure, got {other:?}"),
        }

        let transport: CallOutcome<u32> = CallOutcome::TransportFailure {
            fault: FaultKind::Cancelled,
            message: "caller hung up".to_string(),
        };
        match transport.into_result() {
            Err(CallFailure::Transport { fault, .. }) => {
                assert_eq!(fault, FaultKind::Cancelled)
            }
            other => panic!("expected Transport failure, got {other:?}"),
        }
    }

    #[test]
    fn fault_kind_display() {
        assert_eq!(FaultKind::Network.to_string(), "network");
        assert_eq!(FaultKind::Decode.to_string(), "decode");
        assert_eq!(FaultKind::Cancelled.to_string(), "cancelled");
    }
}
