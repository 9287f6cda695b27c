//! # Verdict - typed outcomes for single-shot HTTP calls
//!
//! Verdict is a small HTTP client adapter built on top of `reqwest`. Each
//! invocation performs exactly one request and resolves it to a
//! [`CallOutcome`]: success with a decoded payload, an HTTP failure with
//! status and raw error body, or a transport failure (network fault, decode
//! failure, or cancellation). Nothing escapes as an exception-style error —
//! a `match` over the outcome covers everything that can happen to a call.
//!
//! ## Quick Start
//!
//! ```no_run
//! use verdict::{CallOutcome, Client};
//! use serde::Deserialize;
//! use std::time::Duration;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), verdict::Error> {
//!     let client = Client::builder()
//!         .base_url("https://api.example.com")?
//!         .timeout(Duration::from_secs(30))
//!         .build()?;
//!
//!     match client.get::<User>("/users/123").await {
//!         CallOutcome::Success { value, status, .. } => {
//!             println!("{} (status {})", value.name, status);
//!         }
//!         CallOutcome::HttpFailure { status, raw_error_body } => {
//!             eprintln!("HTTP {}: {:?}", status, raw_error_body);
//!         }
//!         CallOutcome::TransportFailure { fault, message } => {
//!             eprintln!("{} fault: {}", fault, message);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **One call, one outcome** - every request resolves to exactly one
//!   [`CallOutcome`]; no retries, no hidden attempts, no hangs
//! - **Closed failure taxonomy** - application failures (non-2xx, with the
//!   raw error body preserved best-effort) are distinct from transport
//!   faults ([`FaultKind::Network`], [`FaultKind::Decode`],
//!   [`FaultKind::Cancelled`])
//! - **Pluggable decoding** - JSON out of the box via [`Json`], raw text via
//!   [`Text`], or any closure; a panicking decoder degrades to a decode
//!   fault instead of unwinding
//! - **Cancellation** - pair a [`CancelHandle`] with an in-flight call and
//!   observe `Cancelled` instead of an orphaned future
//! - **Explicit per-endpoint requests** - [`RequestSpec`] is plain data
//!   built in plain code, no reflection or runtime registration
//! - **Automatic logging** - structured logging with `tracing` for
//!   observability
//! - **Connection pooling** - reusable clients with efficient connection
//!   management via `reqwest`
//!
//! ## The outcome taxonomy
//!
//! | observed at the wire                   | outcome                                   |
//! |----------------------------------------|-------------------------------------------|
//! | 2xx, body decodes into `T`             | `Success { value, status, headers }`      |
//! | non-2xx, body readable                 | `HttpFailure { status, Some(body) }`      |
//! | non-2xx, body unreadable               | `HttpFailure { status, None }`            |
//! | connect/DNS/TLS/timeout/stream fault   | `TransportFailure { fault: Network }`     |
//! | 2xx, body does not decode into `T`     | `TransportFailure { fault: Decode }`      |
//! | cancelled before completion            | `TransportFailure { fault: Cancelled }`   |
//!
//! ## Cancellation
//!
//! ```no_run
//! use verdict::{cancel_pair, Client, FaultKind, Json, RequestSpec};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), verdict::Error> {
//! let client = Client::builder()
//!     .base_url("https://api.example.com")?
//!     .build()?;
//!
//! let (handle, token) = cancel_pair();
//! tokio::spawn(async move {
//!     tokio::time::sleep(Duration::from_millis(500)).await;
//!     handle.cancel();
//! });
//!
//! let spec = RequestSpec::new(http::Method::GET, "/slow-report");
//! let outcome = client
//!     .invoke_with_cancel::<serde_json::Value, _>(spec, Json, token)
//!     .await;
//!
//! if outcome.fault() == Some(FaultKind::Cancelled) {
//!     eprintln!("gave up waiting");
//! }
//! # Ok(())
//! # }
//! ```

mod cancel;
mod client;
mod decode;
mod error;
mod outcome;
pub mod request;

pub use cancel::{cancel_pair, CancelHandle, CancelToken};
pub use client::{Client, ClientBuilder};
pub use decode::{Decoder, Json, Text};
pub use error::{Error, Result};
pub use outcome::{CallFailure, CallOutcome, FaultKind};
pub use request::RequestSpec;
