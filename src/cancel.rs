//! Cancellation of in-flight calls.
//!
//! [`cancel_pair`] yields a handle/token pair over a watch channel. The
//! caller keeps the [`CancelHandle`] and passes the [`CancelToken`] to
//! [`Client::invoke_with_cancel`](crate::Client::invoke_with_cancel).
//! Cancelling resolves the call to
//! `TransportFailure { fault: Cancelled, .. }` instead of leaving it
//! dangling.

use tokio::sync::watch;

/// Creates a linked cancellation handle and token.
///
/// # Examples
///
/// ```no_run
/// use verdict::{cancel_pair, Client, FaultKind, Json, RequestSpec};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), verdict::Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")?
///     .build()?;
///
/// let (handle, token) = cancel_pair();
/// tokio::spawn(async move {
///     tokio::time::sleep(Duration::from_millis(200)).await;
///     handle.cancel();
/// });
///
/// let spec = RequestSpec::new(http::Method::GET, "/slow");
/// let outcome = client
///     .invoke_with_cancel::<serde_json::Value, _>(spec, Json, token)
///     .await;
/// assert_eq!(outcome.fault(), Some(FaultKind::Cancelled));
/// # Ok(())
/// # }
/// ```
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

/// The caller-side handle that triggers cancellation.
///
/// Dropping the handle without calling [`cancel`](CancelHandle::cancel)
/// leaves linked tokens permanently un-cancelled.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Cancels every call holding a linked token. Idempotent.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }

    /// Returns `true` if [`cancel`](CancelHandle::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

/// The call-side token observed during resolution.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// Resolves once the linked handle cancels.
    ///
    /// If the handle was dropped without cancelling, this future never
    /// resolves.
    pub async fn cancelled(mut self) {
        if self.rx.wait_for(|fired| *fired).await.is_err() {
            std::future::pending::<()>().await;
        }
    }

    /// Returns `true` if the linked handle has already cancelled.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }
}
