//! Example demonstrating cancellation of an in-flight call.
//!
//! Run with: `cargo run --example cancellation`

use std::time::Duration;
use verdict::{cancel_pair, Client, FaultKind, Json, RequestSpec};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("verdict=info")
        .init();

    // httpbin's /delay endpoint stalls before responding, which gives the
    // cancel a window to land.
    let client = Client::builder().base_url("https://httpbin.org")?.build()?;

    let (handle, token) = cancel_pair();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        println!("cancelling...");
        handle.cancel();
    });

    let spec = RequestSpec::new(http::Method::GET, "/delay/10");
    let start = std::time::Instant::now();
    let outcome = client
        .invoke_with_cancel::<serde_json::Value, _>(spec, Json, token)
        .await;

    match outcome.fault() {
        Some(FaultKind::Cancelled) => {
            println!("cancelled after {:?}, no outcome was dropped", start.elapsed());
        }
        _ => println!("finished before the cancel landed: {:?}", outcome.status()),
    }

    Ok(())
}
