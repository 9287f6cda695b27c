//! Example demonstrating the full outcome taxonomy.
//!
//! This example shows how to:
//! - Match every variant of `CallOutcome` exhaustively
//! - Inspect the raw error body on HTTP failures
//! - Distinguish decode faults from network faults
//! - Bridge into a `Result` for `?`-style call sites
//!
//! Run with: `cargo run --example outcome_handling`

use serde::Deserialize;
use verdict::{CallOutcome, Client, FaultKind};

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Post {
    id: u32,
    title: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("verdict=info")
        .init();

    let client = Client::builder()
        .base_url("https://jsonplaceholder.typicode.com")?
        .build()?;

    println!("=== Example 1: HTTP failure with error body ===");
    // Fetch a resource that does not exist (404)
    match client.get::<Post>("/posts/999999").await {
        CallOutcome::Success { value, .. } => println!("Unexpected success: {:?}", value),
        CallOutcome::HttpFailure {
            status,
            raw_error_body,
        } => {
            println!("HTTP Failure!");
            println!("  Status: {}", status);
            println!("  Is client error (4xx): {}", status.is_client_error());
            println!("  Raw error body: {:?}", raw_error_body);
        }
        CallOutcome::TransportFailure { fault, message } => {
            println!("{} fault: {}", fault, message)
        }
    }
    println!();

    println!("=== Example 2: Decode fault on a 2xx response ===");
    // A schema that does not match the API response
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct WrongSchema {
        nonexistent_field: String,
    }

    match client.get::<WrongSchema>("/posts/1").await {
        CallOutcome::TransportFailure {
            fault: FaultKind::Decode,
            message,
        } => {
            println!("Decode fault (the transport was fine, the payload was not):");
            println!("  {}", message);
        }
        other => println!("Unexpected outcome: {:?}", other),
    }
    println!();

    println!("=== Example 3: Network fault ===");
    let bad_client = Client::builder()
        .base_url("https://this-domain-does-not-exist-12345.com")?
        .build()?;

    match bad_client.get::<serde_json::Value>("/").await {
        CallOutcome::TransportFailure {
            fault: FaultKind::Network,
            message,
        } => {
            println!("Network fault (no status was ever observed):");
            println!("  {}", message);
        }
        other => println!("Unexpected outcome: {:?}", other),
    }
    println!();

    println!("=== Example 4: Bridging into Result ===");
    let title = client
        .get::<Post>("/posts/1")
        .await
        .into_result()
        .map(|post| post.title);
    match title {
        Ok(title) => println!("Fetched via ?-style bridge: {}", title),
        Err(failure) => println!("Call failed: {}", failure),
    }

    Ok(())
}
