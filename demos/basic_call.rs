//! Basic example showing a GET and a POST resolved to typed outcomes.
//!
//! Run with: `cargo run --example basic_call`

use serde::{Deserialize, Serialize};
use std::time::Duration;
use verdict::{CallOutcome, Client};

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Post {
    id: u32,
    title: String,
    body: String,
}

#[derive(Serialize)]
struct NewPost {
    title: String,
    body: String,
    #[serde(rename = "userId")]
    user_id: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("verdict=info")
        .init();

    let client = Client::builder()
        .base_url("https://jsonplaceholder.typicode.com")?
        .timeout(Duration::from_secs(30))
        .build()?;

    println!("=== GET a post ===");
    match client.get::<Post>("/posts/1").await {
        CallOutcome::Success { value, status, .. } => {
            println!("Status: {}", status);
            println!("Title: {}", value.title);
        }
        CallOutcome::HttpFailure { status, .. } => println!("Server said: {}", status),
        CallOutcome::TransportFailure { fault, message } => {
            println!("{} fault: {}", fault, message)
        }
    }
    println!();

    println!("=== POST a new post ===");
    let new_post = NewPost {
        title: "typed outcomes".to_string(),
        body: "one call, one outcome".to_string(),
        user_id: 1,
    };
    match client.post::<_, Post>("/posts", &new_post).await {
        CallOutcome::Success { value, .. } => println!("Created post with ID: {}", value.id),
        CallOutcome::HttpFailure { status, .. } => println!("Server said: {}", status),
        CallOutcome::TransportFailure { fault, message } => {
            println!("{} fault: {}", fault, message)
        }
    }

    Ok(())
}
