//! JSONPlaceholder demo
//!
//! Drives the public JSONPlaceholder API from `apis/jsonplaceholder.json`.
//! Set `RUST_LOG=tapir=debug` to watch the requests.

// Demo-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]

use std::path::Path;

use serde::Deserialize;
use tapir::prelude::*;
use tracing_subscriber::EnvFilter;

/// A JSONPlaceholder post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
}

/// Load the bundled definition.
fn definition() -> tapir::Result<Definition> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("apis");
    Definition::from_name(dir, "jsonplaceholder")
}

/// Fetch one post, two pages of posts, and create a post.
async fn run<C: HttpClient>(tapir: &Tapir<C>) -> tapir::Result<()> {
    let posts = tapir.endpoint("posts")?;

    let post: BlogPost = posts
        .call("get", to_params(&json!({"id": 1}))?)
        .await?
        .json()?;
    println!(
        "post #{}: {} (by user {})",
        post.id, post.title, post.user_id
    );

    let pages = posts
        .page(
            "list",
            to_params(&json!({"_limit": 3}))?,
            &Pagination::new(1, 2).param("_page"),
        )
        .await?;
    for (index, page) in pages.iter().enumerate() {
        let count = page.as_array().map_or(0, Vec::len);
        println!("page {}: {count} posts", index + 1);
    }

    let created = posts
        .call(
            "create",
            to_params(&json!({"title": "tapir", "body": "declarative REST", "userId": 1}))?,
        )
        .await?;
    println!("created: {}", created.into_value());

    Ok(())
}

#[tokio::main]
async fn main() -> tapir::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let tapir = Tapir::builder(definition()?)
        .http_client(HyperClient::builder().with_logging().build())
        .build()?;

    println!("APIs: {}", tapir.endpoints().collect::<Vec<_>>().join(", "));
    run(&tapir).await
}

// ============================================================================
// Tests using wiremock
// ============================================================================
