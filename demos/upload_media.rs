//! Upload Media Example
//!
//! Uploads a file to the media library and attaches a title and alt text.
//! Usage: `cargo run --example upload_media -- ./photo.png`
//! Connection settings come from `WP_CONNECT_*` environment variables.

use wp_connect::{ConfigManager, MediaMetadata, WordPressClient};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: upload_media <file>")?;

    let config = ConfigManager::from_env();
    let client = WordPressClient::from_config(&config)?;

    let media = client.upload_media(
        &path,
        &MediaMetadata::default()
            .title("Uploaded by wp-connect")
            .alt_text("Demo upload"),
    )?;

    println!(
        "Uploaded media {} -> {}",
        media["id"],
        media["source_url"].as_str().unwrap_or("?")
    );

    Ok(())
}
