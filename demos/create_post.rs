//! Create Post Example
//!
//! Creates a draft post, then publishes it with a partial update. Connection
//! settings come from `WP_CONNECT_*` environment variables (see the
//! `get_posts` demo).

use wp_connect::{ConfigManager, NewPost, PostUpdate, WordPressClient};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ConfigManager::from_env();
    let client = WordPressClient::from_config(&config)?;

    let draft = client.create_post(
        &NewPost::new(
            "Hello from wp-connect",
            "<p>This post was created over the REST API.</p>",
        )
        .excerpt("A short greeting."),
    )?;
    let post_id = draft["id"].as_u64().expect("created post has an id");
    println!("Created draft {post_id}");

    // Publish with a partial update: only the status field is sent.
    let published = client.update_post(post_id, &PostUpdate::default().status("publish"))?;
    println!(
        "Published {} -> {}",
        post_id,
        published["link"].as_str().unwrap_or("?")
    );

    Ok(())
}
