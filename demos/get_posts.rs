//! List Posts Example
//!
//! Lists recent published posts along with the site's categories. Reads the
//! connection settings from the environment:
//!
//! ```text
//! export WP_CONNECT_WORDPRESS_URL="https://example.com/wp-json"
//! export WP_CONNECT_WORDPRESS_USERNAME="editor"
//! export WP_CONNECT_WORDPRESS_PASSWORD="app-password"
//! ```

use wp_connect::{ConfigManager, ListParams, PostListParams, WordPressClient};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ConfigManager::from_env();
    let client = WordPressClient::from_config(&config)?;

    // Credential probe before doing anything useful.
    let me = client.get_me()?;
    println!("Connected as {}", me["name"]);

    println!("\n=== Recent Posts ===");
    let posts = client.get_posts(&PostListParams::default().limit(5))?;
    for post in posts.as_array().into_iter().flatten() {
        println!("- {} (id {})", post["title"]["rendered"], post["id"]);
    }

    println!("\n=== Categories ===");
    let categories = client.get_categories(&ListParams::default())?;
    for category in categories.as_array().into_iter().flatten() {
        println!("- {} (id {})", category["name"], category["id"]);
    }

    Ok(())
}
