//! wp-connect
//!
//! A thin synchronous client for the WordPress REST API. Resource operations
//! (posts, categories, tags, media, users, comments) are one-to-one
//! translations into HTTP requests through a shared request executor; the
//! responses come back as opaque JSON values.
//!
//! ```rust,no_run
//! use wp_connect::{NewPost, PostListParams, WordPressClient};
//!
//! fn main() -> Result<(), wp_connect::WpError> {
//!     let client = WordPressClient::builder()
//!         .base_url("https://example.com/wp-json")
//!         .basic_auth("editor", "app-password")
//!         .build()?;
//!
//!     let posts = client.get_posts(&PostListParams::default().limit(5))?;
//!     println!("{posts:#}");
//!
//!     let created = client.create_post(&NewPost::new("Hello", "<p>World</p>"))?;
//!     println!("created post {}", created["id"]);
//!     Ok(())
//! }
//! ```
//!
//! Credentials can also come from the environment or a JSON file via
//! [`ConfigManager`] and [`WordPressClient::from_config`].
#![deny(unsafe_code)]

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod wordpress;

pub use auth::Credentials;
pub use config::ConfigManager;
pub use error::WpError;
pub use http::{ApiClient, RequestBody, RequestSpec};
pub use wordpress::{
    CommentListParams, ListParams, MediaMetadata, NewPost, PostListParams, PostUpdate,
    WordPressClient, WordPressClientBuilder,
};
