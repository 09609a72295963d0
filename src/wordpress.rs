//! WordPress Resource Client
//!
//! One method per WordPress REST resource operation. Each method builds a
//! [`RequestSpec`] for an endpoint under `wp/v2/` and delegates to the
//! request executor; responses are passed through as opaque JSON values, the
//! client does not model WordPress's response schemas.
//!
//! Write payloads use explicit option-structs ([`NewPost`], [`PostUpdate`],
//! [`MediaMetadata`]): a field that was never set is omitted from the body,
//! while an explicitly-set empty string or zero id is sent as-is.

use std::fs;
use std::path::Path;

use secrecy::SecretString;
use serde::Serialize;
use serde_json::Value;

use crate::auth::Credentials;
use crate::config::ConfigManager;
use crate::error::WpError;
use crate::http::{ApiClient, RequestSpec};

/// Pagination window shared by the simple list operations.
#[derive(Debug, Clone)]
pub struct ListParams {
    /// Number of entities per page (`per_page`)
    pub limit: u32,
    /// Page number, 1-based
    pub page: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self { limit: 10, page: 1 }
    }
}

impl ListParams {
    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the page number.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    fn query_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("per_page".to_string(), self.limit.to_string()),
            ("page".to_string(), self.page.to_string()),
        ]
    }
}

/// Filters for listing posts.
#[derive(Debug, Clone)]
pub struct PostListParams {
    /// Number of posts per page
    pub limit: u32,
    /// Page number, 1-based
    pub page: u32,
    /// Post status filter, always sent
    pub status: String,
    /// Full-text search term, sent only when set
    pub search: Option<String>,
    /// Category id filter, comma-joined, sent only when set
    pub categories: Option<Vec<u64>>,
    /// Tag id filter, comma-joined, sent only when set
    pub tags: Option<Vec<u64>>,
}

impl Default for PostListParams {
    fn default() -> Self {
        Self {
            limit: 10,
            page: 1,
            status: "publish".to_string(),
            search: None,
            categories: None,
            tags: None,
        }
    }
}

impl PostListParams {
    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the page number.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the status filter (`publish`, `draft`, ...).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Set a search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Filter by category ids.
    pub fn categories(mut self, ids: Vec<u64>) -> Self {
        self.categories = Some(ids);
        self
    }

    /// Filter by tag ids.
    pub fn tags(mut self, ids: Vec<u64>) -> Self {
        self.tags = Some(ids);
        self
    }

    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("per_page".to_string(), self.limit.to_string()),
            ("page".to_string(), self.page.to_string()),
            ("status".to_string(), self.status.clone()),
        ];
        if let Some(term) = &self.search {
            pairs.push(("search".to_string(), term.clone()));
        }
        if let Some(ids) = &self.categories {
            pairs.push(("categories".to_string(), join_ids(ids)));
        }
        if let Some(ids) = &self.tags {
            pairs.push(("tags".to_string(), join_ids(ids)));
        }
        pairs
    }
}

/// Filters for listing comments.
#[derive(Debug, Clone, Default)]
pub struct CommentListParams {
    /// Pagination window
    pub list: ListParams,
    /// Restrict to comments on one post, sent only when set
    pub post: Option<u64>,
}

impl CommentListParams {
    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.list.limit = limit;
        self
    }

    /// Set the page number.
    pub fn page(mut self, page: u32) -> Self {
        self.list.page = page;
        self
    }

    /// Restrict to comments on the given post.
    pub fn post(mut self, post_id: u64) -> Self {
        self.post = Some(post_id);
        self
    }
}

/// Body for creating a post. Unset optional fields are omitted from the
/// JSON payload.
#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    /// Post title
    pub title: String,
    /// Post content (HTML)
    pub content: String,
    /// Publication status, defaults to `draft`
    pub status: String,
    /// Post excerpt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Category ids to assign
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<u64>>,
    /// Tag ids to assign
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<u64>>,
    /// Featured image attachment id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<u64>,
}

impl NewPost {
    /// A draft post with the given title and content.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            status: "draft".to_string(),
            excerpt: None,
            categories: None,
            tags: None,
            featured_media: None,
        }
    }

    /// Set the publication status.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Set the excerpt.
    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    /// Assign category ids.
    pub fn categories(mut self, ids: Vec<u64>) -> Self {
        self.categories = Some(ids);
        self
    }

    /// Assign tag ids.
    pub fn tags(mut self, ids: Vec<u64>) -> Self {
        self.tags = Some(ids);
        self
    }

    /// Set the featured image id.
    pub fn featured_media(mut self, id: u64) -> Self {
        self.featured_media = Some(id);
        self
    }
}

/// Partial update for an existing post. Only fields that were explicitly set
/// appear in the JSON body (PATCH-like semantics over POST).
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostUpdate {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// New excerpt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Replacement category ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<u64>>,
    /// Replacement tag ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<u64>>,
    /// Replacement featured image id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<u64>,
}

impl PostUpdate {
    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the status.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the excerpt.
    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    /// Replace the category ids.
    pub fn categories(mut self, ids: Vec<u64>) -> Self {
        self.categories = Some(ids);
        self
    }

    /// Replace the tag ids.
    pub fn tags(mut self, ids: Vec<u64>) -> Self {
        self.tags = Some(ids);
        self
    }

    /// Replace the featured image id.
    pub fn featured_media(mut self, id: u64) -> Self {
        self.featured_media = Some(id);
        self
    }
}

/// Metadata attached to an uploaded media item in a follow-up request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MediaMetadata {
    /// Media title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Media caption
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Alternative text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

impl MediaMetadata {
    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the caption.
    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set the alternative text.
    pub fn alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }

    fn is_empty(&self) -> bool {
        self.title.is_none() && self.caption.is_none() && self.alt_text.is_none()
    }
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Client for the WordPress REST API.
///
/// Construct with [`WordPressClient::builder`] and pass the instance (or a
/// reference) through the call chain; there is no global instance. One
/// persistent HTTP session is owned per client. Every method blocks the
/// calling thread until the round trip completes; the client itself never
/// issues concurrent requests, callers wanting parallelism bring their own
/// concurrency layer.
#[derive(Debug, Clone)]
pub struct WordPressClient {
    api: ApiClient,
}

impl WordPressClient {
    /// Start building a client.
    pub fn builder() -> WordPressClientBuilder {
        WordPressClientBuilder::default()
    }

    /// Build a client from `wordpress.*` configuration keys:
    /// `wordpress.url`, `wordpress.username`, `wordpress.password`,
    /// `wordpress.token`, `wordpress.user_agent`.
    pub fn from_config(config: &ConfigManager) -> Result<Self, WpError> {
        let mut builder = Self::builder();
        if let Some(url) = config.get_str("wordpress.url") {
            builder = builder.base_url(url);
        }
        if let (Some(username), Some(password)) = (
            config.get_str("wordpress.username"),
            config.get_str("wordpress.password"),
        ) {
            builder = builder.basic_auth(username, password);
        }
        if let Some(token) = config.get_str("wordpress.token") {
            builder = builder.bearer_token(token);
        }
        if let Some(user_agent) = config.get_str("wordpress.user_agent") {
            builder = builder.user_agent(user_agent);
        }
        builder.build()
    }

    /// The underlying request executor, for endpoints this client does not
    /// model.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    // Posts

    /// List posts. `per_page`, `page` and `status` are always sent; `search`,
    /// `categories` and `tags` only when set.
    pub fn get_posts(&self, params: &PostListParams) -> Result<Value, WpError> {
        self.api.get("wp/v2/posts", params.query_pairs())
    }

    /// Fetch a single post by id.
    pub fn get_post(&self, post_id: u64) -> Result<Value, WpError> {
        self.api.get(&format!("wp/v2/posts/{post_id}"), Vec::new())
    }

    /// Create a post.
    pub fn create_post(&self, post: &NewPost) -> Result<Value, WpError> {
        self.api.post_json("wp/v2/posts", to_json(post)?)
    }

    /// Partially update a post: only the fields set on `update` are sent.
    pub fn update_post(&self, post_id: u64, update: &PostUpdate) -> Result<Value, WpError> {
        self.api
            .post_json(&format!("wp/v2/posts/{post_id}"), to_json(update)?)
    }

    /// Delete a post. `force` skips the trash and deletes permanently.
    pub fn delete_post(&self, post_id: u64, force: bool) -> Result<Value, WpError> {
        let query = vec![(
            "force".to_string(),
            if force { "true" } else { "false" }.to_string(),
        )];
        self.api.delete(&format!("wp/v2/posts/{post_id}"), query)
    }

    // Categories

    /// List categories.
    pub fn get_categories(&self, params: &ListParams) -> Result<Value, WpError> {
        self.api.get("wp/v2/categories", params.query_pairs())
    }

    // Tags

    /// List tags.
    pub fn get_tags(&self, params: &ListParams) -> Result<Value, WpError> {
        self.api.get("wp/v2/tags", params.query_pairs())
    }

    // Media

    /// Upload a file to the media library.
    ///
    /// The file's bytes are POSTed raw with a `Content-Disposition`
    /// attachment header; the MIME type is inferred from the extension,
    /// falling back to `application/octet-stream`. When `metadata` sets any
    /// field a second request attaches it to the created item. The two calls
    /// form one logical operation, but a metadata failure does not roll back
    /// the completed upload.
    pub fn upload_media(
        &self,
        path: impl AsRef<Path>,
        metadata: &MediaMetadata,
    ) -> Result<Value, WpError> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                WpError::InvalidInput(format!("invalid media file path: {}", path.display()))
            })?;
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let bytes = fs::read(path)?;

        tracing::debug!(file = %path.display(), mime = %mime, size = bytes.len(), "uploading media");

        let spec = RequestSpec::post("wp/v2/media")
            .header(
                "Content-Disposition",
                format!("attachment; filename=\"{filename}\""),
            )
            .header("Content-Type", mime.essence_str())
            .bytes(bytes);
        let uploaded = self.api.execute(spec)?;

        if metadata.is_empty() {
            return Ok(uploaded);
        }

        let media_id = uploaded
            .get("id")
            .and_then(Value::as_u64)
            .ok_or_else(|| WpError::UnexpectedResponse("upload response has no media id".into()))?;
        self.api
            .post_json(&format!("wp/v2/media/{media_id}"), to_json(metadata)?)
    }

    // Users

    /// List users.
    pub fn get_users(&self, params: &ListParams) -> Result<Value, WpError> {
        self.api.get("wp/v2/users", params.query_pairs())
    }

    /// Fetch the authenticated user. Doubles as a connectivity and
    /// credential probe.
    pub fn get_me(&self) -> Result<Value, WpError> {
        self.api.get("wp/v2/users/me", Vec::new())
    }

    // Comments

    /// List comments, optionally restricted to one post.
    pub fn get_comments(&self, params: &CommentListParams) -> Result<Value, WpError> {
        let mut query = params.list.query_pairs();
        if let Some(post_id) = params.post {
            query.push(("post".to_string(), post_id.to_string()));
        }
        self.api.get("wp/v2/comments", query)
    }
}

fn to_json<T: Serialize>(body: &T) -> Result<Value, WpError> {
    serde_json::to_value(body).map_err(|e| WpError::InvalidInput(e.to_string()))
}

/// Builder for [`WordPressClient`].
///
/// `base_url` and one authentication scheme are required; when both a
/// username/password pair and a token are supplied, the pair wins.
#[derive(Debug, Default)]
pub struct WordPressClientBuilder {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    token: Option<SecretString>,
    user_agent: Option<String>,
}

impl WordPressClientBuilder {
    /// Set the site's REST root, e.g. `https://example.com/wp-json`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Authenticate with HTTP Basic (application passwords).
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(SecretString::from(password.into()));
        self
    }

    /// Authenticate with a bearer token (JWT plugins).
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Override the user agent. Recommended when using application
    /// passwords, so requests are attributable.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client. Fails with [`WpError::Config`] when the base URL or
    /// both authentication schemes are missing; no network call is made.
    pub fn build(self) -> Result<WordPressClient, WpError> {
        let base_url = self
            .base_url
            .ok_or_else(|| WpError::Config("base URL is required".into()))?;
        let credentials = resolve_credentials(self.username, self.password, self.token)?;
        let authorization = credentials.authorization_header()?;
        let api = ApiClient::new(base_url, self.user_agent, Some(authorization))?;
        Ok(WordPressClient { api })
    }
}

fn resolve_credentials(
    username: Option<String>,
    password: Option<SecretString>,
    token: Option<SecretString>,
) -> Result<Credentials, WpError> {
    match (username, password, token) {
        (Some(username), Some(password), _) => Ok(Credentials::Basic { username, password }),
        (_, _, Some(token)) => Ok(Credentials::Bearer(token)),
        _ => Err(WpError::Config(
            "either a username/password pair or a bearer token is required".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_post_serializes_required_fields_only() {
        let body = serde_json::to_value(NewPost::new("T", "C")).unwrap();
        assert_eq!(body, json!({"title": "T", "content": "C", "status": "draft"}));
    }

    #[test]
    fn new_post_keeps_explicit_falsy_values() {
        let post = NewPost::new("T", "C").excerpt("").featured_media(0);
        let body = serde_json::to_value(post).unwrap();
        assert_eq!(body["excerpt"], "");
        assert_eq!(body["featured_media"], 0);
    }

    #[test]
    fn post_update_serializes_set_fields_only() {
        let body = serde_json::to_value(PostUpdate::default().title("New")).unwrap();
        assert_eq!(body, json!({"title": "New"}));
    }

    #[test]
    fn post_list_params_default_query() {
        let pairs = PostListParams::default().limit(5).page(2).query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("per_page".to_string(), "5".to_string()),
                ("page".to_string(), "2".to_string()),
                ("status".to_string(), "publish".to_string()),
            ]
        );
    }

    #[test]
    fn id_filters_are_comma_joined() {
        let pairs = PostListParams::default()
            .categories(vec![3, 14, 159])
            .query_pairs();
        let categories = pairs.iter().find(|(k, _)| k == "categories").unwrap();
        assert_eq!(categories.1, "3,14,159");
    }

    #[test]
    fn builder_requires_base_url() {
        let err = WordPressClient::builder()
            .basic_auth("user", "pass")
            .build()
            .unwrap_err();
        assert!(matches!(err, WpError::Config(_)));
    }

    #[test]
    fn builder_requires_credentials() {
        let err = WordPressClient::builder()
            .base_url("https://example.com/wp-json")
            .build()
            .unwrap_err();
        assert!(matches!(err, WpError::Config(_)));
    }

    #[test]
    fn basic_pair_wins_over_token() {
        let credentials = resolve_credentials(
            Some("user".into()),
            Some(SecretString::from("pass")),
            Some(SecretString::from("token")),
        )
        .unwrap();
        assert!(matches!(credentials, Credentials::Basic { .. }));
    }

    #[test]
    fn token_alone_is_bearer() {
        let credentials =
            resolve_credentials(None, None, Some(SecretString::from("token"))).unwrap();
        assert!(matches!(credentials, Credentials::Bearer(_)));
    }
}
