//! Request Executor
//!
//! Generic HTTP layer shared by every resource operation: builds absolute
//! URLs from a base URL and a relative endpoint, overlays default headers
//! with caller overrides, dispatches through one persistent blocking client
//! and normalizes the outcome into decoded JSON or a classified [`WpError`].
//!
//! There are no retries and no response caching; every failure is single-shot
//! and reported to the caller immediately.

use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};

use crate::error::WpError;

/// User agent sent when the caller does not supply one.
pub const DEFAULT_USER_AGENT: &str = concat!("wp-connect/", env!("CARGO_PKG_VERSION"));

/// Request body payload.
///
/// JSON bodies are encoded by the executor; raw bytes pass through unmodified
/// and the caller is responsible for setting `Content-Type` (media uploads).
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// JSON-serialized payload
    Json(serde_json::Value),
    /// Raw bytes, e.g. binary file content
    Bytes(Vec<u8>),
}

/// A single API request described as plain data.
///
/// Built by [`crate::WordPressClient`] methods and handed to
/// [`ApiClient::execute`].
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// HTTP method
    pub method: Method,
    /// Endpoint relative to the base URL, e.g. `wp/v2/posts`
    pub endpoint: String,
    /// Query parameters; list values are comma-joined by the caller
    pub query: Vec<(String, String)>,
    /// Optional request body
    pub body: Option<RequestBody>,
    /// Header overrides applied on top of the defaults, key-by-key
    pub headers: Vec<(String, String)>,
}

impl RequestSpec {
    /// Create a request spec with no query, body or header overrides.
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    /// Shorthand for a GET spec.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    /// Shorthand for a POST spec.
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    /// Shorthand for a DELETE spec.
    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Attach a raw byte body.
    pub fn bytes(mut self, body: Vec<u8>) -> Self {
        self.body = Some(RequestBody::Bytes(body));
        self
    }

    /// Override a header for this request only.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Join a base URL and a relative endpoint with exactly one slash,
/// regardless of trailing/leading slashes on either side.
fn join_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Generic request executor owning one persistent HTTP session.
///
/// The session is created at construction and reused across all calls. The
/// `Authorization` header, when present, lives on the session; per-request
/// defaults (`Content-Type`, `Accept`, `User-Agent`) are computed on each
/// call and overlaid with the spec's overrides.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    user_agent: String,
    http: Client,
}

impl ApiClient {
    /// Create an executor for `base_url`.
    ///
    /// `authorization` is installed as a session-wide default header.
    pub fn new(
        base_url: impl Into<String>,
        user_agent: Option<String>,
        authorization: Option<HeaderValue>,
    ) -> Result<Self, WpError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let mut session_headers = HeaderMap::new();
        if let Some(value) = authorization {
            session_headers.insert(AUTHORIZATION, value);
        }
        let http = Client::builder().default_headers(session_headers).build()?;
        Ok(Self {
            base_url,
            user_agent: user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            http,
        })
    }

    /// The base URL this executor was created with, trailing slash stripped.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a request and normalize the response.
    ///
    /// A 2xx response is decoded as JSON; an empty or non-JSON success body
    /// yields an empty object rather than an error, which tolerates
    /// empty-body success responses from some DELETE endpoints. A 4xx/5xx
    /// response becomes [`WpError::Api`] carrying the status and the decoded
    /// JSON detail when the body parses, the raw text otherwise.
    pub fn execute(&self, spec: RequestSpec) -> Result<serde_json::Value, WpError> {
        let url = join_url(&self.base_url, &spec.endpoint);
        let headers = self.effective_headers(&spec.headers)?;

        tracing::debug!(method = %spec.method, %url, "dispatching request");

        let mut request = self.http.request(spec.method, &url).headers(headers);
        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        match spec.body {
            Some(RequestBody::Json(value)) => request = request.json(&value),
            Some(RequestBody::Bytes(bytes)) => request = request.body(bytes),
            None => {}
        }

        let response = request.send()?;
        let status = response.status();
        let text = response.text()?;

        if status.is_success() {
            // Empty or non-JSON success bodies are tolerated.
            Ok(serde_json::from_str(&text)
                .unwrap_or_else(|_| serde_json::Value::Object(serde_json::Map::new())))
        } else {
            tracing::error!(status = status.as_u16(), %url, body = %text, "API request failed");
            Err(WpError::from_response(status.as_u16(), &text))
        }
    }

    /// GET `endpoint` with query parameters.
    pub fn get(
        &self,
        endpoint: &str,
        query: Vec<(String, String)>,
    ) -> Result<serde_json::Value, WpError> {
        let mut spec = RequestSpec::get(endpoint);
        spec.query = query;
        self.execute(spec)
    }

    /// POST a JSON body to `endpoint`.
    pub fn post_json(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, WpError> {
        self.execute(RequestSpec::post(endpoint).json(body))
    }

    /// PUT a JSON body to `endpoint`.
    pub fn put_json(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, WpError> {
        self.execute(RequestSpec::new(Method::PUT, endpoint).json(body))
    }

    /// DELETE `endpoint` with query parameters.
    pub fn delete(
        &self,
        endpoint: &str,
        query: Vec<(String, String)>,
    ) -> Result<serde_json::Value, WpError> {
        let mut spec = RequestSpec::delete(endpoint);
        spec.query = query;
        self.execute(spec)
    }

    /// Default headers overlaid with the caller's overrides, override winning
    /// key-by-key. Non-overridden defaults remain present.
    fn effective_headers(&self, overrides: &[(String, String)]) -> Result<HeaderMap, WpError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent)
                .map_err(|_| WpError::InvalidInput(format!("invalid user agent: {}", self.user_agent)))?,
        );

        for (name, value) in overrides {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| WpError::InvalidInput(format!("invalid header name: {name}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| WpError::InvalidInput(format!("invalid value for header {name}")))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }
}
