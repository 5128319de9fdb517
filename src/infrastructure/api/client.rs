//! FilaDB HTTP client.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::dto::{ErrorResponse, ValidationIssue};
use super::options::{RequestBody, RequestOptions};
use crate::domain::entities::AuthToken;
use crate::domain::errors::{ApiError, GENERIC_FAILURE_MESSAGE};
use crate::domain::ports::KeyValueStore;
use crate::infrastructure::storage::TOKEN_KEY;

/// Path prefix of every API endpoint.
pub const API_BASE_PATH: &str = "/api/v1";
/// Server used when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
const USER_AGENT: &str = concat!("filadb/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Scheme, host and port of the server, without trailing slash.
    pub server_url: String,
    /// API prefix appended to the server URL.
    pub base_path: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientSettings {
    /// Creates settings for a server with the default base path and timeout.
    #[must_use]
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into().trim_end_matches('/').to_string(),
            base_path: API_BASE_PATH.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    /// Sets the timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}

/// Single point of contact with the backend. Owns the access token.
///
/// One instance is shared by handle for the whole session.
pub struct ApiClient {
    http: Client,
    settings: ClientSettings,
    token: RwLock<Option<AuthToken>>,
    store: Arc<dyn KeyValueStore>,
}

impl ApiClient {
    /// Creates client. The stored token is not read until [`Self::load_stored_token`].
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(settings: ClientSettings, store: Arc<dyn KeyValueStore>) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            settings,
            token: RwLock::new(None),
            store,
        })
    }

    /// Returns a copy of the current token.
    #[must_use]
    pub fn token(&self) -> Option<AuthToken> {
        self.token.read().clone()
    }

    /// Returns whether requests will carry a bearer token.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.read().is_some()
    }

    /// Keeps the token for subsequent requests and persists it.
    ///
    /// The in-memory token is set even when persisting fails.
    ///
    /// # Errors
    /// Returns error if durable storage rejects the write.
    pub async fn set_token(&self, token: AuthToken) -> Result<(), ApiError> {
        let value = token.as_str().to_string();
        *self.token.write() = Some(token);
        self.store.set(TOKEN_KEY, &value).await?;
        debug!("Token persisted");
        Ok(())
    }

    /// Forgets the token in memory and in durable storage.
    ///
    /// # Errors
    /// Returns error if durable storage rejects the delete.
    pub async fn clear_token(&self) -> Result<(), ApiError> {
        self.token.write().take();
        self.store.delete(TOKEN_KEY).await?;
        debug!("Token cleared");
        Ok(())
    }

    /// Drops the in-memory token and keeps the persisted one.
    pub fn discard_token(&self) {
        if self.token.write().take().is_some() {
            debug!("Token discarded");
        }
    }

    /// Loads the persisted token into memory. Returns whether one was found.
    ///
    /// # Errors
    /// Returns error if durable storage cannot be read.
    pub async fn load_stored_token(&self) -> Result<bool, ApiError> {
        let stored = self.store.get(TOKEN_KEY).await?;
        let token = stored.and_then(AuthToken::new);
        let found = token.is_some();
        if found {
            debug!("Using stored token");
        }
        *self.token.write() = token;
        Ok(found)
    }

    /// Returns the absolute URL of an API endpoint.
    #[must_use]
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}{}{}",
            self.settings.server_url, self.settings.base_path, endpoint
        )
    }

    /// Builds the HTTP request for an endpoint without sending it.
    ///
    /// # Errors
    /// Returns error if the URL, a header or the body is invalid.
    pub fn build_request(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Request, ApiError> {
        let RequestOptions {
            method,
            headers: extra_headers,
            body,
            omit_content_type,
        } = options;

        let mut headers = HeaderMap::new();
        if !omit_content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        for (name, value) in &extra_headers {
            headers.insert(name.clone(), value.clone());
        }
        if let Some(token) = self.token.read().as_ref() {
            let mut value = HeaderValue::from_str(&token.bearer()).map_err(|_| {
                ApiError::invalid_token("token contains characters not allowed in a header")
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let builder = self
            .http
            .request(method, self.endpoint_url(endpoint))
            .headers(headers);

        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(
                serde_json::to_vec(&value)
                    .map_err(|e| ApiError::unexpected(format!("failed to encode body: {e}")))?,
            ),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        builder.build().map_err(ApiError::Transport)
    }

    /// Sends a request to an endpoint and returns the parsed JSON body.
    ///
    /// # Errors
    /// Returns [`ApiError::Http`] for non-2xx responses, with the server's
    /// `detail` as message when present and `HTTP <status>` otherwise.
    /// Transport failures are returned unchanged.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let request = self.build_request(endpoint, options)?;
        self.execute(request).await
    }

    /// Like [`Self::request`], deserializing the body into `T`.
    ///
    /// # Errors
    /// Same as [`Self::request`], plus [`ApiError::Decode`] on shape mismatch.
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let value = self.request(endpoint, options).await?;
        serde_json::from_value(value).map_err(|e| {
            warn!(endpoint, error = %e, "Unexpected response shape");
            ApiError::decode(e.to_string())
        })
    }

    /// Probes the server's `/health` route, outside the API base path.
    ///
    /// # Errors
    /// Returns error if the server is unreachable or unhealthy.
    pub async fn health_check(&self) -> Result<Value, ApiError> {
        let url = format!("{}/health", self.settings.server_url);
        let request = self.http.get(url).build().map_err(ApiError::Transport)?;
        let body = self.execute(request).await?;
        info!("Server is healthy");
        Ok(body)
    }

    async fn execute(&self, request: Request) -> Result<Value, ApiError> {
        let method = request.method().clone();
        let path = request.url().path().to_string();

        debug!(%method, %path, "Sending request");

        let response = self.http.execute(request).await.map_err(|e| {
            error!(error = %e, %method, %path, "API request failed");
            ApiError::Transport(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            error!(error = %e, %method, %path, "Failed to read response body");
            ApiError::Transport(e)
        })?;

        if !status.is_success() {
            let err = ApiError::http(status.as_u16(), error_message(status.as_u16(), &body));
            warn!(status = status.as_u16(), error = %err, %method, %path, "API request rejected");
            return Err(err);
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&body).map_err(|e| {
            warn!(error = %e, %method, %path, "Response body is not JSON");
            ApiError::decode(e.to_string())
        })
    }
}

/// Derives the user-facing message of a non-2xx response.
pub(crate) fn error_message(status: u16, body: &[u8]) -> String {
    let Ok(ErrorResponse {
        detail: Some(detail),
    }) = serde_json::from_slice::<ErrorResponse>(body)
    else {
        return format!("HTTP {status}");
    };

    match detail {
        Value::String(message) if !message.is_empty() => message,
        Value::String(_) => format!("HTTP {status}"),
        Value::Array(items) => {
            let messages: Vec<String> = items
                .into_iter()
                .filter_map(|item| serde_json::from_value::<ValidationIssue>(item).ok())
                .map(|issue| issue.msg)
                .collect();
            if messages.is_empty() {
                GENERIC_FAILURE_MESSAGE.to_string()
            } else {
                messages.join("; ")
            }
        }
        _ => GENERIC_FAILURE_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockKeyValueStore;
    use reqwest::Method;
    use serde_json::json;
    use test_case::test_case;

    fn make_client(store: Arc<MockKeyValueStore>) -> ApiClient {
        ApiClient::new(ClientSettings::new("http://filadb.test/"), store).unwrap()
    }

    #[test]
    fn test_endpoint_url_prefixes_base_path() {
        let client = make_client(Arc::new(MockKeyValueStore::new()));
        assert_eq!(
            client.endpoint_url("/auth/me"),
            "http://filadb.test/api/v1/auth/me"
        );
    }

    #[test]
    fn test_default_content_type_and_no_auth_without_token() {
        let client = make_client(Arc::new(MockKeyValueStore::new()));
        let request = client
            .build_request("/files", RequestOptions::get())
            .unwrap();

        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_caller_headers_override_default() {
        let client = make_client(Arc::new(MockKeyValueStore::new()));
        let options = RequestOptions::post()
            .header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        let request = client.build_request("/files", options).unwrap();

        assert_eq!(request.headers()[CONTENT_TYPE], "text/plain");
        assert_eq!(request.headers().get_all(CONTENT_TYPE).iter().count(), 1);
    }

    #[test]
    fn test_without_content_type_omits_header() {
        let client = make_client(Arc::new(MockKeyValueStore::new()));
        let request = client
            .build_request("/admin/sync/spoolmandb", RequestOptions::post().without_content_type())
            .unwrap();

        assert_eq!(request.method(), Method::POST);
        assert!(request.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_multipart_uses_transport_content_type() {
        let client = make_client(Arc::new(MockKeyValueStore::new()));
        let form = reqwest::multipart::Form::new().text("username", "a@b.com");
        let request = client
            .build_request("/auth/token", RequestOptions::post().multipart(form))
            .unwrap();

        let content_types: Vec<_> = request.headers().get_all(CONTENT_TYPE).iter().collect();
        assert_eq!(content_types.len(), 1);
        assert!(
            content_types[0]
                .to_str()
                .unwrap()
                .starts_with("multipart/form-data; boundary=")
        );
    }

    #[tokio::test]
    async fn test_token_lifecycle_controls_authorization_header() {
        let store = Arc::new(MockKeyValueStore::new());
        let client = make_client(store.clone());

        client.set_token(AuthToken::new_unchecked("t")).await.unwrap();
        assert_eq!(store.peek(TOKEN_KEY).as_deref(), Some("t"));
        let request = client.build_request("/auth/me", RequestOptions::get()).unwrap();
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer t");
        assert!(request.headers()[AUTHORIZATION].is_sensitive());

        client.clear_token().await.unwrap();
        assert_eq!(store.peek(TOKEN_KEY), None);
        let request = client.build_request("/auth/me", RequestOptions::get()).unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_set_token_keeps_memory_copy_when_store_fails() {
        let store = Arc::new(MockKeyValueStore::new());
        store.set_fail_writes(true);
        let client = make_client(store);

        let result = client.set_token(AuthToken::new_unchecked("t")).await;

        assert!(matches!(result, Err(ApiError::Storage(_))));
        assert!(client.has_token());
    }

    #[tokio::test]
    async fn test_load_stored_token() {
        let store = Arc::new(MockKeyValueStore::with_value(TOKEN_KEY, "stored"));
        let client = make_client(store);

        assert!(!client.has_token());
        assert!(client.load_stored_token().await.unwrap());
        assert_eq!(client.token().unwrap().as_str(), "stored");
    }

    #[tokio::test]
    async fn test_discard_token_keeps_store() {
        let store = Arc::new(MockKeyValueStore::with_value(TOKEN_KEY, "stored"));
        let client = make_client(store.clone());
        client.load_stored_token().await.unwrap();

        client.discard_token();

        assert!(!client.has_token());
        assert_eq!(store.peek(TOKEN_KEY).as_deref(), Some("stored"));
    }

    #[tokio::test]
    async fn test_load_blank_stored_token_is_ignored() {
        let store = Arc::new(MockKeyValueStore::with_value(TOKEN_KEY, "  "));
        let client = make_client(store);

        assert!(!client.load_stored_token().await.unwrap());
        assert!(!client.has_token());
    }

    #[test]
    fn test_json_body_is_serialized() {
        let client = make_client(Arc::new(MockKeyValueStore::new()));
        let request = client
            .build_request(
                "/inventory/filaments",
                RequestOptions::post().json(json!({"material": "PLA"})),
            )
            .unwrap();

        let body = request.body().and_then(reqwest::Body::as_bytes).unwrap();
        assert_eq!(body, br#"{"material":"PLA"}"#);
    }

    #[test_case(404, br#"{"detail":"Spool not found"}"#, "Spool not found" ; "detail_string")]
    #[test_case(500, b"<html>oops</html>", "HTTP 500" ; "non_json")]
    #[test_case(502, b"", "HTTP 502" ; "empty_body")]
    #[test_case(400, br#"{"error":"x"}"#, "HTTP 400" ; "json_without_detail")]
    #[test_case(400, br#"{"detail":""}"#, "HTTP 400" ; "empty_detail")]
    #[test_case(400, br#"{"detail":null}"#, "HTTP 400" ; "null_detail")]
    #[test_case(422, br#"{"detail":[{"loc":["body","email"],"msg":"field required"},{"msg":"value is not a valid integer"}]}"#, "field required; value is not a valid integer" ; "validation_list")]
    #[test_case(400, br#"{"detail":{"code":7}}"#, "Request failed" ; "object_detail")]
    fn test_error_message(status: u16, body: &[u8], expected: &str) {
        assert_eq!(error_message(status, body), expected);
    }
}
