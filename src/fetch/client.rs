//! Vendor API client
//!
//! Thin JSON-over-HTTP client shared by every integration. It owns timeouts
//! and turns HTTP outcomes into [`FetchError`] variants; retrying is left to
//! the caller.

use std::time::Duration;

use reqwest::header::{HeaderValue, RETRY_AFTER};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{FetchError, FetchResult};

#[derive(Debug, Clone)]
enum Credentials {
    None,
    Bearer(String),
    Basic { username: String, password: String },
}

/// JSON client bound to one vendor base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
    timeout: Duration,
}

impl ApiClient {
    /// Creates a client for `base_url` with a default per-request timeout.
    ///
    /// Returns [`FetchError::Config`] when the URL is empty or unparseable.
    pub fn new(base_url: &str, timeout: Duration) -> FetchResult<Self> {
        if base_url.trim().is_empty() {
            return Err(FetchError::Config("base URL is not set".to_string()));
        }
        Url::parse(base_url)
            .map_err(|e| FetchError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;

        let http = Client::builder()
            .build()
            .map_err(|e| FetchError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: Credentials::None,
            timeout,
        })
    }

    /// Sends `Authorization: Bearer <token>` (GitLab, GitHub, Adobe).
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = Credentials::Bearer(token.into());
        self
    }

    /// Sends HTTP basic auth (Jira email + API token).
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Credentials::Basic {
            username: username.into(),
            password: password.into(),
        };
        self
    }

    /// Copy of this client using `timeout`, for heavy aggregate queries.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout,
            ..self.clone()
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET path?query`, decoded as JSON.
    pub async fn get_json<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> FetchResult<Value> {
        let request = self.request(Method::GET, path).query(query);
        self.send(request).await
    }

    /// `POST path` with a JSON body, decoded as JSON.
    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> FetchResult<Value> {
        let request = self.request(Method::POST, path).json(body);
        self.send(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .timeout(self.timeout);

        match &self.credentials {
            Credentials::None => builder,
            Credentials::Bearer(token) => builder.bearer_auth(token),
            Credentials::Basic { username, password } => builder.basic_auth(username, Some(password)),
        }
    }

    async fn send(&self, request: RequestBuilder) -> FetchResult<Value> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        debug!(url = %response.url(), status = response.status().as_u16(), "Vendor API response");
        self.decode(response).await
    }

    async fn decode(&self, response: Response) -> FetchResult<Value> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = parse_retry_after(response.headers().get(RETRY_AFTER));
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::RateLimited {
                retry_after,
                message: error_message(status, &body),
            });
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Auth(error_message(status, &body)));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Http {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            // 204 and empty 200s are valid, empty results
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn transport_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// Parses a `Retry-After` header given in seconds.
///
/// HTTP-date values and garbage yield `None`, leaving the wait to the retry
/// policy's fallback.
pub fn parse_retry_after(value: Option<&HeaderValue>) -> Option<Duration> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(Duration::from_secs_f64)
}

fn error_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        status.to_string()
    } else {
        format!("{}: {}", status, body)
    }
}
