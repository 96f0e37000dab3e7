//! Authenticated session against an ArchivesSpace backend.
//!
//! [`Session::login`] posts the user's credentials to
//! `/users/{user}/login` and keeps the returned session token. Every
//! subsequent request carries it in the `X-ArchivesSpace-Session`
//! header. The generic [`get`](Session::get),
//! [`post_json`](Session::post_json) and [`delete`](Session::delete)
//! helpers are what resource clients build on.

use serde::Deserialize;

/// Header carrying the session token on every authenticated request.
const SESSION_HEADER: &str = "X-ArchivesSpace-Session";

/// An authenticated connection to one ArchivesSpace backend.
#[derive(Debug)]
pub struct Session {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

/// Errors from establishing a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend rejected the credentials.
    #[error("login rejected ({status}): {body}")]
    Denied {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Body of a successful login response.
#[derive(Debug, Deserialize)]
struct LoginReply {
    session: String,
}

impl Session {
    /// Authenticate against the backend at `base_url`.
    ///
    /// Sends `POST /users/{username}/login` with the password as a
    /// query parameter, per the ArchivesSpace authentication contract.
    pub async fn login(
        base_url: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, SessionError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{base_url}/users/{username}/login"))
            .query(&[("password", password)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SessionError::Denied {
                status: status.as_u16(),
                body,
            });
        }

        let reply: LoginReply = response.json().await?;

        tracing::info!(base_url = %base_url, username, "Authenticated against ArchivesSpace");

        Ok(Self {
            client,
            base_url,
            token: reply.session,
        })
    }

    /// Build a session from an already-issued token, skipping login.
    pub fn with_token(base_url: &str, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Base URL of the backend (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send an authenticated GET to `path_and_query`.
    pub async fn get(&self, path_and_query: &str) -> Result<reqwest::Response, reqwest::Error> {
        self.client
            .get(self.url(path_and_query))
            .header(SESSION_HEADER, &self.token)
            .send()
            .await
    }

    /// Send an authenticated POST with a JSON body to `path`.
    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.client
            .post(self.url(path))
            .header(SESSION_HEADER, &self.token)
            .json(body)
            .send()
            .await
    }

    /// Send an authenticated DELETE to `path`.
    pub async fn delete(&self, path: &str) -> Result<reqwest::Response, reqwest::Error> {
        self.client
            .delete(self.url(path))
            .header(SESSION_HEADER, &self.token)
            .send()
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
