//! REST client for the shortener backend.
//!
//! A client value is cheap and built per action: the base address from build
//! configuration, the credential read from the session at action time, and
//! the abort handle of the issuing view. Endpoint metadata (path, method,
//! whether the bearer credential travels along) lives on the request types
//! in `shortly_shared::protocol`, so one `send` covers every operation.

use gloo_net::http::{Request, Response};
use shortly_shared::protocol::{ApiRequest, HttpMethod, ListUrlsRequest};
use shortly_shared::{
    ApiErrorBody, AuthResponse, CreateUrlRequest, HEADER_AUTHORIZATION, LoginRequest,
    RegisterRequest, ShortLink, bearer,
};

use crate::web::AbortHandle;

/// Shown when the server gives nothing usable.
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";
const CREATE_FAILED: &str = "Failed to create short URL";

/// Base address of the shortener backend, fixed at build time through
/// `SHORTLY_API_URL`. Local development talks to the dev server.
pub fn api_base_url() -> String {
    option_env!("SHORTLY_API_URL")
        .unwrap_or("http://localhost:3000")
        .trim_end_matches('/')
        .to_string()
}

/// The shareable address for a short code.
pub fn shareable_url(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}

// =========================================================
// Errors
// =========================================================

/// What went wrong with a request.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request could not be built (body serialization).
    BuildFailed(String),
    /// The request never produced a response (offline, DNS, abort).
    Network(String),
    /// The server answered and said no.
    Server { status: u16, message: Option<String> },
    /// A success response whose body this client cannot read.
    Decode(String),
}

impl ApiError {
    /// Inline text for the initiating form: the server's words when it gave
    /// any, else the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server {
                message: Some(message),
                ..
            } => message.clone(),
            _ => GENERIC_ERROR.to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BuildFailed(detail) => write!(f, "request build failed: {detail}"),
            Self::Network(detail) => write!(f, "network error: {detail}"),
            Self::Server {
                status,
                message: Some(message),
            } => write!(f, "server rejected ({status}): {message}"),
            Self::Server {
                status,
                message: None,
            } => write!(f, "server rejected ({status})"),
            Self::Decode(detail) => write!(f, "unreadable response: {detail}"),
        }
    }
}

// =========================================================
// Client
// =========================================================

/// Outcome of a successful login or registration.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub token: String,
    pub display_name: Option<String>,
}

#[derive(Clone)]
pub struct ShortlyApi {
    base_url: String,
    token: Option<String>,
    abort: AbortHandle,
}

impl ShortlyApi {
    /// `token` is whatever the session holds at action time; `None` issues
    /// unauthenticated requests.
    pub fn new(base_url: String, token: Option<String>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            token,
            abort: AbortHandle::default(),
        }
    }

    /// Ties every request from this client to a view's abort handle.
    pub fn with_abort(mut self, abort: AbortHandle) -> Self {
        self.abort = abort;
        self
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub fn shareable_url(&self, code: &str) -> String {
        shareable_url(&self.base_url, code)
    }

    /// Shortens `long_url`, returning the assigned short code. Callers
    /// validate non-emptiness before dispatch.
    pub async fn create_short_url(&self, long_url: &str) -> Result<String, ApiError> {
        let request = CreateUrlRequest {
            url: long_url.to_string(),
        };
        let body = self.send(&request).await?;

        match body.code() {
            Some(code) => Ok(code.to_string()),
            // The backend reports some create failures inside a 2xx body
            None => Err(ApiError::Server {
                status: 200,
                message: Some(body.error.unwrap_or_else(|| CREATE_FAILED.to_string())),
            }),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.send(&request).await?;
        Self::auth_session(response)
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ApiError> {
        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.send(&request).await?;
        Self::auth_session(response)
    }

    /// The authenticated user's links, in the order the backend returns
    /// them.
    pub async fn list_urls(&self) -> Result<Vec<ShortLink>, ApiError> {
        let response = self.send(&ListUrlsRequest).await?;
        Ok(response.urls)
    }

    /// A 2xx auth response without a credential is still a failure.
    fn auth_session(response: AuthResponse) -> Result<AuthSession, ApiError> {
        match response.credential() {
            Some(token) => Ok(AuthSession {
                token: token.to_string(),
                display_name: response.display_name().map(str::to_string),
            }),
            None => Err(ApiError::Server {
                status: 200,
                message: None,
            }),
        }
    }

    /// One round trip for any endpoint the protocol describes.
    async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        let url = self.url(R::PATH);

        let mut builder = match R::METHOD {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
        }
        .abort_signal(self.abort.signal());

        if R::WITH_CREDENTIAL {
            if let Some(token) = &self.token {
                builder = builder.header(HEADER_AUTHORIZATION, &bearer(token));
            }
        }

        let sent = match R::METHOD {
            HttpMethod::Get => builder.send().await,
            HttpMethod::Post => {
                builder
                    .json(request)
                    .map_err(|e| ApiError::BuildFailed(e.to_string()))?
                    .send()
                    .await
            }
        };
        let response = sent.map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(Self::rejection(response).await);
        }

        response
            .json::<R::Response>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Reads whatever error text the failure body carries.
    async fn rejection(response: Response) -> ApiError {
        let status = response.status();
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.text().map(str::to_string));
        ApiError::Server { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_join_handles_slashes_either_way() {
        let api = ShortlyApi::new("http://localhost:3000/".to_string(), None);
        assert_eq!(api.url("/api/create"), "http://localhost:3000/api/create");
        assert_eq!(api.url("api/create"), "http://localhost:3000/api/create");

        let bare = ShortlyApi::new("https://short.ly".to_string(), None);
        assert_eq!(bare.url("/api/urls"), "https://short.ly/api/urls");
    }

    #[test]
    fn shareable_url_is_base_slash_code() {
        assert_eq!(
            shareable_url("https://short.ly", "abc123"),
            "https://short.ly/abc123"
        );
        assert_eq!(
            shareable_url("https://short.ly/", "abc123"),
            "https://short.ly/abc123"
        );

        let api = ShortlyApi::new("https://short.ly".to_string(), None);
        assert_eq!(api.shareable_url("abc123"), "https://short.ly/abc123");
    }

    #[test]
    fn user_message_prefers_the_server_text() {
        let rejected = ApiError::Server {
            status: 400,
            message: Some("Invalid URL".to_string()),
        };
        assert_eq!(rejected.user_message(), "Invalid URL");

        let bare = ApiError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(bare.user_message(), GENERIC_ERROR);
        assert_eq!(
            ApiError::Network("offline".to_string()).user_message(),
            GENERIC_ERROR
        );
        assert_eq!(
            ApiError::Decode("bad json".to_string()).user_message(),
            GENERIC_ERROR
        );
    }

    #[test]
    fn auth_session_requires_a_credential() {
        let ok = ShortlyApi::auth_session(AuthResponse {
            token: Some("t1".to_string()),
            user: Some(shortly_shared::AuthUser {
                name: Some("A".to_string()),
                email: Some("a@b.com".to_string()),
            }),
        })
        .unwrap();
        assert_eq!(ok.token, "t1");
        assert_eq!(ok.display_name.as_deref(), Some("A"));

        assert!(ShortlyApi::auth_session(AuthResponse::default()).is_err());
        assert!(
            ShortlyApi::auth_session(AuthResponse {
                token: Some(String::new()),
                user: None,
            })
            .is_err()
        );
    }

    #[test]
    fn base_url_never_keeps_a_trailing_slash() {
        assert!(!api_base_url().ends_with('/'));
    }
}
