use crate::{
    AuthResponse, CreateUrlRequest, CreateUrlResponse, ListUrlsResponse, LoginRequest,
    RegisterRequest,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP methods the shortener API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Defines the request-response relationship and metadata for an API
/// endpoint, so the client can dispatch any request generically.
pub trait ApiRequest: Serialize + DeserializeOwned {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (joined onto the configured base address).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the bearer credential is attached when a session exists.
    const WITH_CREDENTIAL: bool;
}

// =========================================================
// Request Definitions
// =========================================================

/// Shorten a URL. No credential is required, but one is forwarded when
/// present so the backend can associate the link with its owner.
impl ApiRequest for CreateUrlRequest {
    type Response = CreateUrlResponse;
    const PATH: &'static str = "/api/create";
    const METHOD: HttpMethod = HttpMethod::Post;
    const WITH_CREDENTIAL: bool = true;
}

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/api/auth/login-user";
    const METHOD: HttpMethod = HttpMethod::Post;
    const WITH_CREDENTIAL: bool = false;
}

impl ApiRequest for RegisterRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/api/auth/register-user";
    const METHOD: HttpMethod = HttpMethod::Post;
    const WITH_CREDENTIAL: bool = false;
}

/// List the authenticated user's links.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListUrlsRequest;

impl ApiRequest for ListUrlsRequest {
    type Response = ListUrlsResponse;
    const PATH: &'static str = "/api/urls";
    const METHOD: HttpMethod = HttpMethod::Get;
    const WITH_CREDENTIAL: bool = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths_match_backend_contract() {
        assert_eq!(CreateUrlRequest::PATH, "/api/create");
        assert_eq!(LoginRequest::PATH, "/api/auth/login-user");
        assert_eq!(RegisterRequest::PATH, "/api/auth/register-user");
        assert_eq!(ListUrlsRequest::PATH, "/api/urls");
    }

    #[test]
    fn only_the_auth_endpoints_go_out_bare() {
        assert!(CreateUrlRequest::WITH_CREDENTIAL);
        assert!(ListUrlsRequest::WITH_CREDENTIAL);
        assert!(!LoginRequest::WITH_CREDENTIAL);
        assert!(!RegisterRequest::WITH_CREDENTIAL);
    }

    #[test]
    fn listing_is_the_only_get() {
        assert_eq!(ListUrlsRequest::METHOD, HttpMethod::Get);
        assert_eq!(CreateUrlRequest::METHOD, HttpMethod::Post);
        assert_eq!(LoginRequest::METHOD, HttpMethod::Post);
        assert_eq!(RegisterRequest::METHOD, HttpMethod::Post);
    }
}
